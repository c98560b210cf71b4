use super::types::{SwapRejection, SwapVerdict};
use super::util;
use crate::model::{DayRecord, Duty};

/// Vérifie qu'affecter `candidate` à la garde `duty` du `date` respecte les
/// règles d'adjacence. Lecture seule ; la première règle violée l'emporte.
pub fn validate_swap(days: &[DayRecord], date: &str, candidate: &str, duty: Duty) -> SwapVerdict {
    let Some(idx) = util::find_day_index(days, date) else {
        return SwapVerdict::Invalid(SwapRejection::DateNotFound);
    };
    let current = &days[idx];
    let (prev, next) = util::neighbours(days, idx);
    let night_before = prev.is_some_and(|p| p.night_worker == candidate);

    let rejection = match duty {
        Duty::Day => {
            if current.night_worker == candidate {
                Some(SwapRejection::DoubleDuty)
            } else if night_before {
                Some(SwapRejection::NeedsRest)
            } else {
                None
            }
        }
        Duty::Night => {
            if current.day_worker == candidate {
                Some(SwapRejection::DoubleDuty)
            } else if night_before {
                Some(SwapRejection::ConsecutiveNights)
            } else if next.is_some_and(|n| n.day_worker == candidate) {
                Some(SwapRejection::NextDayConflict)
            } else {
                None
            }
        }
    };

    rejection.map_or(SwapVerdict::Valid, SwapVerdict::Invalid)
}
