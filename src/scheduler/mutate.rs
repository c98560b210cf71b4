use super::types::{SchedError, SwapVerdict};
use super::{util, validate};
use crate::model::{DayRecord, Duty};
use tracing::info;

/// Applique un échange validé. La première fois qu'un créneau change de
/// titulaire, l'ancien est conservé dans `original_*`.
pub(super) fn apply_swap(
    days: &mut [DayRecord],
    date: &str,
    candidate: &str,
    duty: Duty,
) -> Result<(), SchedError> {
    let Some(pos) = util::find_day_index(days, date) else {
        return Err(SchedError::UnknownDate(date.to_owned()));
    };

    if let SwapVerdict::Invalid(rejection) = validate::validate_swap(days, date, candidate, duty) {
        return Err(SchedError::SwapInvalid(rejection));
    }

    let day = &mut days[pos];
    let (slot, original) = match duty {
        Duty::Day => (&mut day.day_worker, &mut day.original_day_worker),
        Duty::Night => (&mut day.night_worker, &mut day.original_night_worker),
    };
    if original.is_none() && slot.as_str() != candidate {
        *original = Some(slot.clone());
    }
    let previous = std::mem::replace(slot, candidate.to_owned());

    info!(%date, ?duty, from = %previous, to = %candidate, "swap applied");
    Ok(())
}

pub(super) fn set_supervisor(
    days: &mut [DayRecord],
    date: &str,
    supervisor: &str,
) -> Result<(), SchedError> {
    let Some(pos) = util::find_day_index(days, date) else {
        return Err(SchedError::UnknownDate(date.to_owned()));
    };
    days[pos].supervisor = supervisor.to_owned();
    Ok(())
}

/// Bascule le drapeau férié et renvoie la nouvelle valeur.
pub(super) fn toggle_holiday(days: &mut [DayRecord], date: &str) -> Result<bool, SchedError> {
    let Some(pos) = util::find_day_index(days, date) else {
        return Err(SchedError::UnknownDate(date.to_owned()));
    };
    let day = &mut days[pos];
    day.holiday = !day.holiday;
    Ok(day.holiday)
}
