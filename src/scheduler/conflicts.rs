use super::{Conflict, ConflictKind};
use crate::model::DayRecord;

/// Parcourt tout le planning et relève chaque violation d'adjacence.
pub(super) fn detect_conflicts(days: &[DayRecord]) -> Vec<Conflict> {
    let mut out = Vec::new();

    for day in days {
        if day.day_worker == day.night_worker {
            out.push(Conflict {
                worker: day.day_worker.clone(),
                date_a: day.date.clone(),
                date_b: day.date.clone(),
                kind: ConflictKind::DoubleDuty,
            });
        }
    }

    for pair in days.windows(2) {
        let [prev, next] = pair else { continue };
        out.extend(seam_conflicts(prev, next));
    }

    out
}

/// Règles entre deux jours consécutifs : la nuit de `prev` ne peut être
/// suivie ni d'une nuit ni d'un jour pour le même membre.
pub(super) fn seam_conflicts(prev: &DayRecord, next: &DayRecord) -> Vec<Conflict> {
    let conflict = |kind| Conflict {
        worker: prev.night_worker.clone(),
        date_a: prev.date.clone(),
        date_b: next.date.clone(),
        kind,
    };
    let mut out = Vec::new();
    if prev.night_worker == next.night_worker {
        out.push(conflict(ConflictKind::ConsecutiveNights));
    }
    if prev.night_worker == next.day_worker {
        out.push(conflict(ConflictKind::NoRestAfterNight));
    }
    out
}
