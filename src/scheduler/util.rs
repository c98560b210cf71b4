use crate::model::DayRecord;

pub(super) fn find_day_index(days: &[DayRecord], date: &str) -> Option<usize> {
    days.iter().position(|d| d.date == date)
}

/// Voisins positionnels (veille, lendemain) d'un index.
pub(super) fn neighbours(
    days: &[DayRecord],
    idx: usize,
) -> (Option<&DayRecord>, Option<&DayRecord>) {
    let prev = idx.checked_sub(1).and_then(|i| days.get(i));
    let next = days.get(idx + 1);
    (prev, next)
}
