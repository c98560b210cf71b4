//! Cycle hebdomadaire et helpers de dates `YYYY/MM/DD`.
//!
//! Aucune conversion de calendrier ici : les dates sont des libellés triables
//! fournis par l'appelant, et la semaine est un cycle fixe samedi → vendredi.

use crate::model::DayRecord;
use chrono::Weekday;

/// Cycle fixe des jours. Le premier libellé ouvre la semaine de supervision,
/// le dernier est le jour de repos marqué férié par défaut.
pub const WEEK_CYCLE: [Weekday; 7] = [
    Weekday::Sat,
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

pub const WEEK_START: Weekday = WEEK_CYCLE[0];
pub const REST_DAY: Weekday = WEEK_CYCLE[6];

/// Offset utilisé quand aucun historique n'existe.
pub const DEFAULT_START_OFFSET: u8 = 6;

/// Jour de la semaine du `i`-ème jour généré à partir de `offset`.
pub fn weekday_at(offset: u8, i: usize) -> Weekday {
    WEEK_CYCLE[(usize::from(offset) + i) % WEEK_CYCLE.len()]
}

/// Position d'un jour dans le cycle (0 = samedi).
pub fn cycle_position(day: Weekday) -> u8 {
    // samedi vaut 5 depuis lundi
    ((day.num_days_from_monday() + 2) % 7) as u8
}

/// Offset du jour qui suit le dernier enregistrement de l'historique.
pub fn next_weekday_offset(history: &[DayRecord]) -> u8 {
    history
        .last()
        .map(|last| (cycle_position(last.weekday) + 1) % 7)
        .unwrap_or(DEFAULT_START_OFFSET)
}

/// Nombre de jours d'un mois selon son code (`"01"`..`"12"`).
///
/// Six mois de 31 jours, cinq de 30, le dernier à 29 (30 en année bissextile).
/// Un code illisible retombe sur 30.
pub fn days_in_month(month_code: &str, leap: bool) -> u32 {
    match month_code.trim().parse::<u32>() {
        Ok(1..=6) => 31,
        Ok(7..=11) => 30,
        Ok(12) if leap => 30,
        Ok(12) => 29,
        _ => 30,
    }
}

pub fn date_label(year: i32, month_code: &str, day: u32) -> String {
    format!("{year}/{month_code}/{day:02}")
}

/// Clé `YYYY/MM` d'un mois (verrouillage).
pub fn month_key(year: i32, month_code: &str) -> String {
    format!("{year}/{month_code}")
}

/// Préfixe `YYYY/MM/` partagé par toutes les dates d'un mois.
pub fn month_prefix(year: i32, month_code: &str) -> String {
    format!("{year}/{month_code}/")
}
