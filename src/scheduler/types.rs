use crate::model::{DayRecord, Duty};
use std::fmt;
use thiserror::Error;

/// Pondération des gardes (heures et majoration de nuit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftWeights {
    pub day_hours: f64,
    pub night_hours: f64,
    pub night_multiplier: f64,
}

impl Default for ShiftWeights {
    fn default() -> Self {
        Self {
            day_hours: 11.0,
            night_hours: 13.0,
            night_multiplier: 1.5,
        }
    }
}

impl ShiftWeights {
    pub fn day_score(&self) -> f64 {
        self.day_hours
    }
    pub fn night_score(&self) -> f64 {
        self.night_hours * self.night_multiplier
    }
}

/// Paramètres d'un bloc à générer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub year: i32,
    pub month_code: String,
    /// Position du premier jour dans le cycle hebdomadaire (0..=6).
    pub start_offset: u8,
    pub day_count: u32,
}

/// Relâchement d'une règle d'adjacence faute de candidat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relaxation {
    pub date: String,
    pub duty: Duty,
    pub worker: String,
}

/// Résultat d'une génération : les jours et les relâchements éventuels.
#[derive(Debug, Clone, Default)]
pub struct GeneratedBlock {
    pub days: Vec<DayRecord>,
    pub relaxations: Vec<Relaxation>,
    /// Violations à la jonction avec le mois suivant déjà stocké
    /// (régénération uniquement).
    pub conflicts: Vec<Conflict>,
}

/// Motif de refus d'un échange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    DateNotFound,
    /// Déjà sur l'autre garde le même jour.
    DoubleDuty,
    /// De nuit la veille, doit se reposer.
    NeedsRest,
    ConsecutiveNights,
    /// De jour le lendemain d'une nuit demandée.
    NextDayConflict,
}

impl SwapRejection {
    pub fn reason(&self) -> &'static str {
        match self {
            SwapRejection::DateNotFound => "date not found",
            SwapRejection::DoubleDuty => "double duty",
            SwapRejection::NeedsRest => "needs rest",
            SwapRejection::ConsecutiveNights => "back-to-back nights",
            SwapRejection::NextDayConflict => "next-day day-shift conflict",
        }
    }
}

impl fmt::Display for SwapRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapVerdict {
    Valid,
    Invalid(SwapRejection),
}

impl SwapVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, SwapVerdict::Valid)
    }

    pub fn reason(&self) -> Option<&'static str> {
        match self {
            SwapVerdict::Valid => None,
            SwapVerdict::Invalid(r) => Some(r.reason()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    DoubleDuty,        // jour et nuit le même jour
    ConsecutiveNights, // deux nuits d'affilée
    NoRestAfterNight,  // jour au lendemain d'une nuit
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::DoubleDuty => "double",
            ConflictKind::ConsecutiveNights => "nights",
            ConflictKind::NoRestAfterNight => "rest",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub worker: String,
    pub date_a: String,
    pub date_b: String,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("no active coverage-eligible worker in roster")]
    NoCoverageWorkers,
    #[error("weekday offset out of range: {0} (expected 0..=6)")]
    InvalidWeekdayOffset(u8),
    #[error("unknown date: {0}")]
    UnknownDate(String),
    #[error("swap invalid: {0}")]
    SwapInvalid(SwapRejection),
    #[error("month {0} already generated (use regenerate)")]
    MonthAlreadyGenerated(String),
    #[error("month {month} would be stored after {last}")]
    MonthOutOfOrder { month: String, last: String },
    #[error("{0}: month is locked")]
    MonthLocked(String),
}
