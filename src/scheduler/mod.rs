mod conflicts;
mod generate;
mod history;
mod mutate;
mod types;
mod util;
mod validate;

pub use history::{aggregate_history, WorkerLoad};
pub use types::{
    Conflict, ConflictKind, GenerateRequest, GeneratedBlock, Relaxation, SchedError,
    ShiftWeights, SwapRejection, SwapVerdict,
};
pub use validate::validate_swap;

use crate::calendar;
use crate::model::{DayRecord, Duty, Roster, Worker};
use tracing::{info, warn};

/// Génère un bloc de jours à la suite de `history`. Fonction pure : les
/// entrées sont empruntées, jamais copiées ni modifiées.
pub fn generate_block(
    req: &GenerateRequest,
    history: &[DayRecord],
    workers: &[Worker],
    weights: &ShiftWeights,
) -> Result<GeneratedBlock, SchedError> {
    generate::generate_block(req, history, workers, weights)
}

pub fn apply_swap(
    days: &mut [DayRecord],
    date: &str,
    candidate: &str,
    duty: Duty,
) -> Result<(), SchedError> {
    mutate::apply_swap(days, date, candidate, duty)
}

pub fn detect_conflicts(days: &[DayRecord]) -> Vec<Conflict> {
    conflicts::detect_conflicts(days)
}

/// Scheduler : encapsule un Roster (membres + planning)
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            roster: Roster::default(),
        }
    }

    pub fn with_roster(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn add_workers(&mut self, workers: Vec<Worker>) {
        self.roster.workers.extend(workers);
    }

    /// Génère le mois complet à la suite du planning et l'ajoute.
    /// Renvoie les relâchements éventuels.
    ///
    /// Refuse un mois verrouillé, déjà présent, ou qui se trierait avant le
    /// dernier jour stocké.
    pub fn generate_month(
        &mut self,
        year: i32,
        month_code: &str,
        leap: bool,
        weights: &ShiftWeights,
    ) -> Result<GeneratedBlock, SchedError> {
        let key = calendar::month_key(year, month_code);
        if self.roster.is_locked(&key) {
            return Err(SchedError::MonthLocked(key));
        }
        let prefix = calendar::month_prefix(year, month_code);
        if self.roster.days.iter().any(|d| d.date.starts_with(&prefix)) {
            return Err(SchedError::MonthAlreadyGenerated(key));
        }
        if let Some(last) = self.roster.days.last() {
            if last.date > prefix {
                return Err(SchedError::MonthOutOfOrder {
                    month: key,
                    last: last.date.clone(),
                });
            }
        }

        let req = GenerateRequest {
            year,
            month_code: month_code.to_owned(),
            start_offset: calendar::next_weekday_offset(&self.roster.days),
            day_count: calendar::days_in_month(month_code, leap),
        };
        let block = generate::generate_block(
            &req,
            &self.roster.days,
            &self.roster.workers,
            weights,
        )?;
        self.roster.days.extend(block.days.iter().cloned());
        Ok(block)
    }

    /// Supprime le mois puis le régénère à partir de l'historique restant.
    /// Les modifications manuelles du mois sont perdues.
    ///
    /// Les mois suivants sont conservés tels quels ; une violation à la
    /// jonction avec le premier d'entre eux est renvoyée dans
    /// `GeneratedBlock::conflicts`.
    pub fn regenerate_month(
        &mut self,
        year: i32,
        month_code: &str,
        leap: bool,
        weights: &ShiftWeights,
    ) -> Result<GeneratedBlock, SchedError> {
        let key = calendar::month_key(year, month_code);
        if self.roster.is_locked(&key) {
            return Err(SchedError::MonthLocked(key));
        }
        let prefix = calendar::month_prefix(year, month_code);
        let (before, after): (Vec<DayRecord>, Vec<DayRecord>) = self
            .roster
            .days
            .iter()
            .filter(|d| !d.date.starts_with(&prefix))
            .cloned()
            .partition(|d| d.date < prefix);

        let req = GenerateRequest {
            year,
            month_code: month_code.to_owned(),
            start_offset: calendar::next_weekday_offset(&before),
            day_count: calendar::days_in_month(month_code, leap),
        };
        let mut block = generate::generate_block(&req, &before, &self.roster.workers, weights)?;

        if let (Some(last), Some(next)) = (block.days.last(), after.first()) {
            block.conflicts = conflicts::seam_conflicts(last, next);
        }
        for c in &block.conflicts {
            warn!(
                worker = %c.worker,
                from = %c.date_a,
                to = %c.date_b,
                kind = c.kind.as_str(),
                "regenerated month breaks adjacency with the following month"
            );
        }

        let mut days = before;
        days.extend(block.days.iter().cloned());
        days.extend(after);
        self.roster.days = days;
        Ok(block)
    }

    /// Verrouille un mois. Renvoie `false` s'il l'était déjà.
    pub fn lock_month(&mut self, year: i32, month_code: &str) -> bool {
        let key = calendar::month_key(year, month_code);
        info!(month = %key, "month locked");
        self.roster.locked_months.insert(key)
    }

    /// Déverrouille un mois. Renvoie `false` s'il n'était pas verrouillé.
    pub fn unlock_month(&mut self, year: i32, month_code: &str) -> bool {
        let key = calendar::month_key(year, month_code);
        info!(month = %key, "month unlocked");
        self.roster.locked_months.remove(&key)
    }

    pub fn is_month_locked(&self, year: i32, month_code: &str) -> bool {
        self.roster.is_locked(&calendar::month_key(year, month_code))
    }

    fn ensure_unlocked(&self, date: &str) -> Result<(), SchedError> {
        if self.roster.is_locked(date) {
            return Err(SchedError::MonthLocked(date.to_owned()));
        }
        Ok(())
    }

    pub fn validate_swap(&self, date: &str, candidate: &str, duty: Duty) -> SwapVerdict {
        validate::validate_swap(&self.roster.days, date, candidate, duty)
    }

    pub fn apply_swap(&mut self, date: &str, candidate: &str, duty: Duty) -> Result<(), SchedError> {
        self.ensure_unlocked(date)?;
        mutate::apply_swap(&mut self.roster.days, date, candidate, duty)
    }

    pub fn set_supervisor(&mut self, date: &str, supervisor: &str) -> Result<(), SchedError> {
        self.ensure_unlocked(date)?;
        mutate::set_supervisor(&mut self.roster.days, date, supervisor)
    }

    pub fn toggle_holiday(&mut self, date: &str) -> Result<bool, SchedError> {
        self.ensure_unlocked(date)?;
        mutate::toggle_holiday(&mut self.roster.days, date)
    }

    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(&self.roster.days)
    }

    pub fn loads(&self, weights: &ShiftWeights) -> Vec<WorkerLoad> {
        history::aggregate_history(&self.roster.days, &self.roster.workers, weights)
    }
}
