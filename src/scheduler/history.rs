use super::ShiftWeights;
use crate::model::{coverage_pool, DayRecord, Worker};

/// Charge cumulée d'un membre de garde.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerLoad {
    pub name: String,
    pub day_count: u32,
    pub night_count: u32,
    pub weighted_score: f64,
}

impl WorkerLoad {
    fn zero(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            day_count: 0,
            night_count: 0,
            weighted_score: 0.0,
        }
    }

    pub(super) fn record_day(&mut self, weights: &ShiftWeights) {
        self.day_count += 1;
        self.weighted_score += weights.day_score();
    }

    pub(super) fn record_night(&mut self, weights: &ShiftWeights) {
        self.night_count += 1;
        self.weighted_score += weights.night_score();
    }
}

/// Rejoue tout l'historique et renvoie une charge par membre de garde actif,
/// dans l'ordre du roster. Les noms absents du roster actif sont ignorés.
pub fn aggregate_history(
    history: &[DayRecord],
    workers: &[Worker],
    weights: &ShiftWeights,
) -> Vec<WorkerLoad> {
    let mut loads: Vec<WorkerLoad> = coverage_pool(workers)
        .into_iter()
        .map(WorkerLoad::zero)
        .collect();

    for day in history {
        if let Some(load) = loads.iter_mut().find(|l| l.name == day.day_worker) {
            load.record_day(weights);
        }
        if let Some(load) = loads.iter_mut().find(|l| l.name == day.night_worker) {
            load.record_night(weights);
        }
    }

    loads
}
