use super::history::{aggregate_history, WorkerLoad};
use super::types::{GenerateRequest, GeneratedBlock, Relaxation, SchedError, ShiftWeights};
use crate::calendar::{self, REST_DAY, WEEK_START};
use crate::model::{supervisor_pool, DayId, DayRecord, Duty, Worker, UNASSIGNED};
use tracing::{debug, info, warn};

/// Génère `req.day_count` jours à la suite de `history`.
///
/// Glouton, jour par jour : la nuit va au membre le moins chargé en nuits
/// (hors garde de nuit de la veille), le jour au moins chargé en jours
/// (hors garde de nuit de la veille et de ce soir). Les compteurs sont mis à
/// jour immédiatement, donc visibles pour le jour suivant.
pub(super) fn generate_block(
    req: &GenerateRequest,
    history: &[DayRecord],
    workers: &[Worker],
    weights: &ShiftWeights,
) -> Result<GeneratedBlock, SchedError> {
    if usize::from(req.start_offset) >= calendar::WEEK_CYCLE.len() {
        return Err(SchedError::InvalidWeekdayOffset(req.start_offset));
    }

    let mut loads = aggregate_history(history, workers, weights);
    if loads.is_empty() {
        return Err(SchedError::NoCoverageWorkers);
    }

    let supervisors = supervisor_pool(workers);
    let last = history.last();

    // la rotation reprend au superviseur suivant le dernier connu
    let mut sup_idx = match last {
        Some(entry) if !supervisors.is_empty() => supervisors
            .iter()
            .position(|s| *s == entry.supervisor)
            .map_or(0, |i| (i + 1) % supervisors.len()),
        _ => 0,
    };
    let mut prev_night: Option<String> = last.map(|entry| entry.night_worker.clone());

    let mut block = GeneratedBlock::default();

    for i in 0..req.day_count {
        let weekday = calendar::weekday_at(req.start_offset, i as usize);
        let date = calendar::date_label(req.year, &req.month_code, i + 1);

        if weekday == WEEK_START && i > 0 && !supervisors.is_empty() {
            sup_idx = (sup_idx + 1) % supervisors.len();
        }
        let supervisor = supervisors
            .get(sup_idx)
            .copied()
            .unwrap_or(UNASSIGNED)
            .to_owned();

        let rested = |l: &WorkerLoad| prev_night.as_deref() != Some(l.name.as_str());

        let night_idx = match least_loaded(&loads, Duty::Night, rested) {
            Some(idx) => idx,
            None => {
                let idx = least_loaded(&loads, Duty::Night, |_| true)
                    .ok_or(SchedError::NoCoverageWorkers)?;
                relax(&mut block, &date, Duty::Night, &loads[idx].name);
                idx
            }
        };
        loads[night_idx].record_night(weights);
        let night_worker = loads[night_idx].name.clone();

        let day_idx = match least_loaded(&loads, Duty::Day, |l| {
            rested(l) && l.name != night_worker
        }) {
            Some(idx) => idx,
            None => {
                let idx = least_loaded(&loads, Duty::Day, |l| l.name != night_worker)
                    .or_else(|| least_loaded(&loads, Duty::Day, |_| true))
                    .ok_or(SchedError::NoCoverageWorkers)?;
                relax(&mut block, &date, Duty::Day, &loads[idx].name);
                idx
            }
        };
        loads[day_idx].record_day(weights);
        let day_worker = loads[day_idx].name.clone();

        debug!(%date, ?weekday, %day_worker, %night_worker, %supervisor, "day generated");

        block.days.push(DayRecord {
            id: DayId::random(),
            weekday,
            date,
            day_worker,
            night_worker: night_worker.clone(),
            supervisor,
            holiday: weekday == REST_DAY,
            original_day_worker: None,
            original_night_worker: None,
        });

        prev_night = Some(night_worker);
    }

    info!(
        year = req.year,
        month = %req.month_code,
        days = block.days.len(),
        relaxations = block.relaxations.len(),
        "block generated"
    );

    Ok(block)
}

/// Index du membre éligible le moins chargé pour `duty`.
/// Ordre : compteur de la garde, score pondéré, puis ordre du roster.
fn least_loaded<F>(loads: &[WorkerLoad], duty: Duty, eligible: F) -> Option<usize>
where
    F: Fn(&WorkerLoad) -> bool,
{
    let count = |l: &WorkerLoad| match duty {
        Duty::Day => l.day_count,
        Duty::Night => l.night_count,
    };
    // min_by garde le premier minimum : l'ordre du roster départage
    loads
        .iter()
        .enumerate()
        .filter(|&(_, l)| eligible(l))
        .min_by(|&(_, a), &(_, b)| {
            count(a)
                .cmp(&count(b))
                .then_with(|| a.weighted_score.total_cmp(&b.weighted_score))
        })
        .map(|(idx, _)| idx)
}

fn relax(block: &mut GeneratedBlock, date: &str, duty: Duty, worker: &str) {
    warn!(%date, ?duty, %worker, "adjacency rule relaxed: no eligible candidate left");
    block.relaxations.push(Relaxation {
        date: date.to_owned(),
        duty,
        worker: worker.to_owned(),
    });
}
