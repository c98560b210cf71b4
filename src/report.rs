use crate::model::{coverage_pool, DayRecord, Duty, Worker};
use crate::scheduler::ShiftWeights;
use chrono::Weekday;

/// Journée de bureau ordinaire (08:00 - 17:00).
const OFFICE_HOURS: f64 = 9.0;
/// Journée prolongée jusqu'à 19:00, deux jours après une nuit.
const EXTENDED_OFFICE_HOURS: f64 = 11.0;

/// Ligne de bilan d'un membre sur une période.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadLine {
    pub name: String,
    pub day_shifts: u32,
    pub night_shifts: u32,
    /// Heures réellement travaillées (sans majoration).
    pub hours: f64,
    pub weighted_score: f64,
}

/// Bilan par membre de garde, restreint aux dates commençant par `date_prefix`
/// (`""` pour tout le planning). Ordre du roster.
pub fn load_report(
    days: &[DayRecord],
    workers: &[Worker],
    date_prefix: &str,
    weights: &ShiftWeights,
) -> Vec<LoadLine> {
    let window: Vec<&DayRecord> = days
        .iter()
        .filter(|d| d.date.starts_with(date_prefix))
        .collect();

    coverage_pool(workers)
        .into_iter()
        .map(|name| {
            let day_shifts = window.iter().filter(|d| d.day_worker == name).count() as u32;
            let night_shifts = window.iter().filter(|d| d.night_worker == name).count() as u32;
            let (dn, nn) = (f64::from(day_shifts), f64::from(night_shifts));
            LoadLine {
                name: name.to_owned(),
                day_shifts,
                night_shifts,
                hours: dn * weights.day_hours + nn * weights.night_hours,
                weighted_score: dn * weights.day_score() + nn * weights.night_score(),
            }
        })
        .collect()
}

/// Membres ayant le plus d'heures sur la période (plusieurs en cas d'égalité).
pub fn busiest(lines: &[LoadLine]) -> Vec<&LoadLine> {
    let Some(max) = lines.iter().map(|l| l.hours).reduce(f64::max) else {
        return Vec::new();
    };
    lines.iter().filter(|l| l.hours == max).collect()
}

/// Nature d'une journée dans le relevé individuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Day,
    Night,
    /// Lendemain d'une nuit.
    Rest,
    /// Deux jours après une nuit : journée prolongée.
    ExtendedNormal,
    Normal,
    Off,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub date: String,
    pub weekday: Weekday,
    pub kind: DayKind,
    pub hours: f64,
}

/// Heures par catégorie sur la période.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoursBreakdown {
    /// Samedi → mercredi hors férié.
    pub normal: f64,
    /// Jeudi ou férié (hors vendredi).
    pub holiday_thursday: f64,
    pub friday: f64,
    pub night: f64,
}

impl HoursBreakdown {
    pub fn total(&self) -> f64 {
        self.normal + self.holiday_thursday + self.friday + self.night
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerTimeline {
    pub worker: String,
    pub rows: Vec<TimelineRow>,
    pub totals: HoursBreakdown,
}

/// Relevé jour par jour d'un membre sur `start..=end` (bornes optionnelles,
/// comparées lexicalement aux dates).
///
/// Jeudi, vendredi et les jours marqués fériés ne comptent que les gardes.
/// Les autres jours, hors garde et hors repos, comptent une journée de bureau.
/// Le repos et la journée prolongée regardent la veille et l'avant-veille
/// dans tout le planning, même hors période.
pub fn worker_timeline(
    days: &[DayRecord],
    worker: &str,
    start: Option<&str>,
    end: Option<&str>,
    weights: &ShiftWeights,
) -> WorkerTimeline {
    let mut totals = HoursBreakdown::default();
    let mut rows = Vec::new();

    let night_at = |i: Option<usize>| {
        i.and_then(|i| days.get(i))
            .is_some_and(|d| d.worker_for(Duty::Night) == worker)
    };

    for (i, d) in days.iter().enumerate() {
        let date = d.date.as_str();
        if start.is_some_and(|s| date < s) || end.is_some_and(|e| date > e) {
            continue;
        }
        let on_day = d.worker_for(Duty::Day) == worker;
        let on_night = d.worker_for(Duty::Night) == worker;
        let night_before = night_at(i.checked_sub(1));
        let friday = d.weekday == Weekday::Fri;
        let off_day = friday || d.weekday == Weekday::Thu || d.holiday;

        let (kind, hours) = if on_night {
            totals.night += weights.night_hours;
            (DayKind::Night, weights.night_hours)
        } else if on_day {
            let bucket = match (off_day, friday) {
                (true, true) => &mut totals.friday,
                (true, false) => &mut totals.holiday_thursday,
                (false, _) => &mut totals.normal,
            };
            *bucket += weights.day_hours;
            (DayKind::Day, weights.day_hours)
        } else if night_before {
            (DayKind::Rest, 0.0)
        } else if off_day {
            (DayKind::Off, 0.0)
        } else if night_at(i.checked_sub(2)) {
            totals.normal += EXTENDED_OFFICE_HOURS;
            (DayKind::ExtendedNormal, EXTENDED_OFFICE_HOURS)
        } else {
            totals.normal += OFFICE_HOURS;
            (DayKind::Normal, OFFICE_HOURS)
        };

        rows.push(TimelineRow {
            date: d.date.clone(),
            weekday: d.weekday,
            kind,
            hours,
        });
    }

    WorkerTimeline {
        worker: worker.to_owned(),
        rows,
        totals,
    }
}
