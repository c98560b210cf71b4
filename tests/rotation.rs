#![forbid(unsafe_code)]
use chrono::Weekday;
use shiftrota::{
    generate_block, DayId, DayRecord, GenerateRequest, SchedError, Scheduler, ShiftWeights,
    Worker, UNASSIGNED,
};
use std::collections::HashMap;

fn team() -> Vec<Worker> {
    vec![
        Worker::coverage("A"),
        Worker::coverage("B"),
        Worker::coverage("C"),
        Worker::coverage("D"),
        Worker::coverage("E"),
        Worker::supervisor("S1"),
        Worker::supervisor("S2"),
    ]
}

fn request(offset: u8, days: u32) -> GenerateRequest {
    GenerateRequest {
        year: 1404,
        month_code: "09".into(),
        start_offset: offset,
        day_count: days,
    }
}

fn assert_adjacency_safe(days: &[DayRecord]) {
    for d in days {
        assert_ne!(d.day_worker, d.night_worker, "double duty on {}", d.date);
    }
    for w in days.windows(2) {
        assert_ne!(w[0].night_worker, w[1].night_worker, "nights {} / {}", w[0].date, w[1].date);
        assert_ne!(w[0].night_worker, w[1].day_worker, "no rest {} / {}", w[0].date, w[1].date);
    }
}

#[test]
fn first_week_from_empty_history() {
    let block = generate_block(&request(0, 7), &[], &team(), &ShiftWeights::default()).unwrap();
    assert_eq!(block.days.len(), 7);
    assert!(block.relaxations.is_empty());

    let first = &block.days[0];
    assert_eq!(first.weekday, Weekday::Sat);
    assert_eq!(first.date, "1404/09/01");
    assert_eq!(first.night_worker, "A");
    assert_eq!(first.day_worker, "B");

    let second = &block.days[1];
    assert_ne!(second.night_worker, "A");
    assert_ne!(second.day_worker, "A");
    assert_ne!(second.day_worker, second.night_worker);

    let nights: Vec<&str> = block.days.iter().map(|d| d.night_worker.as_str()).collect();
    let days: Vec<&str> = block.days.iter().map(|d| d.day_worker.as_str()).collect();
    assert_eq!(nights, ["A", "C", "E", "B", "D", "A", "C"]);
    assert_eq!(days, ["B", "D", "A", "C", "E", "B", "D"]);

    assert_adjacency_safe(&block.days);

    // seul le vendredi est férié par défaut
    let holidays: Vec<&str> = block
        .days
        .iter()
        .filter(|d| d.holiday)
        .map(|d| d.date.as_str())
        .collect();
    assert_eq!(holidays, ["1404/09/07"]);
    assert!(block.days.iter().all(|d| d.supervisor == "S1"));
}

#[test]
fn identifiers_are_unique() {
    let block = generate_block(&request(0, 30), &[], &team(), &ShiftWeights::default()).unwrap();
    let mut ids: Vec<&str> = block.days.iter().map(|d| d.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 30);
}

#[test]
fn history_boundary_is_respected() {
    let workers = team();
    let seed = generate_block(&request(0, 10), &[], &workers, &ShiftWeights::default()).unwrap();
    let last_night = seed.days.last().unwrap().night_worker.clone();

    let next = GenerateRequest {
        year: 1404,
        month_code: "10".into(),
        start_offset: 3,
        day_count: 30,
    };
    let block = generate_block(&next, &seed.days, &workers, &ShiftWeights::default()).unwrap();
    assert_ne!(block.days[0].night_worker, last_night);
    assert_ne!(block.days[0].day_worker, last_night);

    let mut all = seed.days.clone();
    all.extend(block.days);
    assert_adjacency_safe(&all);
}

#[test]
fn night_counts_stay_within_one() {
    let workers = team();
    let block = generate_block(&request(2, 120), &[], &workers, &ShiftWeights::default()).unwrap();
    let mut nights: HashMap<&str, u32> = ["A", "B", "C", "D", "E"].iter().map(|n| (*n, 0)).collect();
    for d in &block.days {
        *nights.get_mut(d.night_worker.as_str()).unwrap() += 1;
        let max = nights.values().max().unwrap();
        let min = nights.values().min().unwrap();
        assert!(max - min <= 1, "spread above 1 on {}", d.date);
    }
    assert_adjacency_safe(&block.days);
}

#[test]
fn supervisor_rotation_continues_from_history() {
    let workers = team();
    let mut history = generate_block(&request(0, 1), &[], &workers, &ShiftWeights::default())
        .unwrap()
        .days;
    history[0].supervisor = "S1".into();

    // départ dimanche : le samedi tombe au 7e jour
    let block = generate_block(&request(1, 8), &history, &workers, &ShiftWeights::default())
        .unwrap();
    let sups: Vec<&str> = block.days.iter().map(|d| d.supervisor.as_str()).collect();
    assert_eq!(sups, ["S2", "S2", "S2", "S2", "S2", "S2", "S1", "S1"]);
    assert_eq!(block.days[6].weekday, Weekday::Sat);
}

#[test]
fn first_day_never_advances_supervisor() {
    let block = generate_block(&request(0, 8), &[], &team(), &ShiftWeights::default()).unwrap();
    assert_eq!(block.days[0].supervisor, "S1");
    assert_eq!(block.days[7].weekday, Weekday::Sat);
    assert_eq!(block.days[7].supervisor, "S2");
}

#[test]
fn departed_supervisor_restarts_rotation_at_first() {
    let workers = team();
    let mut history = generate_block(&request(0, 1), &[], &workers, &ShiftWeights::default())
        .unwrap()
        .days;
    // SX n'est plus dans l'équipe
    history[0].supervisor = "SX".into();

    let block = generate_block(&request(1, 3), &history, &workers, &ShiftWeights::default())
        .unwrap();
    assert!(block.days.iter().all(|d| d.supervisor == "S1"));
}

#[test]
fn no_supervisor_uses_sentinel() {
    let workers: Vec<Worker> = ["A", "B", "C"].iter().map(|n| Worker::coverage(*n)).collect();
    let block = generate_block(&request(0, 3), &[], &workers, &ShiftWeights::default()).unwrap();
    assert!(block.days.iter().all(|d| d.supervisor == UNASSIGNED));
}

#[test]
fn empty_coverage_pool_is_an_error() {
    let mut inactive = Worker::coverage("A");
    inactive.active = false;
    let workers = vec![inactive, Worker::supervisor("S1")];
    let err = generate_block(&request(0, 5), &[], &workers, &ShiftWeights::default()).unwrap_err();
    assert!(matches!(err, SchedError::NoCoverageWorkers));
}

#[test]
fn history_load_steers_new_assignments() {
    let workers = team();
    let mut history = Vec::new();
    for (i, night) in ["A", "B", "A", "B"].iter().enumerate() {
        history.push(DayRecord {
            id: DayId::random(),
            weekday: Weekday::Sat,
            date: format!("1404/08/{:02}", i + 1),
            day_worker: "C".into(),
            night_worker: (*night).into(),
            supervisor: "S1".into(),
            holiday: false,
            original_day_worker: None,
            original_night_worker: None,
        });
    }
    let block = generate_block(&request(0, 1), &history, &workers, &ShiftWeights::default())
        .unwrap();
    // D et E n'ont aucune charge ; C a fait tous les jours
    assert_eq!(block.days[0].night_worker, "D");
    assert_eq!(block.days[0].day_worker, "E");
}

#[test]
fn scheduler_months_chain_on_weekday_and_order() {
    let mut s = Scheduler::new();
    s.add_workers(team());
    let w = ShiftWeights::default();

    let sept = s.generate_month(1404, "09", false, &w).unwrap();
    assert_eq!(sept.days.len(), 30);
    assert_eq!(sept.days[0].weekday, Weekday::Fri);
    assert!(sept.days[0].holiday);

    let oct = s.generate_month(1404, "10", false, &w).unwrap();
    assert_eq!(oct.days[0].weekday, Weekday::Sun);
    assert_eq!(s.roster().days.len(), 60);
    assert!(s.detect_conflicts().is_empty());

    s.regenerate_month(1404, "09", false, &w).unwrap();
    let days = &s.roster().days;
    assert_eq!(days.len(), 60);
    assert_eq!(days[0].date, "1404/09/01");
    assert_eq!(days[30].date, "1404/10/01");
    assert!(days.windows(2).all(|p| p[0].date < p[1].date));
}
