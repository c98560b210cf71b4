#![forbid(unsafe_code)]
use chrono::Weekday;
use shiftrota::{
    io, DayId, DayRecord, JsonStorage, Role, Roster, Scheduler, ShiftWeights, Storage, Worker,
};
use std::fs;
use tempfile::tempdir;

fn record(date: &str, weekday: Weekday, day: &str, night: &str, holiday: bool) -> DayRecord {
    DayRecord {
        id: DayId::new(date),
        weekday,
        date: date.into(),
        day_worker: day.into(),
        night_worker: night.into(),
        supervisor: "s1".into(),
        holiday,
        original_day_worker: None,
        original_night_worker: None,
    }
}

#[test]
fn json_storage_roundtrip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("roster.json")).unwrap();
    assert!(!storage.exists());

    let mut s = Scheduler::new();
    s.add_workers(vec![
        Worker::coverage("a"),
        Worker::coverage("b"),
        Worker::coverage("c"),
        Worker::supervisor("s1"),
    ]);
    s.generate_month(1404, "01", false, &ShiftWeights::default())
        .unwrap();
    s.roster_mut().days[4].original_night_worker = Some("c".into());
    s.lock_month(1404, "01");
    storage.save(s.roster()).unwrap();
    assert!(storage.exists());

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.workers, s.roster().workers);
    assert_eq!(loaded.days, s.roster().days);
    assert_eq!(loaded.days.len(), 31);
    assert!(loaded.is_locked("1404/01/15"));
}

#[test]
fn import_workers_from_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workers.csv");
    fs::write(
        &path,
        "name,roles,active\na,coverage,\nb,coverage|supervisor,yes\nc,shift,false\ns1,supervisor,\n",
    )
    .unwrap();

    let workers = io::import_workers_csv(&path).unwrap();
    assert_eq!(workers.len(), 4);
    assert!(workers[0].active);
    assert_eq!(workers[1].roles, vec![Role::Coverage, Role::Supervisor]);
    assert!(!workers[2].active);
    assert!(workers[3].is_supervisor_eligible());
}

#[test]
fn import_rejects_unknown_role() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workers.csv");
    fs::write(&path, "name,roles\na,janitor\n").unwrap();
    assert!(io::import_workers_csv(&path).is_err());
}

#[test]
fn schedule_csv_layout() {
    let roster = Roster {
        days: vec![
            record("1404/09/06", Weekday::Thu, "a", "b", false),
            record("1404/09/07", Weekday::Fri, "c", "a", true),
        ],
        ..Roster::default()
    };
    let mut buf = Vec::new();
    io::write_schedule_csv(&mut buf, &roster).unwrap();
    let text = String::from_utf8(buf).unwrap();
    insta::assert_snapshot!(text, @r"
    date,weekday,day,night,supervisor,holiday
    1404/09/06,Thu,a,b,s1,false
    1404/09/07,Fri,c,a,s1,true
    ");
}
