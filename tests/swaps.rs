#![forbid(unsafe_code)]
use chrono::Weekday;
use shiftrota::{
    calendar, validate_swap, DayId, DayRecord, Duty, Roster, SchedError, Scheduler, SwapRejection,
    SwapVerdict,
};

fn day(n: u32, day: &str, night: &str) -> DayRecord {
    DayRecord {
        id: DayId::random(),
        weekday: calendar::weekday_at(0, n as usize - 1),
        date: calendar::date_label(1404, "09", n),
        day_worker: day.into(),
        night_worker: night.into(),
        supervisor: "S1".into(),
        holiday: false,
        original_day_worker: None,
        original_night_worker: None,
    }
}

#[test]
fn day_request_on_own_night_is_double_duty() {
    let days = vec![day(1, "A", "B"), day(2, "D", "E"), day(3, "B", "C")];
    let v = validate_swap(&days, "1404/09/03", "C", Duty::Day);
    assert_eq!(v, SwapVerdict::Invalid(SwapRejection::DoubleDuty));
    assert_eq!(v.reason(), Some("double duty"));
}

#[test]
fn day_after_night_needs_rest() {
    let days = vec![day(1, "A", "B"), day(2, "D", "C"), day(3, "B", "E")];
    let v = validate_swap(&days, "1404/09/03", "C", Duty::Day);
    assert_eq!(v, SwapVerdict::Invalid(SwapRejection::NeedsRest));
    assert_eq!(v.reason(), Some("needs rest"));
}

#[test]
fn night_before_next_day_shift_conflicts() {
    let days = vec![
        day(1, "A", "B"),
        day(2, "D", "E"),
        day(3, "B", "A"),
        day(4, "C", "D"),
    ];
    let v = validate_swap(&days, "1404/09/03", "C", Duty::Night);
    assert_eq!(v, SwapVerdict::Invalid(SwapRejection::NextDayConflict));
    assert_eq!(v.reason(), Some("next-day day-shift conflict"));

    assert_eq!(
        validate_swap(&days, "1404/09/03", "E", Duty::Night),
        SwapVerdict::Invalid(SwapRejection::ConsecutiveNights)
    );
    // F n'a aucune garde de jour le 4
    assert!(validate_swap(&days, "1404/09/03", "F", Duty::Night).is_valid());
}

#[test]
fn validation_never_mutates() {
    let days = vec![day(1, "A", "B"), day(2, "C", "D")];
    let snapshot = days.clone();
    for _ in 0..2 {
        assert_eq!(
            validate_swap(&days, "1404/09/02", "B", Duty::Day),
            SwapVerdict::Invalid(SwapRejection::NeedsRest)
        );
    }
    assert_eq!(days, snapshot);
}

#[test]
fn scheduler_applies_valid_swap_and_records_original() {
    let mut s = Scheduler::with_roster(Roster {
        days: vec![day(1, "A", "B"), day(2, "C", "D"), day(3, "E", "A")],
        ..Roster::default()
    });

    assert!(!s.validate_swap("1404/09/02", "E", Duty::Night).is_valid());
    s.apply_swap("1404/09/02", "B", Duty::Night)
        .expect_err("B worked the night before");

    s.apply_swap("1404/09/01", "C", Duty::Night)
        .expect_err("C is on day duty the next morning");

    s.apply_swap("1404/09/02", "E", Duty::Day).unwrap();
    let d = s.roster().find_day("1404/09/02").unwrap();
    assert_eq!(d.day_worker, "E");
    assert_eq!(d.original_day_worker.as_deref(), Some("C"));
    assert_eq!(d.weekday, Weekday::Sun);

    let err = s.apply_swap("1404/12/30", "E", Duty::Day).unwrap_err();
    assert!(matches!(err, SchedError::UnknownDate(ref date) if date == "1404/12/30"));
    assert!(s.detect_conflicts().is_empty());
}
