use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use chronoval::{
    codec, gaps_within, intersect_sorted, Boundary, CalendarMonth, CalendarUnit, DateInterval,
    Interval, IntervalError, IntervalRelation, IntervalTree, TimestampInterval,
};
use qtty::{Days, Seconds};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(0, 0, 0).unwrap()
}

#[test]
fn tree_visits_dates_in_start_order() {
    let intervals = [
        DateInterval::closed(date(2014, 2, 28), date(2014, 5, 31)).unwrap(),
        DateInterval::closed(date(2014, 5, 31), date(2014, 6, 1)).unwrap(),
        DateInterval::closed(date(2014, 6, 15), date(2014, 6, 30)).unwrap(),
    ];
    let tree = IntervalTree::on([intervals[2], intervals[0], intervals[1]]).unwrap();

    let visited: Vec<_> = tree.iter().copied().collect();
    assert_eq!(visited, intervals);

    let on_may_31 = tree.find_intersections_at(&date(2014, 5, 31));
    assert_eq!(on_may_31, vec![&intervals[0], &intervals[1]]);
}

#[test]
fn closed_dates_sharing_a_day_meet() {
    let a = DateInterval::closed(date(2020, 1, 1), date(2020, 1, 10)).unwrap();
    let b = DateInterval::closed(date(2020, 1, 10), date(2020, 1, 20)).unwrap();

    assert!(a.meets(&b));
    assert!(!a.overlaps(&b));
    assert_eq!(IntervalRelation::between(&a, &b), IntervalRelation::Meets);
    assert_eq!(IntervalRelation::between(&b, &a), IntervalRelation::MetBy);
}

#[test]
fn half_open_days_meet_and_abut() {
    let a = TimestampInterval::closed_open(midnight(2020, 1, 1), midnight(2020, 1, 2)).unwrap();
    let b = TimestampInterval::closed_open(midnight(2020, 1, 2), midnight(2020, 1, 3)).unwrap();

    assert!(a.meets(&b));
    assert!(a.abuts(&b));
    assert!(!a.intersects(&b));
    assert_eq!(a.duration_seconds().unwrap(), Seconds::new(86_400.0));
}

#[test]
fn overlapping_dates_intersect() {
    let a = DateInterval::closed(date(2020, 1, 1), date(2020, 1, 10)).unwrap();
    let b = DateInterval::closed(date(2020, 1, 5), date(2020, 1, 15)).unwrap();

    assert_eq!(
        a.find_intersection(&b),
        Some(DateInterval::closed(date(2020, 1, 5), date(2020, 1, 10)).unwrap())
    );
    assert!(a.intersects(&b));
}

#[test]
fn open_pair_needs_explicit_anchor() {
    let ambiguous = Interval::between(Boundary::open(5i64), Boundary::open(5));
    assert!(matches!(ambiguous, Err(IntervalError::Invalid(_))));

    let anchored = Interval::empty_at(5i64);
    assert!(anchored.is_empty());
}

#[test]
fn month_units_cover_their_days() {
    let feb = CalendarMonth::new(2024, 2).unwrap();
    let months = Interval::closed(feb, CalendarMonth::new(2024, 4).unwrap()).unwrap();

    assert_eq!(months.duration().unwrap(), 3);
    assert_eq!(months.points().unwrap().count(), 3);
    let days = feb.to_date_interval().duration_days().unwrap();
    assert!((days - Days::new(29.0)).abs() < Days::new(1e-9));
}

#[test]
fn free_days_between_bookings() {
    let month = DateInterval::closed(date(2020, 3, 1), date(2020, 3, 31)).unwrap();
    let booked = [
        DateInterval::closed(date(2020, 3, 2), date(2020, 3, 8)).unwrap(),
        DateInterval::closed(date(2020, 3, 20), date(2020, 3, 31)).unwrap(),
    ];
    let free = gaps_within(&month, &booked);
    assert_eq!(
        free,
        vec![
            DateInterval::closed(date(2020, 3, 1), date(2020, 3, 1)).unwrap(),
            DateInterval::closed(date(2020, 3, 9), date(2020, 3, 19)).unwrap(),
        ]
    );

    let weekdays_off = [DateInterval::closed(date(2020, 3, 14), date(2020, 3, 15)).unwrap()];
    assert_eq!(intersect_sorted(&free, &weekdays_off), weekdays_off.to_vec());
}

#[test]
fn daily_steps_and_codec_round_trip() {
    let week = TimestampInterval::closed_open(midnight(2020, 1, 6), midnight(2020, 1, 13)).unwrap();
    let days: Vec<_> = week.steps(TimeDelta::days(1)).unwrap().collect();
    assert_eq!(days.len(), 7);
    assert_eq!(days[6], midnight(2020, 1, 12));

    let bytes = codec::encode(&week);
    assert_eq!(codec::decode::<NaiveDateTime>(&bytes).unwrap(), week);
}

#[cfg(feature = "serde")]
#[test]
fn serde_interval_revalidates_on_decode() {
    let interval = DateInterval::closed(date(2020, 1, 1), date(2020, 1, 31)).unwrap();
    let json = serde_json::to_string(&interval).unwrap();
    assert!(json.contains("start"));
    assert!(json.contains("2020-01-31"));
    let back: DateInterval = serde_json::from_str(&json).unwrap();
    assert_eq!(back, interval);

    let inverted = json.replace("2020-01-31", "2019-12-31");
    assert!(serde_json::from_str::<DateInterval>(&inverted).is_err());
}
