// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar unit timelines.
//!
//! Each unit is a calendrical time point identified by its proleptic number:
//!
//! | Type | Proleptic number | Display |
//! |------|------------------|---------|
//! | [`CalendarYear`] | the proleptic Gregorian year | `2014` |
//! | [`CalendarQuarter`] | `year * 4 + quarter - 1` | `2014-Q2` |
//! | [`CalendarMonth`] | `year * 12 + month - 1` | `2014-05` |
//! | [`CalendarWeek`] | ISO weeks since the Monday 0001-01-01 | `2014-W05` |
//!
//! Stepping adds or removes one unit.  The supported range is the set of
//! units lying entirely within chrono's `NaiveDate::MIN..=NaiveDate::MAX`.

use crate::boundary::Boundary;
use crate::error::IntervalError;
use crate::interval::Interval;
use crate::timeline::{Ordinal, TimeArithmetic, Timeline};
use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A calendrical unit covering a contiguous range of days.
pub trait CalendarUnit: Timeline {
    /// The unit containing `date`, or `None` when that unit runs past
    /// chrono's date range (the first and last ISO weeks, for instance).
    fn at(date: NaiveDate) -> Option<Self>;

    fn first_day(&self) -> NaiveDate;

    fn last_day(&self) -> NaiveDate;

    /// The closed date interval covered by this unit.
    fn to_date_interval(&self) -> Interval<NaiveDate> {
        Interval::new_unchecked(
            Boundary::closed(self.first_day()),
            Boundary::closed(self.last_day()),
        )
    }
}

fn ymd(year: i64, month: u32, day: u32) -> Option<NaiveDate> {
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
}

fn last_of_month(year: i64, month: u32) -> Option<NaiveDate> {
    if month == 12 {
        ymd(year, 12, 31)
    } else {
        ymd(year, month + 1, 1).and_then(|first| first.pred_opt())
    }
}

/// Implements the timeline traits over the proleptic `number` of a unit.
macro_rules! calendar_unit {
    ($unit:ident) => {
        impl $unit {
            /// Unit with the given proleptic number, if it lies in range.
            pub fn from_number(number: i64) -> Option<Self> {
                (Self::minimum().number..=Self::maximum().number)
                    .contains(&number)
                    .then_some(Self { number })
            }

            /// The proleptic number of this unit.
            #[inline]
            pub const fn number(&self) -> i64 {
                self.number
            }

            fn starts_on(date: NaiveDate) -> bool {
                Self::containing(date).first_day_opt() == Some(date)
            }

            fn ends_on(date: NaiveDate) -> bool {
                Self::containing(date).last_day_opt() == Some(date)
            }
        }

        impl CalendarUnit for $unit {
            #[inline]
            fn at(date: NaiveDate) -> Option<Self> {
                Self::from_number(Self::containing(date).number)
            }

            // Units are range-checked on construction; the clamps are never hit.
            fn first_day(&self) -> NaiveDate {
                self.first_day_opt().unwrap_or(NaiveDate::MIN)
            }

            fn last_day(&self) -> NaiveDate {
                self.last_day_opt().unwrap_or(NaiveDate::MAX)
            }
        }

        impl Timeline for $unit {
            #[inline]
            fn step_forward(&self) -> Option<Self> {
                self.number.checked_add(1).and_then(Self::from_number)
            }

            #[inline]
            fn step_backwards(&self) -> Option<Self> {
                self.number.checked_sub(1).and_then(Self::from_number)
            }

            fn minimum() -> Self {
                let min = Self::containing(NaiveDate::MIN);
                if Self::starts_on(NaiveDate::MIN) {
                    min
                } else {
                    Self { number: min.number + 1 }
                }
            }

            fn maximum() -> Self {
                let max = Self::containing(NaiveDate::MAX);
                if Self::ends_on(NaiveDate::MAX) {
                    max
                } else {
                    Self { number: max.number - 1 }
                }
            }

            fn is_calendrical() -> bool {
                true
            }
        }

        impl Ordinal for $unit {
            #[inline]
            fn to_ordinal(&self) -> i128 {
                i128::from(self.number)
            }

            fn from_ordinal(ordinal: i128) -> Option<Self> {
                i64::try_from(ordinal).ok().and_then(Self::from_number)
            }
        }

        /// Durations are counted in whole units.
        impl TimeArithmetic for $unit {
            type Duration = i64;

            fn add_duration(&self, units: i64) -> Option<Self> {
                self.number.checked_add(units).and_then(Self::from_number)
            }

            fn sub_duration(&self, units: i64) -> Option<Self> {
                self.number.checked_sub(units).and_then(Self::from_number)
            }

            fn difference(&self, other: &Self) -> Option<i64> {
                self.number.checked_sub(other.number)
            }
        }

        impl TryFrom<i64> for $unit {
            type Error = IntervalError;

            fn try_from(number: i64) -> Result<Self, Self::Error> {
                Self::from_number(number).ok_or(IntervalError::ArithmeticOverflow)
            }
        }

        impl From<$unit> for i64 {
            fn from(unit: $unit) -> i64 {
                unit.number
            }
        }
    };
}

// ═══════════════════════════════════════════════════════════════════════════
// Years
// ═══════════════════════════════════════════════════════════════════════════

/// A calendar year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct CalendarYear {
    number: i64,
}

impl CalendarYear {
    pub fn new(year: i32) -> Option<Self> {
        Self::from_number(i64::from(year))
    }

    pub fn year(&self) -> i32 {
        self.number as i32
    }
}

impl CalendarYear {
    fn containing(date: NaiveDate) -> Self {
        Self {
            number: i64::from(date.year()),
        }
    }

    fn first_day_opt(&self) -> Option<NaiveDate> {
        ymd(self.number, 1, 1)
    }

    fn last_day_opt(&self) -> Option<NaiveDate> {
        ymd(self.number, 12, 31)
    }
}

calendar_unit!(CalendarYear);

impl fmt::Display for CalendarYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.number)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Quarters
// ═══════════════════════════════════════════════════════════════════════════

/// A calendar quarter (three months starting in January, April, July or October).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct CalendarQuarter {
    number: i64,
}

impl CalendarQuarter {
    /// `quarter` ranges over `1..=4`.
    pub fn new(year: i32, quarter: u32) -> Option<Self> {
        if !(1..=4).contains(&quarter) {
            return None;
        }
        Self::from_number(i64::from(year) * 4 + i64::from(quarter) - 1)
    }

    pub fn year(&self) -> i32 {
        self.number.div_euclid(4) as i32
    }

    pub fn quarter(&self) -> u32 {
        self.number.rem_euclid(4) as u32 + 1
    }

    fn first_month(&self) -> u32 {
        (self.quarter() - 1) * 3 + 1
    }
}

impl CalendarQuarter {
    fn containing(date: NaiveDate) -> Self {
        Self {
            number: i64::from(date.year()) * 4 + i64::from(date.month0() / 3),
        }
    }

    fn first_day_opt(&self) -> Option<NaiveDate> {
        ymd(self.number.div_euclid(4), self.first_month(), 1)
    }

    fn last_day_opt(&self) -> Option<NaiveDate> {
        last_of_month(self.number.div_euclid(4), self.first_month() + 2)
    }
}

calendar_unit!(CalendarQuarter);

impl fmt::Display for CalendarQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-Q{}", self.year(), self.quarter())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Months
// ═══════════════════════════════════════════════════════════════════════════

/// A calendar month.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct CalendarMonth {
    number: i64,
}

impl CalendarMonth {
    /// `month` ranges over `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Self::from_number(i64::from(year) * 12 + i64::from(month) - 1)
    }

    pub fn year(&self) -> i32 {
        self.number.div_euclid(12) as i32
    }

    pub fn month(&self) -> u32 {
        self.number.rem_euclid(12) as u32 + 1
    }
}

impl CalendarMonth {
    fn containing(date: NaiveDate) -> Self {
        Self {
            number: i64::from(date.year()) * 12 + i64::from(date.month0()),
        }
    }

    fn first_day_opt(&self) -> Option<NaiveDate> {
        ymd(self.number.div_euclid(12), self.month(), 1)
    }

    fn last_day_opt(&self) -> Option<NaiveDate> {
        last_of_month(self.number.div_euclid(12), self.month())
    }
}

calendar_unit!(CalendarMonth);

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Weeks
// ═══════════════════════════════════════════════════════════════════════════

/// An ISO-8601 week, Monday to Sunday.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct CalendarWeek {
    number: i64,
}

impl CalendarWeek {
    /// ISO week `week` of the week-based year `year`.
    pub fn new(year: i32, week: u32) -> Option<Self> {
        let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
        Self::from_number(Self::containing(monday).number)
    }

    /// The ISO week-based year.
    pub fn year(&self) -> i32 {
        self.first_day().iso_week().year()
    }

    pub fn week(&self) -> u32 {
        self.first_day().iso_week().week()
    }
}

fn day_from_ce(days: i64) -> Option<NaiveDate> {
    i32::try_from(days)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

impl CalendarWeek {
    fn containing(date: NaiveDate) -> Self {
        // 0001-01-01 is a Monday and day 1 of the common era.
        Self {
            number: (i64::from(date.num_days_from_ce()) - 1).div_euclid(7),
        }
    }

    fn first_day_opt(&self) -> Option<NaiveDate> {
        day_from_ce(self.number * 7 + 1)
    }

    fn last_day_opt(&self) -> Option<NaiveDate> {
        day_from_ce(self.number * 7 + 7)
    }
}

calendar_unit!(CalendarWeek);

impl fmt::Display for CalendarWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year(), self.week())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_days() {
        let feb = CalendarMonth::new(2024, 2).unwrap();
        assert_eq!(feb.first_day(), date(2024, 2, 1));
        assert_eq!(feb.last_day(), date(2024, 2, 29));
        assert_eq!(CalendarMonth::at(date(2024, 2, 17)), Some(feb));
        assert_eq!(feb.to_string(), "2024-02");
    }

    #[test]
    fn test_month_stepping_crosses_year() {
        let dec = CalendarMonth::new(2013, 12).unwrap();
        let jan = dec.step_forward().unwrap();
        assert_eq!((jan.year(), jan.month()), (2014, 1));
        assert_eq!(jan.step_backwards(), Some(dec));
        assert_eq!(jan.add_duration(14), CalendarMonth::new(2015, 3));
        assert_eq!(jan.difference(&dec), Some(1));
    }

    #[test]
    fn test_quarter_days() {
        let q4 = CalendarQuarter::new(2014, 4).unwrap();
        assert_eq!(q4.first_day(), date(2014, 10, 1));
        assert_eq!(q4.last_day(), date(2014, 12, 31));
        let q2 = CalendarQuarter::at(date(2014, 5, 31)).unwrap();
        assert_eq!(q2.to_string(), "2014-Q2");
        assert_eq!(CalendarQuarter::new(2014, 5), None);
    }

    #[test]
    fn test_year_days() {
        let y = CalendarYear::new(2014).unwrap();
        let days = Interval::closed(date(2014, 1, 1), date(2014, 12, 31)).unwrap();
        assert_eq!(y.to_date_interval(), days);
        assert_eq!(y.step_forward().map(|n| n.year()), Some(2015));
    }

    #[test]
    fn test_iso_week_across_year_boundary() {
        // 2015-01-01 is a Thursday, so week 1 of 2015 starts on 2014-12-29.
        let w1 = CalendarWeek::new(2015, 1).unwrap();
        assert_eq!(w1.first_day(), date(2014, 12, 29));
        assert_eq!(w1.last_day(), date(2015, 1, 4));
        assert_eq!(CalendarWeek::at(date(2015, 1, 4)), Some(w1));
        assert_eq!(w1.step_backwards().map(|w| (w.year(), w.week())), Some((2014, 52)));
        assert_eq!(w1.to_string(), "2015-W01");
    }

    #[test]
    fn test_week_numbering_origin() {
        let number = |d| CalendarWeek::at(d).map(|w| w.number());
        assert_eq!(number(date(1, 1, 1)), Some(0));
        assert_eq!(number(date(1, 1, 7)), Some(0));
        assert_eq!(number(date(1, 1, 8)), Some(1));
        assert_eq!(number(date(0, 12, 31)), Some(-1));
    }

    #[test]
    fn test_extremes_lie_within_date_range() {
        assert!(CalendarWeek::minimum().first_day() >= NaiveDate::MIN);
        assert!(CalendarWeek::maximum().last_day() <= NaiveDate::MAX);
        assert_eq!(CalendarMonth::maximum().step_forward(), None);
        assert_eq!(CalendarYear::minimum().step_backwards(), None);
        assert_eq!(
            CalendarQuarter::from_ordinal(CalendarQuarter::maximum().to_ordinal() + 1),
            None
        );
    }

    fn check_at_extremes<U: CalendarUnit + Ordinal + fmt::Display>() -> [Option<U>; 2] {
        let found = [U::at(NaiveDate::MIN), U::at(NaiveDate::MAX)];
        for (date, unit) in [NaiveDate::MIN, NaiveDate::MAX].into_iter().zip(found) {
            match unit {
                Some(unit) => {
                    assert!(U::minimum() <= unit && unit <= U::maximum());
                    assert!(unit.first_day() <= date && date <= unit.last_day());
                    assert!(!unit.to_string().is_empty());
                    let single = Interval::closed(unit, unit).unwrap();
                    assert_eq!(single.points().unwrap().count(), 1);
                }
                None if date == NaiveDate::MIN => assert!(U::minimum().first_day() > date),
                None => assert!(U::maximum().last_day() < date),
            }
        }
        found
    }

    #[test]
    fn test_at_timeline_extremes() {
        assert!(check_at_extremes::<CalendarYear>().iter().all(Option::is_some));
        assert!(check_at_extremes::<CalendarQuarter>().iter().all(Option::is_some));
        assert!(check_at_extremes::<CalendarMonth>().iter().all(Option::is_some));
        // The ISO week holding NaiveDate::MIN starts before it.
        let [first, _] = check_at_extremes::<CalendarWeek>();
        assert_eq!(first, None);
    }

    #[test]
    fn test_number_conversions() {
        let m = CalendarMonth::new(2020, 1).unwrap();
        assert_eq!(i64::from(m), 2020 * 12);
        assert_eq!(CalendarMonth::try_from(2020 * 12), Ok(m));
        assert!(CalendarMonth::try_from(i64::MAX).is_err());
    }
}
