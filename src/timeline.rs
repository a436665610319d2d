// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Timeline capabilities over time point types.
//!
//! A [`Timeline`] is everything the interval algebra needs to know about a
//! time point type: a total order, the smallest step in either direction and
//! the two extreme values.  Whether a timeline is *calendrical* decides the
//! canonical form of its intervals (closed/closed versus closed/open).
//!
//! Two optional capabilities build on it:
//!
//! - [`Ordinal`] maps every point to an `i128` position, which makes uniform
//!   sampling, range splitting and the binary codec possible.
//! - [`TimeArithmetic`] adds and subtracts durations.
//!
//! Implementations are provided for the chrono types used as the external
//! date/time library, for the calendar units in [`crate::calendar`] and for
//! bare `i64` counters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use std::fmt;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SECOND;
const ONE_NANO: TimeDelta = TimeDelta::nanoseconds(1);

// ═══════════════════════════════════════════════════════════════════════════
// Traits
// ═══════════════════════════════════════════════════════════════════════════

/// Ordering and stepping capability of a time point type.
///
/// `Ord` is the timeline order.  Stepping returns `None` instead of
/// wrapping or saturating when it would leave `[minimum(), maximum()]`.
pub trait Timeline: Copy + Ord + fmt::Debug {
    /// The next point after `self`, or `None` at the maximum.
    fn step_forward(&self) -> Option<Self>;

    /// The point before `self`, or `None` at the minimum.
    fn step_backwards(&self) -> Option<Self>;

    /// Smallest representable point.
    fn minimum() -> Self;

    /// Largest representable point.
    fn maximum() -> Self;

    /// `true` when intervals over this timeline are canonically closed at
    /// both ends (dates, months, years...), `false` for half-open timelines.
    fn is_calendrical() -> bool;
}

/// Bijection between time points and `i128` positions on the timeline.
///
/// Consecutive points have consecutive ordinals, so
/// `t.step_forward().map(|n| n.to_ordinal()) == Some(t.to_ordinal() + 1)`.
pub trait Ordinal: Timeline {
    fn to_ordinal(&self) -> i128;

    /// Inverse of [`to_ordinal`](Ordinal::to_ordinal); `None` outside the timeline.
    fn from_ordinal(ordinal: i128) -> Option<Self>;
}

/// Duration arithmetic over a timeline.
pub trait TimeArithmetic: Timeline {
    /// The duration type used for arithmetic operations.
    type Duration: Copy + fmt::Debug;

    /// Add a duration to this time point.
    fn add_duration(&self, duration: Self::Duration) -> Option<Self>;

    /// Subtract a duration from this time point.
    fn sub_duration(&self, duration: Self::Duration) -> Option<Self>;

    /// Signed difference `self - other`.
    fn difference(&self, other: &Self) -> Option<Self::Duration>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Calendar dates
// ═══════════════════════════════════════════════════════════════════════════

impl Timeline for NaiveDate {
    #[inline]
    fn step_forward(&self) -> Option<Self> {
        self.succ_opt()
    }

    #[inline]
    fn step_backwards(&self) -> Option<Self> {
        self.pred_opt()
    }

    fn minimum() -> Self {
        NaiveDate::MIN
    }

    fn maximum() -> Self {
        NaiveDate::MAX
    }

    fn is_calendrical() -> bool {
        true
    }
}

impl Ordinal for NaiveDate {
    #[inline]
    fn to_ordinal(&self) -> i128 {
        i128::from(chrono::Datelike::num_days_from_ce(self))
    }

    fn from_ordinal(ordinal: i128) -> Option<Self> {
        i32::try_from(ordinal)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
    }
}

impl TimeArithmetic for NaiveDate {
    type Duration = TimeDelta;

    #[inline]
    fn add_duration(&self, duration: TimeDelta) -> Option<Self> {
        self.checked_add_signed(duration)
    }

    #[inline]
    fn sub_duration(&self, duration: TimeDelta) -> Option<Self> {
        self.checked_sub_signed(duration)
    }

    #[inline]
    fn difference(&self, other: &Self) -> Option<TimeDelta> {
        Some(self.signed_duration_since(*other))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Local timestamps
// ═══════════════════════════════════════════════════════════════════════════

impl Timeline for NaiveDateTime {
    #[inline]
    fn step_forward(&self) -> Option<Self> {
        self.checked_add_signed(ONE_NANO)
    }

    #[inline]
    fn step_backwards(&self) -> Option<Self> {
        self.checked_sub_signed(ONE_NANO)
    }

    fn minimum() -> Self {
        NaiveDateTime::MIN
    }

    fn maximum() -> Self {
        NaiveDateTime::MAX
    }

    fn is_calendrical() -> bool {
        false
    }
}

impl Ordinal for NaiveDateTime {
    fn to_ordinal(&self) -> i128 {
        self.and_utc().to_ordinal()
    }

    fn from_ordinal(ordinal: i128) -> Option<Self> {
        DateTime::<Utc>::from_ordinal(ordinal).map(|utc| utc.naive_utc())
    }
}

impl TimeArithmetic for NaiveDateTime {
    type Duration = TimeDelta;

    #[inline]
    fn add_duration(&self, duration: TimeDelta) -> Option<Self> {
        self.checked_add_signed(duration)
    }

    #[inline]
    fn sub_duration(&self, duration: TimeDelta) -> Option<Self> {
        self.checked_sub_signed(duration)
    }

    #[inline]
    fn difference(&self, other: &Self) -> Option<TimeDelta> {
        Some(self.signed_duration_since(*other))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Global moments
// ═══════════════════════════════════════════════════════════════════════════

impl Timeline for DateTime<Utc> {
    #[inline]
    fn step_forward(&self) -> Option<Self> {
        self.checked_add_signed(ONE_NANO)
    }

    #[inline]
    fn step_backwards(&self) -> Option<Self> {
        self.checked_sub_signed(ONE_NANO)
    }

    fn minimum() -> Self {
        DateTime::<Utc>::MIN_UTC
    }

    fn maximum() -> Self {
        DateTime::<Utc>::MAX_UTC
    }

    fn is_calendrical() -> bool {
        false
    }
}

impl Ordinal for DateTime<Utc> {
    /// Nanoseconds since the Unix epoch.
    fn to_ordinal(&self) -> i128 {
        i128::from(self.timestamp()) * NANOS_PER_SECOND
            + i128::from(self.timestamp_subsec_nanos())
    }

    fn from_ordinal(ordinal: i128) -> Option<Self> {
        let secs = i64::try_from(ordinal.div_euclid(NANOS_PER_SECOND)).ok()?;
        let nanos = ordinal.rem_euclid(NANOS_PER_SECOND) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }
}

impl TimeArithmetic for DateTime<Utc> {
    type Duration = TimeDelta;

    #[inline]
    fn add_duration(&self, duration: TimeDelta) -> Option<Self> {
        self.checked_add_signed(duration)
    }

    #[inline]
    fn sub_duration(&self, duration: TimeDelta) -> Option<Self> {
        self.checked_sub_signed(duration)
    }

    #[inline]
    fn difference(&self, other: &Self) -> Option<TimeDelta> {
        Some(self.signed_duration_since(*other))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Clock times
// ═══════════════════════════════════════════════════════════════════════════

// Leap-second representations (nanosecond field >= 1e9) sort after
// `maximum()` and are not part of this timeline.
impl Timeline for NaiveTime {
    fn step_forward(&self) -> Option<Self> {
        if *self >= Self::maximum() {
            None
        } else {
            Some(*self + ONE_NANO)
        }
    }

    fn step_backwards(&self) -> Option<Self> {
        if *self == Self::minimum() {
            None
        } else {
            Some(*self - ONE_NANO)
        }
    }

    fn minimum() -> Self {
        NaiveTime::MIN
    }

    /// 23:59:59.999999999
    fn maximum() -> Self {
        NaiveTime::MIN - ONE_NANO
    }

    fn is_calendrical() -> bool {
        false
    }
}

impl Ordinal for NaiveTime {
    fn to_ordinal(&self) -> i128 {
        i128::from(self.num_seconds_from_midnight()) * NANOS_PER_SECOND
            + i128::from(self.nanosecond())
    }

    fn from_ordinal(ordinal: i128) -> Option<Self> {
        if !(0..NANOS_PER_DAY).contains(&ordinal) {
            return None;
        }
        let secs = (ordinal / NANOS_PER_SECOND) as u32;
        let nanos = (ordinal % NANOS_PER_SECOND) as u32;
        NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
    }
}

impl TimeArithmetic for NaiveTime {
    type Duration = TimeDelta;

    fn add_duration(&self, duration: TimeDelta) -> Option<Self> {
        let (time, wrapped_secs) = self.overflowing_add_signed(duration);
        (wrapped_secs == 0).then_some(time)
    }

    fn sub_duration(&self, duration: TimeDelta) -> Option<Self> {
        let (time, wrapped_secs) = self.overflowing_sub_signed(duration);
        (wrapped_secs == 0).then_some(time)
    }

    #[inline]
    fn difference(&self, other: &Self) -> Option<TimeDelta> {
        Some(self.signed_duration_since(*other))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Bare counters
// ═══════════════════════════════════════════════════════════════════════════

impl Timeline for i64 {
    #[inline]
    fn step_forward(&self) -> Option<Self> {
        self.checked_add(1)
    }

    #[inline]
    fn step_backwards(&self) -> Option<Self> {
        self.checked_sub(1)
    }

    fn minimum() -> Self {
        i64::MIN
    }

    fn maximum() -> Self {
        i64::MAX
    }

    fn is_calendrical() -> bool {
        false
    }
}

impl Ordinal for i64 {
    #[inline]
    fn to_ordinal(&self) -> i128 {
        i128::from(*self)
    }

    #[inline]
    fn from_ordinal(ordinal: i128) -> Option<Self> {
        i64::try_from(ordinal).ok()
    }
}

impl TimeArithmetic for i64 {
    type Duration = i64;

    #[inline]
    fn add_duration(&self, duration: i64) -> Option<Self> {
        i64::checked_add(*self, duration)
    }

    #[inline]
    fn sub_duration(&self, duration: i64) -> Option<Self> {
        i64::checked_sub(*self, duration)
    }

    #[inline]
    fn difference(&self, other: &Self) -> Option<i64> {
        i64::checked_sub(*self, *other)
    }
}
