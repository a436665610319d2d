// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Generic interval implementation.
//!
//! This module provides:
//! - [`Interval<T>`]: an interval between two [`Boundary`] values over any [`Timeline`]
//! - kind aliases such as [`DateInterval`] and [`MomentInterval`]

use crate::boundary::{Boundary, Direction, Edge, Endpoint};
use crate::calendar::{CalendarMonth, CalendarQuarter, CalendarWeek, CalendarYear};
use crate::error::IntervalError;
use crate::timeline::{Ordinal, TimeArithmetic, Timeline};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use qtty::{Day, Days, Seconds};
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// Represents an interval between two boundaries on the same timeline.
///
/// Intervals are immutable values.  Construction rejects a start lying after
/// the end, including `(t, t)` and `(t, t]`; every derived interval
/// (`with_start`, `move_by`, intersections...) is a new value.
///
/// # Examples
///
/// ```
/// use chronoval::{Boundary, Interval};
///
/// let a = Interval::between(Boundary::closed(1i64), Boundary::open(5)).unwrap();
/// assert!(a.contains(&4));
/// assert!(!a.contains(&5));
///
/// assert!(Interval::between(Boundary::open(5i64), Boundary::open(5)).is_err());
/// assert!(Interval::between(Boundary::open(5i64), Boundary::closed(5)).is_err());
/// assert!(Interval::empty_at(5i64).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<T: Timeline> {
    start: Boundary<T>,
    end: Boundary<T>,
}

/// Closed/closed calendar dates.
pub type DateInterval = Interval<NaiveDate>;

/// Local timestamps without zone.
pub type TimestampInterval = Interval<NaiveDateTime>;

/// Global moments on the UTC axis.
pub type MomentInterval = Interval<DateTime<Utc>>;

/// Wall-clock times within one day.
pub type ClockInterval = Interval<NaiveTime>;

pub type YearInterval = Interval<CalendarYear>;
pub type QuarterInterval = Interval<CalendarQuarter>;
pub type MonthInterval = Interval<CalendarMonth>;
pub type WeekInterval = Interval<CalendarWeek>;

impl<T: Timeline> Interval<T> {
    /// Creates an interval between two boundaries.
    ///
    /// Fails when the start is infinite future or the end is infinite past.
    /// Finite boundaries fail when the start point lies after the end point,
    /// or when an open start sits on the end point: `(t, t)` and `(t, t]`
    /// both begin just after `t`.  Only `[t, t)` is accepted as empty.
    pub fn between(start: Boundary<T>, end: Boundary<T>) -> Result<Self, IntervalError> {
        match (&start, &end) {
            (Boundary::Infinite(Direction::Future), _) => {
                return Err(IntervalError::Invalid("start cannot be infinite future"))
            }
            (_, Boundary::Infinite(Direction::Past)) => {
                return Err(IntervalError::Invalid("end cannot be infinite past"))
            }
            (Boundary::Finite(s, start_edge), Boundary::Finite(e, end_edge)) => {
                if s > e {
                    return Err(IntervalError::Invalid("start after end"));
                }
                if s == e && *start_edge == Edge::Open {
                    return Err(IntervalError::Invalid(match end_edge {
                        Edge::Open => "open start and open end at the same point",
                        Edge::Closed => "open start after closed end at the same point",
                    }));
                }
            }
            _ => {}
        }
        Ok(Self { start, end })
    }

    /// `[start, end]`
    pub fn closed(start: T, end: T) -> Result<Self, IntervalError> {
        Self::between(Boundary::closed(start), Boundary::closed(end))
    }

    /// `[start, end)`
    pub fn closed_open(start: T, end: T) -> Result<Self, IntervalError> {
        Self::between(Boundary::closed(start), Boundary::open(end))
    }

    /// The empty interval `[anchor, anchor)`.
    pub fn empty_at(anchor: T) -> Self {
        Self {
            start: Boundary::closed(anchor),
            end: Boundary::open(anchor),
        }
    }

    /// `[start, +∞)`
    pub fn since(start: T) -> Self {
        Self {
            start: Boundary::closed(start),
            end: Boundary::infinite_future(),
        }
    }

    /// `(-∞, end]` on calendrical timelines, `(-∞, end)` otherwise.
    pub fn until(end: T) -> Self {
        let end = if T::is_calendrical() {
            Boundary::closed(end)
        } else {
            Boundary::open(end)
        };
        Self {
            start: Boundary::infinite_past(),
            end,
        }
    }

    /// `(-∞, +∞)`
    pub fn always() -> Self {
        Self {
            start: Boundary::infinite_past(),
            end: Boundary::infinite_future(),
        }
    }

    /// Builds an interval whose boundaries are known to be well formed.
    #[inline]
    pub(crate) fn new_unchecked(start: Boundary<T>, end: Boundary<T>) -> Self {
        debug_assert!(
            Self::between(start, end).is_ok(),
            "Invalid interval: boundaries violate construction invariants"
        );
        Self { start, end }
    }

    /// Builds the canonical interval covering `[start, open_end)` on the
    /// normalized timeline, or `None` if it holds no point.
    pub(crate) fn from_endpoints(start: Endpoint<T>, open_end: Endpoint<T>) -> Option<Self> {
        let start_boundary = start.to_start_boundary()?;
        let end_boundary = Endpoint::from_open_end(open_end).to_end_boundary()?;
        let interval = Self::between(start_boundary, end_boundary).ok()?;
        (!interval.is_empty()).then_some(interval)
    }

    #[inline]
    pub fn start(&self) -> Boundary<T> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Boundary<T> {
        self.end
    }

    /// First included position.
    #[inline]
    pub(crate) fn closed_start(&self) -> Endpoint<T> {
        Endpoint::start(&self.start)
    }

    /// End position in the timeline's own normalization (see [`Endpoint`]).
    #[inline]
    pub(crate) fn normalized_end(&self) -> Endpoint<T> {
        Endpoint::end(&self.end)
    }

    /// First excluded position after the interval.
    #[inline]
    pub(crate) fn open_end(&self) -> Endpoint<T> {
        self.normalized_end().open_end()
    }

    /// `true` if both boundaries are finite.
    pub fn is_finite(&self) -> bool {
        !self.start.is_infinite() && !self.end.is_infinite()
    }

    /// `true` if no point of the timeline lies inside the interval.
    ///
    /// Emptiness is computed: `[5, 5)` and `(4, 5)` on a counter timeline are
    /// empty, as is `(-∞, min)` where stepping before the minimum fails.
    pub fn is_empty(&self) -> bool {
        let first = self.closed_start().clamp_start();
        let last = self.normalized_end().clamp_end();
        if T::is_calendrical() {
            first > last
        } else {
            first >= last
        }
    }

    /// `true` if `point` satisfies both boundary conditions.
    pub fn contains(&self, point: &T) -> bool {
        let after_start = match &self.start {
            Boundary::Infinite(_) => true,
            Boundary::Finite(s, Edge::Closed) => s <= point,
            Boundary::Finite(s, Edge::Open) => s < point,
        };
        let before_end = match &self.end {
            Boundary::Infinite(_) => true,
            Boundary::Finite(e, Edge::Closed) => point <= e,
            Boundary::Finite(e, Edge::Open) => point < e,
        };
        after_start && before_end
    }

    /// `true` if `other` is finite, non-empty and nested inside this interval.
    pub fn contains_interval(&self, other: &Self) -> bool {
        if !other.is_finite() || other.is_empty() || self.is_empty() {
            return false;
        }
        self.closed_start() <= other.closed_start()
            && other.normalized_end() <= self.normalized_end()
    }

    /// `true` if every point of the interval lies before `point`.
    pub fn is_before(&self, point: &T) -> bool {
        let at = Endpoint::At(*point);
        if T::is_calendrical() {
            self.normalized_end() < at
        } else {
            self.normalized_end() <= at
        }
    }

    /// `true` if every point of the interval lies after `point`.
    pub fn is_after(&self, point: &T) -> bool {
        self.closed_start() > Endpoint::At(*point)
    }

    /// Same end, new start.
    pub fn with_start(&self, start: Boundary<T>) -> Result<Self, IntervalError> {
        Self::between(start, self.end)
    }

    /// Same start, new end.
    pub fn with_end(&self, end: Boundary<T>) -> Result<Self, IntervalError> {
        Self::between(self.start, end)
    }

    /// Converts to the canonical form of the timeline.
    ///
    /// Calendrical intervals become closed/closed and all others closed/open.
    /// An empty calendrical interval canonicalizes to `[s, s)` anchored at its
    /// first would-be point `s`.  Fails when an open boundary sits on the
    /// timeline extreme it would have to step past.
    pub fn to_canonical(&self) -> Result<Self, IntervalError> {
        let start = match self.start {
            Boundary::Finite(t, Edge::Open) => {
                let first = t.step_forward().ok_or(IntervalError::Canonicalization(
                    "open start at the timeline maximum",
                ))?;
                Boundary::closed(first)
            }
            other => other,
        };
        let end = match (T::is_calendrical(), self.end) {
            (true, Boundary::Finite(t, Edge::Open)) => {
                let last = t.step_backwards().ok_or(IntervalError::Canonicalization(
                    "open end at the timeline minimum",
                ))?;
                Boundary::closed(last)
            }
            (false, Boundary::Finite(t, Edge::Closed)) => {
                let past_last = t.step_forward().ok_or(IntervalError::Canonicalization(
                    "closed end at the timeline maximum",
                ))?;
                Boundary::open(past_last)
            }
            (_, other) => other,
        };
        // The canonical start is closed, so only a calendrical `[s, e]` with
        // `e` before `s` can fail here: that interval is empty.
        match (Self::between(start, end), start) {
            (Ok(canonical), _) => Ok(canonical),
            (Err(_), Boundary::Finite(anchor, _)) => Ok(Self::empty_at(anchor)),
            (Err(err), _) => Err(err),
        }
    }

    /// Boundary-wise intersection in canonical form, or `None` if the two
    /// intervals share no point.
    pub fn find_intersection(&self, other: &Self) -> Option<Self> {
        let start = self.closed_start().max(other.closed_start());
        let end = self.normalized_end().min(other.normalized_end());
        let interval = Self::between(start.to_start_boundary()?, end.to_end_boundary()?).ok()?;
        (!interval.is_empty()).then_some(interval)
    }

    /// First and last included point of a finite, non-empty interval.
    pub(crate) fn closed_range(&self) -> Result<(T, T), IntervalError> {
        if !self.is_finite() {
            return Err(IntervalError::UnsupportedForInfinite);
        }
        if self.is_empty() {
            return Err(IntervalError::Empty);
        }
        match (
            self.closed_start().point(),
            self.normalized_end().closed_end().point(),
        ) {
            (Some(first), Some(last)) => Ok((first, last)),
            _ => Err(IntervalError::Empty),
        }
    }
}

impl<T: TimeArithmetic> Interval<T> {
    /// Shifts both finite boundaries by `duration`.
    pub fn move_by(&self, duration: T::Duration) -> Result<Self, IntervalError> {
        let shift = |boundary: Boundary<T>| match boundary {
            Boundary::Finite(t, edge) => t
                .add_duration(duration)
                .map(|moved| Boundary::Finite(moved, edge))
                .ok_or(IntervalError::ArithmeticOverflow),
            infinite => Ok(infinite),
        };
        Self::between(shift(self.start)?, shift(self.end)?)
    }

    /// Length from the first included point to the first excluded point.
    ///
    /// Empty intervals have zero length.
    pub fn duration(&self) -> Result<T::Duration, IntervalError> {
        if !self.is_finite() {
            return Err(IntervalError::UnsupportedForInfinite);
        }
        match (self.closed_start(), self.open_end()) {
            (Endpoint::At(first), Endpoint::At(past_last)) => past_last
                .difference(&first)
                .ok_or(IntervalError::ArithmeticOverflow),
            _ => Err(IntervalError::ArithmeticOverflow),
        }
    }
}

// Chrono-based timelines measure their length with a `TimeDelta`.
impl<T: TimeArithmetic<Duration = TimeDelta>> Interval<T> {
    /// Returns the length in seconds.
    pub fn duration_seconds(&self) -> Result<Seconds, IntervalError> {
        const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

        let duration = self.duration()?;
        Ok(match duration.num_nanoseconds() {
            Some(ns) => Seconds::new(ns as f64 / NANOS_PER_SECOND),
            // Fallback for durations that do not fit in i64 nanoseconds.
            None => Seconds::new(duration.num_seconds() as f64),
        })
    }

    /// Returns the length in days as a floating-point quantity.
    pub fn duration_days(&self) -> Result<Days, IntervalError> {
        Ok(self.duration_seconds()?.to::<Day>())
    }
}

impl<T: Ordinal> Interval<T> {
    /// Picks a uniformly distributed point of a finite, non-empty interval.
    ///
    /// The random source is supplied by the caller, so no generator state is
    /// shared between threads.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<T, IntervalError> {
        let (first, last) = self.closed_range()?;
        let ordinal = rng.gen_range(first.to_ordinal()..=last.to_ordinal());
        T::from_ordinal(ordinal).ok_or(IntervalError::ArithmeticOverflow)
    }
}

// Display implementation
impl<T: Timeline + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.start {
            Boundary::Infinite(_) => write!(f, "(-∞")?,
            Boundary::Finite(t, Edge::Closed) => write!(f, "[{t}")?,
            Boundary::Finite(t, Edge::Open) => write!(f, "({t}")?,
        }
        match &self.end {
            Boundary::Infinite(_) => write!(f, "/+∞)"),
            Boundary::Finite(t, Edge::Closed) => write!(f, "/{t}]"),
            Boundary::Finite(t, Edge::Open) => write!(f, "/{t})"),
        }
    }
}

// Serde support
//
// Deserialization re-validates the boundaries, so malformed input is reported
// as an error instead of producing an invalid interval.
#[cfg(feature = "serde")]
impl<T: Timeline + Serialize> Serialize for Interval<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Timeline + Deserialize<'de>> Deserialize<'de> for Interval<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw<P> {
            start: Boundary<P>,
            end: Boundary<P>,
        }

        let raw = Raw::<T>::deserialize(deserializer)?;
        Interval::between(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}
