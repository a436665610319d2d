// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Interval boundaries.
//!
//! A [`Boundary`] is one edge of an interval: either a finite time point
//! tagged [`Edge::Open`] or [`Edge::Closed`], or an infinite sentinel
//! towards the past or the future.
//!
//! Boundaries have no order of their own: an open boundary at `t` sits just
//! after `t` when it starts an interval and just before `t` when it ends one.
//! [`compare_at_start`] and [`compare_at_end`] order boundaries in those two
//! roles.  Both work through [`Endpoint`], the normalized position used by the
//! whole relation algebra.

use crate::timeline::Timeline;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether a finite boundary includes its time point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edge {
    Open,
    Closed,
}

/// Direction of an infinite boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Past,
    Future,
}

/// One edge of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Boundary<T> {
    /// Unbounded towards the past or the future; carries no time point.
    Infinite(Direction),
    /// A concrete time point, included or excluded.
    Finite(T, Edge),
}

impl<T> Boundary<T> {
    /// Boundary including `point`.
    #[inline]
    pub const fn closed(point: T) -> Self {
        Boundary::Finite(point, Edge::Closed)
    }

    /// Boundary excluding `point`.
    #[inline]
    pub const fn open(point: T) -> Self {
        Boundary::Finite(point, Edge::Open)
    }

    #[inline]
    pub const fn infinite_past() -> Self {
        Boundary::Infinite(Direction::Past)
    }

    #[inline]
    pub const fn infinite_future() -> Self {
        Boundary::Infinite(Direction::Future)
    }

    /// The time point of a finite boundary.
    pub fn point(&self) -> Option<&T> {
        match self {
            Boundary::Finite(point, _) => Some(point),
            Boundary::Infinite(_) => None,
        }
    }

    /// The edge of a finite boundary.
    pub fn edge(&self) -> Option<Edge> {
        match self {
            Boundary::Finite(_, edge) => Some(*edge),
            Boundary::Infinite(_) => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Boundary::Infinite(_))
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Boundary::Finite(_, Edge::Open))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Boundary::Finite(_, Edge::Closed))
    }
}

/// Orders two boundaries used as interval starts.
///
/// An open start at `t` is equal to a closed start at the next point after `t`.
pub fn compare_at_start<T: Timeline>(a: &Boundary<T>, b: &Boundary<T>) -> Ordering {
    Endpoint::start(a).cmp(&Endpoint::start(b))
}

/// Orders two boundaries used as interval ends.
///
/// Calendrical timelines compare closed ends and step open ends backwards;
/// half-open timelines compare open ends and step closed ends forward.  An
/// infinite future end is greater than every finite one.
pub fn compare_at_end<T: Timeline>(a: &Boundary<T>, b: &Boundary<T>) -> Ordering {
    Endpoint::end(a).cmp(&Endpoint::end(b))
}

/// Position of a normalized boundary on the extended timeline.
///
/// Starts normalize to their first included point.  Ends normalize to their
/// last included point on calendrical timelines and to their first excluded
/// point on half-open timelines.  When stepping leaves the timeline the result
/// is [`Underflow`](Endpoint::Underflow) or [`Overflow`](Endpoint::Overflow),
/// which still order correctly against every representable point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Endpoint<T> {
    PastInfinity,
    Underflow,
    At(T),
    Overflow,
    FutureInfinity,
}

impl<T: Timeline> Endpoint<T> {
    pub(crate) fn start(boundary: &Boundary<T>) -> Self {
        match boundary {
            Boundary::Infinite(Direction::Past) => Endpoint::PastInfinity,
            Boundary::Infinite(Direction::Future) => Endpoint::FutureInfinity,
            Boundary::Finite(t, Edge::Closed) => Endpoint::At(*t),
            Boundary::Finite(t, Edge::Open) => {
                t.step_forward().map_or(Endpoint::Overflow, Endpoint::At)
            }
        }
    }

    pub(crate) fn end(boundary: &Boundary<T>) -> Self {
        match boundary {
            Boundary::Infinite(Direction::Past) => Endpoint::PastInfinity,
            Boundary::Infinite(Direction::Future) => Endpoint::FutureInfinity,
            Boundary::Finite(t, edge) => match (T::is_calendrical(), edge) {
                (true, Edge::Closed) | (false, Edge::Open) => Endpoint::At(*t),
                (true, Edge::Open) => t.step_backwards().map_or(Endpoint::Underflow, Endpoint::At),
                (false, Edge::Closed) => t.step_forward().map_or(Endpoint::Overflow, Endpoint::At),
            },
        }
    }

    /// First excluded point after a normalized end.
    pub(crate) fn open_end(self) -> Self {
        if !T::is_calendrical() {
            return self;
        }
        match self {
            Endpoint::At(t) => t.step_forward().map_or(Endpoint::Overflow, Endpoint::At),
            Endpoint::Underflow => Endpoint::At(T::minimum()),
            other => other,
        }
    }

    /// Last included point before a normalized end.
    pub(crate) fn closed_end(self) -> Self {
        if T::is_calendrical() {
            return self;
        }
        match self {
            Endpoint::At(t) => t.step_backwards().map_or(Endpoint::Underflow, Endpoint::At),
            Endpoint::Overflow => Endpoint::At(T::maximum()),
            other => other,
        }
    }

    /// Normalized end position for a first excluded point; inverse of
    /// [`open_end`](Endpoint::open_end).
    pub(crate) fn from_open_end(open: Self) -> Self {
        if !T::is_calendrical() {
            return open;
        }
        match open {
            Endpoint::At(t) => t.step_backwards().map_or(Endpoint::Underflow, Endpoint::At),
            Endpoint::Overflow => Endpoint::At(T::maximum()),
            other => other,
        }
    }

    /// Infinite starts clamped onto the timeline minimum.
    pub(crate) fn clamp_start(self) -> Self {
        match self {
            Endpoint::PastInfinity => Endpoint::At(T::minimum()),
            other => other,
        }
    }

    /// Infinite ends clamped onto the timeline maximum.
    pub(crate) fn clamp_end(self) -> Self {
        match self {
            Endpoint::FutureInfinity if T::is_calendrical() => Endpoint::At(T::maximum()),
            Endpoint::FutureInfinity => Endpoint::Overflow,
            other => other,
        }
    }

    /// The point itself, when it lies on the timeline.
    pub(crate) fn point(self) -> Option<T> {
        match self {
            Endpoint::At(t) => Some(t),
            _ => None,
        }
    }

    /// Start boundary with the same position, when one exists.
    pub(crate) fn to_start_boundary(self) -> Option<Boundary<T>> {
        match self {
            Endpoint::PastInfinity => Some(Boundary::infinite_past()),
            Endpoint::At(t) => Some(Boundary::closed(t)),
            _ => None,
        }
    }

    /// End boundary in canonical form for a normalized end position.
    pub(crate) fn to_end_boundary(self) -> Option<Boundary<T>> {
        match self {
            Endpoint::FutureInfinity => Some(Boundary::infinite_future()),
            Endpoint::At(t) if T::is_calendrical() => Some(Boundary::closed(t)),
            Endpoint::At(t) => Some(Boundary::open(t)),
            Endpoint::Overflow if !T::is_calendrical() => Some(Boundary::closed(T::maximum())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_accessors() {
        let b = Boundary::open(7i64);
        assert_eq!(b.point(), Some(&7));
        assert_eq!(b.edge(), Some(Edge::Open));
        assert!(b.is_open() && !b.is_closed() && !b.is_infinite());
        assert_eq!(Boundary::<i64>::infinite_past().point(), None);
        assert_eq!(Boundary::<i64>::infinite_future().edge(), None);
    }

    #[test]
    fn test_infinite_boundaries_of_same_direction_are_equal() {
        assert_eq!(Boundary::<i64>::infinite_past(), Boundary::infinite_past());
        assert_ne!(Boundary::<i64>::infinite_past(), Boundary::infinite_future());
    }

    #[test]
    fn test_open_start_equals_next_closed_start() {
        assert_eq!(
            compare_at_start(&Boundary::open(4i64), &Boundary::closed(5)),
            Ordering::Equal
        );
        assert_eq!(
            compare_at_start(&Boundary::open(4i64), &Boundary::closed(4)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_infinite_past_sorts_first() {
        let past = Boundary::<i64>::infinite_past();
        assert_eq!(compare_at_start(&past, &Boundary::closed(i64::MIN)), Ordering::Less);
        assert_eq!(compare_at_start(&past, &past), Ordering::Equal);
        assert_eq!(
            compare_at_start(&past, &Boundary::infinite_future()),
            Ordering::Less
        );
    }

    #[test]
    fn test_end_comparison_half_open() {
        // [.., 4] and [.., 5) end at the same place on a counter timeline
        assert_eq!(
            compare_at_end(&Boundary::closed(4i64), &Boundary::open(5)),
            Ordering::Equal
        );
        assert_eq!(
            compare_at_end(&Boundary::closed(i64::MAX), &Boundary::open(i64::MAX)),
            Ordering::Greater
        );
        assert_eq!(
            compare_at_end(&Boundary::closed(i64::MAX), &Boundary::infinite_future()),
            Ordering::Less
        );
    }

    #[test]
    fn test_end_comparison_calendrical() {
        let open = Boundary::open(date(2020, 1, 11));
        let closed = Boundary::closed(date(2020, 1, 10));
        assert_eq!(compare_at_end(&open, &closed), Ordering::Equal);
        assert_eq!(
            Endpoint::end(&Boundary::open(NaiveDate::MIN)),
            Endpoint::Underflow
        );
        assert!(Endpoint::end(&Boundary::open(NaiveDate::MIN)) < Endpoint::At(NaiveDate::MIN));
    }

    #[test]
    fn test_open_and_closed_end_conversions() {
        let d = date(2020, 1, 10);
        assert_eq!(Endpoint::At(d).open_end(), Endpoint::At(date(2020, 1, 11)));
        assert_eq!(Endpoint::At(NaiveDate::MAX).open_end(), Endpoint::Overflow);
        assert_eq!(Endpoint::At(10i64).closed_end(), Endpoint::At(9));
        assert_eq!(Endpoint::<i64>::Overflow.closed_end(), Endpoint::At(i64::MAX));
        assert_eq!(
            Endpoint::from_open_end(Endpoint::At(date(2020, 1, 11))),
            Endpoint::At(d)
        );
        assert_eq!(
            Endpoint::<NaiveDate>::from_open_end(Endpoint::Overflow),
            Endpoint::At(NaiveDate::MAX)
        );
    }

    #[test]
    fn test_boundary_reconstruction() {
        assert_eq!(
            Endpoint::<i64>::Overflow.to_end_boundary(),
            Some(Boundary::closed(i64::MAX))
        );
        assert_eq!(Endpoint::<NaiveDate>::Overflow.to_end_boundary(), None);
        assert_eq!(Endpoint::At(3i64).to_end_boundary(), Some(Boundary::open(3)));
        assert_eq!(Endpoint::<i64>::Overflow.to_start_boundary(), None);
    }
}
