// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Allen's interval algebra.
//!
//! Every predicate compares the first included position of each interval
//! (its *closed start*) and the end position normalized for the timeline:
//! the last included point on calendrical timelines, the first excluded point
//! on half-open ones.  With those two positions per interval the thirteen
//! relations are a plain partition of the three comparisons
//! `start(A) ? start(B)`, `end(A) ? start(B)` (or `start(A) ? end(B)`) and
//! `end(A) ? end(B)`, so exactly one relation holds for any pair of
//! well-formed intervals, including empty and unbounded ones.
//!
//! ```
//! use chronoval::{Interval, IntervalRelation};
//! use chrono::NaiveDate;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2020, 1, day).unwrap();
//! let a = Interval::closed(d(1), d(10)).unwrap();
//! let b = Interval::closed(d(10), d(20)).unwrap();
//!
//! assert!(a.meets(&b));
//! assert_eq!(IntervalRelation::between(&a, &b), IntervalRelation::Meets);
//! ```

use crate::boundary::Endpoint;
use crate::interval::Interval;
use crate::timeline::Timeline;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The thirteen relations of Allen's interval algebra.
///
/// Variants read as "A *relation* B"; the order is chosen so that the inverse
/// of the relation at index `i` sits at index `12 - i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntervalRelation {
    /// A ends before B starts, with a gap between them.
    Precedes,
    /// A ends exactly where B starts.
    Meets,
    /// A starts first and ends inside B.
    Overlaps,
    /// A starts inside B and both end together.
    Finishes,
    /// Both start together and A ends first.
    Starts,
    /// B lies strictly inside A.
    Encloses,
    /// Same start and same end.
    Equivalent,
    /// A lies strictly inside B.
    EnclosedBy,
    /// Both start together and B ends first.
    StartedBy,
    /// B starts inside A and both end together.
    FinishedBy,
    /// B starts first and ends inside A.
    OverlappedBy,
    /// B ends exactly where A starts.
    MetBy,
    /// B ends before A starts, with a gap between them.
    PrecededBy,
}

impl IntervalRelation {
    pub const ALL: [IntervalRelation; 13] = [
        IntervalRelation::Precedes,
        IntervalRelation::Meets,
        IntervalRelation::Overlaps,
        IntervalRelation::Finishes,
        IntervalRelation::Starts,
        IntervalRelation::Encloses,
        IntervalRelation::Equivalent,
        IntervalRelation::EnclosedBy,
        IntervalRelation::StartedBy,
        IntervalRelation::FinishedBy,
        IntervalRelation::OverlappedBy,
        IntervalRelation::MetBy,
        IntervalRelation::PrecededBy,
    ];

    const STARTING_AFTER: [IntervalRelation; 5] = [
        IntervalRelation::EnclosedBy,
        IntervalRelation::Finishes,
        IntervalRelation::OverlappedBy,
        IntervalRelation::MetBy,
        IntervalRelation::PrecededBy,
    ];

    const STARTING_TOGETHER: [IntervalRelation; 3] = [
        IntervalRelation::Starts,
        IntervalRelation::Equivalent,
        IntervalRelation::StartedBy,
    ];

    const STARTING_BEFORE: [IntervalRelation; 5] = [
        IntervalRelation::Precedes,
        IntervalRelation::Meets,
        IntervalRelation::Overlaps,
        IntervalRelation::FinishedBy,
        IntervalRelation::Encloses,
    ];

    /// The relation that holds between `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if no candidate relation matches, which means the boundary
    /// comparisons themselves are inconsistent.
    pub fn between<T: Timeline>(a: &Interval<T>, b: &Interval<T>) -> IntervalRelation {
        let candidates: &[IntervalRelation] = match a.closed_start().cmp(&b.closed_start()) {
            Ordering::Greater => &Self::STARTING_AFTER,
            Ordering::Equal => &Self::STARTING_TOGETHER,
            Ordering::Less => &Self::STARTING_BEFORE,
        };
        for relation in candidates {
            if relation.is_satisfied_by(a, b) {
                return *relation;
            }
        }
        panic!(
            "Internal consistency error: no interval relation matches {:?} and {:?}",
            a, b
        );
    }

    /// The relation that holds with the arguments swapped.
    #[inline]
    pub fn inverse(self) -> IntervalRelation {
        Self::ALL[12 - self as usize]
    }

    /// `true` if this relation holds between `a` and `b`.
    pub fn is_satisfied_by<T: Timeline>(self, a: &Interval<T>, b: &Interval<T>) -> bool {
        match self {
            IntervalRelation::Precedes => a.precedes(b),
            IntervalRelation::Meets => a.meets(b),
            IntervalRelation::Overlaps => a.overlaps(b),
            IntervalRelation::Finishes => a.finishes(b),
            IntervalRelation::Starts => a.starts(b),
            IntervalRelation::Encloses => a.encloses(b),
            IntervalRelation::Equivalent => a.equivalent_to(b),
            IntervalRelation::EnclosedBy => a.enclosed_by(b),
            IntervalRelation::StartedBy => a.started_by(b),
            IntervalRelation::FinishedBy => a.finished_by(b),
            IntervalRelation::OverlappedBy => a.overlapped_by(b),
            IntervalRelation::MetBy => a.met_by(b),
            IntervalRelation::PrecededBy => a.preceded_by(b),
        }
    }
}

impl fmt::Display for IntervalRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntervalRelation::Precedes => "PRECEDES",
            IntervalRelation::Meets => "MEETS",
            IntervalRelation::Overlaps => "OVERLAPS",
            IntervalRelation::Finishes => "FINISHES",
            IntervalRelation::Starts => "STARTS",
            IntervalRelation::Encloses => "ENCLOSES",
            IntervalRelation::Equivalent => "EQUIVALENT",
            IntervalRelation::EnclosedBy => "ENCLOSED_BY",
            IntervalRelation::StartedBy => "STARTED_BY",
            IntervalRelation::FinishedBy => "FINISHED_BY",
            IntervalRelation::OverlappedBy => "OVERLAPPED_BY",
            IntervalRelation::MetBy => "MET_BY",
            IntervalRelation::PrecededBy => "PRECEDED_BY",
        };
        f.write_str(name)
    }
}

/// Normalized `(start, end)` positions of an interval.
#[inline]
fn cuts<T: Timeline>(interval: &Interval<T>) -> (Endpoint<T>, Endpoint<T>) {
    (interval.closed_start(), interval.normalized_end())
}

impl<T: Timeline> Interval<T> {
    /// The Allen relation from this interval to `other`.
    #[inline]
    pub fn relation_to(&self, other: &Self) -> IntervalRelation {
        IntervalRelation::between(self, other)
    }

    /// `true` if this interval ends before `other` starts, with a gap between.
    pub fn precedes(&self, other: &Self) -> bool {
        let (sa, ea) = cuts(self);
        let (sb, _) = cuts(other);
        sa < sb && ea < sb
    }

    /// `true` if `other` precedes this interval.
    pub fn preceded_by(&self, other: &Self) -> bool {
        other.precedes(self)
    }

    /// `true` if this interval ends where `other` starts.
    pub fn meets(&self, other: &Self) -> bool {
        let (sa, ea) = cuts(self);
        let (sb, _) = cuts(other);
        sa < sb && ea == sb
    }

    /// `true` if `other` meets this interval.
    pub fn met_by(&self, other: &Self) -> bool {
        other.meets(self)
    }

    /// `true` if this interval starts first and ends inside `other`.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (sa, ea) = cuts(self);
        let (sb, eb) = cuts(other);
        sa < sb && sb < ea && ea < eb
    }

    /// `true` if `other` overlaps this interval.
    pub fn overlapped_by(&self, other: &Self) -> bool {
        other.overlaps(self)
    }

    /// `true` if this interval starts inside `other` and both end together.
    pub fn finishes(&self, other: &Self) -> bool {
        let (sa, ea) = cuts(self);
        let (sb, eb) = cuts(other);
        sb < sa && sa < eb && ea == eb
    }

    /// `true` if `other` finishes this interval.
    pub fn finished_by(&self, other: &Self) -> bool {
        other.finishes(self)
    }

    /// `true` if both start together and this interval ends first.
    pub fn starts(&self, other: &Self) -> bool {
        let (sa, ea) = cuts(self);
        let (sb, eb) = cuts(other);
        sa == sb && ea < eb
    }

    /// `true` if `other` starts this interval.
    pub fn started_by(&self, other: &Self) -> bool {
        other.starts(self)
    }

    /// `true` if `other` lies strictly inside this interval at both ends.
    pub fn encloses(&self, other: &Self) -> bool {
        let (sa, ea) = cuts(self);
        let (sb, eb) = cuts(other);
        sa < sb && sb < ea && eb < ea
    }

    /// `true` if `other` encloses this interval.
    pub fn enclosed_by(&self, other: &Self) -> bool {
        other.encloses(self)
    }

    /// Same normalized start and end; `[1, 5)` and `[1, 4]` are equivalent on
    /// a counter timeline.
    pub fn equivalent_to(&self, other: &Self) -> bool {
        cuts(self) == cuts(other)
    }

    /// `true` if both intervals share at least one point.
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (sa, ea) = cuts(self);
        let (sb, eb) = cuts(other);
        if T::is_calendrical() {
            sa <= eb && sb <= ea
        } else {
            sa < eb && sb < ea
        }
    }

    /// `true` if the intervals are adjacent: one ends exactly where the other
    /// starts, leaving neither gap nor overlap.
    pub fn abuts(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        (self.open_end() == other.closed_start()) ^ (other.open_end() == self.closed_start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days(a: u32, b: u32) -> Interval<NaiveDate> {
        Interval::closed(date(2020, 1, a), date(2020, 1, b)).unwrap()
    }

    fn span(a: i64, b: i64) -> Interval<i64> {
        Interval::closed_open(a, b).unwrap()
    }

    #[test]
    fn test_inverse_pairs() {
        use IntervalRelation::*;
        assert_eq!(Precedes.inverse(), PrecededBy);
        assert_eq!(Meets.inverse(), MetBy);
        assert_eq!(Overlaps.inverse(), OverlappedBy);
        assert_eq!(Finishes.inverse(), FinishedBy);
        assert_eq!(Starts.inverse(), StartedBy);
        assert_eq!(Encloses.inverse(), EnclosedBy);
        assert_eq!(Equivalent.inverse(), Equivalent);
        for r in IntervalRelation::ALL {
            assert_eq!(r.inverse().inverse(), r);
        }
    }

    #[test]
    fn test_all_thirteen_on_counter_timeline() {
        use IntervalRelation::*;
        let a = span(10, 20);
        let cases = [
            (span(0, 5), Precedes),
            (span(0, 10), Meets),
            (span(5, 15), Overlaps),
            (span(15, 20), Finishes),
            (span(10, 15), Starts),
            (span(0, 30), Encloses),
            (span(10, 20), Equivalent),
            (span(12, 18), EnclosedBy),
            (span(10, 30), StartedBy),
            (span(0, 20), FinishedBy),
            (span(15, 25), OverlappedBy),
            (span(20, 25), MetBy),
            (span(25, 30), PrecededBy),
        ];
        for (b, expected) in cases {
            assert_eq!(b.relation_to(&a), expected, "{b} vs {a}");
            assert_eq!(a.relation_to(&b), expected.inverse(), "{a} vs {b}");
        }
    }

    #[test]
    fn test_calendrical_meets_on_shared_day() {
        let a = days(1, 10);
        let b = days(10, 20);
        assert!(a.meets(&b));
        assert!(!a.overlaps(&b));
        assert!(a.intersects(&b));
        assert_eq!(IntervalRelation::between(&a, &b), IntervalRelation::Meets);
    }

    #[test]
    fn test_calendrical_adjacent_days_precede() {
        let a = days(1, 9);
        let b = days(10, 20);
        assert!(a.precedes(&b));
        assert!(a.abuts(&b));
        assert!(b.abuts(&a));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_half_open_meets_and_abuts() {
        let a = span(0, 10);
        let b = span(10, 20);
        assert!(a.meets(&b));
        assert!(a.abuts(&b));
        assert!(!a.intersects(&b));
        assert!(!span(0, 11).abuts(&b));
        assert!(!span(0, 9).abuts(&b));
    }

    #[test]
    fn test_edges_are_normalized_before_comparing() {
        let closed = Interval::closed(1i64, 4).unwrap();
        let open = Interval::between(Boundary::open(0i64), Boundary::open(5)).unwrap();
        assert!(closed.equivalent_to(&span(1, 5)));
        assert!(open.equivalent_to(&span(1, 5)));
        assert_eq!(closed.relation_to(&open), IntervalRelation::Equivalent);
    }

    #[test]
    fn test_infinite_boundaries() {
        let always = Interval::<i64>::always();
        let since = Interval::since(5i64);
        let until = Interval::until(5i64);
        assert!(always.equivalent_to(&always));
        assert_eq!(since.relation_to(&always), IntervalRelation::Finishes);
        assert_eq!(until.relation_to(&always), IntervalRelation::Starts);
        assert_eq!(until.relation_to(&since), IntervalRelation::Meets);
        assert!(until.abuts(&since));
        assert!(!until.intersects(&since));
        assert!(span(0, 10).intersects(&since));
    }

    #[test]
    fn test_empty_intervals_never_intersect_or_abut() {
        let empty = Interval::empty_at(5i64);
        assert!(!empty.intersects(&span(0, 10)));
        assert!(!empty.abuts(&span(0, 5)));
        assert!(!span(5, 10).abuts(&empty));
        assert_eq!(empty.relation_to(&span(0, 10)), IntervalRelation::EnclosedBy);
    }

    #[test]
    fn test_exactly_one_relation_holds() {
        let samples = [
            span(0, 5),
            span(0, 10),
            span(5, 10),
            span(3, 7),
            Interval::empty_at(5),
            Interval::since(5),
            Interval::until(5),
            Interval::always(),
        ];
        for a in &samples {
            for b in &samples {
                let held: Vec<_> = IntervalRelation::ALL
                    .into_iter()
                    .filter(|r| r.is_satisfied_by(a, b))
                    .collect();
                assert_eq!(held, vec![IntervalRelation::between(a, b)], "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_relation_display() {
        assert_eq!(IntervalRelation::OverlappedBy.to_string(), "OVERLAPPED_BY");
    }
}
