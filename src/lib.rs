// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Temporal Interval Algebra
//!
//! This crate provides intervals over arbitrary timelines with open, closed
//! and infinite boundaries, Allen's thirteen interval relations, and an
//! augmented interval tree for overlap queries.
//!
//! # Core types
//!
//! - [`Timeline`]: ordering and stepping capability of a time point type.
//! - [`Boundary<T>`]: one edge of an interval: finite open/closed or infinite.
//! - [`Interval<T>`]: an immutable interval between two boundaries.
//! - [`IntervalRelation`]: the thirteen Allen relations.
//! - [`IntervalTree<T>`]: augmented AVL tree answering point and range
//!   intersection queries in `O(log n + k)`.
//!
//! # Timelines
//!
//! | Type | Canonical form | Alias |
//! |------|----------------|-------|
//! | [`NaiveDate`](chrono::NaiveDate) | `[a, b]` | [`DateInterval`] |
//! | [`NaiveDateTime`](chrono::NaiveDateTime) | `[a, b)` | [`TimestampInterval`] |
//! | [`DateTime<Utc>`](chrono::DateTime) | `[a, b)` | [`MomentInterval`] |
//! | [`NaiveTime`](chrono::NaiveTime) | `[a, b)` | [`ClockInterval`] |
//! | [`CalendarYear`] | `[a, b]` | [`YearInterval`] |
//! | [`CalendarQuarter`] | `[a, b]` | [`QuarterInterval`] |
//! | [`CalendarMonth`] | `[a, b]` | [`MonthInterval`] |
//! | [`CalendarWeek`] | `[a, b]` | [`WeekInterval`] |
//! | `i64` | `[a, b)` | |
//!
//! Calendrical timelines (dates and calendar units) compare interval ends by
//! their last included point; all others by their first excluded point.  This
//! is what makes `[2020-01-01, 2020-01-10]` *meet* `[2020-01-10, 2020-01-20]`
//! while `[0, 10)` meets `[10, 20)`.
//!
//! # Example
//!
//! ```
//! use chronoval::{Interval, IntervalRelation, IntervalTree};
//! use chrono::NaiveDate;
//!
//! let d = |m, day| NaiveDate::from_ymd_opt(2020, m, day).unwrap();
//! let q1 = Interval::closed(d(1, 1), d(3, 31)).unwrap();
//! let feb = Interval::closed(d(2, 1), d(2, 29)).unwrap();
//!
//! assert_eq!(feb.relation_to(&q1), IntervalRelation::EnclosedBy);
//! assert_eq!(q1.find_intersection(&feb), Some(feb));
//!
//! let tree = IntervalTree::on([q1, feb]).unwrap();
//! assert_eq!(tree.find_intersections_at(&d(2, 14)).len(), 2);
//! ```

mod boundary;
mod calendar;
pub mod codec;
mod collection;
mod error;
mod interval;
mod relation;
mod stream;
mod timeline;
mod tree;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use boundary::{compare_at_end, compare_at_start, Boundary, Direction, Edge};
pub use calendar::{CalendarMonth, CalendarQuarter, CalendarUnit, CalendarWeek, CalendarYear};
pub use codec::Discriminant;
pub use collection::{gaps_within, intersect_sorted, merge_blocks};
pub use error::{DecodeError, IntervalError};
pub use interval::{
    ClockInterval, DateInterval, Interval, MomentInterval, MonthInterval, QuarterInterval,
    TimestampInterval, WeekInterval, YearInterval,
};
pub use relation::IntervalRelation;
pub use stream::{Chunks, Points, Steps};
pub use timeline::{Ordinal, TimeArithmetic, Timeline};
pub use tree::{IntervalTree, Iter};
