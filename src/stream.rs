// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lazy sequences derived from finite intervals.
//!
//! - [`Points`] walks every point of an interval on its timeline, from either
//!   end, and can [`split`](Points::split) off half of the remaining range for
//!   another thread.
//! - [`Steps`] advances a cursor by a fixed duration, forward or backward.
//! - [`Chunks`] cuts an interval into consecutive sub-intervals of a fixed
//!   duration.
//!
//! Every sequence is derived from an immutable interval, so calling
//! [`Interval::points`] again restarts it.

use crate::boundary::Boundary;
use crate::error::IntervalError;
use crate::interval::Interval;
use crate::timeline::{Ordinal, TimeArithmetic};
use std::iter::FusedIterator;

/// Every point of a finite interval, in timeline order.
///
/// Iterating from the back walks the interval backwards.
#[derive(Debug, Clone)]
pub struct Points<T: Ordinal> {
    next: i128,
    last: i128,
    _timeline: std::marker::PhantomData<T>,
}

impl<T: Ordinal> Points<T> {
    fn over(first: i128, last: i128) -> Self {
        Self {
            next: first,
            last,
            _timeline: std::marker::PhantomData,
        }
    }

    fn empty() -> Self {
        Self::over(1, 0)
    }

    /// Number of points not yet yielded.
    pub fn remaining(&self) -> u128 {
        if self.next > self.last {
            0
        } else {
            self.last.abs_diff(self.next) + 1
        }
    }

    /// Splits off the first half of the remaining points.
    ///
    /// Returns `None` when fewer than two points remain.  Otherwise the
    /// returned iterator covers the first half and `self` keeps the rest; the
    /// two share no state.
    pub fn split(&mut self) -> Option<Self> {
        if self.remaining() < 2 {
            return None;
        }
        let mid = self.next + (self.last - self.next) / 2;
        let prefix = Self::over(self.next, mid);
        self.next = mid + 1;
        Some(prefix)
    }
}

impl<T: Ordinal> Iterator for Points<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.next > self.last {
            return None;
        }
        let point = T::from_ordinal(self.next)?;
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<T: Ordinal> DoubleEndedIterator for Points<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.next > self.last {
            return None;
        }
        let point = T::from_ordinal(self.last)?;
        self.last -= 1;
        Some(point)
    }
}

impl<T: Ordinal> FusedIterator for Points<T> {}

/// Points reached by repeatedly adding (or subtracting) a fixed duration,
/// starting from one end of a finite interval and stopping once the cursor
/// leaves the interval.
#[derive(Debug, Clone)]
pub struct Steps<T: TimeArithmetic> {
    cursor: Option<T>,
    limit: T,
    step: T::Duration,
    backwards: bool,
}

impl<T: TimeArithmetic> Steps<T> {
    fn new(
        interval: &Interval<T>,
        step: T::Duration,
        backwards: bool,
    ) -> Result<Self, IntervalError> {
        if !interval.is_finite() {
            return Err(IntervalError::UnsupportedForInfinite);
        }
        let (first, last) = match interval.closed_range() {
            Ok(range) => range,
            Err(IntervalError::Empty) => {
                return Ok(Self {
                    cursor: None,
                    limit: T::minimum(),
                    step,
                    backwards,
                })
            }
            Err(err) => return Err(err),
        };
        let (origin, limit) = if backwards { (last, first) } else { (first, last) };
        let probe = if backwards {
            origin.sub_duration(step)
        } else {
            origin.add_duration(step)
        };
        let advances = match probe {
            Some(p) if backwards => p < origin,
            Some(p) => p > origin,
            None => true,
        };
        if !advances {
            return Err(IntervalError::Invalid("step does not advance the cursor"));
        }
        Ok(Self {
            cursor: Some(origin),
            limit,
            step,
            backwards,
        })
    }
}

impl<T: TimeArithmetic> Iterator for Steps<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.cursor.take()?;
        let inside = if self.backwards {
            current >= self.limit
        } else {
            current <= self.limit
        };
        if !inside {
            return None;
        }
        self.cursor = if self.backwards {
            current.sub_duration(self.step)
        } else {
            current.add_duration(self.step)
        };
        Some(current)
    }
}

impl<T: TimeArithmetic> FusedIterator for Steps<T> {}

/// Consecutive sub-intervals `[t, t + step)` clipped to the source interval.
#[derive(Debug, Clone)]
pub struct Chunks<T: TimeArithmetic> {
    steps: Steps<T>,
    interval: Interval<T>,
}

impl<T: TimeArithmetic> Iterator for Chunks<T> {
    type Item = Interval<T>;

    fn next(&mut self) -> Option<Interval<T>> {
        let start = self.steps.next()?;
        let chunk = match start.add_duration(self.steps.step) {
            Some(end) => Interval::between(Boundary::closed(start), Boundary::open(end))
                .ok()
                .and_then(|piece| piece.find_intersection(&self.interval)),
            None => self.interval.with_start(Boundary::closed(start)).ok(),
        };
        if chunk.is_none() {
            self.steps.cursor = None;
        }
        chunk
    }
}

impl<T: TimeArithmetic> FusedIterator for Chunks<T> {}

impl<T: Ordinal> Interval<T> {
    /// Every point of this interval in order; `.rev()` walks it backwards.
    ///
    /// # Errors
    ///
    /// [`IntervalError::UnsupportedForInfinite`] for unbounded intervals.
    pub fn points(&self) -> Result<Points<T>, IntervalError> {
        match self.closed_range() {
            Ok((first, last)) => Ok(Points::over(first.to_ordinal(), last.to_ordinal())),
            Err(IntervalError::Empty) => Ok(Points::empty()),
            Err(err) => Err(err),
        }
    }
}

impl<T: TimeArithmetic> Interval<T> {
    /// Points from the start, advancing by `step` while inside the interval.
    ///
    /// # Errors
    ///
    /// [`IntervalError::UnsupportedForInfinite`] for unbounded intervals and
    /// [`IntervalError::Invalid`] if `step` does not move forward.
    pub fn steps(&self, step: T::Duration) -> Result<Steps<T>, IntervalError> {
        Steps::new(self, step, false)
    }

    /// Points from the end, moving back by `step` while inside the interval.
    pub fn steps_backwards(&self, step: T::Duration) -> Result<Steps<T>, IntervalError> {
        Steps::new(self, step, true)
    }

    /// Sub-intervals of length `step` covering this interval; the last one
    /// may be shorter.
    pub fn chunks(&self, step: T::Duration) -> Result<Chunks<T>, IntervalError> {
        Ok(Chunks {
            steps: Steps::new(self, step, false)?,
            interval: *self,
        })
    }
}
