// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Augmented AVL interval tree.
//!
//! [`IntervalTree`] stores an immutable set of intervals in an AVL tree keyed
//! by start (then end), where every node also records the greatest end
//! boundary of its subtree.  That `max` lets point and range queries skip
//! whole subtrees that end before the query starts, giving `O(log n + k)`
//! lookups.
//!
//! The tree is built once with [`IntervalTree::on`] and then only read, so a
//! built tree can be shared across threads freely.
//!
//! ```
//! use chronoval::{Interval, IntervalTree};
//!
//! let tree = IntervalTree::on([
//!     Interval::closed_open(0i64, 10).unwrap(),
//!     Interval::closed_open(5, 15).unwrap(),
//!     Interval::closed_open(20, 30).unwrap(),
//! ])
//! .unwrap();
//!
//! assert_eq!(tree.find_intersections_at(&7).len(), 2);
//! assert!(tree.find_intersections_at(&17).is_empty());
//! ```

use crate::boundary::{compare_at_end, compare_at_start, Boundary, Endpoint};
use crate::error::IntervalError;
use crate::interval::Interval;
use crate::timeline::Timeline;
use log::{debug, trace};
use std::cmp::Ordering;

/// Key order: start boundary first, end boundary as tie breaker.
fn compare_keys<T: Timeline>(a: &Interval<T>, b: &Interval<T>) -> Ordering {
    compare_at_start(&a.start(), &b.start()).then_with(|| compare_at_end(&a.end(), &b.end()))
}

type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug, Clone)]
struct Node<T: Timeline> {
    interval: Interval<T>,
    /// Greatest end boundary in this subtree, under [`compare_at_end`].
    max: Boundary<T>,
    height: usize,
    left: Link<T>,
    right: Link<T>,
}

fn height<T: Timeline>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

impl<T: Timeline> Node<T> {
    fn leaf(interval: Interval<T>) -> Self {
        Self {
            interval,
            max: interval.end(),
            height: 1,
            left: None,
            right: None,
        }
    }

    fn balance(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Recomputes `height` and `max` from the children.
    fn update(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
        let mut max = self.interval.end();
        for child in [&self.left, &self.right].into_iter().flatten() {
            if compare_at_end(&child.max, &max) == Ordering::Greater {
                max = child.max;
            }
        }
        self.max = max;
    }
}

fn rotate_right<T: Timeline>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    trace!("rotate right at {:?}", node.interval);
    node.left = pivot.right.take();
    node.update();
    pivot.right = Some(node);
    pivot.update();
    pivot
}

fn rotate_left<T: Timeline>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    trace!("rotate left at {:?}", node.interval);
    node.right = pivot.left.take();
    node.update();
    pivot.left = Some(node);
    pivot.update();
    pivot
}

fn rebalance<T: Timeline>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update();
    let balance = node.balance();
    if balance > 1 {
        if node.left.as_ref().is_some_and(|left| left.balance() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if node.right.as_ref().is_some_and(|right| right.balance() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn insert<T: Timeline>(link: Link<T>, interval: Interval<T>) -> Box<Node<T>> {
    let Some(mut node) = link else {
        return Box::new(Node::leaf(interval));
    };
    if compare_keys(&interval, &node.interval) == Ordering::Less {
        node.left = Some(insert(node.left.take(), interval));
    } else {
        node.right = Some(insert(node.right.take(), interval));
    }
    rebalance(node)
}

/// Immutable augmented interval tree.
#[derive(Debug, Clone)]
pub struct IntervalTree<T: Timeline> {
    root: Link<T>,
    len: usize,
}

impl<T: Timeline> IntervalTree<T> {
    /// Builds a tree holding every non-empty interval of `intervals`.
    ///
    /// Empty intervals are skipped and not counted.
    ///
    /// # Errors
    ///
    /// [`IntervalError::ArithmeticOverflow`] if the number of stored intervals
    /// exceeds `usize::MAX`.
    pub fn on<I>(intervals: I) -> Result<Self, IntervalError>
    where
        I: IntoIterator<Item = Interval<T>>,
    {
        let mut root = None;
        let mut len = 0usize;
        let mut skipped = 0usize;
        for interval in intervals {
            if interval.is_empty() {
                debug!("skipping empty interval {:?}", interval);
                skipped = skipped.saturating_add(1);
                continue;
            }
            len = len.checked_add(1).ok_or(IntervalError::ArithmeticOverflow)?;
            root = Some(insert(root, interval));
        }
        let tree = Self { root, len };
        debug!(
            "built interval tree with {} intervals, height {}, {} empty skipped",
            tree.len,
            tree.height(),
            skipped
        );
        Ok(tree)
    }

    /// Number of stored intervals.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root node; `0` for an empty tree.
    #[inline]
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// All intervals sorted by start, then by end.
    ///
    /// Stop early with ordinary iterator adapters such as `take_while`.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Intervals sharing at least one point with the half-open range
    /// `[low, high)`.  `None` leaves that side of the range unbounded.
    ///
    /// Results come sorted by start, then by end.
    pub fn find_intersections(&self, low: Option<&T>, high: Option<&T>) -> Vec<&Interval<T>> {
        let mut found = Vec::new();
        let low = low.map(|t| Endpoint::At(*t));
        let high = high.map(|t| Endpoint::At(*t));
        Self::collect(self.root.as_deref(), low, high, &mut found);
        found
    }

    /// Intervals containing `point`.
    pub fn find_intersections_at(&self, point: &T) -> Vec<&Interval<T>> {
        let next = point.step_forward();
        self.find_intersections(Some(point), next.as_ref())
    }

    /// Intervals sharing at least one point with `query`.
    pub fn find_overlapping(&self, query: &Interval<T>) -> Vec<&Interval<T>> {
        if query.is_empty() {
            return Vec::new();
        }
        let low = match query.closed_start() {
            Endpoint::PastInfinity => None,
            Endpoint::At(t) => Some(t),
            _ => return Vec::new(),
        };
        let high = query.open_end().point();
        self.find_intersections(low.as_ref(), high.as_ref())
    }

    /// `true` if an interval equal to `interval` is stored.
    pub fn contains(&self, interval: &Interval<T>) -> bool {
        if interval.is_empty() {
            return false;
        }
        Self::search(self.root.as_deref(), interval)
    }

    fn collect<'a>(
        node: Option<&'a Node<T>>,
        low: Option<Endpoint<T>>,
        high: Option<Endpoint<T>>,
        found: &mut Vec<&'a Interval<T>>,
    ) {
        let Some(node) = node else {
            return;
        };
        // Every interval below ends at or before `low`.
        if let Some(low) = low {
            if Endpoint::end(&node.max).open_end() <= low {
                return;
            }
        }
        Self::collect(node.left.as_deref(), low, high, found);

        let starts_before_high = high.map_or(true, |high| node.interval.closed_start() < high);
        if !starts_before_high {
            return;
        }
        let ends_after_low = low.map_or(true, |low| node.interval.open_end() > low);
        if ends_after_low {
            found.push(&node.interval);
        }
        Self::collect(node.right.as_deref(), low, high, found);
    }

    fn search(node: Option<&Node<T>>, target: &Interval<T>) -> bool {
        let Some(node) = node else {
            return false;
        };
        match compare_keys(target, &node.interval) {
            Ordering::Less => Self::search(node.left.as_deref(), target),
            Ordering::Greater => Self::search(node.right.as_deref(), target),
            // Equal keys may sit on both sides after rotations.
            Ordering::Equal => {
                node.interval == *target
                    || Self::search(node.left.as_deref(), target)
                    || Self::search(node.right.as_deref(), target)
            }
        }
    }
}

/// In-order iterator over the intervals of an [`IntervalTree`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T: Timeline> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T: Timeline> Iter<'a, T> {
    fn push_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, T: Timeline> Iterator for Iter<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.interval)
    }
}

impl<'a, T: Timeline> IntoIterator for &'a IntervalTree<T> {
    type Item = &'a Interval<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
