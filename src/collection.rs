// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Set operations over lists of intervals.
//!
//! All functions work on normalized positions, so intervals with mixed
//! open/closed edges combine correctly, and every result is in canonical form.
//! Empty inputs are ignored.

use crate::boundary::Endpoint;
use crate::interval::Interval;
use crate::timeline::Timeline;

/// Returns the gaps of `intervals` within the bounding `outer` interval.
///
/// `intervals` must be sorted by start; they may overlap.  The function runs
/// in O(n) time with a single pass.
pub fn gaps_within<T: Timeline>(
    outer: &Interval<T>,
    intervals: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut gaps = Vec::new();
    if outer.is_empty() {
        return gaps;
    }
    let limit = outer.open_end();
    let mut cursor = outer.closed_start();
    for interval in intervals.iter().filter(|i| !i.is_empty()) {
        let start = interval.closed_start();
        if start > cursor {
            gaps.extend(Interval::from_endpoints(cursor, start.min(limit)));
        }
        cursor = cursor.max(interval.open_end());
        if cursor >= limit {
            return gaps;
        }
    }
    gaps.extend(Interval::from_endpoints(cursor, limit));
    gaps
}

/// Returns the intersection of two sorted, non-overlapping interval lists.
///
/// Uses an O(n+m) merge.
pub fn intersect_sorted<T: Timeline>(a: &[Interval<T>], b: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let start = a[i].closed_start().max(b[j].closed_start());
        let (end_a, end_b) = (a[i].open_end(), b[j].open_end());
        if start < end_a.min(end_b) {
            result.extend(Interval::from_endpoints(start, end_a.min(end_b)));
        }
        if end_a <= end_b {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

/// Merges overlapping or adjacent intervals into disjoint blocks sorted by
/// start.
pub fn merge_blocks<T: Timeline>(intervals: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut cuts: Vec<(Endpoint<T>, Endpoint<T>)> = intervals
        .iter()
        .filter(|i| !i.is_empty())
        .map(|i| (i.closed_start(), i.open_end()))
        .collect();
    cuts.sort();

    let mut blocks = Vec::new();
    let mut iter = cuts.into_iter();
    let Some((mut start, mut end)) = iter.next() else {
        return blocks;
    };
    for (next_start, next_end) in iter {
        if next_start <= end {
            end = end.max(next_end);
        } else {
            blocks.extend(Interval::from_endpoints(start, end));
            (start, end) = (next_start, next_end);
        }
    }
    blocks.extend(Interval::from_endpoints(start, end));
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;
    use chrono::NaiveDate;

    fn span(a: i64, b: i64) -> Interval<i64> {
        Interval::closed_open(a, b).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_gaps_within() {
        let gaps = gaps_within(&span(0, 10), &[span(2, 4), span(6, 8)]);
        assert_eq!(gaps, vec![span(0, 2), span(4, 6), span(8, 10)]);
    }

    #[test]
    fn test_gaps_within_empty() {
        assert_eq!(gaps_within(&span(0, 10), &[]), vec![span(0, 10)]);
    }

    #[test]
    fn test_gaps_within_full() {
        assert!(gaps_within(&span(0, 10), &[span(0, 10)]).is_empty());
        assert!(gaps_within(&span(0, 10), &[span(-5, 3), span(2, 20)]).is_empty());
    }

    #[test]
    fn test_gaps_within_closed_dates() {
        let month = Interval::closed(date(2020, 1, 1), date(2020, 1, 31)).unwrap();
        let busy = [
            Interval::closed(date(2020, 1, 1), date(2020, 1, 10)).unwrap(),
            Interval::closed(date(2020, 1, 20), date(2020, 1, 25)).unwrap(),
        ];
        assert_eq!(
            gaps_within(&month, &busy),
            vec![
                Interval::closed(date(2020, 1, 11), date(2020, 1, 19)).unwrap(),
                Interval::closed(date(2020, 1, 26), date(2020, 1, 31)).unwrap(),
            ]
        );
    }

    #[test]
    fn test_gaps_within_unbounded() {
        let gaps = gaps_within(&Interval::always(), &[span(0, 10)]);
        assert_eq!(gaps, vec![Interval::until(0), Interval::since(10)]);
    }

    #[test]
    fn test_intersect_sorted_overlap() {
        assert_eq!(intersect_sorted(&[span(0, 5)], &[span(3, 8)]), vec![span(3, 5)]);
    }

    #[test]
    fn test_intersect_sorted_no_overlap() {
        assert!(intersect_sorted(&[span(0, 3)], &[span(5, 8)]).is_empty());
        assert!(intersect_sorted(&[span(0, 5)], &[span(5, 8)]).is_empty());
    }

    #[test]
    fn test_gaps_intersect_roundtrip() {
        let above_min = [span(1, 3), span(5, 9)];
        let above_max = [span(2, 4), span(7, 8)];
        let below_max = gaps_within(&span(0, 10), &above_max);
        assert_eq!(below_max, vec![span(0, 2), span(4, 7), span(8, 10)]);
        assert_eq!(
            intersect_sorted(&above_min, &below_max),
            vec![span(1, 2), span(5, 7), span(8, 9)]
        );
    }

    #[test]
    fn test_merge_blocks() {
        let merged = merge_blocks(&[span(8, 12), span(0, 3), span(3, 5), span(2, 4), span(20, 21)]);
        assert_eq!(merged, vec![span(0, 5), span(8, 12), span(20, 21)]);
    }

    #[test]
    fn test_merge_blocks_mixed_edges() {
        let a = Interval::between(Boundary::open(0i64), Boundary::closed(4)).unwrap();
        let b = Interval::closed(5i64, 6).unwrap();
        assert_eq!(merge_blocks(&[b, a, Interval::empty_at(30)]), vec![span(1, 7)]);
    }

    #[test]
    fn test_merge_adjacent_dates() {
        let merged = merge_blocks(&[
            Interval::closed(date(2020, 1, 1), date(2020, 1, 9)).unwrap(),
            Interval::closed(date(2020, 1, 10), date(2020, 1, 20)).unwrap(),
        ]);
        assert_eq!(
            merged,
            vec![Interval::closed(date(2020, 1, 1), date(2020, 1, 20)).unwrap()]
        );
    }
}
