// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types shared by intervals, trees and the binary codec.

use thiserror::Error;

/// Errors raised while building or deriving intervals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// The boundaries do not describe a well-formed interval.
    #[error("invalid interval: {0}")]
    Invalid(&'static str),

    /// The canonical form would need a point outside the timeline.
    #[error("cannot canonicalize interval: {0}")]
    Canonicalization(&'static str),

    /// The operation needs two finite boundaries.
    #[error("operation not supported for intervals with an infinite boundary")]
    UnsupportedForInfinite,

    /// The operation needs at least one point inside the interval.
    #[error("operation not supported for empty intervals")]
    Empty,

    /// A count or a time point left its representable range.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

/// Errors raised while decoding the binary interval format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("input ended after {0} bytes")]
    Truncated(usize),

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    #[error("timeline discriminator {found} does not match expected {expected}")]
    TypeMismatch { expected: u8, found: u8 },

    #[error("unknown boundary kind {0}")]
    UnknownBoundaryKind(u8),

    #[error("ordinal {0} is outside the timeline")]
    PointOutOfRange(i128),

    #[error("{0} trailing bytes after interval")]
    TrailingBytes(usize),

    #[error(transparent)]
    Interval(#[from] IntervalError),
}
