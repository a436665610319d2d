// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Versioned binary encoding of intervals.
//!
//! Layout (all integers big-endian):
//!
//! | Field | Size | Content |
//! |-------|------|---------|
//! | version | 1 | [`FORMAT_VERSION`] |
//! | timeline | 1 | [`Discriminant::TAG`] of the time point type |
//! | start kind | 1 | see below |
//! | start ordinal | 16 | `i128`, only for finite boundaries |
//! | end kind | 1 | see below |
//! | end ordinal | 16 | `i128`, only for finite boundaries |
//!
//! Boundary kinds: `0` infinite past, `1` infinite future, `2` finite open,
//! `3` finite closed.
//!
//! Decoding checks every field and rebuilds the interval through
//! [`Interval::between`], so malformed input never yields an invalid value.
//!
//! ```
//! use chronoval::{codec, Interval};
//!
//! let interval = Interval::closed_open(3i64, 8).unwrap();
//! let bytes = codec::encode(&interval);
//! assert_eq!(codec::decode::<i64>(&bytes).unwrap(), interval);
//! ```

use crate::boundary::{Boundary, Direction, Edge};
use crate::calendar::{CalendarMonth, CalendarQuarter, CalendarWeek, CalendarYear};
use crate::error::DecodeError;
use crate::interval::Interval;
use crate::timeline::Ordinal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Current encoding version.
pub const FORMAT_VERSION: u8 = 1;

const INFINITE_PAST: u8 = 0;
const INFINITE_FUTURE: u8 = 1;
const FINITE_OPEN: u8 = 2;
const FINITE_CLOSED: u8 = 3;

/// Timelines with a stable one-byte tag in the binary format.
pub trait Discriminant: Ordinal {
    const TAG: u8;
}

impl Discriminant for NaiveDate {
    const TAG: u8 = 1;
}

impl Discriminant for NaiveDateTime {
    const TAG: u8 = 2;
}

impl Discriminant for DateTime<Utc> {
    const TAG: u8 = 3;
}

impl Discriminant for NaiveTime {
    const TAG: u8 = 4;
}

impl Discriminant for CalendarYear {
    const TAG: u8 = 5;
}

impl Discriminant for CalendarQuarter {
    const TAG: u8 = 6;
}

impl Discriminant for CalendarMonth {
    const TAG: u8 = 7;
}

impl Discriminant for CalendarWeek {
    const TAG: u8 = 8;
}

impl Discriminant for i64 {
    const TAG: u8 = 9;
}

fn put_boundary<T: Ordinal>(out: &mut Vec<u8>, boundary: &Boundary<T>) {
    match boundary {
        Boundary::Infinite(Direction::Past) => out.push(INFINITE_PAST),
        Boundary::Infinite(Direction::Future) => out.push(INFINITE_FUTURE),
        Boundary::Finite(point, edge) => {
            out.push(match edge {
                Edge::Open => FINITE_OPEN,
                Edge::Closed => FINITE_CLOSED,
            });
            out.extend_from_slice(&point.to_ordinal().to_be_bytes());
        }
    }
}

/// Appends the encoding of `interval` to `out`.
pub fn encode_into<T: Discriminant>(interval: &Interval<T>, out: &mut Vec<u8>) {
    out.push(FORMAT_VERSION);
    out.push(T::TAG);
    put_boundary(out, &interval.start());
    put_boundary(out, &interval.end());
}

/// Encodes `interval` into a fresh buffer.
pub fn encode<T: Discriminant>(interval: &Interval<T>) -> Vec<u8> {
    let mut out = Vec::with_capacity(36);
    encode_into(interval, &mut out);
    out
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(DecodeError::Truncated(self.bytes.len()))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn ordinal(&mut self) -> Result<i128, DecodeError> {
        let mut raw = [0u8; 16];
        raw.copy_from_slice(self.take(16)?);
        Ok(i128::from_be_bytes(raw))
    }

    fn boundary<T: Ordinal>(&mut self) -> Result<Boundary<T>, DecodeError> {
        let edge = match self.byte()? {
            INFINITE_PAST => return Ok(Boundary::infinite_past()),
            INFINITE_FUTURE => return Ok(Boundary::infinite_future()),
            FINITE_OPEN => Edge::Open,
            FINITE_CLOSED => Edge::Closed,
            other => return Err(DecodeError::UnknownBoundaryKind(other)),
        };
        let ordinal = self.ordinal()?;
        let point = T::from_ordinal(ordinal).ok_or(DecodeError::PointOutOfRange(ordinal))?;
        Ok(Boundary::Finite(point, edge))
    }
}

/// Decodes one interval from the start of `bytes`, returning it with the
/// number of bytes consumed.
pub fn decode_prefix<T: Discriminant>(bytes: &[u8]) -> Result<(Interval<T>, usize), DecodeError> {
    let mut reader = Reader { bytes, pos: 0 };
    let version = reader.byte()?;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }
    let found = reader.byte()?;
    if found != T::TAG {
        return Err(DecodeError::TypeMismatch {
            expected: T::TAG,
            found,
        });
    }
    let start = reader.boundary()?;
    let end = reader.boundary()?;
    let interval = Interval::between(start, end)?;
    Ok((interval, reader.pos))
}

/// Decodes exactly one interval; trailing input is an error.
pub fn decode<T: Discriminant>(bytes: &[u8]) -> Result<Interval<T>, DecodeError> {
    let (interval, used) = decode_prefix(bytes)?;
    match bytes.len() - used {
        0 => Ok(interval),
        extra => Err(DecodeError::TrailingBytes(extra)),
    }
}
