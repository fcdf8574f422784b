/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Unary codes: the foundation every other code in this crate is built on.
//!
//! Two 0-based conventions are provided:
//!
//! - [`put_unary`]/[`get_unary`]: value `k` is `k` zero bits then a `1`
//!   terminator (cost `k + 1` bits).
//! - [`put_unary1`]/[`get_unary1`]: value `k` is `k` one bits then a `0`
//!   terminator, the bit-complement of the above.

use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

/// Writes `value` in unary (0-terminator = `1`).
pub fn put_unary(stream: &mut BitStream, value: u64) -> Result<()> {
    let mut remaining = value;
    while remaining >= 32 {
        stream.put_bits(32, 0)?;
        remaining -= 32;
    }
    if remaining > 0 {
        stream.put_bits(remaining as usize, 0)?;
    }
    stream.put_bits(1, 1)
}

/// Reads a unary code, returning the number of zero bits before the
/// terminator.
pub fn get_unary(stream: &mut BitStream) -> Result<u64> {
    let mut count = 0u64;
    loop {
        let bit = stream.get_bits(1)?;
        if bit == 1 {
            return Ok(count);
        }
        count += 1;
    }
}

/// Writes `value` in unary1 (0-terminator = `0`): `value` one bits then a
/// `0`.
pub fn put_unary1(stream: &mut BitStream, value: u64) -> Result<()> {
    let mut remaining = value;
    while remaining >= 32 {
        stream.put_bits(32, u32::MAX as u64)?;
        remaining -= 32;
    }
    if remaining > 0 {
        stream.put_bits(remaining as usize, (1u64 << remaining) - 1)?;
    }
    stream.put_bits(1, 0)
}

/// Reads a unary1 code, returning the number of one bits before the
/// terminator.
pub fn get_unary1(stream: &mut BitStream) -> Result<u64> {
    let mut count = 0u64;
    loop {
        let bit = stream.get_bits(1)?;
        if bit == 0 {
            return Ok(count);
        }
        count += 1;
    }
}

/// Writes a sequence of values in unary, in order.
pub fn put_unary_vec(stream: &mut BitStream, values: &[u64]) -> Result<()> {
    for &v in values {
        put_unary(stream, v)?;
    }
    Ok(())
}

/// Reads `n` unary values, or every remaining value if `n` is `-1`.
pub fn get_unary_vec(stream: &mut BitStream, n: i64) -> Result<Vec<u64>> {
    get_vec(stream, n, get_unary)
}

/// Writes a sequence of values in unary1, in order.
pub fn put_unary1_vec(stream: &mut BitStream, values: &[u64]) -> Result<()> {
    for &v in values {
        put_unary1(stream, v)?;
    }
    Ok(())
}

/// Reads `n` unary1 values, or every remaining value if `n` is `-1`.
pub fn get_unary1_vec(stream: &mut BitStream, n: i64) -> Result<Vec<u64>> {
    get_vec(stream, n, get_unary1)
}

/// Shared "read n, or read until end" loop used by every code's vectorized
/// reader: a count `n >= 0` reads exactly that many values, `n == -1`
/// reads until the stream is exhausted.
pub(crate) fn get_vec(
    stream: &mut BitStream,
    n: i64,
    mut get_one: impl FnMut(&mut BitStream) -> Result<u64>,
) -> Result<Vec<u64>> {
    let mut out = Vec::new();
    if n < 0 {
        loop {
            if stream.pos() >= stream.len() {
                break;
            }
            match get_one(stream) {
                Ok(v) => out.push(v),
                Err(BitStreamError::Underflow) => break,
                Err(e) => return Err(e),
            }
        }
    } else {
        for _ in 0..n {
            out.push(get_one(stream)?);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn concrete_scenario_put_unary_5() {
        let mut s = BitStream::new();
        put_unary(&mut s, 5).unwrap();
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn roundtrip_small_values() {
        for v in 0..=129u64 {
            let mut s = BitStream::new();
            put_unary(&mut s, v).unwrap();
            s.rewind_for_read().unwrap();
            assert_eq!(get_unary(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn unary1_is_bit_complement_length() {
        for v in 0..=129u64 {
            let mut s = BitStream::new();
            put_unary1(&mut s, v).unwrap();
            assert_eq!(s.len() as u64, v + 1);
            s.rewind_for_read().unwrap();
            assert_eq!(get_unary1(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn vectorized_roundtrip_and_until_end() {
        let values: Vec<u64> = (0..100).map(|i| (i * 7) % 64).collect();
        let mut s = BitStream::new();
        put_unary_vec(&mut s, &values).unwrap();
        s.rewind_for_read().unwrap();
        assert_eq!(get_unary_vec(&mut s, -1).unwrap(), values);
    }

    #[test]
    fn empty_stream_vectorized_read_is_empty() {
        let mut s = BitStream::new();
        s.rewind_for_read().unwrap();
        assert_eq!(get_unary_vec(&mut s, -1).unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn empty_stream_scalar_read_underflows() {
        let mut s = BitStream::new();
        s.rewind_for_read().unwrap();
        assert!(matches!(get_unary(&mut s), Err(BitStreamError::Underflow)));
    }
}
