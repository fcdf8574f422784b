/*
 * SPDX-FileCopyrightText: 2024 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Levenstein's code
//!
//! Recursively encodes the bit-length of `n` the way ω does, but uses a
//! single terminal unary field for the recursion depth instead of
//! terminating each level with its own flag bit.

use super::unary::{get_unary, get_vec, put_unary};
use crate::error::Result;
use crate::stream::BitStream;

/// Number of bits the Levenstein code for `value` would take.
#[must_use]
pub fn len_levenstein(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    recursive_len(1, value)
}

fn recursive_len(blocks: usize, n: u64) -> usize {
    if n == 1 {
        return blocks + 1;
    }
    let lambda = n.ilog2();
    recursive_len(blocks + 1, lambda as u64) + lambda as usize
}

fn write_field(stream: &mut BitStream, nbits: usize, value: u64) -> Result<()> {
    if nbits == 0 {
        return Ok(());
    }
    stream.put_bits(nbits, value)
}

fn read_field(stream: &mut BitStream, nbits: usize) -> Result<u64> {
    if nbits == 0 {
        return Ok(0);
    }
    stream.get_bits(nbits)
}

fn recursive_write(stream: &mut BitStream, blocks: u64, n: u64) -> Result<()> {
    if n == 1 {
        return put_unary(stream, blocks);
    }
    let lambda = n.ilog2();
    recursive_write(stream, blocks + 1, lambda as u64)?;
    write_field(stream, lambda as usize, n)
}

/// Writes `value` in Levenstein code.
pub fn put_levenstein(stream: &mut BitStream, value: u64) -> Result<()> {
    if value == 0 {
        return stream.put_bits(1, 1);
    }
    recursive_write(stream, 1, value)
}

/// Reads a Levenstein code.
pub fn get_levenstein(stream: &mut BitStream) -> Result<u64> {
    let lambda = get_unary(stream)?;
    if lambda == 0 {
        return Ok(0);
    }
    let mut block_len = 0u64;
    for _ in 0..lambda {
        let block = read_field(stream, block_len as usize)?;
        block_len = (1 << block_len) | block;
    }
    Ok(block_len)
}

/// Writes a sequence of values in Levenstein code, in order.
pub fn put_levenstein_vec(stream: &mut BitStream, values: &[u64]) -> Result<()> {
    for &v in values {
        put_levenstein(stream, v)?;
    }
    Ok(())
}

/// Reads `n` Levenstein-coded values, or every remaining value if `n` is
/// `-1`.
pub fn get_levenstein_vec(stream: &mut BitStream, n: i64) -> Result<Vec<u64>> {
    get_vec(stream, n, get_levenstein)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip_small_values() {
        for v in 0..=129u64 {
            let mut s = BitStream::new();
            put_levenstein(&mut s, v).unwrap();
            assert_eq!(s.len(), len_levenstein(v));
            s.rewind_for_read().unwrap();
            assert_eq!(get_levenstein(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn sentinel_roundtrips() {
        for v in [u64::MAX, (1u64 << 31) - 1, (1u64 << 32) - 1, (1u64 << 63) - 1] {
            let mut s = BitStream::new();
            put_levenstein(&mut s, v).unwrap();
            s.rewind_for_read().unwrap();
            assert_eq!(get_levenstein(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn sequence_roundtrip() {
        let values: Vec<u64> = (0..100).map(|i| (i * 17) % 2000).collect();
        let mut s = BitStream::new();
        put_levenstein_vec(&mut s, &values).unwrap();
        s.rewind_for_read().unwrap();
        assert_eq!(get_levenstein_vec(&mut s, -1).unwrap(), values);
    }
}
