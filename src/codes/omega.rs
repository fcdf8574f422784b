/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Elias ω
//!
//! Unlike γ and δ, ω recursively encodes the order-of-magnitude prefix
//! itself, terminated by a final `0` bit. It is defined 1-based; the public
//! `put_omega`/`get_omega` pair shifts by one so the rest of this crate's
//! 0-based convention holds.
//!
//! Decoding ω requires peeking at the most significant bit of the next
//! field, which only makes sense in a big-endian bit order — the
//! convention this crate uses throughout.
//!
//! Encoding the `~0` sentinel needs a length field one bit wider than `W`
//! (representing `2^W` takes `W + 1` bits), so this module is the one place
//! in the crate that reaches for [`BitStream::put_raw_bits`]-style access
//! instead of the `W`-checked primitives.

use super::unary::get_vec;
use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

fn ceil_log(n: u128) -> u32 {
    debug_assert!(n >= 1);
    n.ilog2() + u32::from(!n.is_power_of_two())
}

/// Number of bits the ω code for `value` would take.
#[must_use]
pub fn len_omega(value: u64) -> usize {
    recursive_len(value as u128 + 1)
}

fn recursive_len(n: u128) -> usize {
    if n <= 1 {
        return 1;
    }
    let l = ceil_log(n + 1);
    recursive_len(l as u128 - 1) + l as usize
}

fn put_wide_field(stream: &mut BitStream, width: u32, value: u128) -> Result<()> {
    if width as usize <= 64 {
        return stream.put_raw_bits(width as usize, value as u64);
    }
    let high_width = width - 64;
    stream.put_raw_bits(high_width as usize, (value >> 64) as u64)?;
    stream.put_raw_bits(64, value as u64)
}

fn get_wide_field(stream: &mut BitStream, width: u32) -> Result<u128> {
    if width as usize <= 64 {
        return Ok(stream.get_raw_bits(width as usize)? as u128);
    }
    let high_width = width - 64;
    let high = stream.get_raw_bits(high_width as usize)? as u128;
    let low = stream.get_raw_bits(64)? as u128;
    Ok((high << 64) | low)
}

fn recursive_write(stream: &mut BitStream, n: u128) -> Result<usize> {
    if n <= 1 {
        return Ok(0);
    }
    let l = ceil_log(n + 1);
    let written = recursive_write(stream, l as u128 - 1)?;
    put_wide_field(stream, l, n)?;
    Ok(written + l as usize)
}

/// Writes `value` in ω code (0-based).
pub fn put_omega(stream: &mut BitStream, value: u64) -> Result<()> {
    recursive_write(stream, value as u128 + 1)?;
    stream.put_bits(1, 0)
}

/// Reads an ω code (0-based).
pub fn get_omega(stream: &mut BitStream) -> Result<u64> {
    let mut n: u128 = 1;
    loop {
        let bit = stream.peek_bits(1)?;
        if bit == 0 {
            stream.skip_bits(1)?;
            let value = n - 1;
            if value > u64::MAX as u128 {
                return Err(BitStreamError::Corruption(
                    "omega codeword decodes to a value wider than 64 bits",
                ));
            }
            return Ok(value as u64);
        }
        let width = 1 + n as u32;
        n = get_wide_field(stream, width)?;
    }
}

/// Writes a sequence of values in ω code, in order.
pub fn put_omega_vec(stream: &mut BitStream, values: &[u64]) -> Result<()> {
    for &v in values {
        put_omega(stream, v)?;
    }
    Ok(())
}

/// Reads `n` ω-coded values, or every remaining value if `n` is `-1`.
pub fn get_omega_vec(stream: &mut BitStream, n: i64) -> Result<Vec<u64>> {
    get_vec(stream, n, get_omega)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::stream::Width;

    #[test]
    fn concrete_scenario_put_omega_15() {
        let mut s = BitStream::new();
        put_omega(&mut s, 15).unwrap();
        s.rewind_for_read().unwrap();
        assert_eq!(get_omega(&mut s).unwrap(), 15);
    }

    #[test]
    fn roundtrip_small_values() {
        for v in 0..=129u64 {
            let mut s = BitStream::new();
            put_omega(&mut s, v).unwrap();
            assert_eq!(s.len(), len_omega(v));
            s.rewind_for_read().unwrap();
            assert_eq!(get_omega(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn sentinel_roundtrips_at_every_width() {
        for width in [Width::W16, Width::W32, Width::W64] {
            let mut s = BitStream::with_width(width);
            let v = width.sentinel();
            put_omega(&mut s, v).unwrap();
            s.rewind_for_read().unwrap();
            assert_eq!(get_omega(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn large_values_roundtrip() {
        for v in [999, 999_999, (1u64 << 31) - 1, (1u64 << 32) - 1, (1u64 << 63) - 1] {
            let mut s = BitStream::new();
            put_omega(&mut s, v).unwrap();
            s.rewind_for_read().unwrap();
            assert_eq!(get_omega(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn sequence_roundtrip() {
        let values: Vec<u64> = (0..100).map(|i| (i * 37) % 4000).collect();
        let mut s = BitStream::new();
        put_omega_vec(&mut s, &values).unwrap();
        s.rewind_for_read().unwrap();
        assert_eq!(get_omega_vec(&mut s, -1).unwrap(), values);
    }
}
