/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Truncated binary code
//!
//! Encodes a value known to lie in `0..m` using either `k = ⌊log2(m)⌋` or
//! `k + 1` bits, whichever is enough to keep all `m` codewords prefix-free
//! and as close to `log2(m)` bits as an integral bit count allows. This is
//! the remainder coder Golomb and Rice codes build their remainder field
//! on top of.

use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

fn check_m(m: u64) -> Result<()> {
    if m == 0 {
        return Err(BitStreamError::BadArgument(
            "truncated binary modulus m must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// `(k, u)` where `k = ⌊log2(m)⌋` and `u = 2^(k+1) - m` is the number of
/// values short enough to fit in `k` bits.
fn params(m: u64) -> (u32, u64) {
    debug_assert!(m >= 1);
    let k = 63 - m.leading_zeros();
    let u = (1u64 << (k + 1)) - m;
    (k, u)
}

fn write_field(stream: &mut BitStream, nbits: u32, value: u64) -> Result<()> {
    if nbits == 0 {
        return Ok(());
    }
    stream.put_bits(nbits as usize, value)
}

fn read_field(stream: &mut BitStream, nbits: u32) -> Result<u64> {
    if nbits == 0 {
        return Ok(0);
    }
    stream.get_bits(nbits as usize)
}

/// Number of bits the truncated binary code for `value` would take, given
/// `value` is drawn from `0..m`.
#[must_use]
pub fn len_truncated_binary(value: u64, m: u64) -> usize {
    let (k, u) = params(m);
    if value < u {
        k as usize
    } else {
        k as usize + 1
    }
}

/// Writes `value` (`0 <= value < m`) in truncated binary code.
pub fn put_truncated_binary(stream: &mut BitStream, value: u64, m: u64) -> Result<()> {
    check_m(m)?;
    if value >= m {
        return Err(BitStreamError::BadArgument(format!(
            "truncated binary value {value} is not below modulus {m}"
        )));
    }
    let (k, u) = params(m);
    if value < u {
        write_field(stream, k, value)
    } else {
        write_field(stream, k + 1, value + u)
    }
}

/// Reads a truncated binary code known to have been written with modulus
/// `m`.
pub fn get_truncated_binary(stream: &mut BitStream, m: u64) -> Result<u64> {
    check_m(m)?;
    let (k, u) = params(m);
    let x = read_field(stream, k)?;
    if x < u {
        Ok(x)
    } else {
        let y = read_field(stream, 1)?;
        Ok(((x << 1) | y) - u)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip_every_value_for_several_moduli() {
        for m in [1u64, 2, 3, 5, 7, 8, 9, 16, 17, 100, 257] {
            for v in 0..m {
                let mut s = BitStream::new();
                put_truncated_binary(&mut s, v, m).unwrap();
                assert_eq!(s.len(), len_truncated_binary(v, m));
                s.rewind_for_read().unwrap();
                assert_eq!(get_truncated_binary(&mut s, m).unwrap(), v);
            }
        }
    }

    #[test]
    fn power_of_two_modulus_uses_fixed_width() {
        let m = 8;
        for v in 0..m {
            assert_eq!(len_truncated_binary(v, m), 3);
        }
    }

    #[test]
    fn value_out_of_range_is_rejected() {
        let mut s = BitStream::new();
        assert!(matches!(
            put_truncated_binary(&mut s, 5, 5),
            Err(BitStreamError::BadArgument(_))
        ));
    }

    #[test]
    fn zero_modulus_is_rejected() {
        let mut s = BitStream::new();
        assert!(matches!(
            put_truncated_binary(&mut s, 0, 0),
            Err(BitStreamError::BadArgument(_))
        ));
    }
}
