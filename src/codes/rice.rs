/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Rice code
//!
//! Golomb code specialised to a power-of-two modulus `m = 2^k`: the
//! remainder field degenerates from truncated binary to a plain `k`-bit
//! field, and the quotient/remainder split becomes a shift and a mask.

use super::unary::{get_unary, get_vec, put_unary};
use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

fn check_k(k: u32) -> Result<()> {
    if k >= 64 {
        return Err(BitStreamError::BadArgument(format!(
            "rice parameter k must be below 64, got {k}"
        )));
    }
    Ok(())
}

/// Number of bits the Rice code for `value` with parameter `k` would take.
#[must_use]
pub fn len_rice(value: u64, k: u32) -> usize {
    (value >> k) as usize + 1 + k as usize
}

/// Writes `value` in Rice code with parameter `k` (modulus `m = 2^k`).
pub fn put_rice(stream: &mut BitStream, value: u64, k: u32) -> Result<()> {
    check_k(k)?;
    let q = value >> k;
    put_unary(stream, q)?;
    if k > 0 {
        let r = value & ((1u64 << k) - 1);
        stream.put_bits(k as usize, r)?;
    }
    Ok(())
}

/// Reads a Rice code with parameter `k`.
pub fn get_rice(stream: &mut BitStream, k: u32) -> Result<u64> {
    check_k(k)?;
    let q = get_unary(stream)?;
    let r = if k > 0 { stream.get_bits(k as usize)? } else { 0 };
    q.checked_shl(k)
        .and_then(|qk| qk.checked_add(r))
        .ok_or(BitStreamError::Corruption(
            "rice codeword decodes to a value wider than 64 bits",
        ))
}

/// Writes a sequence of values in Rice code with parameter `k`, in order.
pub fn put_rice_vec(stream: &mut BitStream, values: &[u64], k: u32) -> Result<()> {
    for &v in values {
        put_rice(stream, v, k)?;
    }
    Ok(())
}

/// Reads `n` Rice-coded values with parameter `k`, or every remaining
/// value if `n` is `-1`.
pub fn get_rice_vec(stream: &mut BitStream, n: i64, k: u32) -> Result<Vec<u64>> {
    get_vec(stream, n, |s| get_rice(s, k))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip_small_values_several_parameters() {
        for k in [0u32, 1, 2, 3, 5, 8] {
            for v in 0..=200u64 {
                let mut s = BitStream::new();
                put_rice(&mut s, v, k).unwrap();
                assert_eq!(s.len(), len_rice(v, k));
                s.rewind_for_read().unwrap();
                assert_eq!(get_rice(&mut s, k).unwrap(), v);
            }
        }
    }

    #[test]
    fn parameter_too_wide_is_rejected() {
        let mut s = BitStream::new();
        assert!(matches!(
            put_rice(&mut s, 1, 64),
            Err(BitStreamError::BadArgument(_))
        ));
    }

    #[test]
    fn sequence_roundtrip() {
        let values: Vec<u64> = (0..100).map(|i| (i * 41) % 4000).collect();
        let mut s = BitStream::new();
        put_rice_vec(&mut s, &values, 4).unwrap();
        s.rewind_for_read().unwrap();
        assert_eq!(get_rice_vec(&mut s, -1, 4).unwrap(), values);
    }
}
