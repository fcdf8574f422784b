/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Gamma-Golomb code
//!
//! Golomb code with the quotient written in γ instead of unary. Useful
//! when the modulus `m` is tuned too small for the data, which would
//! otherwise make the unary quotient field the dominant cost.

use super::gamma::{get_gamma, len_gamma, put_gamma};
use super::truncated_binary::{get_truncated_binary, len_truncated_binary, put_truncated_binary};
use super::unary::get_vec;
use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

fn check_m(m: u64) -> Result<()> {
    if m == 0 {
        return Err(BitStreamError::BadArgument(
            "gamma-golomb modulus m must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Number of bits the gamma-Golomb code for `value` with modulus `m`
/// would take, at the given width.
#[must_use]
pub fn len_gamma_golomb(value: u64, m: u64, width_bits: u32) -> usize {
    let q = value / m;
    let r = value % m;
    len_gamma(q, width_bits) + len_truncated_binary(r, m)
}

/// Writes `value` in gamma-Golomb code with modulus `m`.
pub fn put_gamma_golomb(stream: &mut BitStream, value: u64, m: u64) -> Result<()> {
    check_m(m)?;
    let q = value / m;
    let r = value % m;
    put_gamma(stream, q)?;
    put_truncated_binary(stream, r, m)
}

/// Reads a gamma-Golomb code with modulus `m`.
pub fn get_gamma_golomb(stream: &mut BitStream, m: u64) -> Result<u64> {
    check_m(m)?;
    let q = get_gamma(stream)?;
    let r = get_truncated_binary(stream, m)?;
    q.checked_mul(m)
        .and_then(|qm| qm.checked_add(r))
        .ok_or(BitStreamError::Corruption(
            "gamma-golomb codeword decodes to a value wider than 64 bits",
        ))
}

/// Writes a sequence of values in gamma-Golomb code with modulus `m`, in
/// order.
pub fn put_gamma_golomb_vec(stream: &mut BitStream, values: &[u64], m: u64) -> Result<()> {
    for &v in values {
        put_gamma_golomb(stream, v, m)?;
    }
    Ok(())
}

/// Reads `n` gamma-Golomb-coded values with modulus `m`, or every
/// remaining value if `n` is `-1`.
pub fn get_gamma_golomb_vec(stream: &mut BitStream, n: i64, m: u64) -> Result<Vec<u64>> {
    get_vec(stream, n, |s| get_gamma_golomb(s, m))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip_small_values_several_moduli() {
        for m in [1u64, 3, 5, 7, 10, 16] {
            for v in 0..=500u64 {
                let mut s = BitStream::new();
                put_gamma_golomb(&mut s, v, m).unwrap();
                assert_eq!(s.len(), len_gamma_golomb(v, m, s.width().bits()));
                s.rewind_for_read().unwrap();
                assert_eq!(get_gamma_golomb(&mut s, m).unwrap(), v);
            }
        }
    }

    #[test]
    fn zero_modulus_is_rejected() {
        let mut s = BitStream::new();
        assert!(matches!(
            put_gamma_golomb(&mut s, 1, 0),
            Err(BitStreamError::BadArgument(_))
        ));
    }

    #[test]
    fn sequence_roundtrip() {
        let values: Vec<u64> = (0..100).map(|i| (i * 53) % 6000).collect();
        let mut s = BitStream::new();
        put_gamma_golomb_vec(&mut s, &values, 12).unwrap();
        s.rewind_for_read().unwrap();
        assert_eq!(get_gamma_golomb_vec(&mut s, -1, 12).unwrap(), values);
    }
}
