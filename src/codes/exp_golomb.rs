/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Exponential-Golomb code
//!
//! Rice code with the quotient written in γ instead of unary: the
//! power-of-two-modulus counterpart of [`crate::codes::gamma_golomb`], the
//! same way [`crate::codes::rice`] is the power-of-two-modulus
//! counterpart of [`crate::codes::golomb`].

use super::gamma::{get_gamma, len_gamma, put_gamma};
use super::unary::get_vec;
use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

fn check_k(k: u32) -> Result<()> {
    if k >= 64 {
        return Err(BitStreamError::BadArgument(format!(
            "exp-golomb parameter k must be below 64, got {k}"
        )));
    }
    Ok(())
}

/// Number of bits the exponential-Golomb code for `value` with parameter
/// `k` would take, at the given width.
#[must_use]
pub fn len_exp_golomb(value: u64, k: u32, width_bits: u32) -> usize {
    len_gamma(value >> k, width_bits) + k as usize
}

/// Writes `value` in exponential-Golomb code with parameter `k`.
pub fn put_exp_golomb(stream: &mut BitStream, value: u64, k: u32) -> Result<()> {
    check_k(k)?;
    let q = value >> k;
    put_gamma(stream, q)?;
    if k > 0 {
        let r = value & ((1u64 << k) - 1);
        stream.put_bits(k as usize, r)?;
    }
    Ok(())
}

/// Reads an exponential-Golomb code with parameter `k`.
pub fn get_exp_golomb(stream: &mut BitStream, k: u32) -> Result<u64> {
    check_k(k)?;
    let q = get_gamma(stream)?;
    let r = if k > 0 { stream.get_bits(k as usize)? } else { 0 };
    q.checked_shl(k)
        .and_then(|qk| qk.checked_add(r))
        .ok_or(BitStreamError::Corruption(
            "exp-golomb codeword decodes to a value wider than 64 bits",
        ))
}

/// Writes a sequence of values in exponential-Golomb code with parameter
/// `k`, in order.
pub fn put_exp_golomb_vec(stream: &mut BitStream, values: &[u64], k: u32) -> Result<()> {
    for &v in values {
        put_exp_golomb(stream, v, k)?;
    }
    Ok(())
}

/// Reads `n` exponential-Golomb-coded values with parameter `k`, or every
/// remaining value if `n` is `-1`.
pub fn get_exp_golomb_vec(stream: &mut BitStream, n: i64, k: u32) -> Result<Vec<u64>> {
    get_vec(stream, n, |s| get_exp_golomb(s, k))
}
