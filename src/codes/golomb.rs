/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Golomb code
//!
//! Splits `value` into a quotient `q = value / m` coded in unary and a
//! remainder `r = value % m` coded in truncated binary over `0..m`. Rice
//! and exponential-Golomb are the two special cases of this construction
//! this crate also exposes directly, each with a cheaper remainder coder
//! for its restricted choice of `m`.

use super::truncated_binary::{get_truncated_binary, len_truncated_binary, put_truncated_binary};
use super::unary::{get_unary, get_vec, put_unary};
use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

fn check_m(m: u64) -> Result<()> {
    if m == 0 {
        return Err(BitStreamError::BadArgument(
            "golomb modulus m must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Number of bits the Golomb code for `value` with modulus `m` would take.
#[must_use]
pub fn len_golomb(value: u64, m: u64) -> usize {
    let q = value / m;
    let r = value % m;
    q as usize + 1 + len_truncated_binary(r, m)
}

/// Writes `value` in Golomb code with modulus `m`.
pub fn put_golomb(stream: &mut BitStream, value: u64, m: u64) -> Result<()> {
    check_m(m)?;
    let q = value / m;
    let r = value % m;
    put_unary(stream, q)?;
    put_truncated_binary(stream, r, m)
}

/// Reads a Golomb code with modulus `m`.
pub fn get_golomb(stream: &mut BitStream, m: u64) -> Result<u64> {
    check_m(m)?;
    let q = get_unary(stream)?;
    let r = get_truncated_binary(stream, m)?;
    q.checked_mul(m)
        .and_then(|qm| qm.checked_add(r))
        .ok_or(BitStreamError::Corruption(
            "golomb codeword decodes to a value wider than 64 bits",
        ))
}

/// Writes a sequence of values in Golomb code with modulus `m`, in order.
pub fn put_golomb_vec(stream: &mut BitStream, values: &[u64], m: u64) -> Result<()> {
    for &v in values {
        put_golomb(stream, v, m)?;
    }
    Ok(())
}

/// Reads `n` Golomb-coded values with modulus `m`, or every remaining
/// value if `n` is `-1`.
pub fn get_golomb_vec(stream: &mut BitStream, n: i64, m: u64) -> Result<Vec<u64>> {
    get_vec(stream, n, |s| get_golomb(s, m))
}
