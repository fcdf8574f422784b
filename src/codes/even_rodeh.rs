/*
 * SPDX-FileCopyrightText: 2024 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Even–Rodeh code
//!
//! Even & Rodeh's 1978 "economical encoding of commas between strings"
//! code. Like ω it recursively encodes the bit-length of the value, but the
//! recursion bottoms out at a fixed 3-bit seed field (values `0..=7`)
//! instead of ω's single bit, and each recursive step is introduced by an
//! explicit continuation bit rather than a peeked MSB.
//!
//! Follows the same free-function shape as the rest of this module.

use super::unary::get_vec;
use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

fn bit_length(n: u64) -> u32 {
    debug_assert!(n > 0);
    64 - n.leading_zeros()
}

/// `[n, bit_length(n), bit_length(bit_length(n)), ...]` down to the first
/// term `<= 7`, which becomes the 3-bit seed field.
fn chain(value: u64) -> Vec<u64> {
    let mut chain = vec![value];
    let mut cur = value;
    while cur > 7 {
        cur = bit_length(cur) as u64;
        chain.push(cur);
    }
    chain
}

/// Number of bits the Even–Rodeh code for `value` would take.
#[must_use]
pub fn len_even_rodeh(value: u64) -> usize {
    let chain = chain(value);
    let mut len = 3 + 1; // seed field + final terminator
    for idx in 0..chain.len() - 1 {
        len += 1 + chain[idx + 1] as usize;
    }
    len
}

/// Writes `value` in Even–Rodeh code.
pub fn put_even_rodeh(stream: &mut BitStream, value: u64) -> Result<()> {
    let chain = chain(value);
    let seed = *chain.last().expect("chain is never empty");
    stream.put_bits(3, seed)?;
    for idx in (0..chain.len() - 1).rev() {
        stream.put_bits(1, 1)?;
        stream.put_bits(chain[idx + 1] as usize, chain[idx])?;
    }
    stream.put_bits(1, 0)
}

/// Reads an Even–Rodeh code.
pub fn get_even_rodeh(stream: &mut BitStream) -> Result<u64> {
    let mut w = stream.get_bits(3)?;
    loop {
        let cont = stream.get_bits(1)?;
        if cont == 0 {
            return Ok(w);
        }
        let width = w as usize;
        if width == 0 || width > 64 {
            return Err(BitStreamError::Corruption(
                "Even-Rodeh continuation bit set but width field is zero or too wide",
            ));
        }
        w = stream.get_bits(width)?;
    }
}

/// Writes a sequence of values in Even–Rodeh code, in order.
pub fn put_even_rodeh_vec(stream: &mut BitStream, values: &[u64]) -> Result<()> {
    for &v in values {
        put_even_rodeh(stream, v)?;
    }
    Ok(())
}

/// Reads `n` Even–Rodeh-coded values, or every remaining value if `n` is
/// `-1`.
pub fn get_even_rodeh_vec(stream: &mut BitStream, n: i64) -> Result<Vec<u64>> {
    get_vec(stream, n, get_even_rodeh)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::stream::Width;

    #[test]
    fn small_values_are_four_bits() {
        for v in 0..8u64 {
            let mut s = BitStream::new();
            put_even_rodeh(&mut s, v).unwrap();
            assert_eq!(s.len(), 4);
            s.rewind_for_read().unwrap();
            assert_eq!(get_even_rodeh(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn roundtrip_small_values() {
        for v in 0..=129u64 {
            let mut s = BitStream::new();
            put_even_rodeh(&mut s, v).unwrap();
            assert_eq!(s.len(), len_even_rodeh(v));
            s.rewind_for_read().unwrap();
            assert_eq!(get_even_rodeh(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn sentinel_roundtrips_at_every_width() {
        for width in [Width::W16, Width::W32, Width::W64] {
            let mut s = BitStream::with_width(width);
            let v = width.sentinel();
            put_even_rodeh(&mut s, v).unwrap();
            s.rewind_for_read().unwrap();
            assert_eq!(get_even_rodeh(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn corrupt_zero_width_continuation_is_rejected() {
        let mut s = BitStream::new();
        s.put_bits(3, 0).unwrap(); // seed w = 0
        s.put_bits(1, 1).unwrap(); // continuation bit set, but width = w = 0
        s.rewind_for_read().unwrap();
        assert!(matches!(
            get_even_rodeh(&mut s),
            Err(BitStreamError::Corruption(_))
        ));
    }

    #[test]
    fn sequence_roundtrip() {
        let values: Vec<u64> = (0..100).map(|i| (i * 37) % 4000).collect();
        let mut s = BitStream::new();
        put_even_rodeh_vec(&mut s, &values).unwrap();
        s.rewind_for_read().unwrap();
        assert_eq!(get_even_rodeh_vec(&mut s, -1).unwrap(), values);
    }
}
