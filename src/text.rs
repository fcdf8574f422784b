/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Text and raw-byte serialization of a [`BitStream`]'s content.
//!
//! Unlike [`BitStream::put_bits`]/[`BitStream::get_bits`], these operations
//! serialize or replace the stream's entire content and are not gated by
//! the read/write mode: `to_string`/`to_raw` can be called while writing
//! (to inspect what has been written so far) and `from_string`/`from_raw`
//! always leave the stream in `Reading` mode at position 0, handing back
//! a fresh reader over whatever bytes were loaded.

use crate::buffer::BitBuffer;
use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

/// Renders every bit currently in `stream` as `'0'`/`'1'` characters,
/// MSB-first per bit index. No separators, no trailing newline.
#[must_use]
pub fn to_string(stream: &BitStream) -> String {
    let buffer = stream.buffer();
    (0..buffer.len())
        .map(|pos| if buffer.bit_at(pos) == 1 { '1' } else { '0' })
        .collect()
}

/// Replaces `stream`'s content with the bits parsed from `s`, and leaves
/// it in `Reading` mode at position 0.
///
/// `nbits` defaults to `s.len()` when `None`. Fails with
/// [`BitStreamError::BadArgument`] if `s` contains a character outside
/// `{'0', '1'}` or if `nbits` exceeds `s.len()`.
pub fn from_string(stream: &mut BitStream, s: &str, nbits: Option<usize>) -> Result<()> {
    let nbits = nbits.unwrap_or(s.chars().count());
    if nbits > s.chars().count() {
        return Err(BitStreamError::BadArgument(format!(
            "nbits {nbits} exceeds the {} characters given",
            s.chars().count()
        )));
    }
    let mut buffer = BitBuffer::new();
    for c in s.chars().take(nbits) {
        let bit = match c {
            '0' => 0,
            '1' => 1,
            other => {
                return Err(BitStreamError::BadArgument(format!(
                    "from_string: character {other:?} is not '0' or '1'"
                )));
            }
        };
        buffer.write(1, bit)?;
    }
    stream.replace_buffer_for_reading(buffer);
    Ok(())
}

/// Packs `stream`'s content into MSB-first bytes, zero-padding the final
/// byte's low bits. Returns the bytes and the exact bit length.
#[must_use]
pub fn to_raw(stream: &BitStream) -> (Vec<u8>, usize) {
    stream.buffer().to_raw()
}

/// Rebuilds `stream`'s content from `bytes` holding `len` MSB-first bits,
/// and leaves it in `Reading` mode at position 0.
pub fn from_raw(stream: &mut BitStream, bytes: &[u8], len: usize) -> Result<()> {
    let buffer = BitBuffer::from_raw(bytes, len)?;
    stream.replace_buffer_for_reading(buffer);
    Ok(())
}
