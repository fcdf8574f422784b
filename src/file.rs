/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Optional file format: header lines, an explicit big-endian 64-bit
//! length prefix, then the raw packed payload.
//!
//! This crate always stores the bit length explicitly rather than
//! inferring it from file size — inferring it from a byte-aligned file
//! size would silently misread any stream whose length is not a
//! multiple of 8, and this crate has no separate flag to assert that a
//! given stream is byte-aligned.

use crate::buffer::BitBuffer;
use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

/// Serializes `stream`'s content as a store-format byte vector: `header`
/// lines (each terminated by `\n`), then an 8-byte big-endian bit length,
/// then the raw packed payload.
#[must_use]
pub fn to_store(stream: &BitStream, header: &[String]) -> Vec<u8> {
    let mut out = Vec::new();
    for line in header {
        out.extend_from_slice(line.as_bytes());
        out.push(b'\n');
    }
    let (bytes, len) = stream.buffer().to_raw();
    out.extend_from_slice(&(len as u64).to_be_bytes());
    out.extend_from_slice(&bytes);
    out
}

/// Parses a store-format byte slice, consuming exactly `header_lines`
/// leading `\n`-terminated lines verbatim before the length-prefixed
/// payload, and leaves `stream` in `Reading` mode at position 0. Returns
/// the header lines read.
pub fn from_store(stream: &mut BitStream, data: &[u8], header_lines: usize) -> Result<Vec<String>> {
    let mut offset = 0;
    let mut lines = Vec::with_capacity(header_lines);
    for _ in 0..header_lines {
        let nl = data[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .ok_or(BitStreamError::Corruption(
                "file ended before the declared number of header lines",
            ))?;
        let line = std::str::from_utf8(&data[offset..offset + nl])
            .map_err(|_| {
                BitStreamError::BadArgument("header line is not valid UTF-8".to_string())
            })?
            .to_string();
        lines.push(line);
        offset += nl + 1;
    }
    if data.len() < offset + 8 {
        return Err(BitStreamError::Corruption(
            "file truncated before the 8-byte bit-length prefix",
        ));
    }
    let len_bytes: [u8; 8] = data[offset..offset + 8]
        .try_into()
        .expect("slice of exactly 8 bytes");
    let len = u64::from_be_bytes(len_bytes) as usize;
    offset += 8;
    let buffer = BitBuffer::from_raw(&data[offset..], len)?;
    stream.replace_buffer_for_reading(buffer);
    Ok(lines)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip_without_header() {
        let mut s = BitStream::new();
        s.put_bits(10, 0b1011001101).unwrap();
        let data = to_store(&s, &[]);
        let mut s2 = BitStream::new();
        let header = from_store(&mut s2, &data, 0).unwrap();
        assert!(header.is_empty());
        assert_eq!(s2.get_bits(10).unwrap(), 0b1011001101);
    }

    #[test]
    fn roundtrip_with_header_lines() {
        let mut s = BitStream::new();
        s.put_bits(16, 0xBEEF).unwrap();
        let header = vec!["format: v1".to_string(), "owner: test".to_string()];
        let data = to_store(&s, &header);
        let mut s2 = BitStream::new();
        let read_header = from_store(&mut s2, &data, 2).unwrap();
        assert_eq!(read_header, header);
        assert_eq!(s2.get_bits(16).unwrap(), 0xBEEF);
    }

    #[test]
    fn truncated_file_is_rejected() {
        let mut s2 = BitStream::new();
        assert!(matches!(
            from_store(&mut s2, &[0, 0, 0], 0),
            Err(BitStreamError::Corruption(_))
        ));
    }

    #[test]
    fn missing_header_line_is_rejected() {
        let mut s2 = BitStream::new();
        assert!(matches!(
            from_store(&mut s2, b"only one line\n", 2),
            Err(BitStreamError::Corruption(_))
        ));
    }
}
