/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! # Start-Stop code
//!
//! Given an ordered list of step sizes `(s_0, ..., s_{n-1})`, partitions
//! the non-negative integers into consecutive ranges, range `i` holding
//! `2^(s_0 + ... + s_i)` values. A unary selector names the range, and a
//! binary suffix of that range's cumulative step width gives the offset
//! within it. The last range is a stop: values at or beyond its upper
//! bound have no representation and fail [`BitStreamError::Overflow`].
//!
//! The per-index cumulative sums and range lower bounds are exactly the
//! kind of shared basis table this crate computes once and reuses (as
//! [`crate::codes::fibonacci`] does for its Fibonacci basis), so
//! [`StartStop`] precomputes them at construction instead of on every
//! call.

use super::unary::{get_unary, put_unary};
use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

/// A start-stop code fixed to a particular step list.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartStop {
    /// `cumulative[i] = s_0 + ... + s_i`: the suffix width for range `i`.
    cumulative: Vec<u32>,
    /// `lower[i]`: the first value range `i` represents.
    lower: Vec<u64>,
}

impl StartStop {
    /// Builds a start-stop code from its step list. Fails with
    /// [`BitStreamError::BadArgument`] if `steps` is empty or the
    /// cumulative ranges overflow 64 bits.
    pub fn new(steps: &[u32]) -> Result<Self> {
        if steps.is_empty() {
            return Err(BitStreamError::BadArgument(
                "start-stop step list must not be empty".to_string(),
            ));
        }
        let mut cumulative = Vec::with_capacity(steps.len());
        let mut running: u32 = 0;
        for &s in steps {
            running = running.checked_add(s).ok_or_else(|| {
                BitStreamError::BadArgument("start-stop cumulative step sum overflows".to_string())
            })?;
            cumulative.push(running);
        }
        let mut lower = Vec::with_capacity(steps.len());
        let mut acc: u64 = 0;
        for &c in &cumulative {
            lower.push(acc);
            let size = if c >= 64 { 0u64 } else { 1u64 << c };
            acc = acc.checked_add(size).ok_or_else(|| {
                BitStreamError::BadArgument(
                    "start-stop ranges overflow a 64-bit value space".to_string(),
                )
            })?;
        }
        Ok(Self { cumulative, lower })
    }

    fn locate(&self, value: u64) -> Result<(usize, u64)> {
        for i in 0..self.lower.len() {
            let c = self.cumulative[i];
            let size = if c >= 64 { u64::MAX } else { 1u64 << c };
            let upper = self.lower[i].saturating_add(size);
            if value < upper {
                return Ok((i, value - self.lower[i]));
            }
        }
        Err(BitStreamError::Overflow)
    }

    /// Number of bits the start-stop code for `value` would take.
    pub fn len(&self, value: u64) -> Result<usize> {
        let (i, _) = self.locate(value)?;
        Ok(i + 1 + self.cumulative[i] as usize)
    }

    /// Writes `value` in this start-stop code.
    pub fn put(&self, stream: &mut BitStream, value: u64) -> Result<()> {
        let (i, offset) = self.locate(value)?;
        put_unary(stream, i as u64)?;
        if self.cumulative[i] > 0 {
            stream.put_bits(self.cumulative[i] as usize, offset)?;
        }
        Ok(())
    }

    /// Reads a start-stop code.
    pub fn get(&self, stream: &mut BitStream) -> Result<u64> {
        let i = get_unary(stream)?;
        let i = usize::try_from(i).map_err(|_| {
            BitStreamError::Corruption("start-stop selector does not fit a range index")
        })?;
        if i >= self.lower.len() {
            return Err(BitStreamError::Corruption(
                "start-stop selector names a range beyond the configured step list",
            ));
        }
        let suffix = if self.cumulative[i] > 0 {
            stream.get_bits(self.cumulative[i] as usize)?
        } else {
            0
        };
        Ok(self.lower[i] + suffix)
    }

    /// Writes a sequence of values in this start-stop code, in order.
    pub fn put_vec(&self, stream: &mut BitStream, values: &[u64]) -> Result<()> {
        for &v in values {
            self.put(stream, v)?;
        }
        Ok(())
    }

    /// Reads `n` start-stop-coded values, or every remaining value if `n`
    /// is `-1`.
    pub fn get_vec(&self, stream: &mut BitStream, n: i64) -> Result<Vec<u64>> {
        super::unary::get_vec(stream, n, |s| self.get(s))
    }
}

/// Number of bits the start-stop code for `value` with the given step
/// list would take.
pub fn len_start_stop(value: u64, steps: &[u32]) -> Result<usize> {
    StartStop::new(steps)?.len(value)
}

/// Writes `value` in start-stop code with the given step list.
pub fn put_start_stop(stream: &mut BitStream, value: u64, steps: &[u32]) -> Result<()> {
    StartStop::new(steps)?.put(stream, value)
}

/// Reads a start-stop code with the given step list.
pub fn get_start_stop(stream: &mut BitStream, steps: &[u32]) -> Result<u64> {
    StartStop::new(steps)?.get(stream)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roundtrip_every_value_in_a_small_code() {
        let code = StartStop::new(&[0, 1, 2]).unwrap();
        // range 0: [0, 1), range 1: [1, 3), range 2: [3, 7)
        for v in 0..7u64 {
            let mut s = BitStream::new();
            code.put(&mut s, v).unwrap();
            assert_eq!(s.len(), code.len(v).unwrap());
            s.rewind_for_read().unwrap();
            assert_eq!(code.get(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn value_beyond_the_stop_range_overflows() {
        let code = StartStop::new(&[0, 1, 2]).unwrap();
        let mut s = BitStream::new();
        assert!(matches!(
            code.put(&mut s, 7),
            Err(BitStreamError::Overflow)
        ));
    }

    #[test]
    fn empty_step_list_is_rejected() {
        assert!(matches!(
            StartStop::new(&[]),
            Err(BitStreamError::BadArgument(_))
        ));
    }

    #[test]
    fn concrete_scenario_named_steps() {
        // "startstop(0-1-2-3-3-3-3)" from the textual registry grammar.
        let code = StartStop::new(&[0, 1, 2, 3, 3, 3, 3]).unwrap();
        for v in [0u64, 1, 2, 5, 100, 1000, 5000] {
            let mut s = BitStream::new();
            code.put(&mut s, v).unwrap();
            s.rewind_for_read().unwrap();
            assert_eq!(code.get(&mut s).unwrap(), v);
        }
    }

    #[test]
    fn sequence_roundtrip() {
        let code = StartStop::new(&[1, 2, 3, 4]).unwrap();
        let values: Vec<u64> = (0..50).map(|i| (i * 7) % 60).collect();
        let mut s = BitStream::new();
        code.put_vec(&mut s, &values).unwrap();
        s.rewind_for_read().unwrap();
        assert_eq!(code.get_vec(&mut s, -1).unwrap(), values);
    }
}
