/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Error taxonomy for the bit-stream core.
//!
//! Every fallible operation in this crate returns [`Result<T>`], an alias
//! for `core::result::Result<T, BitStreamError>`. A failed single-bit
//! primitive (`put_bits`/`get_bits`) never mutates the stream: a failed
//! write does not change `L`, and a failed read does not advance `P`. A
//! compound code built from several primitives (e.g. Golomb's unary
//! quotient followed by a truncated-binary remainder) can still leave `P`
//! partway advanced if a later primitive in the same call fails, since
//! rolling back every already-consumed primitive would require buffering
//! the whole call; callers that need atomicity across a failed compound
//! read should record `pos()` beforehand and `set_pos` back on error.

/// The crate-wide result alias.
pub type Result<T> = core::result::Result<T, BitStreamError>;

/// All error kinds a bit-stream operation can fail with.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BitStreamError {
    /// A write was attempted while reading, or a read while writing.
    #[error("wrong mode: {0}")]
    WrongMode(&'static str),

    /// A read would consume more bits than are available before `L`.
    #[error("underflow: tried to read past the end of the stream")]
    Underflow,

    /// An argument was out of range for the operation (bad `nbits`, a value
    /// that does not fit in the requested width, an invalid code parameter,
    /// or a non-binary character in `from_string`).
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// A value exceeded the maximum representable by a bounded code.
    #[error("overflow: value is not representable by this code")]
    Overflow,

    /// [`crate::registry::CodeRegistry`] has no entry for the requested name.
    #[error("unknown code: {0}")]
    UnknownCode(String),

    /// A codeword was malformed for the code that is decoding it.
    #[error("corruption: {0}")]
    Corruption(&'static str),
}
