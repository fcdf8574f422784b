/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]

pub mod buffer;
pub mod codes;
pub mod error;
pub mod file;
pub mod registry;
pub mod stream;
pub mod text;

/// Re-exports the pieces most callers need: the stream type, its error
/// taxonomy, and every code's `put_*`/`get_*` pair.
pub mod prelude {
    pub use crate::codes::*;
    pub use crate::error::{BitStreamError, Result};
    pub use crate::registry::{Code, CodeRegistry, ResolvedCode};
    pub use crate::stream::{BitStream, Mode, Width};
}
