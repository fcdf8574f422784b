/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Textual code specifications: a code is named by an identifier plus
//! an optional parenthesized parameter list, e.g. `"gamma"`, `"rice(3)"`,
//! `"startstop(0-1-2-3-3-3-3)"`, parsed through a hand-rolled
//! `Display`/`FromStr` pair on [`Code`]. Unlike a plain closed enum,
//! [`CodeRegistry`] also accepts caller-registered encoder/decoder pairs
//! for names outside that fixed set.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::codes::{
    get_delta, get_even_rodeh, get_exp_golomb, get_fibonacci, get_gamma, get_gamma_golomb,
    get_golomb, get_levenstein, get_omega, get_rice, get_unary, get_unary1, put_delta,
    put_even_rodeh, put_exp_golomb, put_fibonacci, put_gamma, put_gamma_golomb, put_golomb,
    put_levenstein, put_omega, put_rice, put_unary, put_unary1, start_stop::StartStop,
};
use crate::error::{BitStreamError, Result};
use crate::stream::BitStream;

/// A parsed, parameterized code, ready to encode or decode.
///
/// Some parameterizations denote the same code in principle (`Rice(0)` is
/// `Unary`); this crate does not need that equivalence class, so `Code`
/// does not implement `PartialEq`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Code {
    Unary,
    Unary1,
    Gamma,
    Delta,
    Omega,
    Levenstein,
    EvenRodeh,
    Fibonacci,
    Golomb(u64),
    Rice(u32),
    GammaGolomb(u64),
    ExpGolomb(u32),
    StartStop(StartStop, Vec<u32>),
}

impl Code {
    /// Writes `value` using this code.
    pub fn encode(&self, stream: &mut BitStream, value: u64) -> Result<()> {
        match self {
            Code::Unary => put_unary(stream, value),
            Code::Unary1 => put_unary1(stream, value),
            Code::Gamma => put_gamma(stream, value),
            Code::Delta => put_delta(stream, value),
            Code::Omega => put_omega(stream, value),
            Code::Levenstein => put_levenstein(stream, value),
            Code::EvenRodeh => put_even_rodeh(stream, value),
            Code::Fibonacci => put_fibonacci(stream, value),
            Code::Golomb(m) => put_golomb(stream, value, *m),
            Code::Rice(k) => put_rice(stream, value, *k),
            Code::GammaGolomb(m) => put_gamma_golomb(stream, value, *m),
            Code::ExpGolomb(k) => put_exp_golomb(stream, value, *k),
            Code::StartStop(code, _) => code.put(stream, value),
        }
    }

    /// Reads a value using this code.
    pub fn decode(&self, stream: &mut BitStream) -> Result<u64> {
        match self {
            Code::Unary => get_unary(stream),
            Code::Unary1 => get_unary1(stream),
            Code::Gamma => get_gamma(stream),
            Code::Delta => get_delta(stream),
            Code::Omega => get_omega(stream),
            Code::Levenstein => get_levenstein(stream),
            Code::EvenRodeh => get_even_rodeh(stream),
            Code::Fibonacci => get_fibonacci(stream),
            Code::Golomb(m) => get_golomb(stream, *m),
            Code::Rice(k) => get_rice(stream, *k),
            Code::GammaGolomb(m) => get_gamma_golomb(stream, *m),
            Code::ExpGolomb(k) => get_exp_golomb(stream, *k),
            Code::StartStop(code, _) => code.get(stream),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Unary => write!(f, "unary"),
            Code::Unary1 => write!(f, "unary1"),
            Code::Gamma => write!(f, "gamma"),
            Code::Delta => write!(f, "delta"),
            Code::Omega => write!(f, "omega"),
            Code::Levenstein => write!(f, "levenstein"),
            Code::EvenRodeh => write!(f, "evenrodeh"),
            Code::Fibonacci => write!(f, "fib"),
            Code::Golomb(m) => write!(f, "golomb({m})"),
            Code::Rice(k) => write!(f, "rice({k})"),
            Code::GammaGolomb(m) => write!(f, "gammagolomb({m})"),
            Code::ExpGolomb(k) => write!(f, "expgolomb({k})"),
            Code::StartStop(_, steps) => {
                write!(f, "startstop(")?;
                for (i, s) in steps.iter().enumerate() {
                    if i > 0 {
                        write!(f, "-")?;
                    }
                    write!(f, "{s}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Splits `"name(params)"` into `("name", Some("params"))`, or `("name",
/// None)` if there is no parenthesized part.
fn split_spec(spec: &str) -> Result<(&str, Option<&str>)> {
    let Some(open) = spec.find('(') else {
        return Ok((spec, None));
    };
    let close = spec
        .strip_suffix(')')
        .ok_or_else(|| bad_argument(spec))
        .map(|_| spec.len() - 1)?;
    if close <= open {
        return Err(bad_argument(spec));
    }
    Ok((&spec[..open], Some(&spec[open + 1..close])))
}

fn bad_argument(spec: &str) -> BitStreamError {
    BitStreamError::BadArgument(format!("malformed code specification: {spec:?}"))
}

fn parse_u64(s: &str) -> Result<u64> {
    s.trim()
        .parse()
        .map_err(|_| BitStreamError::BadArgument(format!("not an integer: {s:?}")))
}

fn parse_u32(s: &str) -> Result<u32> {
    s.trim()
        .parse()
        .map_err(|_| BitStreamError::BadArgument(format!("not an integer: {s:?}")))
}

impl FromStr for Code {
    type Err = BitStreamError;

    /// Parses `"name"` or `"name(params)"`. `name` is matched
    /// case-insensitively.
    fn from_str(spec: &str) -> Result<Self> {
        let (name, params) = split_spec(spec.trim())?;
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "unary" => Ok(Code::Unary),
            "unary1" => Ok(Code::Unary1),
            "gamma" => Ok(Code::Gamma),
            "delta" => Ok(Code::Delta),
            "omega" => Ok(Code::Omega),
            "levenstein" => Ok(Code::Levenstein),
            "evenrodeh" => Ok(Code::EvenRodeh),
            "fib" | "fibonacci" => Ok(Code::Fibonacci),
            "golomb" => {
                let m = parse_u64(params.ok_or_else(|| bad_argument(spec))?)?;
                Ok(Code::Golomb(m))
            }
            "rice" => {
                let k = parse_u32(params.ok_or_else(|| bad_argument(spec))?)?;
                Ok(Code::Rice(k))
            }
            "gammagolomb" => {
                let m = parse_u64(params.ok_or_else(|| bad_argument(spec))?)?;
                Ok(Code::GammaGolomb(m))
            }
            "expgolomb" => {
                let k = parse_u32(params.ok_or_else(|| bad_argument(spec))?)?;
                Ok(Code::ExpGolomb(k))
            }
            "startstop" => {
                let params = params.ok_or_else(|| bad_argument(spec))?;
                let steps = params
                    .split('-')
                    .map(parse_u32)
                    .collect::<Result<Vec<u32>>>()?;
                let code = StartStop::new(&steps)?;
                Ok(Code::StartStop(code, steps))
            }
            _ => Err(BitStreamError::UnknownCode(name)),
        }
    }
}

type Encoder = std::sync::Arc<dyn Fn(&mut BitStream, u64) -> Result<()> + Send + Sync>;
type Decoder = std::sync::Arc<dyn Fn(&mut BitStream) -> Result<u64> + Send + Sync>;

/// A resolved `(encoder, decoder)` pair returned by [`CodeRegistry::lookup`].
#[derive(Clone)]
pub struct ResolvedCode {
    /// The parsed built-in code, when `spec` named one. `None` for codes
    /// registered through [`CodeRegistry::add_code`], which have no
    /// canonical [`Code`] representation.
    pub code: Option<Code>,
    encoder: Encoder,
    decoder: Decoder,
}

impl ResolvedCode {
    pub fn encode(&self, stream: &mut BitStream, value: u64) -> Result<()> {
        (self.encoder)(stream, value)
    }

    pub fn decode(&self, stream: &mut BitStream) -> Result<u64> {
        (self.decoder)(stream)
    }
}

impl fmt::Debug for ResolvedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCode").field("code", &self.code).finish()
    }
}

/// A lookup table from textual code specifications to encoder/decoder
/// pairs. Intended to be built once (built-in grammar plus any
/// `add_code` registrations) and then read-only for the rest of its
/// life.
#[derive(Default, Clone)]
pub struct CodeRegistry {
    custom: HashMap<String, (Encoder, Decoder)>,
}

impl CodeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            custom: HashMap::new(),
        }
    }

    /// Registers a custom code under `name` (case-insensitive, compared
    /// without any parenthesized parameter list). Shadows a built-in name
    /// of the same spelling for subsequent lookups.
    pub fn add_code(
        &mut self,
        name: &str,
        encoder: impl Fn(&mut BitStream, u64) -> Result<()> + Send + Sync + 'static,
        decoder: impl Fn(&mut BitStream) -> Result<u64> + Send + Sync + 'static,
    ) {
        self.custom.insert(
            name.to_ascii_lowercase(),
            (std::sync::Arc::new(encoder), std::sync::Arc::new(decoder)),
        );
    }

    /// Parses `spec` and returns its encoder/decoder pair. Custom codes
    /// registered via [`CodeRegistry::add_code`] are tried first (matched
    /// on the bare name, ignoring any parameter list), falling back to the
    /// built-in grammar. Fails with [`BitStreamError::UnknownCode`] if
    /// neither recognizes the name.
    pub fn lookup(&self, spec: &str) -> Result<ResolvedCode> {
        let (name, _) = split_spec(spec.trim())?;
        let key = name.trim().to_ascii_lowercase();
        if let Some((encoder, decoder)) = self.custom.get(&key) {
            return Ok(ResolvedCode {
                code: None,
                encoder: encoder.clone(),
                decoder: decoder.clone(),
            });
        }
        let code: Code = spec.parse()?;
        Ok(into_resolved(code))
    }
}

fn into_resolved(code: Code) -> ResolvedCode {
    let for_encode = code.clone();
    let for_decode = code.clone();
    ResolvedCode {
        code: Some(code),
        encoder: std::sync::Arc::new(move |stream, value| for_encode.encode(stream, value)),
        decoder: std::sync::Arc::new(move |stream| for_decode.decode(stream)),
    }
}
