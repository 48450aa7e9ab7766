// http-digest - HTTP Digest Authorization for clients
// Copyright (C) 2026 The http-digest Contributors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! WWW-Authenticate challenge parsing (RFC 2617 §3.2.1).
//!
//! The parser is deliberately forgiving about layout: the leading `Digest`
//! scheme word is optional, parameters may come in any order, values may or
//! may not be quoted, and a quoted value may run straight into the next
//! parameter without a separating comma. It is strict about the two fields a
//! response cannot be computed without, `realm` and `nonce`.
//!
//! # Security
//!
//! Input is bounded before any digest work is done:
//! - Total challenge length (configurable, 8 KiB by default)
//! - Maximum parameter count (30 parameters)
//! - Maximum parameter value length (1024 bytes)
//! - No NUL, CR or LF in recognised parameter values

use smol_str::SmolStr;
use tracing::{trace, warn};

use crate::algorithm::DigestAlgorithm;
use crate::error::DigestError;
use crate::header::contains_line_break;

pub const DEFAULT_MAX_CHALLENGE_LEN: usize = 8 * 1024;
const MAX_CHALLENGE_PARAMS: usize = 30;
const MAX_PARAM_VALUE_LEN: usize = 1024;

/// Quality of Protection values a server may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qop {
    Auth,
    AuthInt,
}

impl Qop {
    pub fn as_str(&self) -> &'static str {
        match self {
            Qop::Auth => "auth",
            Qop::AuthInt => "auth-int",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auth" => Some(Qop::Auth),
            "auth-int" => Some(Qop::AuthInt),
            _ => None,
        }
    }
}

/// A parsed Digest challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub realm: SmolStr,
    pub nonce: SmolStr,
    pub opaque: Option<SmolStr>,
    /// Raw qop directive with quotes removed, e.g. `auth` or `auth,auth-int`.
    pub qop: Option<SmolStr>,
    /// Algorithm token as received (quotes removed), `MD5` when absent.
    pub algorithm: SmolStr,
    pub stale: bool,
}

impl Challenge {
    /// Whether the server asked for qop negotiation.
    pub fn has_qop(&self) -> bool {
        self.qop.is_some()
    }

    /// The qop values offered, skipping ones this crate does not know.
    pub fn qop_options(&self) -> Vec<Qop> {
        self.qop
            .as_deref()
            .map(|raw| raw.split(',').filter_map(Qop::parse).collect())
            .unwrap_or_default()
    }

    /// Resolves the algorithm token.
    pub fn digest_algorithm(&self) -> Result<DigestAlgorithm, DigestError> {
        DigestAlgorithm::parse(&self.algorithm)
    }
}

impl std::str::FromStr for Challenge {
    type Err = DigestError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_challenge(s)
    }
}

/// Parses a WWW-Authenticate value using the default length limit.
pub fn parse_challenge(input: &str) -> Result<Challenge, DigestError> {
    parse_challenge_with_limit(input, DEFAULT_MAX_CHALLENGE_LEN)
}

/// Parses a WWW-Authenticate value, rejecting input longer than `max_len`.
pub fn parse_challenge_with_limit(input: &str, max_len: usize) -> Result<Challenge, DigestError> {
    if input.len() > max_len {
        return Err(DigestError::ChallengeTooLong { max: max_len });
    }

    let tokens = tokenize(input);
    if tokens.len() > MAX_CHALLENGE_PARAMS {
        return Err(DigestError::InvalidChallengeParameter(SmolStr::new(
            "too many parameters",
        )));
    }

    let mut realm = None;
    let mut nonce = None;
    let mut opaque = None;
    let mut qop = None;
    let mut algorithm = None;
    let mut stale = false;

    for (index, token) in tokens.into_iter().enumerate() {
        let (name, value) = match token {
            Token::Bare(word) => {
                if index == 0 && !word.eq_ignore_ascii_case("digest") {
                    warn!(scheme = %word, "challenge does not use the Digest scheme");
                    return Err(DigestError::UnsupportedScheme(word));
                }
                continue;
            }
            Token::Param { name, value } => (name, value),
        };

        let slot = match name.as_str() {
            "realm" => &mut realm,
            "nonce" => &mut nonce,
            "opaque" => &mut opaque,
            "qop" => &mut qop,
            "algorithm" => &mut algorithm,
            "stale" => {
                stale = value.trim().eq_ignore_ascii_case("true");
                continue;
            }
            _ => {
                trace!(param = %name, "ignoring unrecognised challenge parameter");
                continue;
            }
        };

        validate_value(&name, &value)?;
        if slot.is_none() {
            *slot = Some(SmolStr::new(value));
        }
    }

    let realm = realm.ok_or_else(|| missing("realm"))?;
    let nonce = nonce.ok_or_else(|| missing("nonce"))?;

    Ok(Challenge {
        realm,
        nonce,
        opaque,
        qop,
        algorithm: algorithm.unwrap_or_else(|| SmolStr::new_inline("MD5")),
        stale,
    })
}

fn missing(field: &'static str) -> DigestError {
    warn!(field, "challenge is missing a required field");
    DigestError::MissingChallengeField(field)
}

fn validate_value(name: &str, value: &str) -> Result<(), DigestError> {
    if value.len() > MAX_PARAM_VALUE_LEN || contains_line_break(value) {
        return Err(DigestError::InvalidChallengeParameter(SmolStr::new(name)));
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    /// A word with no `=`, such as the auth scheme.
    Bare(SmolStr),
    Param { name: SmolStr, value: String },
}

/// Splits challenge text into bare words and `name=value` pairs.
///
/// Commas inside quoted strings do not split. A closing quote ends the value
/// even when no comma follows.
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if *c == ',' || c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c == ',' || c.is_whitespace() {
                break;
            }
            name.push(c);
            chars.next();
        }

        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        if chars.peek() != Some(&'=') {
            tokens.push(Token::Bare(SmolStr::new(name)));
            continue;
        }
        chars.next();

        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }

        let mut value = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            value.push(escaped);
                        }
                    }
                    '"' => break,
                    _ => value.push(c),
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c == ',' {
                    break;
                }
                value.push(c);
                chars.next();
            }
            value.truncate(value.trim_end().len());
        }

        tokens.push(Token::Param {
            name: SmolStr::new(name),
            value,
        });
    }

    tokens
}
