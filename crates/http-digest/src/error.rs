// http-digest - HTTP Digest Authorization for clients
// Copyright (C) 2026 The http-digest Contributors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the challenge parser, the digest computation and the
//! header builder.

use std::fmt;

use smol_str::SmolStr;

/// Errors produced while turning a challenge into an Authorization value.
///
/// None of these are retryable by the engine itself: the caller has to pick
/// another challenge or give up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// The challenge named an algorithm outside MD5, MD5-sess and SHA1.
    UnknownAlgorithm(SmolStr),
    /// `realm` or `nonce` was absent from the challenge.
    MissingChallengeField(&'static str),
    /// The challenge used a scheme other than Digest.
    UnsupportedScheme(SmolStr),
    /// Challenge text exceeds the configured limit.
    ChallengeTooLong { max: usize },
    /// A challenge parameter was oversized or carried control characters.
    InvalidChallengeParameter(SmolStr),
    /// The target URI has no username to authenticate with.
    MissingCredentials,
    /// Decoded userinfo carries characters that cannot go into a header.
    InvalidCredentials,
    /// The request-URI carries characters that cannot go into a header.
    InvalidRequestUri,
}

impl fmt::Display for DigestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestError::UnknownAlgorithm(name) => write!(f, "unknown algorithm \"{}\"", name),
            DigestError::MissingChallengeField(field) => {
                write!(f, "malformed challenge: missing {}", field)
            }
            DigestError::UnsupportedScheme(scheme) => {
                write!(f, "unsupported authentication scheme \"{}\"", scheme)
            }
            DigestError::ChallengeTooLong { max } => {
                write!(f, "challenge too long (max {})", max)
            }
            DigestError::InvalidChallengeParameter(name) => {
                write!(f, "invalid challenge parameter: {}", name)
            }
            DigestError::MissingCredentials => write!(f, "target URI carries no credentials"),
            DigestError::InvalidCredentials => {
                write!(f, "credentials contain control characters")
            }
            DigestError::InvalidRequestUri => {
                write!(f, "request-URI contains control characters")
            }
        }
    }
}

impl std::error::Error for DigestError {}
