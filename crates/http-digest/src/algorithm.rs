// http-digest - HTTP Digest Authorization for clients
// Copyright (C) 2026 The http-digest Contributors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Digest algorithm selection (RFC 2617 §3.2.1).

use sha1::{Digest, Sha1};
use smol_str::SmolStr;

use crate::error::DigestError;

/// Hash algorithms the engine knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Md5,
    Md5Sess,
    Sha1,
}

impl DigestAlgorithm {
    /// Canonical spelling used in the Authorization header.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Md5Sess => "MD5-sess",
            DigestAlgorithm::Sha1 => "SHA1",
        }
    }

    /// Matches an algorithm token case-insensitively.
    ///
    /// Surrounding quotes must already be stripped.
    pub fn parse(s: &str) -> Result<Self, DigestError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(DigestAlgorithm::Md5),
            "md5-sess" => Ok(DigestAlgorithm::Md5Sess),
            "sha1" => Ok(DigestAlgorithm::Sha1),
            _ => Err(DigestError::UnknownAlgorithm(SmolStr::new(s))),
        }
    }

    pub fn is_sess(&self) -> bool {
        matches!(self, DigestAlgorithm::Md5Sess)
    }

    /// Length of a rendered digest in hex characters.
    pub fn hex_len(&self) -> usize {
        match self {
            DigestAlgorithm::Md5 | DigestAlgorithm::Md5Sess => 32,
            DigestAlgorithm::Sha1 => 40,
        }
    }

    /// Lowercase hex digest of `data`.
    pub fn hash(&self, data: &[u8]) -> String {
        match self {
            DigestAlgorithm::Md5 | DigestAlgorithm::Md5Sess => format!("{:x}", md5::compute(data)),
            DigestAlgorithm::Sha1 => hex::encode(Sha1::digest(data)),
        }
    }
}

impl std::str::FromStr for DigestAlgorithm {
    type Err = DigestError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
