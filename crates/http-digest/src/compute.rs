// http-digest - HTTP Digest Authorization for clients
// Copyright (C) 2026 The http-digest Contributors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request-digest computation (RFC 2617 §3.2.2.1 - §3.2.2.3).
//!
//! ```text
//! HA1      = H(username:realm:password)
//! HA1-sess = H(H(username:realm:password):nonce:cnonce)
//! HA2      = H(method:request-uri)
//! response = H(HA1:nonce:nc:cnonce:auth:HA2)   with qop
//! response = H(HA1:nonce:HA2)                  without qop
//! ```

use smol_str::SmolStr;

use crate::algorithm::DigestAlgorithm;
use crate::challenge::{Challenge, Qop};
use crate::error::DigestError;

/// Username and password to authenticate with.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: SmolStr,
    pub password: SmolStr,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: SmolStr::new(username),
            password: SmolStr::new(password),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The pending request the header is computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: SmolStr,
    /// Path plus optional query, no scheme or host.
    pub request_uri: SmolStr,
}

impl RequestContext {
    pub fn new(method: &str, request_uri: &str) -> Self {
        Self {
            method: SmolStr::new(method),
            request_uri: SmolStr::new(request_uri),
        }
    }
}

/// Result of a digest computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestOutcome {
    pub response: String,
    /// Value for the `algorithm` field of the Authorization header.
    pub algorithm: SmolStr,
    pub used_sess: bool,
}

/// Computes the request digest for one challenge.
///
/// `nc` and `cnonce` only take part when the challenge carries qop, except
/// that `cnonce` also feeds HA1 for `MD5-sess`.
pub fn compute(
    challenge: &Challenge,
    credentials: &Credentials,
    request: &RequestContext,
    nc: &str,
    cnonce: &str,
) -> Result<DigestOutcome, DigestError> {
    let algorithm = challenge.digest_algorithm()?;

    let ha1 = compute_ha1(algorithm, challenge, credentials, cnonce);
    let ha2 = compute_ha2(algorithm, request);

    let final_input = if challenge.has_qop() {
        format!(
            "{}:{}:{}:{}:{}:{}",
            ha1,
            challenge.nonce,
            nc,
            cnonce,
            Qop::Auth.as_str(),
            ha2
        )
    } else {
        format!("{}:{}:{}", ha1, challenge.nonce, ha2)
    };

    // MD5-sess is echoed in canonical spelling; other names keep the
    // server's casing.
    let emitted = if algorithm.is_sess() {
        SmolStr::new(algorithm.as_str())
    } else {
        SmolStr::new(challenge.algorithm.trim())
    };

    Ok(DigestOutcome {
        response: algorithm.hash(final_input.as_bytes()),
        algorithm: emitted,
        used_sess: algorithm.is_sess(),
    })
}

fn compute_ha1(
    algorithm: DigestAlgorithm,
    challenge: &Challenge,
    credentials: &Credentials,
    cnonce: &str,
) -> String {
    let ha1_input = format!(
        "{}:{}:{}",
        credentials.username, challenge.realm, credentials.password
    );
    let ha1 = algorithm.hash(ha1_input.as_bytes());
    if !algorithm.is_sess() {
        return ha1;
    }
    let sess_input = format!("{}:{}:{}", ha1, challenge.nonce, cnonce);
    algorithm.hash(sess_input.as_bytes())
}

fn compute_ha2(algorithm: DigestAlgorithm, request: &RequestContext) -> String {
    let ha2_input = format!("{}:{}", request.method, request.request_uri);
    algorithm.hash(ha2_input.as_bytes())
}
