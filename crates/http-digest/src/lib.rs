// http-digest - HTTP Digest Authorization for clients
// Copyright (C) 2026 The http-digest Contributors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTTP Digest Authentication, client side (RFC 2617).
//!
//! Turns a `WWW-Authenticate` challenge into the value of the matching
//! `Authorization` header:
//! - **Algorithms**: MD5, MD5-sess, SHA1 (anything else is rejected)
//! - **Quality of Protection**: `auth`, or the RFC 2069 form when the
//!   server offers no qop
//! - **Nonce count**: per-engine, thread-safe, starts at `00000001`
//! - **IIS compatibility**: optional quoting of the `qop` field
//!
//! The engine does no I/O. Sending the request and retrying on 401 is left
//! to the HTTP client.
//!
//! # Examples
//!
//! ```
//! use http_digest::{DigestAuth, FixedCnonce, TargetUri};
//!
//! let auth = DigestAuth::new()
//!     .with_cnonce_source(FixedCnonce::new("9ea5ff3bd34554a4165bbdc1df91dcff"));
//! let uri = TargetUri::new("http", "www.example.com", "/")
//!     .with_credentials("user", "password");
//! let challenge = "Digest qop=\"auth\", realm=\"www.example.com\", \
//!     nonce=\"4107baa081a592a6021660200000cd6c5686ff5f579324402b374d83e2c9\"";
//!
//! let header = auth.auth_header(&uri, challenge, "GET", false)?;
//! assert!(header.contains("nc=00000001"));
//! assert!(header.ends_with("response=\"1f5f0cd1588690c1303737f081c0b9bb\""));
//! # Ok::<(), http_digest::DigestError>(())
//! ```

pub mod algorithm;
pub mod challenge;
pub mod compute;
pub mod error;
pub mod header;
pub mod nonce;
pub mod uri;

use smol_str::SmolStr;
use tracing::{debug, warn};

pub use algorithm::DigestAlgorithm;
pub use challenge::{
    parse_challenge, parse_challenge_with_limit, Challenge, Qop, DEFAULT_MAX_CHALLENGE_LEN,
};
pub use compute::{compute, Credentials, DigestOutcome, RequestContext};
pub use error::DigestError;
pub use header::{AuthorizationHeader, DigestField};
pub use nonce::{CnonceSource, FixedCnonce, NonceCounter, RandomCnonce};
pub use uri::TargetUri;

/// Digest authentication engine for one authentication context.
///
/// Holds the nonce counter and the cnonce source. Every header built through
/// the same engine advances the counter by one, so use one engine per
/// realm/nonce relationship.
pub struct DigestAuth {
    counter: NonceCounter,
    cnonce: Box<dyn CnonceSource>,
    max_challenge_len: usize,
}

impl Default for DigestAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DigestAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestAuth")
            .field("counter", &self.counter)
            .field("max_challenge_len", &self.max_challenge_len)
            .finish_non_exhaustive()
    }
}

impl DigestAuth {
    pub fn new() -> Self {
        Self {
            counter: NonceCounter::new(),
            cnonce: Box::new(RandomCnonce),
            max_challenge_len: DEFAULT_MAX_CHALLENGE_LEN,
        }
    }

    /// Replaces the client nonce source, e.g. with a [`FixedCnonce`] for
    /// reproducible output.
    pub fn with_cnonce_source(mut self, source: impl CnonceSource + 'static) -> Self {
        self.cnonce = Box::new(source);
        self
    }

    pub fn with_max_challenge_len(mut self, max: usize) -> Self {
        self.max_challenge_len = max;
        self
    }

    /// Advances and returns the nonce count.
    pub fn next_nonce(&self) -> u64 {
        self.counter.next()
    }

    /// Produces a client nonce from the configured source.
    pub fn make_cnonce(&self) -> SmolStr {
        self.cnonce.generate()
    }

    /// Builds the `Authorization` header value for `method` on `uri` in
    /// answer to `challenge`.
    ///
    /// `iis` quotes the qop field (`qop="auth"`), which IIS requires.
    pub fn auth_header(
        &self,
        uri: &TargetUri,
        challenge: &str,
        method: &str,
        iis: bool,
    ) -> Result<String, DigestError> {
        self.authorization(uri, challenge, method, iis)
            .map(|header| header.to_string())
    }

    /// Same as [`auth_header`](Self::auth_header) but returns the ordered
    /// fields instead of the serialized string.
    pub fn authorization(
        &self,
        uri: &TargetUri,
        challenge: &str,
        method: &str,
        iis: bool,
    ) -> Result<AuthorizationHeader, DigestError> {
        let count = self.next_nonce();

        let challenge = parse_challenge_with_limit(challenge, self.max_challenge_len)?;
        let algorithm = challenge.digest_algorithm().map_err(|err| {
            warn!(algorithm = %challenge.algorithm, "challenge names an unknown algorithm");
            err
        })?;
        let credentials = uri.credentials()?;
        let request_uri = uri.request_uri();
        if header::contains_line_break(&request_uri) {
            return Err(DigestError::InvalidRequestUri);
        }
        let request = RequestContext {
            method: SmolStr::new(method),
            request_uri,
        };

        let nc = NonceCounter::format(count);
        let cnonce = if challenge.has_qop() || algorithm.is_sess() {
            self.make_cnonce()
        } else {
            SmolStr::default()
        };

        let outcome = compute(&challenge, &credentials, &request, &nc, &cnonce)?;

        debug!(
            realm = %challenge.realm,
            algorithm = %outcome.algorithm,
            nc = %nc,
            qop = challenge.has_qop(),
            "computed digest authorization"
        );

        let mut header = AuthorizationHeader::new();
        header.push_quoted("username", credentials.username.clone());
        header.push_quoted("realm", challenge.realm.clone());
        header.push_token("algorithm", outcome.algorithm);
        if challenge.has_qop() {
            if iis {
                header.push_quoted("qop", Qop::Auth.as_str());
            } else {
                header.push_token("qop", Qop::Auth.as_str());
            }
        }
        header.push_quoted("uri", request.request_uri.clone());
        header.push_quoted("nonce", challenge.nonce.clone());
        if challenge.has_qop() {
            header.push_token("nc", nc);
            header.push_quoted("cnonce", cnonce);
        }
        header.push_quoted("response", outcome.response);
        if let Some(opaque) = challenge.opaque {
            header.push_quoted("opaque", opaque);
        }

        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const CHALLENGE: &str = "Digest qop=\"auth\", realm=\"www.example.com\", nonce=\"4107baa081a592a6021660200000cd6c5686ff5f579324402b374d83e2c9\"";

    fn engine() -> DigestAuth {
        DigestAuth::new().with_cnonce_source(FixedCnonce::new("9ea5ff3bd34554a4165bbdc1df91dcff"))
    }

    fn target() -> TargetUri {
        TargetUri::new("http", "www.example.com", "/").with_credentials("user", "password")
    }

    #[test]
    fn field_order_with_qop() {
        let header = engine().authorization(&target(), CHALLENGE, "GET", false).unwrap();
        let names: Vec<_> = header.fields().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            ["username", "realm", "algorithm", "qop", "uri", "nonce", "nc", "cnonce", "response"]
        );
    }

    #[test]
    fn counter_advances_even_without_qop() {
        let auth = engine();
        let no_qop = "Digest realm=\"r\", nonce=\"n\"";
        auth.auth_header(&target(), no_qop, "GET", false).unwrap();
        let header = auth.authorization(&target(), CHALLENGE, "GET", false).unwrap();
        assert_eq!(header.param("nc"), Some("00000002"));
    }

    #[test]
    fn sess_without_qop_still_draws_cnonce() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let auth = DigestAuth::new().with_cnonce_source(move || {
            seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            "0123456789abcdef0123456789abcdef".to_owned()
        });

        let header = auth
            .authorization(
                &target(),
                "Digest realm=\"r\", nonce=\"n\", algorithm=MD5-sess",
                "GET",
                false,
            )
            .unwrap();
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert!(header.field("cnonce").is_none());
        assert_eq!(header.param("algorithm"), Some("MD5-sess"));

        auth.authorization(&target(), "Digest realm=\"r\", nonce=\"n\"", "GET", false)
            .unwrap();
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_credentials_fail() {
        let uri = TargetUri::new("http", "www.example.com", "/");
        let err = engine().auth_header(&uri, CHALLENGE, "GET", false).unwrap_err();
        assert_eq!(err, DigestError::MissingCredentials);
    }

    #[test]
    fn line_breaks_never_reach_the_header() {
        let uri = TargetUri::new("http", "www.example.com", "/")
            .with_credentials("user%0D%0AX-Evil:%201", "password");
        let err = engine().auth_header(&uri, CHALLENGE, "GET", false).unwrap_err();
        assert_eq!(err, DigestError::InvalidCredentials);

        let uri = TargetUri::new("http", "www.example.com", "/a\r\nX-Evil: 1")
            .with_credentials("user", "password");
        let err = engine().auth_header(&uri, CHALLENGE, "GET", false).unwrap_err();
        assert_eq!(err, DigestError::InvalidRequestUri);

        let uri = TargetUri::new("http", "www.example.com", "/")
            .with_query("q=1\nX-Evil: 1")
            .with_credentials("user", "password");
        let err = engine().auth_header(&uri, CHALLENGE, "GET", false).unwrap_err();
        assert_eq!(err, DigestError::InvalidRequestUri);
    }

    #[test]
    fn configured_length_limit_applies() {
        let auth = engine().with_max_challenge_len(10);
        let err = auth.auth_header(&target(), CHALLENGE, "GET", false).unwrap_err();
        assert_eq!(err, DigestError::ChallengeTooLong { max: 10 });
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DigestAuth>();
    }
}
