// http-digest - HTTP Digest Authorization for clients
// Copyright (C) 2026 The http-digest Contributors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target URI as handed over by the HTTP client.
//!
//! Parsing is the client's job; this record only carries the pieces the
//! digest needs: the request-URI (path and query) and the userinfo.

use percent_encoding::percent_decode_str;
use smol_str::SmolStr;

use crate::compute::Credentials;
use crate::error::DigestError;
use crate::header::contains_line_break;

/// Components of the URI a request is about to be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUri {
    pub scheme: SmolStr,
    pub host: SmolStr,
    pub path: SmolStr,
    pub query: Option<SmolStr>,
    /// Userinfo user, still percent-encoded as it appeared in the URI.
    pub username: Option<SmolStr>,
    /// Userinfo password, still percent-encoded.
    pub password: Option<SmolStr>,
}

impl TargetUri {
    pub fn new(scheme: &str, host: &str, path: &str) -> Self {
        Self {
            scheme: SmolStr::new(scheme),
            host: SmolStr::new(host),
            path: SmolStr::new(path),
            query: None,
            username: None,
            password: None,
        }
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(SmolStr::new(query));
        self
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = Some(SmolStr::new(username));
        self.password = Some(SmolStr::new(password));
        self
    }

    /// Path plus `?query`; an empty path becomes `/`.
    pub fn request_uri(&self) -> SmolStr {
        let path = if self.path.is_empty() {
            "/"
        } else {
            self.path.as_str()
        };
        match &self.query {
            Some(query) => SmolStr::new(format!("{}?{}", path, query)),
            None => SmolStr::new(path),
        }
    }

    /// Percent-decoded userinfo. A missing password is treated as empty.
    ///
    /// Fails with [`DigestError::InvalidCredentials`] when decoding yields a
    /// CR, LF or NUL.
    pub fn credentials(&self) -> Result<Credentials, DigestError> {
        let username = self
            .username
            .as_deref()
            .ok_or(DigestError::MissingCredentials)?;
        let username = unescape(username);
        let password = unescape(self.password.as_deref().unwrap_or(""));
        if contains_line_break(&username) || contains_line_break(&password) {
            return Err(DigestError::InvalidCredentials);
        }
        Ok(Credentials::new(&username, &password))
    }
}

fn unescape(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}
