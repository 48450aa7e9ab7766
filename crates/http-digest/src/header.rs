// http-digest - HTTP Digest Authorization for clients
// Copyright (C) 2026 The http-digest Contributors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Authorization header value, serialized in a fixed field order.
//!
//! Some servers compare the credentials positionally, so fields are kept in
//! insertion order rather than sorted.

use std::fmt;

use smol_str::SmolStr;

/// One `name=value` pair of the Authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestField {
    pub name: &'static str,
    pub value: SmolStr,
    pub quoted: bool,
}

/// Ordered Digest credentials ready to place in an `Authorization` header.
///
/// # Examples
///
/// ```
/// use http_digest::AuthorizationHeader;
///
/// let mut header = AuthorizationHeader::new();
/// header.push_quoted("username", "user");
/// header.push_token("algorithm", "MD5");
///
/// assert_eq!(header.to_string(), "Digest username=\"user\", algorithm=MD5");
/// assert_eq!(header.param("algorithm"), Some("MD5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationHeader {
    fields: Vec<DigestField>,
}

impl AuthorizationHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field rendered as `name="value"`.
    pub fn push_quoted(&mut self, name: &'static str, value: impl Into<SmolStr>) {
        self.fields.push(DigestField {
            name,
            value: value.into(),
            quoted: true,
        });
    }

    /// Appends a field rendered as `name=value`.
    pub fn push_token(&mut self, name: &'static str, value: impl Into<SmolStr>) {
        self.fields.push(DigestField {
            name,
            value: value.into(),
            quoted: false,
        });
    }

    pub fn fields(&self) -> &[DigestField] {
        &self.fields
    }

    /// Value of the first field called `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&DigestField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// True when `value` holds a NUL, CR or LF, any of which would break the
/// header line.
pub(crate) fn contains_line_break(value: &str) -> bool {
    value.contains(['\0', '\r', '\n'])
}

fn escape_quoted_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

impl fmt::Display for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest")?;

        for (i, field) in self.fields.iter().enumerate() {
            if i == 0 {
                write!(f, " ")?;
            } else {
                write!(f, ", ")?;
            }

            if field.quoted {
                write!(f, "{}=\"{}\"", field.name, escape_quoted_value(&field.value))?;
            } else {
                write!(f, "{}={}", field.name, field.value)?;
            }
        }

        Ok(())
    }
}
