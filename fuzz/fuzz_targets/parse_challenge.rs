// http-digest - HTTP Digest Authorization for clients
// Copyright (C) 2026 The http-digest Contributors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![no_main]
use http_digest::{parse_challenge, DigestAuth, FixedCnonce, TargetUri};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Ignore non-UTF8 payloads.
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Parse should either succeed or return a DigestError, never panic
    let _ = parse_challenge(s);

    let auth = DigestAuth::new().with_cnonce_source(FixedCnonce::new("00000000000000000000000000000000"));
    let uri = TargetUri::new("http", "fuzz.invalid", "/").with_credentials("user", "password");
    let _ = auth.auth_header(&uri, s, "GET", false);
});
