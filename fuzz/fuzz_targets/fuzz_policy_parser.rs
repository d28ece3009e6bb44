//! Fuzz target for policy YAML parsing.
//!
//! Goal: The parsers should **never panic** on any input.
//! They may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = sockguard_repo::fuzz::parse_org_policy(text);
        let _ = sockguard_repo::fuzz::parse_repo_policy(text);
    }
});
