//! Fuzz target for version-range parsing and matching.
//!
//! Goal: parsing and matching **never panic**, and a parsed range re-parses
//! from its canonical form to the same value.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_version_range
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sockguard_domain::VersionRange;

#[derive(Arbitrary, Debug)]
struct RangeInput {
    /// Range expression (e.g. ">=1.0.0", "1.2.x")
    range: String,
    /// Package versions to match against it
    versions: Vec<String>,
}

fuzz_target!(|input: RangeInput| {
    if input.range.len() > 256 || input.versions.len() > 64 {
        return;
    }

    let Ok(range) = VersionRange::parse(&input.range) else {
        return;
    };

    let canonical = range.to_string();
    assert_eq!(
        VersionRange::parse(&canonical).ok(),
        Some(range.clone()),
        "canonical form {canonical:?} does not re-parse"
    );

    for version in input.versions.iter().filter(|v| v.len() <= 128) {
        let _ = range.matches(version);
    }
});
