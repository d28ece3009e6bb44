//! Fuzz target for end-to-end resolution of an org and a repository document.
//!
//! Goal: whatever the documents contain, resolution **never panics**. Structural
//! errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_assemble
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use time::{Date, Month};

#[derive(Arbitrary, Debug)]
struct DocumentsInput {
    org: String,
    repo: String,
    /// Days after 2020-01-01 used as the evaluation date
    day_offset: u16,
}

fuzz_target!(|input: DocumentsInput| {
    if input.org.len() > 4096 || input.repo.len() > 4096 {
        return;
    }

    let Ok(org) = sockguard_settings::parse_org_policy_yaml(&input.org) else {
        return;
    };
    let Ok(repo) = sockguard_settings::parse_repo_policy_yaml(&input.repo) else {
        return;
    };
    let Ok(start) = Date::from_calendar_date(2020, Month::January, 1) else {
        return;
    };
    let as_of = start + time::Duration::days(i64::from(input.day_offset));

    let _ = sockguard_domain::validate(&repo, &org, as_of);
    let _ = sockguard_domain::assemble(&org, &repo, as_of);
});
