//! Pure policy resolution (no IO).
//!
//! Input: one organization policy and one repository policy, already parsed elsewhere,
//! plus the date the policy is evaluated at.
//! Output: the resolved repository policy + validation findings.

#![forbid(unsafe_code)]

pub mod error;
pub mod matcher;
pub mod model;
pub mod policy;
pub mod report;
pub mod resolve;
pub mod version;

mod checks;
mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{assemble, validate};
pub use error::PolicyError;
pub use matcher::{is_active, match_package};
pub use report::Assembly;
pub use resolve::{parse_issue_rules, resolve};
pub use version::VersionRange;
