//! Stable DTOs and IDs used across the sockguard workspace.
//!
//! This crate is intentionally boring:
//! - the closed issue-kind and action vocabularies
//! - data types for the emitted `socket.yml` document and validation report
//! - stable string codes for findings
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod document;
pub mod explain;
pub mod ids;
pub mod issue;
pub mod receipt;

pub use document::{SocketPackageRule, SocketYml};
pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use issue::{Action, IssueKind, PackageAction, ParseEnumError};
pub use receipt::{
    Finding, FindingKind, PolicySource, RepoReport, ReportEnvelope, RuleRef, SCHEMA_REPORT_V1,
    Severity, SeverityCounts, ToolMeta, ValidationData, ValidationReport, Verdict,
};
