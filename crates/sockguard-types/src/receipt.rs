use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, OffsetDateTime};

/// Stable schema identifier for validation reports.
pub const SCHEMA_REPORT_V1: &str = "sockguard.report.v1";

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Severity is intentionally small: errors block unattended generation, warnings do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Closed set of finding kinds produced by policy validation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    UnknownIssueKind,
    InvalidAction,
    MalwareDowngrade,
    CriticalIssueIgnored,
    MissingPackageName,
    MissingReason,
    InvalidVersionRange,
    ExpiredRule,
    RuleConflict,
    MalwareAllowance,
    UnsupportedVersion,
    InvalidIgnorePattern,
}

impl FindingKind {
    pub const ALL: &'static [FindingKind] = &[
        FindingKind::UnknownIssueKind,
        FindingKind::InvalidAction,
        FindingKind::MalwareDowngrade,
        FindingKind::CriticalIssueIgnored,
        FindingKind::MissingPackageName,
        FindingKind::MissingReason,
        FindingKind::InvalidVersionRange,
        FindingKind::ExpiredRule,
        FindingKind::RuleConflict,
        FindingKind::MalwareAllowance,
        FindingKind::UnsupportedVersion,
        FindingKind::InvalidIgnorePattern,
    ];

    pub fn code(self) -> &'static str {
        match self {
            FindingKind::UnknownIssueKind => ids::CODE_UNKNOWN_ISSUE_KIND,
            FindingKind::InvalidAction => ids::CODE_INVALID_ACTION,
            FindingKind::MalwareDowngrade => ids::CODE_MALWARE_DOWNGRADE,
            FindingKind::CriticalIssueIgnored => ids::CODE_CRITICAL_ISSUE_IGNORED,
            FindingKind::MissingPackageName => ids::CODE_MISSING_PACKAGE_NAME,
            FindingKind::MissingReason => ids::CODE_MISSING_REASON,
            FindingKind::InvalidVersionRange => ids::CODE_INVALID_VERSION_RANGE,
            FindingKind::ExpiredRule => ids::CODE_EXPIRED_RULE,
            FindingKind::RuleConflict => ids::CODE_RULE_CONFLICT,
            FindingKind::MalwareAllowance => ids::CODE_MALWARE_ALLOWANCE,
            FindingKind::UnsupportedVersion => ids::CODE_UNSUPPORTED_VERSION,
            FindingKind::InvalidIgnorePattern => ids::CODE_INVALID_IGNORE_PATTERN,
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which policy document a rule came from. Org sorts before repo.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PolicySource {
    Org,
    Repo,
}

impl PolicySource {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicySource::Org => "org",
            PolicySource::Repo => "repo",
        }
    }
}

impl fmt::Display for PolicySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer to the offending entry inside a policy document.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
pub struct RuleRef {
    pub source: PolicySource,
    /// Document key holding the entry (`bannedPackages`, `issueRules`, ...).
    pub list: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// Package name or issue key of the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl fmt::Display for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source.as_str(), self.list)?;
        if let Some(i) = self.index {
            write!(f, "[{i}]")?;
        }
        if let Some(name) = &self.name {
            write!(f, " ({name})")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending across runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl Finding {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityCounts {
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Validation outcome for one repository policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RepoReport {
    pub repo: String,
    /// Path of the repository policy document, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_file: Option<String>,
    pub enabled: bool,
    pub verdict: Verdict,
    pub counts: SeverityCounts,
    pub findings: Vec<Finding>,
    /// Set when the policy could not be resolved at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural_error: Option<String>,
}

/// Sockguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationData {
    #[schemars(with = "String")]
    #[serde(with = "iso_date")]
    pub as_of: Date,
    pub fail_on: String,
    /// Path of the org document, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_file: Option<String>,
    pub repositories_scanned: u32,
    pub findings_total: u32,
}

/// A generic receipt/envelope.
///
/// Keeping this generic allows tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = ValidationData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub repositories: Vec<RepoReport>,
    pub data: TData,
}

pub type ValidationReport = ReportEnvelope<ValidationData>;
