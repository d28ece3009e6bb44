//! Stable identifiers for finding codes and emitted schemas.
//!
//! `code` is a short snake_case discriminator shown in reports and accepted by `sockguard explain`.

// Issue rules
pub const CODE_UNKNOWN_ISSUE_KIND: &str = "unknown_issue_kind";
pub const CODE_INVALID_ACTION: &str = "invalid_action";
pub const CODE_MALWARE_DOWNGRADE: &str = "malware_downgrade";
pub const CODE_CRITICAL_ISSUE_IGNORED: &str = "critical_issue_ignored";

// Package rules
pub const CODE_MISSING_PACKAGE_NAME: &str = "missing_package_name";
pub const CODE_MISSING_REASON: &str = "missing_reason";
pub const CODE_INVALID_VERSION_RANGE: &str = "invalid_version_range";
pub const CODE_EXPIRED_RULE: &str = "expired_rule";
pub const CODE_RULE_CONFLICT: &str = "rule_conflict";
pub const CODE_MALWARE_ALLOWANCE: &str = "malware_allowance";

// Document shape
pub const CODE_UNSUPPORTED_VERSION: &str = "unsupported_version";
pub const CODE_INVALID_IGNORE_PATTERN: &str = "invalid_ignore_pattern";

/// Document versions the downstream scanner understands.
pub const SUPPORTED_DOCUMENT_VERSIONS: &[u32] = &[1, 2];
