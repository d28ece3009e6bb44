use sockguard_types::PolicySource;
use thiserror::Error;

/// Structural errors: the input document itself cannot be resolved.
///
/// Questionable-but-valid content is never an error; it is reported as a
/// [`sockguard_types::Finding`] instead.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("unknown issue kind '{key}' in {layer} issue rules")]
    UnknownIssueKind { key: String, layer: PolicySource },

    #[error("invalid action '{action}' for issue '{key}' in {layer} issue rules: {reason}")]
    InvalidAction {
        key: String,
        action: String,
        layer: PolicySource,
        reason: &'static str,
    },

    #[error("invalid version range '{range}': {reason}")]
    InvalidVersionRange { range: String, reason: &'static str },

    #[error("invalid date '{value}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate { value: String },
}
