use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `sockguard.toml` schema v1.
///
/// Every field is optional; CLI flags and built-in defaults fill the gaps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SockguardConfigV1 {
    /// Optional schema string for tooling (`sockguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Directory holding `org-defaults.yml` and `repositories/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_dir: Option<String>,

    /// Where generated documents go, one subdirectory per repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// File name of the generated document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    /// When validation fails: `error` (default) or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,
}
