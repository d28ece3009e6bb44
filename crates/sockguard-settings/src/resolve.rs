use crate::model::SockguardConfigV1;
use anyhow::Context;
use camino::Utf8PathBuf;
use sockguard_domain::policy::FailOn;

pub const DEFAULT_POLICY_DIR: &str = "policies";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_OUTPUT_FILE: &str = "socket.yml";

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub policy_dir: Option<String>,
    pub output_dir: Option<String>,
    pub fail_on: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub policy_dir: Utf8PathBuf,
    pub output_dir: Utf8PathBuf,
    pub output_file: String,
    pub fail_on: FailOn,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            policy_dir: Utf8PathBuf::from(DEFAULT_POLICY_DIR),
            output_dir: Utf8PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            fail_on: FailOn::default(),
        }
    }
}

pub fn resolve_config(
    cfg: SockguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let mut resolved = ResolvedConfig::default();

    if let Some(dir) = overrides.policy_dir.or(cfg.policy_dir) {
        resolved.policy_dir = Utf8PathBuf::from(dir);
    }
    if let Some(dir) = overrides.output_dir.or(cfg.output_dir) {
        resolved.output_dir = Utf8PathBuf::from(dir);
    }
    if let Some(file) = cfg.output_file {
        resolved.output_file = validate_output_file(&file)?;
    }
    if let Some(fail_on_s) = overrides.fail_on.or(cfg.fail_on) {
        resolved.fail_on = parse_fail_on(&fail_on_s).context("invalid fail_on")?;
    }

    Ok(resolved)
}

fn validate_output_file(name: &str) -> anyhow::Result<String> {
    let name = name.trim();
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        anyhow::bail!("output_file must be a plain file name, got '{name}'");
    }
    Ok(name.to_string())
}

pub fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
