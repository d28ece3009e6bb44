//! Config and policy document parsing.
//!
//! This crate is intentionally IO-free: it parses and resolves documents provided as strings.

#![forbid(unsafe_code)]

mod documents;
mod model;
mod resolve;

pub use documents::{parse_org_policy_yaml, parse_repo_policy_yaml};
pub use model::SockguardConfigV1;
pub use resolve::{Overrides, ResolvedConfig, parse_fail_on};

/// Parse `sockguard.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<SockguardConfigV1> {
    let cfg: SockguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config (file values + CLI overrides + defaults).
pub fn resolve_config(
    cfg: SockguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
