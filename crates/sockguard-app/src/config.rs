use anyhow::Context;
use sockguard_settings::{Overrides, ResolvedConfig, SockguardConfigV1};

/// Parse and resolve `sockguard.toml` contents (empty is allowed, defaults apply).
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        SockguardConfigV1::default()
    } else {
        sockguard_settings::parse_config_toml(config_text).context("parse config")?
    };

    sockguard_settings::resolve_config(cfg, overrides).context("resolve config")
}
