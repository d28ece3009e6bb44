//! Report serialization, CI renderers, and file output.

use anyhow::Context;
use camino::Utf8Path;
use sockguard_types::{Finding, Severity, ValidationReport};

pub fn serialize_report(report: &ValidationReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn run_markdown(report: &ValidationReport) -> String {
    sockguard_render::render_markdown(report)
}

pub fn run_annotations(report: &ValidationReport, max: usize) -> Vec<String> {
    sockguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

/// One terminal line per finding: `error[missing_reason] web: repo:deferredPackageRules[0] (x): ...`.
pub fn format_finding(repo: &str, f: &Finding) -> String {
    let level = match f.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    match &f.rule {
        Some(rule) => format!("{level}[{}] {repo}: {rule}: {}", f.kind.code(), f.message),
        None => format!("{level}[{}] {repo}: {}", f.kind.code(), f.message),
    }
}

pub fn write_report(path: &Utf8Path, report: &ValidationReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    create_parent(path)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    create_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn create_parent(path: &Utf8Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    Ok(())
}
