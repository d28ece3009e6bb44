//! The `validate` use case: check every policy document and produce a report.

use crate::resolve::{self, Resolution};
use anyhow::Context;
use sockguard_domain::model::RepoPolicy;
use sockguard_domain::policy::{FailOn, compute_verdict};
use sockguard_settings::{Overrides, ResolvedConfig};
use sockguard_types::{
    RepoReport, ReportEnvelope, SCHEMA_REPORT_V1, SeverityCounts, ToolMeta, ValidationData,
    ValidationReport, Verdict,
};
use time::{Date, OffsetDateTime};

/// Report entry name used when the policy directory holds no repository documents,
/// so that problems in the org document are still surfaced.
pub const ORG_ONLY_ENTRY: &str = "org-defaults";

/// Input for the validate use case.
#[derive(Clone, Debug)]
pub struct ValidateInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    pub as_of: Date,
}

/// Output from the validate use case.
#[derive(Clone, Debug)]
pub struct ValidateOutput {
    pub report: ValidationReport,
    pub resolved_config: ResolvedConfig,
}

pub fn run_validate(input: ValidateInput<'_>) -> anyhow::Result<ValidateOutput> {
    let started_at = OffsetDateTime::now_utc();
    let resolved = crate::load_config(input.config_text, input.overrides.clone())?;

    let tree = sockguard_repo::load_policy_tree(&resolved.policy_dir)
        .with_context(|| format!("load policies from {}", resolved.policy_dir))?;

    let mut targets = resolve::all_targets(&tree);
    if targets.is_empty() {
        targets.push(resolve::Target {
            repo: ORG_ONLY_ENTRY.to_string(),
            policy_file: None,
            policy: Ok(RepoPolicy::default()),
        });
    }

    let repositories: Vec<RepoReport> = resolve::resolve_all(&tree.org, targets, input.as_of)
        .into_iter()
        .map(|r| repo_report(r, resolved.fail_on))
        .collect();

    let verdict = overall_verdict(&repositories);
    let findings_total = repositories.iter().map(|r| r.findings.len() as u32).sum();

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "sockguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        data: ValidationData {
            as_of: input.as_of,
            fail_on: resolved.fail_on.as_str().to_string(),
            org_file: tree.org_path.as_ref().map(|p| p.to_string()),
            repositories_scanned: repositories.len() as u32,
            findings_total,
        },
        repositories,
    };

    Ok(ValidateOutput {
        report,
        resolved_config: resolved,
    })
}

fn repo_report(resolution: Resolution, fail_on: FailOn) -> RepoReport {
    let policy_file = resolution.policy_file.map(|p| p.to_string());
    match resolution.outcome {
        Ok(assembly) => RepoReport {
            repo: resolution.repo,
            policy_file,
            enabled: resolution.enabled,
            verdict: compute_verdict(&assembly.findings, fail_on),
            counts: assembly.counts(),
            findings: assembly.findings,
            structural_error: None,
        },
        Err(err) => RepoReport {
            repo: resolution.repo,
            policy_file,
            enabled: resolution.enabled,
            verdict: Verdict::Fail,
            counts: SeverityCounts::default(),
            findings: Vec::new(),
            structural_error: Some(err),
        },
    }
}

fn overall_verdict(repos: &[RepoReport]) -> Verdict {
    if repos.iter().any(|r| r.verdict == Verdict::Fail) {
        Verdict::Fail
    } else if repos.iter().any(|r| r.verdict == Verdict::Warn) {
        Verdict::Warn
    } else {
        Verdict::Pass
    }
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
