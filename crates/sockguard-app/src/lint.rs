//! The `lint` use case: check an already generated `socket.yml`.
//!
//! A rendered document has the same shape as a repository policy, so it is parsed as one
//! and validated against empty org defaults.

use anyhow::Context;
use sockguard_domain::model::OrgPolicy;
use sockguard_domain::policy::{FailOn, compute_verdict};
use sockguard_types::{RepoReport, SeverityCounts};
use time::Date;

#[derive(Clone, Debug)]
pub struct LintInput<'a> {
    /// Shown in the report; usually the file path.
    pub name: &'a str,
    pub text: &'a str,
    pub as_of: Date,
    pub fail_on: FailOn,
}

#[derive(Clone, Debug)]
pub struct LintOutput {
    pub report: RepoReport,
}

pub fn run_lint(input: LintInput<'_>) -> anyhow::Result<LintOutput> {
    let doc = sockguard_settings::parse_repo_policy_yaml(input.text)
        .with_context(|| format!("parse {}", input.name))?;

    let findings = sockguard_domain::validate(&doc, &OrgPolicy::default(), input.as_of);

    Ok(LintOutput {
        report: RepoReport {
            repo: input.name.to_string(),
            policy_file: Some(input.name.to_string()),
            enabled: doc.enabled,
            verdict: compute_verdict(&findings, input.fail_on),
            counts: SeverityCounts::from_findings(&findings),
            findings,
            structural_error: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sockguard_types::{FindingKind, Verdict};
    use time::macros::date;

    fn lint(text: &str) -> LintOutput {
        run_lint(LintInput {
            name: "socket.yml",
            text,
            as_of: date!(2025 - 03 - 01),
            fail_on: FailOn::Error,
        })
        .expect("lint")
    }

    #[test]
    fn generated_documents_lint_clean() {
        let out = lint(
            r#"version: 2
enabled: true
issueRules:
  knownMalware: error
deferredPackageRules:
- name: event-stream
  version: 3.3.6
  action: error
  reason: compromised release
"#,
        );
        assert_eq!(out.report.verdict, Verdict::Pass);
        assert!(out.report.findings.is_empty());
    }

    #[test]
    fn hand_edited_documents_are_flagged() {
        let out = lint(
            r#"version: 3
issueRules:
  knownMalware: warn
  typosquat: error
deferredPackageRules:
- name: lodash
  version: ~4.17
"#,
        );
        let kinds: Vec<_> = out.report.findings.iter().map(|f| f.kind).collect();
        for expected in [
            FindingKind::UnsupportedVersion,
            FindingKind::MalwareDowngrade,
            FindingKind::UnknownIssueKind,
            FindingKind::InvalidVersionRange,
            FindingKind::MissingReason,
        ] {
            assert!(kinds.contains(&expected), "missing {expected:?} in {kinds:?}");
        }
        assert_eq!(out.report.verdict, Verdict::Fail);
    }

    #[test]
    fn yaml_errors_carry_the_file_name() {
        let err = run_lint(LintInput {
            name: "out/web/socket.yml",
            text: "issueRules: [",
            as_of: date!(2025 - 03 - 01),
            fail_on: FailOn::Error,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("out/web/socket.yml"));
    }
}
