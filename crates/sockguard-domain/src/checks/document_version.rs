use super::ValidationContext;
use super::utils::finding;
use crate::model::{LIST_VERSION, rule_ref};
use sockguard_types::{Finding, FindingKind, PolicySource, Severity, ids};

pub fn run(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    let version = ctx.repo.version;
    if !ids::SUPPORTED_DOCUMENT_VERSIONS.contains(&version) {
        out.push(finding(
            FindingKind::UnsupportedVersion,
            Severity::Error,
            format!("unsupported document version {version} (expected 1 or 2)"),
            rule_ref(PolicySource::Repo, LIST_VERSION, None, None),
            "Set `version: 2`.",
        ));
    }
}
