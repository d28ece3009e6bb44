use super::ValidationContext;
use super::utils::finding;
use sockguard_types::{Finding, FindingKind, Severity};

pub fn run(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    for entry in &ctx.package_rules {
        if entry.rule.name.trim().is_empty() {
            out.push(finding(
                FindingKind::MissingPackageName,
                Severity::Error,
                format!("package rule {} has no name", entry.origin),
                entry.origin.clone(),
                "Set `name` to the exact package name.",
            ));
        }

        if entry.rule.reason.trim().is_empty() {
            out.push(finding(
                FindingKind::MissingReason,
                Severity::Error,
                format!("package rule {} has no reason", entry.origin),
                entry.origin.clone(),
                "Add a `reason` explaining why the rule exists.",
            ));
        }
    }
}
