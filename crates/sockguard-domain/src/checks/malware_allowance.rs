use super::ValidationContext;
use super::utils::finding;
use sockguard_types::{Finding, FindingKind, PackageAction, Severity};

pub fn run(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    for entry in &ctx.package_rules {
        let rule = entry.rule;
        if rule.action == PackageAction::Ignore && rule.reason.to_lowercase().contains("malware") {
            out.push(finding(
                FindingKind::MalwareAllowance,
                Severity::Warning,
                format!(
                    "package rule {} allows '{}' with a reason that mentions malware",
                    entry.origin, rule.name
                ),
                entry.origin.clone(),
                "Double-check the exception and give it an `expires` date.",
            ));
        }
    }
}
