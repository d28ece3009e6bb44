use super::ValidationContext;
use super::utils::finding;
use crate::matcher::is_active;
use crate::model::format_date;
use sockguard_types::{Finding, FindingKind, Severity};

/// Expired rules are dropped from the output; report them so they get cleaned up.
pub fn run(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    for entry in &ctx.package_rules {
        let Some(expires) = entry.rule.expires else { continue };
        if !is_active(entry.rule, ctx.as_of) {
            out.push(finding(
                FindingKind::ExpiredRule,
                Severity::Warning,
                format!(
                    "package rule {} expired on {} and is no longer applied",
                    entry.origin,
                    format_date(expires)
                ),
                entry.origin.clone(),
                "Remove the rule, or extend `expires` after a fresh review.",
            ));
        }
    }
}
