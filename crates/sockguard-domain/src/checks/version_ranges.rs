use super::ValidationContext;
use super::utils::finding;
use crate::version::VersionRange;
use sockguard_types::{Finding, FindingKind, Severity};

pub fn run(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    for entry in &ctx.package_rules {
        if let Err(err) = VersionRange::parse(&entry.rule.version_range) {
            out.push(finding(
                FindingKind::InvalidVersionRange,
                Severity::Error,
                format!("package rule {}: {err}", entry.origin),
                entry.origin.clone(),
                "Use `*`, an exact version, a comparator (>=, <=, >, <, =), or an x-range like 1.2.x.",
            ));
        }
    }
}
