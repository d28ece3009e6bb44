use super::ValidationContext;
use super::utils::finding;
use crate::matcher::is_active;
use crate::version::VersionRange;
use sockguard_types::{Finding, FindingKind, Severity};

/// Active rules for the same package and range that disagree on the action.
///
/// Ranges compare by meaning, so `1.2` and `1.2.0` are the same range.
pub fn run(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    let active: Vec<_> = ctx
        .package_rules
        .iter()
        .filter(|e| is_active(e.rule, ctx.as_of))
        .filter_map(|e| {
            VersionRange::parse(&e.rule.version_range)
                .ok()
                .map(|range| (e, range))
        })
        .collect();

    for (j, (later, later_range)) in active.iter().enumerate() {
        let previous = active[..j]
            .iter()
            .rev()
            .find(|(e, range)| e.rule.name == later.rule.name && range == later_range);

        let Some((earlier, _)) = previous else { continue };
        if earlier.rule.action != later.rule.action {
            out.push(finding(
                FindingKind::RuleConflict,
                Severity::Warning,
                format!(
                    "{} ({}) conflicts with {} ({}) for '{}' {}; the later rule wins",
                    later.origin,
                    later.rule.action,
                    earlier.origin,
                    earlier.rule.action,
                    later.rule.name,
                    later_range
                ),
                later.origin.clone(),
                "Keep a single rule per package and version range.",
            ));
        }
    }
}
