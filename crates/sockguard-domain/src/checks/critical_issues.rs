use super::ValidationContext;
use super::utils::finding;
use crate::model::rule_ref;
use sockguard_types::{Action, Finding, FindingKind, IssueKind, Severity};

/// Issue kinds that are legal to ignore but almost never should be.
/// `knownMalware` is covered by the stricter malware check.
const CRITICAL: [IssueKind; 2] = [IssueKind::CriticalCve, IssueKind::Protestware];

pub fn run(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    for (source, list, rules) in ctx.issue_layers() {
        for (i, rule) in rules.iter().enumerate() {
            let is_critical = CRITICAL.iter().any(|k| k.as_str() == rule.key);
            if is_critical && rule.action == Action::Ignore.as_str() {
                out.push(finding(
                    FindingKind::CriticalIssueIgnored,
                    Severity::Warning,
                    format!("{source} {list} ignores critical issue kind '{}'", rule.key),
                    rule_ref(source, list, Some(i), Some(&rule.key)),
                    "Prefer 'warn', or add package rules for the specific packages affected.",
                ));
            }
        }
    }
}
