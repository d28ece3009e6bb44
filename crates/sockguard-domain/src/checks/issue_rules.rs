use super::ValidationContext;
use super::utils::finding;
use crate::model::rule_ref;
use crate::resolve::{parse_action, parse_kind};
use sockguard_types::{Finding, FindingKind, Severity};

/// Unknown issue keys and unusable actions, in both layers.
pub fn run(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    for (source, list, rules) in ctx.issue_layers() {
        for (i, rule) in rules.iter().enumerate() {
            let at = || rule_ref(source, list, Some(i), Some(&rule.key));

            if parse_kind(rule, source).is_err() {
                out.push(finding(
                    FindingKind::UnknownIssueKind,
                    Severity::Error,
                    format!("unknown issue kind '{}' in {source} {list}", rule.key),
                    at(),
                    "Use one of the recognized issue kinds; keys are case-sensitive.",
                ));
            }

            if let Err(err) = parse_action(rule, source) {
                out.push(finding(
                    FindingKind::InvalidAction,
                    Severity::Error,
                    err.to_string(),
                    at(),
                    "Use error, warn, or ignore (repositories may also use defer).",
                ));
            }
        }
    }
}
