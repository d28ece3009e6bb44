use super::ValidationContext;
use super::utils::finding;
use crate::model::{RawIssueRule, rule_ref};
use crate::resolve::parse_action;
use sockguard_types::{Action, Finding, FindingKind, IssueKind, PolicySource, Severity};

/// `knownMalware` must resolve to `error`.
///
/// The merge is replayed here instead of calling the resolver so that the check
/// still runs when some other rule in the documents is malformed.
pub fn run(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    let [(org_source, org_list, org_rules), (repo_source, repo_list, repo_rules)] =
        ctx.issue_layers();

    let from_repo = declared_malware_action(repo_rules, repo_source)
        .filter(|(_, action)| *action != Action::Defer)
        .map(|(i, action)| (repo_source, repo_list, i, action));
    let from_org = declared_malware_action(org_rules, org_source)
        .map(|(i, action)| (org_source, org_list, i, action));

    let Some((source, list, index, action)) = from_repo.or(from_org) else {
        return;
    };

    if matches!(action, Action::Warn | Action::Ignore) {
        out.push(finding(
            FindingKind::MalwareDowngrade,
            Severity::Error,
            format!(
                "knownMalware resolves to '{action}' (set by {source} {list}); it must stay 'error'"
            ),
            rule_ref(source, list, Some(index), Some(IssueKind::KnownMalware.as_str())),
            "Remove the override; allow individual packages with package rules instead.",
        ));
    }
}

/// Last well-formed `knownMalware` entry of one layer.
fn declared_malware_action(rules: &[RawIssueRule], layer: PolicySource) -> Option<(usize, Action)> {
    rules
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, r)| r.key == IssueKind::KnownMalware.as_str())
        .find_map(|(i, r)| parse_action(r, layer).ok().map(|a| (i, a)))
}
