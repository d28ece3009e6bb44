//! Issue-level merge of organization defaults and repository overrides.

use crate::error::PolicyError;
use crate::model::{IssueRuleSet, RawIssueRule};
use sockguard_types::{Action, IssueKind, PolicySource};

/// Type the issue rules of one document layer.
///
/// Org-level `defer` is rejected: the org layer has nothing to defer to.
pub fn parse_issue_rules(
    raw: &[RawIssueRule],
    layer: PolicySource,
) -> Result<IssueRuleSet, PolicyError> {
    let mut out = IssueRuleSet::new();
    for rule in raw {
        let kind = parse_kind(rule, layer)?;
        let action = parse_action(rule, layer)?;
        out.insert(kind, action);
    }
    Ok(out)
}

/// Merge `repo_overrides` on top of `org_defaults`.
///
/// A repo `defer` keeps the org value (or leaves the kind absent when org has none).
/// Kinds absent from both inputs are absent from the result.
pub fn resolve(
    org_defaults: &IssueRuleSet,
    repo_overrides: &IssueRuleSet,
) -> Result<IssueRuleSet, PolicyError> {
    if let Some((kind, _)) = org_defaults.iter().find(|(_, a)| **a == Action::Defer) {
        return Err(org_defer_error(kind.as_str()));
    }

    let mut merged = org_defaults.clone();
    for (kind, action) in repo_overrides {
        if *action != Action::Defer {
            merged.insert(*kind, *action);
        }
    }
    Ok(merged)
}

/// Parse both layers and merge them.
pub fn resolve_raw(
    org_defaults: &[RawIssueRule],
    repo_overrides: &[RawIssueRule],
) -> Result<IssueRuleSet, PolicyError> {
    let org = parse_issue_rules(org_defaults, PolicySource::Org)?;
    let repo = parse_issue_rules(repo_overrides, PolicySource::Repo)?;
    resolve(&org, &repo)
}

pub(crate) fn parse_kind(rule: &RawIssueRule, layer: PolicySource) -> Result<IssueKind, PolicyError> {
    rule.key
        .parse::<IssueKind>()
        .map_err(|_| PolicyError::UnknownIssueKind {
            key: rule.key.clone(),
            layer,
        })
}

pub(crate) fn parse_action(rule: &RawIssueRule, layer: PolicySource) -> Result<Action, PolicyError> {
    let action = rule
        .action
        .parse::<Action>()
        .map_err(|_| PolicyError::InvalidAction {
            key: rule.key.clone(),
            action: rule.action.clone(),
            layer,
            reason: "expected error, warn, ignore, or defer",
        })?;
    if layer == PolicySource::Org && action == Action::Defer {
        return Err(org_defer_error(&rule.key));
    }
    Ok(action)
}

fn org_defer_error(key: &str) -> PolicyError {
    PolicyError::InvalidAction {
        key: key.to_string(),
        action: Action::Defer.as_str().to_string(),
        layer: PolicySource::Org,
        reason: "organization defaults cannot defer",
    }
}
