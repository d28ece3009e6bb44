use crate::model::{OrgPolicy, PackageRule, RawIssueRule, RepoPolicy};
use sockguard_types::PackageAction;
use time::Date;
use time::macros::date;

pub const AS_OF: Date = date!(2025 - 03 - 01);

/// An org baseline with `knownMalware: error` and nothing else.
pub fn org_with_malware_floor() -> OrgPolicy {
    OrgPolicy {
        default_issue_rules: vec![RawIssueRule::new("knownMalware", "error")],
        ..OrgPolicy::default()
    }
}

pub fn ban(name: &str, range: &str, reason: &str) -> PackageRule {
    PackageRule::new(name, range, PackageAction::Error).with_reason(reason)
}

pub fn exception(name: &str, range: &str, reason: &str) -> PackageRule {
    PackageRule::new(name, range, PackageAction::Ignore).with_reason(reason)
}

pub fn repo_with_issue_rules(rules: &[(&str, &str)]) -> RepoPolicy {
    RepoPolicy {
        issue_rules: rules
            .iter()
            .map(|(key, action)| RawIssueRule::new(*key, *action))
            .collect(),
        ..RepoPolicy::default()
    }
}

pub fn repo_with_package_rules(rules: Vec<PackageRule>) -> RepoPolicy {
    RepoPolicy {
        deferred_package_rules: rules,
        ..RepoPolicy::default()
    }
}
