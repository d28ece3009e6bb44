use crate::checks::{self, ValidationContext};
use crate::error::PolicyError;
use crate::matcher::is_active;
use crate::model::{OrgPolicy, PackageRule, RepoPolicy, ResolvedPolicy, combined_rules};
use crate::report::Assembly;
use crate::resolve::resolve_raw;
use crate::version::VersionRange;
use sockguard_types::{Finding, Severity};
use std::collections::BTreeSet;
use time::Date;

/// Run every check against the documents as declared. Never fails.
pub fn validate(repo: &RepoPolicy, org: &OrgPolicy, as_of: Date) -> Vec<Finding> {
    let ctx = ValidationContext::new(org, repo, as_of);
    let mut findings: Vec<Finding> = Vec::new();

    checks::run_all(&ctx, &mut findings);

    findings.sort_by(compare_findings);
    findings
}

/// Resolve one repository's policy and validate it.
///
/// Unknown issue kinds, unusable actions and unparseable version ranges are
/// structural: nothing sensible can be emitted, so they abort with [`PolicyError`].
/// Everything else is reported through [`Assembly::findings`].
pub fn assemble(org: &OrgPolicy, repo: &RepoPolicy, as_of: Date) -> Result<Assembly, PolicyError> {
    let final_issue_rules = resolve_raw(&org.default_issue_rules, &repo.issue_rules)?;

    let combined = combined_rules(org, repo);
    let compiled = combined
        .iter()
        .map(|entry| VersionRange::parse(&entry.rule.version_range).map(|r| (entry.rule, r)))
        .collect::<Result<Vec<_>, _>>()?;

    // Validation sees the pre-filter state so expired rules are still reported.
    let findings = validate(repo, org, as_of);

    let active: Vec<(&PackageRule, VersionRange)> = compiled
        .into_iter()
        .filter(|(rule, _)| is_active(rule, as_of))
        .collect();

    let policy = ResolvedPolicy {
        version: repo.version,
        project_name: repo.project_name.clone(),
        final_issue_rules,
        final_package_rules: collapse_duplicates(&active),
        ignore_paths: merge_ignore_paths(org, repo),
        enabled: repo.enabled,
    };

    Ok(Assembly { policy, findings })
}

/// Keep only the last rule for each package name and range, in surviving order.
///
/// Matching is last-match-wins, so the dropped entries could never apply.
fn collapse_duplicates(active: &[(&PackageRule, VersionRange)]) -> Vec<PackageRule> {
    active
        .iter()
        .enumerate()
        .filter(|(i, (rule, range))| {
            !active[i + 1..]
                .iter()
                .any(|(later, later_range)| later.name == rule.name && later_range == range)
        })
        .map(|(_, (rule, _))| (*rule).clone())
        .collect()
}

fn merge_ignore_paths(org: &OrgPolicy, repo: &RepoPolicy) -> Vec<String> {
    org.default_ignore_paths
        .iter()
        .chain(&repo.ignore_paths)
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning)
    // 2) rule reference: source, list, index, name (missing last)
    // 3) kind
    // 4) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
    };
    let rule_key = |f: &Finding| (f.rule.is_none(), f.rule.clone());

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then_with(|| rule_key(a).cmp(&rule_key(b)))
        .then(a.kind.cmp(&b.kind))
        .then_with(|| a.message.cmp(&b.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_package;
    use crate::model::RawIssueRule;
    use crate::policy::FailOn;
    use crate::test_support::{AS_OF, ban, exception, org_with_malware_floor};
    use sockguard_types::{Action, FindingKind, IssueKind, PackageAction, Verdict};
    use time::macros::date;

    #[test]
    fn event_stream_repo_exception_overrides_org_ban() {
        let mut org = org_with_malware_floor();
        org.banned_packages = vec![ban("event-stream", "3.3.6", "compromised release")];
        let mut repo = RepoPolicy::default();

        let before = assemble(&org, &repo, AS_OF).unwrap();
        assert_eq!(
            match_package(&before.policy.final_package_rules, "event-stream", "3.3.6", AS_OF),
            Ok(Some(PackageAction::Error))
        );

        repo.deferred_package_rules = vec![
            exception("event-stream", "*", "vendored and audited").with_expires(date!(2099 - 12 - 31)),
        ];
        let after = assemble(&org, &repo, AS_OF).unwrap();
        assert_eq!(
            match_package(&after.policy.final_package_rules, "event-stream", "3.3.6", AS_OF),
            Ok(Some(PackageAction::Ignore))
        );
        assert!(after.findings.is_empty(), "{:?}", after.findings);
    }

    #[test]
    fn disabled_repo_still_resolves_for_preview() {
        let org = org_with_malware_floor();
        let repo = RepoPolicy {
            enabled: false,
            issue_rules: vec![RawIssueRule::new("deprecated", "warn")],
            ..RepoPolicy::default()
        };

        let assembly = assemble(&org, &repo, AS_OF).unwrap();
        assert!(!assembly.policy.enabled);
        assert_eq!(
            assembly.policy.final_issue_rules.get(&IssueKind::Deprecated),
            Some(&Action::Warn)
        );
        assert_eq!(
            assembly.policy.final_issue_rules.get(&IssueKind::KnownMalware),
            Some(&Action::Error)
        );
    }

    #[test]
    fn expired_rules_are_reported_but_not_emitted() {
        let org = org_with_malware_floor();
        let repo = RepoPolicy {
            deferred_package_rules: vec![
                exception("moment", "*", "migration").with_expires(date!(2025 - 02 - 28)),
                exception("lodash", "4.x", "pinned").with_expires(AS_OF),
            ],
            ..RepoPolicy::default()
        };

        let assembly = assemble(&org, &repo, AS_OF).unwrap();
        let names: Vec<_> = assembly
            .policy
            .final_package_rules
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["lodash"]);

        let kinds: Vec<_> = assembly.findings.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, [FindingKind::ExpiredRule]);
        assert_eq!(assembly.verdict(FailOn::Error), Verdict::Warn);
        assert_eq!(assembly.verdict(FailOn::Warning), Verdict::Fail);
    }

    #[test]
    fn duplicate_rules_collapse_to_last_declaration() {
        let mut org = org_with_malware_floor();
        org.banned_packages = vec![ban("colors", "1.4", "protestware")];
        let repo = RepoPolicy {
            deferred_package_rules: vec![
                exception("colors", "1.4.0", "pinned fork"),
                exception("left-pad", "*", "tiny"),
            ],
            ..RepoPolicy::default()
        };

        let assembly = assemble(&org, &repo, AS_OF).unwrap();
        let rules: Vec<_> = assembly
            .policy
            .final_package_rules
            .iter()
            .map(|r| (r.name.as_str(), r.action))
            .collect();
        assert_eq!(
            rules,
            [("colors", PackageAction::Ignore), ("left-pad", PackageAction::Ignore)]
        );
        assert!(assembly.findings.iter().any(|f| f.kind == FindingKind::RuleConflict));
    }

    #[test]
    fn unknown_issue_kind_is_structural() {
        let org = org_with_malware_floor();
        let repo = RepoPolicy {
            issue_rules: vec![RawIssueRule::new("typosquat", "warn")],
            ..RepoPolicy::default()
        };
        assert!(matches!(
            assemble(&org, &repo, AS_OF),
            Err(PolicyError::UnknownIssueKind { .. })
        ));
        // validate stays lenient and reports the same problem.
        let findings = validate(&repo, &org, AS_OF);
        assert_eq!(findings[0].kind, FindingKind::UnknownIssueKind);
    }

    #[test]
    fn malformed_range_is_structural() {
        let mut org = org_with_malware_floor();
        org.banned_packages = vec![ban("ua-parser-js", "^0.7.29", "hijacked")];
        assert!(matches!(
            assemble(&org, &RepoPolicy::default(), AS_OF),
            Err(PolicyError::InvalidVersionRange { .. })
        ));
    }

    #[test]
    fn ignore_paths_are_merged_sorted_and_deduplicated() {
        let org = OrgPolicy {
            default_ignore_paths: vec!["test/**".to_string(), "docs/**".to_string()],
            ..org_with_malware_floor()
        };
        let repo = RepoPolicy {
            ignore_paths: vec!["docs/**".to_string(), "fixtures/**".to_string()],
            ..RepoPolicy::default()
        };
        let assembly = assemble(&org, &repo, AS_OF).unwrap();
        assert_eq!(
            assembly.policy.ignore_paths,
            ["docs/**", "fixtures/**", "test/**"]
        );
    }

    #[test]
    fn findings_sort_errors_first_then_by_location() {
        let org = org_with_malware_floor();
        let repo = RepoPolicy {
            deferred_package_rules: vec![
                exception("a", "*", "old").with_expires(date!(2024 - 01 - 01)),
                exception("b", "*", ""),
            ],
            issue_rules: vec![RawIssueRule::new("knownMalware", "ignore")],
            ..RepoPolicy::default()
        };

        let findings = validate(&repo, &org, AS_OF);
        let summary: Vec<_> = findings
            .iter()
            .map(|f| (f.kind, f.rule.as_ref().map(|r| r.list.as_str())))
            .collect();
        assert_eq!(
            summary,
            [
                (FindingKind::MissingReason, Some("deferredPackageRules")),
                (FindingKind::MalwareDowngrade, Some("issueRules")),
                (FindingKind::ExpiredRule, Some("deferredPackageRules")),
            ]
        );
    }
}
