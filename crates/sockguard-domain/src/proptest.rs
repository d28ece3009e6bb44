//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Repo-over-org precedence and `defer` transparency
//! - The `knownMalware` floor
//! - Inclusive expiry and wildcard matching
//! - Deterministic resolution output

use crate::engine::{assemble, validate};
use crate::matcher::match_package;
use crate::model::{OrgPolicy, PackageRule, RawIssueRule, RepoPolicy};
use crate::resolve::resolve;
use crate::version::VersionRange;
use proptest::prelude::*;
use sockguard_types::{Action, FindingKind, IssueKind, PackageAction, Severity};
use time::Date;
use time::macros::date;

// ============================================================================
// Strategies
// ============================================================================

fn arb_kind() -> impl Strategy<Value = IssueKind> {
    prop::sample::select(IssueKind::ALL.to_vec())
}

fn arb_org_action() -> impl Strategy<Value = Action> {
    prop::sample::select(vec![Action::Error, Action::Warn, Action::Ignore])
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn arb_package_action() -> impl Strategy<Value = PackageAction> {
    prop::sample::select(PackageAction::ALL.to_vec())
}

fn arb_package_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["lodash", "event-stream", "colors", "left-pad"])
        .prop_map(str::to_string)
}

fn arb_range() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*".to_string()),
        (0u64..5, 0u64..5, 0u64..5).prop_map(|(a, b, c)| format!("{a}.{b}.{c}")),
        (0u64..5, 0u64..5).prop_map(|(a, b)| format!("{a}.{b}.x")),
        (0u64..5).prop_map(|a| format!(">={a}.0.0")),
        (0u64..5).prop_map(|a| format!("<{a}")),
    ]
}

fn arb_date() -> impl Strategy<Value = Date> {
    (0i64..730).prop_map(|days| date!(2024 - 01 - 01) + time::Duration::days(days))
}

fn arb_package_rule() -> impl Strategy<Value = PackageRule> {
    (
        arb_package_name(),
        arb_range(),
        arb_package_action(),
        "[a-z ]{0,12}",
        prop::option::of(arb_date()),
    )
        .prop_map(|(name, range, action, reason, expires)| {
            let rule = PackageRule::new(name, range, action).with_reason(reason);
            match expires {
                Some(d) => rule.with_expires(d),
                None => rule,
            }
        })
}

fn arb_issue_rules(action: BoxedStrategy<Action>) -> impl Strategy<Value = Vec<RawIssueRule>> {
    prop::collection::vec((arb_kind(), action), 0..8).prop_map(|rules| {
        rules
            .into_iter()
            .map(|(k, a)| RawIssueRule::new(k.as_str(), a.as_str()))
            .collect()
    })
}

fn arb_org() -> impl Strategy<Value = OrgPolicy> {
    (
        arb_issue_rules(arb_org_action().boxed()),
        prop::collection::vec(arb_package_rule(), 0..5),
        prop::collection::vec(arb_package_rule(), 0..3),
    )
        .prop_map(|(default_issue_rules, banned_packages, allowed_packages)| OrgPolicy {
            default_issue_rules,
            banned_packages,
            allowed_packages,
            ..OrgPolicy::default()
        })
}

fn arb_repo() -> impl Strategy<Value = RepoPolicy> {
    (
        arb_issue_rules(arb_action().boxed()),
        prop::collection::vec(arb_package_rule(), 0..6),
        any::<bool>(),
    )
        .prop_map(|(issue_rules, deferred_package_rules, enabled)| RepoPolicy {
            issue_rules,
            deferred_package_rules,
            enabled,
            ..RepoPolicy::default()
        })
}

// ============================================================================
// Issue rule merge
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn repo_action_wins_unless_deferred(
        kind in arb_kind(),
        org_action in arb_org_action(),
        repo_action in arb_action(),
    ) {
        let org = [(kind, org_action)].into_iter().collect();
        let repo = [(kind, repo_action)].into_iter().collect();
        let merged = resolve(&org, &repo).unwrap();

        let expected = if repo_action == Action::Defer { org_action } else { repo_action };
        prop_assert_eq!(merged.get(&kind), Some(&expected));
    }

    #[test]
    fn defer_everything_reproduces_org_defaults(org in arb_org()) {
        let repo = RepoPolicy {
            issue_rules: IssueKind::ALL
                .iter()
                .map(|k| RawIssueRule::new(k.as_str(), "defer"))
                .collect(),
            ..RepoPolicy::default()
        };
        let with_defer = assemble(&org, &repo, date!(2025 - 01 - 01)).unwrap();
        let without = assemble(&org, &RepoPolicy::default(), date!(2025 - 01 - 01)).unwrap();
        prop_assert_eq!(with_defer.policy.final_issue_rules, without.policy.final_issue_rules);
    }

    #[test]
    fn malware_other_than_error_is_always_flagged(org in arb_org(), repo in arb_repo()) {
        let as_of = date!(2025 - 01 - 01);
        let assembly = assemble(&org, &repo, as_of).unwrap();
        let resolved = assembly.policy.final_issue_rules.get(&IssueKind::KnownMalware);
        let flagged = assembly.findings.iter().any(|f| {
            f.kind == FindingKind::MalwareDowngrade && f.severity == Severity::Error
        });
        let downgraded = matches!(resolved, Some(Action::Warn | Action::Ignore));
        prop_assert_eq!(downgraded, flagged);
    }
}

// ============================================================================
// Package rules
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn expiry_day_is_inclusive(expires in arb_date(), action in arb_package_action()) {
        let rules = vec![
            PackageRule::new("pkg", "*", action).with_reason("r").with_expires(expires),
        ];
        prop_assert_eq!(match_package(&rules, "pkg", "1.0.0", expires), Ok(Some(action)));
        if let Some(next) = expires.next_day() {
            prop_assert_eq!(match_package(&rules, "pkg", "1.0.0", next), Ok(None));
        }
    }

    #[test]
    fn wildcard_matches_any_string(version in ".{0,24}") {
        prop_assert!(VersionRange::Any.matches(&version));
    }

    #[test]
    fn later_active_rule_wins(
        first in arb_package_action(),
        second in arb_package_action(),
        version in (0u64..10, 0u64..10, 0u64..10).prop_map(|(a, b, c)| format!("{a}.{b}.{c}")),
    ) {
        let rules = vec![
            PackageRule::new("event-stream", version.as_str(), first).with_reason("org"),
            PackageRule::new("event-stream", "*", second).with_reason("repo"),
        ];
        let as_of = date!(2025 - 01 - 01);
        prop_assert_eq!(match_package(&rules, "event-stream", &version, as_of), Ok(Some(second)));
    }
}

// ============================================================================
// Determinism
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn resolution_is_deterministic(org in arb_org(), repo in arb_repo(), as_of in arb_date()) {
        let a = assemble(&org, &repo, as_of).unwrap();
        let b = assemble(&org, &repo, as_of).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.policy.to_document(), b.policy.to_document());
        prop_assert_eq!(validate(&repo, &org, as_of), a.findings);
    }

    #[test]
    fn collapsed_rules_match_like_the_full_sequence(
        org in arb_org(),
        repo in arb_repo(),
        name in arb_package_name(),
        version in (0u64..5, 0u64..5, 0u64..5).prop_map(|(a, b, c)| format!("{a}.{b}.{c}")),
    ) {
        let as_of = date!(2025 - 01 - 01);
        let assembly = assemble(&org, &repo, as_of).unwrap();

        let mut full = org.banned_packages.clone();
        full.extend(org.allowed_packages.clone());
        full.extend(repo.deferred_package_rules.clone());

        prop_assert_eq!(
            match_package(&assembly.policy.final_package_rules, &name, &version, as_of),
            match_package(&full, &name, &version, as_of)
        );
    }
}
