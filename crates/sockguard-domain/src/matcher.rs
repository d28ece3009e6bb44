//! Package-level exceptions: which rule applies to a concrete package version.

use crate::error::PolicyError;
use crate::model::PackageRule;
use crate::version::VersionRange;
use sockguard_types::PackageAction;
use time::Date;

/// A rule is active through its `expires` day, inclusive.
pub fn is_active(rule: &PackageRule, as_of: Date) -> bool {
    rule.expires.is_none_or(|expires| expires >= as_of)
}

/// Find the action for `package_name@package_version`.
///
/// Rules are scanned in declaration order and the last active match wins.
/// Every range is parsed up front, so a malformed range fails the call even
/// when it belongs to another package.
pub fn match_package(
    rules: &[PackageRule],
    package_name: &str,
    package_version: &str,
    as_of: Date,
) -> Result<Option<PackageAction>, PolicyError> {
    let compiled = compile(rules)?;
    Ok(compiled
        .iter()
        .rev()
        .find(|(rule, range)| {
            rule.name == package_name && range.matches(package_version) && is_active(rule, as_of)
        })
        .map(|(rule, _)| rule.action))
}

fn compile(rules: &[PackageRule]) -> Result<Vec<(&PackageRule, VersionRange)>, PolicyError> {
    rules
        .iter()
        .map(|rule| VersionRange::parse(&rule.version_range).map(|range| (rule, range)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const AS_OF: Date = date!(2025 - 03 - 01);

    #[test]
    fn no_rule_for_package_is_none() {
        let rules = vec![PackageRule::new("left-pad", "*", PackageAction::Error).with_reason("r")];
        assert_eq!(match_package(&rules, "lodash", "4.17.21", AS_OF), Ok(None));
    }

    #[test]
    fn name_match_is_exact() {
        let rules = vec![PackageRule::new("lodash", "*", PackageAction::Error).with_reason("r")];
        assert_eq!(match_package(&rules, "lodash.merge", "1.0.0", AS_OF), Ok(None));
        assert_eq!(match_package(&rules, "Lodash", "1.0.0", AS_OF), Ok(None));
    }

    #[test]
    fn last_match_wins() {
        let rules = vec![
            PackageRule::new("request", "*", PackageAction::Error).with_reason("deprecated"),
            PackageRule::new("request", "2.x", PackageAction::Warn).with_reason("migration"),
        ];
        assert_eq!(
            match_package(&rules, "request", "2.88.2", AS_OF),
            Ok(Some(PackageAction::Warn))
        );
        assert_eq!(
            match_package(&rules, "request", "1.0.0", AS_OF),
            Ok(Some(PackageAction::Error))
        );
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let rules = vec![
            PackageRule::new("moment", "*", PackageAction::Ignore)
                .with_reason("migration")
                .with_expires(AS_OF),
        ];
        assert_eq!(
            match_package(&rules, "moment", "2.29.4", AS_OF),
            Ok(Some(PackageAction::Ignore))
        );
        let next_day = AS_OF.next_day().unwrap();
        assert_eq!(match_package(&rules, "moment", "2.29.4", next_day), Ok(None));
    }

    #[test]
    fn expired_later_rule_falls_back_to_earlier_rule() {
        let rules = vec![
            PackageRule::new("colors", "*", PackageAction::Error).with_reason("protestware"),
            PackageRule::new("colors", "*", PackageAction::Ignore)
                .with_reason("pinned")
                .with_expires(date!(2025 - 01 - 31)),
        ];
        assert_eq!(
            match_package(&rules, "colors", "1.4.0", AS_OF),
            Ok(Some(PackageAction::Error))
        );
    }

    #[test]
    fn malformed_range_fails_even_for_other_packages() {
        let rules = vec![PackageRule::new("a", "^1.0", PackageAction::Error).with_reason("r")];
        assert!(matches!(
            match_package(&rules, "b", "1.0.0", AS_OF),
            Err(PolicyError::InvalidVersionRange { .. })
        ));
    }
}
