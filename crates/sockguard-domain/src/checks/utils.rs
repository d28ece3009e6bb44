use crate::fingerprint::fingerprint_for_rule;
use sockguard_types::{Finding, FindingKind, RuleRef, Severity};

pub fn finding(
    kind: FindingKind,
    severity: Severity,
    message: String,
    rule: RuleRef,
    help: &str,
) -> Finding {
    Finding {
        kind,
        severity,
        message,
        fingerprint: Some(fingerprint_for_rule(kind, &rule)),
        rule: Some(rule),
        help: Some(help.to_string()),
    }
}
