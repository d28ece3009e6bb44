use sha2::{Digest, Sha256};
use sockguard_types::{FindingKind, RuleRef};

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields:
/// - finding code
/// - document source and list
/// - entry index (if present)
/// - package name or issue key (if present)
pub fn fingerprint_for_rule(kind: FindingKind, rule: &RuleRef) -> String {
    let index = rule.index.map(|i| i.to_string()).unwrap_or_default();
    let parts = [
        kind.code(),
        rule.source.as_str(),
        rule.list.as_str(),
        index.as_str(),
        rule.name.as_deref().unwrap_or(""),
    ];
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
