//! Explain registry for finding codes.
//!
//! Maps finding codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a finding code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the code.
    pub title: &'static str,
    /// What the finding means and when it fires.
    pub description: &'static str,
    /// How to fix the policy.
    pub remediation: &'static str,
    /// Before/after policy snippets.
    pub examples: ExamplePair,
}

/// Before and after YAML examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Policy that would trigger the finding.
    pub before: &'static str,
    /// Policy that passes validation.
    pub after: &'static str,
}

/// Look up an explanation by finding code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CODE_UNKNOWN_ISSUE_KIND => Some(explain_unknown_issue_kind()),
        ids::CODE_INVALID_ACTION => Some(explain_invalid_action()),
        ids::CODE_MALWARE_DOWNGRADE => Some(explain_malware_downgrade()),
        ids::CODE_CRITICAL_ISSUE_IGNORED => Some(explain_critical_issue_ignored()),
        ids::CODE_MISSING_PACKAGE_NAME => Some(explain_missing_package_name()),
        ids::CODE_MISSING_REASON => Some(explain_missing_reason()),
        ids::CODE_INVALID_VERSION_RANGE => Some(explain_invalid_version_range()),
        ids::CODE_EXPIRED_RULE => Some(explain_expired_rule()),
        ids::CODE_RULE_CONFLICT => Some(explain_rule_conflict()),
        ids::CODE_MALWARE_ALLOWANCE => Some(explain_malware_allowance()),
        ids::CODE_UNSUPPORTED_VERSION => Some(explain_unsupported_version()),
        ids::CODE_INVALID_IGNORE_PATTERN => Some(explain_invalid_ignore_pattern()),
        _ => None,
    }
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_UNKNOWN_ISSUE_KIND,
        ids::CODE_INVALID_ACTION,
        ids::CODE_MALWARE_DOWNGRADE,
        ids::CODE_CRITICAL_ISSUE_IGNORED,
        ids::CODE_MISSING_PACKAGE_NAME,
        ids::CODE_MISSING_REASON,
        ids::CODE_INVALID_VERSION_RANGE,
        ids::CODE_EXPIRED_RULE,
        ids::CODE_RULE_CONFLICT,
        ids::CODE_MALWARE_ALLOWANCE,
        ids::CODE_UNSUPPORTED_VERSION,
        ids::CODE_INVALID_IGNORE_PATTERN,
    ]
}

fn explain_unknown_issue_kind() -> Explanation {
    Explanation {
        title: "Unknown Issue Kind",
        description: "\
An issue rule uses a key that is not part of the recognized issue vocabulary.
Keys are case-sensitive (`criticalCVE`, not `criticalCve`). A policy with an
unknown key cannot be resolved.",
        remediation: "\
Fix the spelling or remove the entry. Run `sockguard explain` on other codes to
see the full vocabulary in the generated documents.",
        examples: ExamplePair {
            before: "issueRules:\n  criticalCve: error",
            after: "issueRules:\n  criticalCVE: error",
        },
    }
}

fn explain_invalid_action() -> Explanation {
    Explanation {
        title: "Invalid Action",
        description: "\
An issue rule action is not one of `error`, `warn`, `ignore`, `defer`, or the
organization defaults use `defer`. Organization defaults are the bottom layer,
so there is nothing to defer to.",
        remediation: "\
Use one of the recognized actions. In `org-defaults.yml`, pick a concrete action.",
        examples: ExamplePair {
            before: "defaultIssueRules:\n  deprecated: defer",
            after: "defaultIssueRules:\n  deprecated: warn",
        },
    }
}

fn explain_malware_downgrade() -> Explanation {
    Explanation {
        title: "Malware Downgrade",
        description: "\
The resolved action for `knownMalware` is `warn` or `ignore`. Known malware must
always block. The generated document is not silently corrected; this finding
blocks unattended generation instead.",
        remediation: "\
Remove the override or set `knownMalware: error`. Allow a specific package with
a package rule instead of weakening the issue rule for every package.",
        examples: ExamplePair {
            before: "issueRules:\n  knownMalware: warn",
            after: "issueRules:\n  knownMalware: error",
        },
    }
}

fn explain_critical_issue_ignored() -> Explanation {
    Explanation {
        title: "Critical Issue Ignored",
        description: "\
`criticalCVE` or `protestware` is set to `ignore`. This is allowed but rarely
intended.",
        remediation: "\
Prefer `warn`, or add targeted package rules for the affected packages.",
        examples: ExamplePair {
            before: "issueRules:\n  criticalCVE: ignore",
            after: "issueRules:\n  criticalCVE: warn",
        },
    }
}

fn explain_missing_package_name() -> Explanation {
    Explanation {
        title: "Missing Package Name",
        description: "A package rule has an empty `name`. It can never match a package.",
        remediation: "Set `name` to the exact package name the rule targets.",
        examples: ExamplePair {
            before: "deferredPackageRules:\n  - name: \"\"\n    reason: legacy",
            after: "deferredPackageRules:\n  - name: left-pad\n    reason: legacy",
        },
    }
}

fn explain_missing_reason() -> Explanation {
    Explanation {
        title: "Missing Reason",
        description: "\
Every package rule must explain why it exists. Rules without a reason cannot be
reviewed or cleaned up later.",
        remediation: "Add a `reason` describing the exception or ban.",
        examples: ExamplePair {
            before: "deferredPackageRules:\n  - name: express\n    action: ignore",
            after: "deferredPackageRules:\n  - name: express\n    action: ignore\n    reason: Core framework, reviewed 2025-01",
        },
    }
}

fn explain_invalid_version_range() -> Explanation {
    Explanation {
        title: "Invalid Version Range",
        description: "\
A package rule `version` is not a recognized range. Supported forms: exact
(`1.2.3`), wildcard (`*`), comparator (`>=1.0.0`, `<2`, `=1.4.0`) and x-prefix
(`1.2.x`).",
        remediation: "Rewrite the range using one of the supported forms.",
        examples: ExamplePair {
            before: "- name: lodash\n  version: \"^4.17\"",
            after: "- name: lodash\n  version: \">=4.17.0\"",
        },
    }
}

fn explain_expired_rule() -> Explanation {
    Explanation {
        title: "Expired Rule",
        description: "\
A package rule has an `expires` date in the past. It is excluded from the
generated document and should be removed from the policy.",
        remediation: "Delete the rule, or extend `expires` after a fresh review.",
        examples: ExamplePair {
            before: "- name: moment\n  reason: migration\n  expires: 2024-01-01",
            after: "# rule removed",
        },
    }
}

fn explain_rule_conflict() -> Explanation {
    Explanation {
        title: "Rule Conflict",
        description: "\
Two active package rules target the same package and version range with
different actions. The later declaration wins (repository rules come after
organization rules).",
        remediation: "Keep a single rule per package and range.",
        examples: ExamplePair {
            before: "- name: request\n  action: error\n- name: request\n  action: ignore",
            after: "- name: request\n  action: ignore",
        },
    }
}

fn explain_malware_allowance() -> Explanation {
    Explanation {
        title: "Malware Allowance",
        description: "\
An `ignore` package rule mentions malware in its reason. Allowing a package that
was flagged as malware needs explicit review.",
        remediation: "Double-check the exception and give it an `expires` date.",
        examples: ExamplePair {
            before: "- name: pkg\n  action: ignore\n  reason: false positive malware",
            after: "- name: pkg\n  action: ignore\n  reason: false positive malware, vendor ticket 123\n  expires: 2025-06-30",
        },
    }
}

fn explain_unsupported_version() -> Explanation {
    Explanation {
        title: "Unsupported Document Version",
        description: "The document `version` is not one the scanner understands (1 or 2).",
        remediation: "Set `version: 2`.",
        examples: ExamplePair {
            before: "version: 3",
            after: "version: 2",
        },
    }
}

fn explain_invalid_ignore_pattern() -> Explanation {
    Explanation {
        title: "Invalid Ignore Pattern",
        description: "An entry of `ignore` / `defaultIgnorePaths` is not a valid glob.",
        remediation: "Fix the glob syntax (unbalanced braces or brackets are the usual cause).",
        examples: ExamplePair {
            before: "ignore:\n  - \"fixtures/{a,b\"",
            after: "ignore:\n  - \"fixtures/{a,b}/**\"",
        },
    }
}
