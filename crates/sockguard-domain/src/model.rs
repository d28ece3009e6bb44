use crate::error::PolicyError;
use sockguard_types::{
    Action, IssueKind, PackageAction, PolicySource, RuleRef, SocketPackageRule, SocketYml,
};
use std::collections::BTreeMap;
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};

/// Fully typed issue rules. Iteration follows the canonical [`IssueKind`] order.
pub type IssueRuleSet = BTreeMap<IssueKind, Action>;

/// One issue rule exactly as declared in a policy document.
///
/// Kept as strings so that unknown keys and actions can be reported as findings
/// instead of being dropped by the loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawIssueRule {
    pub key: String,
    pub action: String,
}

impl RawIssueRule {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageRule {
    /// Exact package name.
    pub name: String,
    /// Range expression, see [`crate::version::VersionRange`].
    pub version_range: String,
    pub action: PackageAction,
    pub reason: String,
    /// Last day (inclusive) the rule is active.
    pub expires: Option<Date>,
}

impl PackageRule {
    pub fn new(name: impl Into<String>, version_range: impl Into<String>, action: PackageAction) -> Self {
        Self {
            name: name.into(),
            version_range: version_range.into(),
            action,
            reason: String::new(),
            expires: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_expires(mut self, expires: Date) -> Self {
        self.expires = Some(expires);
        self
    }
}

/// Organization-wide defaults (`org-defaults.yml`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrgPolicy {
    pub name: String,
    pub description: String,
    pub default_issue_rules: Vec<RawIssueRule>,
    pub banned_packages: Vec<PackageRule>,
    pub allowed_packages: Vec<PackageRule>,
    pub default_ignore_paths: Vec<String>,
}

impl Default for OrgPolicy {
    fn default() -> Self {
        Self {
            name: "Organization Default".to_string(),
            description: String::new(),
            default_issue_rules: Vec::new(),
            banned_packages: Vec::new(),
            allowed_packages: Vec::new(),
            default_ignore_paths: Vec::new(),
        }
    }
}

/// Repository overrides (`repositories/<repo>.yml`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoPolicy {
    pub version: u32,
    pub enabled: bool,
    pub project_name: String,
    pub issue_rules: Vec<RawIssueRule>,
    pub deferred_package_rules: Vec<PackageRule>,
    pub ignore_paths: Vec<String>,
}

impl Default for RepoPolicy {
    fn default() -> Self {
        Self {
            version: 2,
            enabled: true,
            project_name: String::new(),
            issue_rules: Vec::new(),
            deferred_package_rules: Vec::new(),
            ignore_paths: Vec::new(),
        }
    }
}

/// The fully merged policy for one repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPolicy {
    pub version: u32,
    pub project_name: String,
    pub final_issue_rules: IssueRuleSet,
    pub final_package_rules: Vec<PackageRule>,
    pub ignore_paths: Vec<String>,
    pub enabled: bool,
}

impl ResolvedPolicy {
    /// The distributable form of this policy.
    pub fn to_document(&self) -> SocketYml {
        SocketYml {
            version: self.version,
            enabled: self.enabled,
            project_name: self.project_name.clone(),
            issue_rules: self.final_issue_rules.clone(),
            deferred_package_rules: self
                .final_package_rules
                .iter()
                .map(|rule| SocketPackageRule {
                    name: rule.name.clone(),
                    version: rule.version_range.trim().to_string(),
                    action: rule.action,
                    reason: rule.reason.clone(),
                    expires: rule.expires.map(format_date),
                })
                .collect(),
            ignore: self.ignore_paths.clone(),
        }
    }
}

/// A package rule in the combined org + repo sequence, tagged with where it was declared.
#[derive(Clone, Debug)]
pub struct SourcedRule<'a> {
    pub rule: &'a PackageRule,
    pub origin: RuleRef,
}

pub const LIST_DEFAULT_ISSUE_RULES: &str = "defaultIssueRules";
pub const LIST_ISSUE_RULES: &str = "issueRules";
pub const LIST_BANNED_PACKAGES: &str = "bannedPackages";
pub const LIST_ALLOWED_PACKAGES: &str = "allowedPackages";
pub const LIST_DEFERRED_PACKAGE_RULES: &str = "deferredPackageRules";
pub const LIST_DEFAULT_IGNORE_PATHS: &str = "defaultIgnorePaths";
pub const LIST_IGNORE: &str = "ignore";
pub const LIST_VERSION: &str = "version";

/// Org banned packages, then org allowed packages, then repo rules.
///
/// Later entries take precedence when matching, so repo rules override org rules.
pub fn combined_rules<'a>(org: &'a OrgPolicy, repo: &'a RepoPolicy) -> Vec<SourcedRule<'a>> {
    let lists: [(PolicySource, &'static str, &'a [PackageRule]); 3] = [
        (PolicySource::Org, LIST_BANNED_PACKAGES, &org.banned_packages),
        (PolicySource::Org, LIST_ALLOWED_PACKAGES, &org.allowed_packages),
        (PolicySource::Repo, LIST_DEFERRED_PACKAGE_RULES, &repo.deferred_package_rules),
    ];

    lists
        .into_iter()
        .flat_map(|(source, list, rules)| {
            rules.iter().enumerate().map(move |(i, rule)| SourcedRule {
                rule,
                origin: rule_ref(source, list, Some(i), Some(&rule.name)),
            })
        })
        .collect()
}

pub fn rule_ref(source: PolicySource, list: &str, index: Option<usize>, name: Option<&str>) -> RuleRef {
    RuleRef {
        source,
        list: list.to_string(),
        index: index.map(|i| i as u32),
        name: name.filter(|n| !n.is_empty()).map(str::to_string),
    }
}

/// Parse an `expires` value: `YYYY-MM-DD`, or an RFC 3339 timestamp whose UTC date is used.
pub fn parse_expiry(value: &str) -> Result<Date, PolicyError> {
    let v = value.trim();
    if let Ok(d) = Date::parse(v, format_description!("[year]-[month]-[day]")) {
        return Ok(d);
    }
    let normalized = v.replace('z', "Z");
    OffsetDateTime::parse(&normalized, &Rfc3339)
        .map(|ts| ts.to_offset(time::UtcOffset::UTC).date())
        .map_err(|_| PolicyError::InvalidDate {
            value: value.to_string(),
        })
}

/// Render a date the way policy documents spell it.
pub fn format_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}
