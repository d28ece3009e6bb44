//! Policy YAML documents.
//!
//! The wire model is permissive: issue rules stay as raw strings so unknown keys and
//! actions reach the validator as findings. Only shape errors (wrong YAML types, an
//! unusable package action, an unreadable expiry date) fail the parse.

use anyhow::Context;
use serde::Deserialize;
use serde_yaml_ng::{Mapping, Value};
use sockguard_domain::model::{OrgPolicy, PackageRule, RawIssueRule, RepoPolicy, parse_expiry};
use sockguard_types::PackageAction;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrgDocument {
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default_issue_rules: Mapping,
    #[serde(default)]
    banned_packages: Vec<PackageEntry>,
    #[serde(default)]
    allowed_packages: Vec<PackageEntry>,
    #[serde(default)]
    default_ignore_paths: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoDocument {
    version: Option<u32>,
    enabled: Option<bool>,
    #[serde(default)]
    project_name: String,
    #[serde(default)]
    issue_rules: Mapping,
    #[serde(default)]
    deferred_package_rules: Vec<PackageEntry>,
    /// Older documents used this key; entries are appended after `deferredPackageRules`.
    #[serde(default)]
    package_rules: Vec<PackageEntry>,
    #[serde(default)]
    ignore: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PackageEntry {
    #[serde(default)]
    name: String,
    /// Plain scalars keep their source text, so `1.10` stays `1.10`.
    version: Option<String>,
    action: Option<String>,
    #[serde(default)]
    reason: String,
    expires: Option<String>,
}

/// Parse `org-defaults.yml`.
pub fn parse_org_policy_yaml(input: &str) -> anyhow::Result<OrgPolicy> {
    let doc: OrgDocument = parse_document(input)?;
    let defaults = OrgPolicy::default();

    Ok(OrgPolicy {
        name: doc.name.unwrap_or(defaults.name),
        description: doc.description,
        default_issue_rules: issue_rules(&doc.default_issue_rules)
            .context("defaultIssueRules")?,
        banned_packages: package_rules(doc.banned_packages, PackageAction::Error)
            .context("bannedPackages")?,
        allowed_packages: package_rules(doc.allowed_packages, PackageAction::Ignore)
            .context("allowedPackages")?,
        default_ignore_paths: doc.default_ignore_paths,
    })
}

/// Parse `repositories/<repo>.yml`. A generated `socket.yml` parses the same way.
pub fn parse_repo_policy_yaml(input: &str) -> anyhow::Result<RepoPolicy> {
    let doc: RepoDocument = parse_document(input)?;
    let defaults = RepoPolicy::default();

    let mut rules = package_rules(doc.deferred_package_rules, PackageAction::Ignore)
        .context("deferredPackageRules")?;
    rules.extend(package_rules(doc.package_rules, PackageAction::Ignore).context("packageRules")?);

    Ok(RepoPolicy {
        version: doc.version.unwrap_or(defaults.version),
        enabled: doc.enabled.unwrap_or(defaults.enabled),
        project_name: doc.project_name,
        issue_rules: issue_rules(&doc.issue_rules).context("issueRules")?,
        deferred_package_rules: rules,
        ignore_paths: doc.ignore,
    })
}

fn parse_document<T>(input: &str) -> anyhow::Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    // An empty file (or one holding only comments) is an empty policy.
    let value: Value = serde_yaml_ng::from_str(input).context("parse policy YAML")?;
    if value.is_null() {
        return Ok(T::default());
    }
    // Read from the text, not from `value`: a `Value` has already turned `1.10` into a float.
    serde_yaml_ng::from_str(input).context("read policy document")
}

fn issue_rules(map: &Mapping) -> anyhow::Result<Vec<RawIssueRule>> {
    map.iter()
        .map(|(key, action)| {
            let key = scalar(key).context("issue kind must be a string")?;
            let action = scalar(action).with_context(|| format!("action for '{key}'"))?;
            Ok(RawIssueRule::new(key, action))
        })
        .collect()
}

fn package_rules(
    entries: Vec<PackageEntry>,
    default_action: PackageAction,
) -> anyhow::Result<Vec<PackageRule>> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            package_rule(entry, default_action).with_context(|| format!("entry {i}"))
        })
        .collect()
}

fn package_rule(entry: PackageEntry, default_action: PackageAction) -> anyhow::Result<PackageRule> {
    let range = entry.version.unwrap_or_else(|| "*".to_string());
    let action = match entry.action.as_deref() {
        Some(a) => a
            .parse::<PackageAction>()
            .with_context(|| format!("package '{}': action must be error, warn, or ignore", entry.name))?,
        None => default_action,
    };

    let mut rule = PackageRule::new(entry.name, range, action).with_reason(entry.reason);
    if let Some(expires) = &entry.expires {
        rule = rule.with_expires(parse_expiry(expires).context("expires")?);
    }
    Ok(rule)
}

/// Issue-rule keys and actions are words; numbers and booleans are kept as text
/// so the validator reports them instead of the parser.
fn scalar(value: &Value) -> anyhow::Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => anyhow::bail!("expected a scalar, found {other:?}"),
    }
}
