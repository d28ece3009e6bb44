use crate::model::{
    LIST_DEFAULT_ISSUE_RULES, LIST_ISSUE_RULES, OrgPolicy, RawIssueRule, RepoPolicy, SourcedRule,
    combined_rules,
};
use sockguard_types::{Finding, PolicySource};
use time::Date;

mod critical_issues;
mod document_version;
mod expired_rules;
mod ignore_patterns;
mod issue_rules;
mod malware_allowance;
mod malware_downgrade;
mod package_fields;
mod rule_conflicts;
mod utils;
mod version_ranges;


/// Everything a check needs to inspect, computed once per validation run.
pub struct ValidationContext<'a> {
    pub org: &'a OrgPolicy,
    pub repo: &'a RepoPolicy,
    pub as_of: Date,
    /// Org banned, org allowed, then repo rules; expired rules included.
    pub package_rules: Vec<SourcedRule<'a>>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(org: &'a OrgPolicy, repo: &'a RepoPolicy, as_of: Date) -> Self {
        Self {
            org,
            repo,
            as_of,
            package_rules: combined_rules(org, repo),
        }
    }

    /// Issue rules of both layers, org first.
    pub fn issue_layers(&self) -> [(PolicySource, &'static str, &'a [RawIssueRule]); 2] {
        [
            (
                PolicySource::Org,
                LIST_DEFAULT_ISSUE_RULES,
                &self.org.default_issue_rules,
            ),
            (PolicySource::Repo, LIST_ISSUE_RULES, &self.repo.issue_rules),
        ]
    }
}

pub fn run_all(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    issue_rules::run(ctx, out);
    malware_downgrade::run(ctx, out);
    critical_issues::run(ctx, out);
    package_fields::run(ctx, out);
    version_ranges::run(ctx, out);
    expired_rules::run(ctx, out);
    rule_conflicts::run(ctx, out);
    malware_allowance::run(ctx, out);
    document_version::run(ctx, out);
    ignore_patterns::run(ctx, out);
}
