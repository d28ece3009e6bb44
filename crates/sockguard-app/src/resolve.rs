//! Per-repository resolution shared by the generate and validate use cases.

use camino::Utf8PathBuf;
use rayon::prelude::*;
use sockguard_domain::Assembly;
use sockguard_domain::model::{OrgPolicy, RepoPolicy};
use sockguard_repo::PolicyTree;
use time::Date;

/// A repository to resolve. `policy` is `Err` when its document could not be read.
pub(crate) struct Target {
    pub repo: String,
    pub policy_file: Option<Utf8PathBuf>,
    pub policy: Result<RepoPolicy, String>,
}

pub(crate) struct Resolution {
    pub repo: String,
    pub policy_file: Option<Utf8PathBuf>,
    /// As declared, so it survives a structural error. Unreadable documents count as enabled.
    pub enabled: bool,
    /// `Err` holds the structural error that stopped resolution.
    pub outcome: Result<Assembly, String>,
}

/// Every repository document in the tree, in name order.
pub(crate) fn all_targets(tree: &PolicyTree) -> Vec<Target> {
    tree.repos
        .iter()
        .map(|source| Target {
            repo: source.name.clone(),
            policy_file: Some(source.path.clone()),
            policy: source.policy.clone(),
        })
        .collect()
}

/// One named repository. Without a document it gets org defaults only.
pub(crate) fn named_target(tree: &PolicyTree, repo: &str) -> Target {
    match tree.repo(repo) {
        Some(source) => Target {
            repo: source.name.clone(),
            policy_file: Some(source.path.clone()),
            policy: source.policy.clone(),
        },
        None => Target {
            repo: repo.to_string(),
            policy_file: None,
            policy: Ok(RepoPolicy::default()),
        },
    }
}

/// Resolve targets in parallel. The org policy is shared read-only across workers.
pub(crate) fn resolve_all(org: &OrgPolicy, targets: Vec<Target>, as_of: Date) -> Vec<Resolution> {
    let mut out: Vec<Resolution> = targets
        .into_par_iter()
        .map(|target| {
            let enabled = target.policy.as_ref().map_or(true, |repo| repo.enabled);
            let outcome = target.policy.and_then(|repo| {
                sockguard_domain::assemble(org, &repo, as_of).map_err(|e| e.to_string())
            });
            Resolution {
                repo: target.repo,
                policy_file: target.policy_file,
                enabled,
                outcome,
            }
        })
        .collect();

    // Stable order.
    out.sort_by(|a, b| a.repo.cmp(&b.repo));
    out
}

/// Repository names become output directories.
pub(crate) fn check_repo_name(name: &str) -> anyhow::Result<()> {
    let bad = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";
    if bad {
        anyhow::bail!("invalid repository name '{name}'");
    }
    Ok(())
}
