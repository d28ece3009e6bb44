//! Policy directory adapters: discover and read org and repository policy documents.
//!
//! This crate is allowed to do filesystem IO. Parsing itself lives in `sockguard-settings`.
//!
//! Layout of a policy directory:
//!
//! ```text
//! policies/
//!   org-defaults.yml
//!   repositories/
//!     web.yml
//!     api.yaml
//! ```

#![forbid(unsafe_code)]

mod discover;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use sockguard_domain::model::{OrgPolicy, RepoPolicy};

pub use discover::{REPOSITORIES_DIR, RepoFile, discover_repo_files, find_org_file};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    /// Parse arbitrary text as an org policy document. **Never panics** on any input.
    pub fn parse_org_policy(text: &str) -> anyhow::Result<()> {
        let _ = sockguard_settings::parse_org_policy_yaml(text)?;
        Ok(())
    }

    /// Parse arbitrary text as a repository policy document. **Never panics** on any input.
    pub fn parse_repo_policy(text: &str) -> anyhow::Result<()> {
        let _ = sockguard_settings::parse_repo_policy_yaml(text)?;
        Ok(())
    }
}

/// One repository policy file and the outcome of reading it.
///
/// A broken repository document does not stop the others from loading; the error
/// (with its context chain) is kept for reporting.
#[derive(Debug)]
pub struct RepoSource {
    pub name: String,
    pub path: Utf8PathBuf,
    pub policy: Result<RepoPolicy, String>,
}

/// Everything under a policy directory.
#[derive(Debug)]
pub struct PolicyTree {
    pub org: OrgPolicy,
    /// `None` when the directory has no org document and defaults apply.
    pub org_path: Option<Utf8PathBuf>,
    /// Sorted by repository name.
    pub repos: Vec<RepoSource>,
}

impl PolicyTree {
    pub fn repo(&self, name: &str) -> Option<&RepoSource> {
        self.repos.iter().find(|r| r.name == name)
    }
}

/// Load the org document and every repository document under `policy_dir`.
pub fn load_policy_tree(policy_dir: &Utf8Path) -> anyhow::Result<PolicyTree> {
    if !policy_dir.is_dir() {
        anyhow::bail!("policy directory does not exist: {policy_dir}");
    }

    let org_path = find_org_file(policy_dir);
    let org = match &org_path {
        Some(path) => read_org_policy(path)?,
        None => OrgPolicy::default(),
    };

    let repos = discover_repo_files(policy_dir)
        .context("discover repository policies")?
        .into_iter()
        .map(|file| {
            let policy = read_repo_policy(&file.path).map_err(|e| format!("{e:#}"));
            RepoSource {
                name: file.name,
                path: file.path,
                policy,
            }
        })
        .collect();

    Ok(PolicyTree {
        org,
        org_path,
        repos,
    })
}

pub fn read_org_policy(path: &Utf8Path) -> anyhow::Result<OrgPolicy> {
    let text = read_text(path)?;
    sockguard_settings::parse_org_policy_yaml(&text).with_context(|| format!("parse {path}"))
}

pub fn read_repo_policy(path: &Utf8Path) -> anyhow::Result<RepoPolicy> {
    let text = read_text(path)?;
    sockguard_settings::parse_repo_policy_yaml(&text).with_context(|| format!("parse {path}"))
}

pub fn read_text(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {path}"))
}
