//! The `generate` use case: resolve policies and render `socket.yml` documents.

use crate::resolve::{self, Resolution};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use sockguard_settings::{Overrides, ResolvedConfig};
use sockguard_types::Finding;
use time::Date;

/// Input for the generate use case.
#[derive(Clone, Debug)]
pub struct GenerateInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Generate for this repository only. `None` generates every repository document.
    pub repo: Option<&'a str>,
    pub as_of: Date,
}

/// One resolved repository.
#[derive(Clone, Debug)]
pub struct GeneratedDocument {
    pub repo: String,
    pub policy_file: Option<Utf8PathBuf>,
    pub enabled: bool,
    /// Rendered `socket.yml`; `None` when a structural error stopped resolution.
    pub content: Option<String>,
    pub structural_error: Option<String>,
    pub findings: Vec<Finding>,
}

impl GeneratedDocument {
    pub fn is_blocking(&self) -> bool {
        self.structural_error.is_some() || self.findings.iter().any(Finding::is_error)
    }
}

/// Output from the generate use case.
#[derive(Clone, Debug)]
pub struct GenerateOutput {
    /// In repository-name order.
    pub documents: Vec<GeneratedDocument>,
    pub resolved_config: ResolvedConfig,
}

impl GenerateOutput {
    /// Error findings and structural errors block writing.
    pub fn is_blocked(&self) -> bool {
        self.documents.iter().any(GeneratedDocument::is_blocking)
    }
}

/// Resolve and render. Nothing is written here; see [`write_documents`].
pub fn run_generate(input: GenerateInput<'_>) -> anyhow::Result<GenerateOutput> {
    let resolved = crate::load_config(input.config_text, input.overrides.clone())?;

    let tree = sockguard_repo::load_policy_tree(&resolved.policy_dir)
        .with_context(|| format!("load policies from {}", resolved.policy_dir))?;

    let targets = match input.repo {
        Some(name) => {
            resolve::check_repo_name(name)?;
            vec![resolve::named_target(&tree, name)]
        }
        None => resolve::all_targets(&tree),
    };

    let documents = resolve::resolve_all(&tree.org, targets, input.as_of)
        .into_iter()
        .map(to_document)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(GenerateOutput {
        documents,
        resolved_config: resolved,
    })
}

fn to_document(resolution: Resolution) -> anyhow::Result<GeneratedDocument> {
    let Resolution {
        repo,
        policy_file,
        enabled,
        outcome,
    } = resolution;

    match outcome {
        Ok(assembly) => {
            let content = sockguard_render::render_socket_yml(&assembly.policy.to_document())
                .with_context(|| format!("render socket.yml for {repo}"))?;
            Ok(GeneratedDocument {
                repo,
                policy_file,
                enabled,
                content: Some(content),
                structural_error: None,
                findings: assembly.findings,
            })
        }
        Err(err) => Ok(GeneratedDocument {
            repo,
            policy_file,
            enabled,
            content: None,
            structural_error: Some(err),
            findings: Vec::new(),
        }),
    }
}

/// The dry-run listing: a `--- <repo>/<file> ---` header before each document.
pub fn format_dry_run(documents: &[GeneratedDocument], output_file: &str) -> String {
    let mut out = String::new();
    for doc in documents {
        let Some(content) = &doc.content else { continue };
        out.push_str(&format!("\n--- {}/{} ---\n", doc.repo, output_file));
        out.push_str(content);
    }
    out
}

/// Write `<output_dir>/<repo>/<output_file>` for every enabled, resolved document.
///
/// Refuses to write anything when any document is blocked. Returns the written paths.
pub fn write_documents(output: &GenerateOutput) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if let Some(doc) = output.documents.iter().find(|d| d.is_blocking()) {
        anyhow::bail!(
            "refusing to write: repository '{}' has blocking policy problems",
            doc.repo
        );
    }

    let cfg = &output.resolved_config;
    let mut written = Vec::new();
    for doc in output.documents.iter().filter(|d| d.enabled) {
        let Some(content) = &doc.content else { continue };
        let path = output_path(&cfg.output_dir, &doc.repo, &cfg.output_file);
        crate::write_text(&path, content)?;
        written.push(path);
    }
    Ok(written)
}

fn output_path(output_dir: &Utf8Path, repo: &str, output_file: &str) -> Utf8PathBuf {
    output_dir.join(repo).join(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn write(root: &Utf8Path, rel: &str, text: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, text).expect("write file");
    }

    fn input<'a>(root: &Utf8Path, repo: Option<&'a str>) -> GenerateInput<'a> {
        GenerateInput {
            config_text: "",
            overrides: Overrides {
                policy_dir: Some(root.join("policies").to_string()),
                output_dir: Some(root.join("output").to_string()),
                ..Overrides::default()
            },
            repo,
            as_of: date!(2025 - 03 - 01),
        }
    }

    fn seed(root: &Utf8Path) {
        write(
            root,
            "policies/org-defaults.yml",
            "defaultIssueRules:\n  knownMalware: error\n  deprecated: warn\n",
        );
        write(
            root,
            "policies/repositories/web.yml",
            "projectName: web\nissueRules:\n  deprecated: error\n",
        );
        write(root, "policies/repositories/legacy.yml", "enabled: false\n");
    }

    #[test]
    fn generates_every_repository_in_name_order() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        seed(root);

        let output = run_generate(input(root, None)).expect("generate");
        let names: Vec<_> = output.documents.iter().map(|d| d.repo.as_str()).collect();
        assert_eq!(names, ["legacy", "web"]);
        assert!(!output.is_blocked());

        let web = output.documents[1].content.as_deref().expect("rendered");
        assert!(web.contains("deprecated: error"), "{web}");
        assert!(web.contains("knownMalware: error"), "{web}");

        let written = write_documents(&output).expect("write");
        assert_eq!(written, vec![root.join("output/web/socket.yml")]);
        assert!(!root.join("output/legacy").exists());
    }

    #[test]
    fn unknown_repository_gets_org_defaults() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        seed(root);

        let output = run_generate(input(root, Some("brand-new"))).expect("generate");
        assert_eq!(output.documents.len(), 1);
        let doc = &output.documents[0];
        assert!(doc.policy_file.is_none());
        let content = doc.content.as_deref().expect("rendered");
        assert!(content.contains("deprecated: warn"), "{content}");
    }

    #[test]
    fn dry_run_lists_disabled_repositories_too() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        seed(root);

        let output = run_generate(input(root, None)).expect("generate");
        let text = format_dry_run(&output.documents, "socket.yml");
        assert!(text.contains("\n--- legacy/socket.yml ---\nversion: 2\nenabled: false\n"));
        assert!(text.contains("\n--- web/socket.yml ---\n"));
    }

    #[test]
    fn error_findings_block_writing() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        seed(root);
        write(
            root,
            "policies/repositories/web.yml",
            "issueRules:\n  knownMalware: ignore\n",
        );

        let output = run_generate(input(root, None)).expect("generate");
        assert!(output.is_blocked());
        assert!(write_documents(&output).is_err());
        assert!(!root.join("output").exists());
    }

    #[test]
    fn structural_errors_are_reported_per_repository() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        seed(root);
        write(
            root,
            "policies/repositories/web.yml",
            "deferredPackageRules:\n  - name: x\n    version: ^1.0\n    reason: r\n",
        );

        let output = run_generate(input(root, None)).expect("generate");
        let web = &output.documents[1];
        assert!(web.content.is_none());
        assert!(
            web.structural_error
                .as_deref()
                .is_some_and(|e| e.contains("invalid version range '^1.0'"))
        );
        assert!(output.documents[0].content.is_some());
    }

    #[test]
    fn disabled_repositories_stay_disabled_on_structural_errors() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        seed(root);
        write(
            root,
            "policies/repositories/legacy.yml",
            "enabled: false\ndeferredPackageRules:\n  - name: x\n    version: ~1.2\n    reason: r\n",
        );

        let output = run_generate(input(root, None)).expect("generate");
        let legacy = &output.documents[0];
        assert_eq!(legacy.repo, "legacy");
        assert!(legacy.structural_error.is_some());
        assert!(!legacy.enabled);
    }

    #[test]
    fn repository_names_cannot_escape_output_dir() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        seed(root);
        assert!(run_generate(input(root, Some("../etc"))).is_err());
    }
}
