use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

pub const REPOSITORIES_DIR: &str = "repositories";

const ORG_FILE_NAMES: [&str; 2] = ["org-defaults.yml", "org-defaults.yaml"];
const POLICY_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// A repository policy document; `name` is the file stem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoFile {
    pub name: String,
    pub path: Utf8PathBuf,
}

/// The org document, `.yml` preferred over `.yaml`.
pub fn find_org_file(policy_dir: &Utf8Path) -> Option<Utf8PathBuf> {
    ORG_FILE_NAMES
        .iter()
        .map(|name| policy_dir.join(name))
        .find(|path| path.is_file())
}

/// Repository documents directly under `<policy_dir>/repositories`, sorted by name.
///
/// Behavior:
/// - A missing `repositories/` directory means no repositories.
/// - Only `*.yml` and `*.yaml` files count; subdirectories are not searched.
/// - Two files with the same stem (`web.yml` and `web.yaml`) are an error.
pub fn discover_repo_files(policy_dir: &Utf8Path) -> anyhow::Result<Vec<RepoFile>> {
    let dir = policy_dir.join(REPOSITORIES_DIR);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut out: Vec<RepoFile> = Vec::new();
    for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("walk {dir}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            continue;
        };
        let is_policy = path
            .extension()
            .is_some_and(|ext| POLICY_EXTENSIONS.contains(&ext));
        let Some(stem) = path.file_stem().filter(|_| is_policy) else {
            continue;
        };
        out.push(RepoFile {
            name: stem.to_string(),
            path: path.to_path_buf(),
        });
    }

    // Stable order.
    out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));

    if let Some(pair) = out.windows(2).find(|w| w[0].name == w[1].name) {
        anyhow::bail!(
            "repository '{}' has two policy files: {} and {}",
            pair[0].name,
            pair[0].path,
            pair[1].path
        );
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn touch(path: &Utf8Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, "").expect("write file");
    }

    #[test]
    fn discovers_only_top_level_yaml_files() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        touch(&root.join("repositories/zeta.yml"));
        touch(&root.join("repositories/alpha.yaml"));
        touch(&root.join("repositories/README.md"));
        touch(&root.join("repositories/nested/inner.yml"));

        let files = discover_repo_files(&root).expect("discover");
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }

    #[test]
    fn missing_repositories_dir_is_empty() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        assert!(discover_repo_files(&root).expect("discover").is_empty());
    }

    #[test]
    fn duplicate_stems_are_rejected() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        touch(&root.join("repositories/web.yml"));
        touch(&root.join("repositories/web.yaml"));

        let err = discover_repo_files(&root).expect_err("duplicate");
        assert!(err.to_string().contains("two policy files"));
    }

    #[test]
    fn org_file_prefers_yml() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        assert_eq!(find_org_file(&root), None);

        touch(&root.join("org-defaults.yaml"));
        assert_eq!(find_org_file(&root), Some(root.join("org-defaults.yaml")));

        touch(&root.join("org-defaults.yml"));
        assert_eq!(find_org_file(&root), Some(root.join("org-defaults.yml")));
    }
}
