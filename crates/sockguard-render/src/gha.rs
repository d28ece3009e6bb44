use sockguard_types::{PolicySource, Severity, ValidationReport};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path}::[{repo}:{code}] {message}`
///
/// `file` is the document the offending rule was declared in, when known.
pub fn render_github_annotations(report: &ValidationReport) -> Vec<String> {
    let mut out = Vec::new();

    for repo in &report.repositories {
        if let Some(err) = &repo.structural_error {
            let file = repo.policy_file.as_deref();
            out.push(annotation("error", file, &format!("[{}] {}", repo.repo, err)));
        }

        for f in &repo.findings {
            let level = match f.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            let file = match f.rule.as_ref().map(|r| r.source) {
                Some(PolicySource::Org) => report.data.org_file.as_deref(),
                Some(PolicySource::Repo) => repo.policy_file.as_deref(),
                None => None,
            };
            let message = format!("[{}:{}] {}", repo.repo, f.kind.code(), f.message);
            out.push(annotation(level, file, &message));
        }
    }

    out
}

fn annotation(level: &str, file: Option<&str>, message: &str) -> String {
    let message = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");

    match file {
        Some(path) => format!("::{} file={}::{}", level, path, message),
        None => format!("::{}::{}", level, message),
    }
}
