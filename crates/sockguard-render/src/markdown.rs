use sockguard_types::{Severity, ValidationReport, Verdict};

fn verdict_label(v: Verdict) -> &'static str {
    match v {
        Verdict::Pass => "PASS",
        Verdict::Warn => "WARN",
        Verdict::Fail => "FAIL",
    }
}

/// Summary for PR comments and job summaries. One section per repository.
pub fn render_markdown(report: &ValidationReport) -> String {
    let mut out = String::new();

    out.push_str("# Sockguard policy report\n\n");
    out.push_str(&format!(
        "- Verdict: **{}**\n- Repositories: {}\n- Findings: {}\n- As of: {}\n\n",
        verdict_label(report.verdict),
        report.data.repositories_scanned,
        report.data.findings_total,
        report.data.as_of
    ));

    if report.repositories.is_empty() {
        out.push_str("No repository policies found.\n");
        return out;
    }

    for repo in &report.repositories {
        let disabled = if repo.enabled { "" } else { " (disabled)" };
        out.push_str(&format!(
            "## {} - {}{}\n\n",
            repo.repo,
            verdict_label(repo.verdict),
            disabled
        ));

        if let Some(err) = &repo.structural_error {
            out.push_str(&format!("> Structural error: {}\n\n", err));
            continue;
        }

        if repo.findings.is_empty() {
            out.push_str("No findings.\n\n");
            continue;
        }

        for f in &repo.findings {
            let sev = match f.severity {
                Severity::Warning => "WARN",
                Severity::Error => "ERROR",
            };
            match &f.rule {
                Some(rule) => out.push_str(&format!(
                    "- [{}] `{}` at `{}`: {}\n",
                    sev,
                    f.kind.code(),
                    rule,
                    f.message
                )),
                None => out.push_str(&format!("- [{}] `{}`: {}\n", sev, f.kind.code(), f.message)),
            }
            if let Some(help) = &f.help {
                out.push_str(&format!("  - help: {}\n", help));
            }
        }
        out.push('\n');
    }

    out
}
