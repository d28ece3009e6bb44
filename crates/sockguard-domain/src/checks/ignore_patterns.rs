use super::ValidationContext;
use super::utils::finding;
use crate::model::{LIST_DEFAULT_IGNORE_PATHS, LIST_IGNORE, rule_ref};
use globset::Glob;
use sockguard_types::{Finding, FindingKind, PolicySource, Severity};

pub fn run(ctx: &ValidationContext<'_>, out: &mut Vec<Finding>) {
    let layers = [
        (
            PolicySource::Org,
            LIST_DEFAULT_IGNORE_PATHS,
            &ctx.org.default_ignore_paths,
        ),
        (PolicySource::Repo, LIST_IGNORE, &ctx.repo.ignore_paths),
    ];

    for (source, list, patterns) in layers {
        for (i, pattern) in patterns.iter().enumerate() {
            if let Err(err) = Glob::new(pattern) {
                out.push(finding(
                    FindingKind::InvalidIgnorePattern,
                    Severity::Error,
                    format!("invalid ignore pattern '{pattern}' in {source} {list}: {err}"),
                    rule_ref(source, list, Some(i), Some(pattern)),
                    "Fix the glob syntax; unbalanced braces or brackets are the usual cause.",
                ));
            }
        }
    }
}
