//! CLI entry point for sockguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging, and exit codes.
//! All business logic lives in the `sockguard-app` crate.

#![forbid(unsafe_code)]

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use sockguard_app::{
    ExplainOutput, GenerateInput, GeneratedDocument, LintInput, ValidateInput, format_dry_run,
    format_finding, run_annotations, run_explain, run_generate, run_lint, run_markdown,
    run_validate, verdict_exit_code, write_documents, write_report, write_text,
};
use sockguard_settings::Overrides;
use sockguard_types::{Finding, Severity, Verdict};
use time::{Date, OffsetDateTime, macros::format_description};
use tracing::{debug, error, info, warn};

/// Exit code for blocking policy problems.
const EXIT_POLICY_FAILURE: i32 = 2;
/// Exit code for runtime errors (unreadable files, bad config, ...).
const EXIT_RUNTIME_ERROR: i32 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "sockguard",
    version,
    about = "Resolve organization and repository dependency-security policies into socket.yml"
)]
struct Cli {
    /// Path to sockguard config TOML. A missing file means defaults.
    #[arg(long, default_value = "sockguard.toml")]
    config: Utf8PathBuf,

    /// Override the policy directory (holds org-defaults.yml and repositories/).
    #[arg(long)]
    policy_dir: Option<String>,

    /// Override the output directory for generated documents.
    #[arg(long)]
    output_dir: Option<String>,

    /// Override which severity fails validation (error|warning).
    #[arg(long)]
    fail_on: Option<String>,

    /// Debug logging on stderr.
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve policies and write one socket.yml per repository.
    Generate {
        /// Only this repository. Without a policy file it gets org defaults.
        #[arg(long)]
        repo: Option<String>,

        /// Print documents instead of writing them.
        #[arg(long)]
        dry_run: bool,

        /// Evaluate expiry against this date (YYYY-MM-DD) instead of today.
        #[arg(long, value_parser = parse_as_of)]
        as_of: Option<Date>,
    },

    /// Validate every policy document without writing anything.
    Validate {
        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Where to write a Markdown summary.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,

        /// Print GitHub Actions annotations to stdout.
        #[arg(long)]
        annotations: bool,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max_annotations: usize,

        #[arg(long, value_parser = parse_as_of)]
        as_of: Option<Date>,
    },

    /// Check an existing socket.yml.
    Lint {
        /// The socket.yml file to check.
        file: Utf8PathBuf,

        #[arg(long, value_parser = parse_as_of)]
        as_of: Option<Date>,
    },

    /// Explain a finding code with remediation guidance.
    Explain {
        /// The code to explain (e.g. "malware_downgrade").
        code: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.cmd {
        Commands::Generate {
            repo,
            dry_run,
            as_of,
        } => cmd_generate(&cli, repo.as_deref(), *dry_run, *as_of),
        Commands::Validate {
            report_out,
            markdown_out,
            annotations,
            max_annotations,
            as_of,
        } => cmd_validate(
            &cli,
            report_out.as_deref(),
            markdown_out.as_deref(),
            annotations.then_some(*max_annotations),
            *as_of,
        ),
        Commands::Lint { file, as_of } => cmd_lint(&cli, file, *as_of),
        Commands::Explain { code } => Ok(cmd_explain(code)),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            error!("{err:#}");
            std::process::exit(EXIT_RUNTIME_ERROR);
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("sockguard=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sockguard=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_as_of(s: &str) -> Result<Date, String> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn as_of_or_today(as_of: Option<Date>) -> Date {
    as_of.unwrap_or_else(|| OffsetDateTime::now_utc().date())
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        policy_dir: cli.policy_dir.clone(),
        output_dir: cli.output_dir.clone(),
        fail_on: cli.fail_on.clone(),
    }
}

/// Missing file is allowed (defaults apply); any other read failure is not.
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    if !path.exists() {
        debug!("no config at {path}; using defaults");
        return Ok(String::new());
    }
    std::fs::read_to_string(path).with_context(|| format!("read config: {path}"))
}

fn cmd_generate(
    cli: &Cli,
    repo: Option<&str>,
    dry_run: bool,
    as_of: Option<Date>,
) -> anyhow::Result<i32> {
    let config_text = read_config(&cli.config)?;
    let as_of = as_of_or_today(as_of);

    let output = run_generate(GenerateInput {
        config_text: &config_text,
        overrides: overrides(cli),
        repo,
        as_of,
    })?;

    info!(
        "loaded {} repository policies from {}",
        output.documents.len(),
        output.resolved_config.policy_dir
    );
    for doc in &output.documents {
        log_document(doc);
    }

    if dry_run {
        print!(
            "{}",
            format_dry_run(&output.documents, &output.resolved_config.output_file)
        );
        return Ok(if output.is_blocked() {
            EXIT_POLICY_FAILURE
        } else {
            0
        });
    }

    if output.is_blocked() {
        error!("blocking policy problems found; nothing was written");
        return Ok(EXIT_POLICY_FAILURE);
    }

    for path in write_documents(&output)? {
        info!("written: {path}");
    }
    Ok(0)
}

fn log_document(doc: &GeneratedDocument) {
    if let Some(err) = &doc.structural_error {
        error!("{}: {err}", doc.repo);
        return;
    }
    if !doc.enabled {
        info!("{}: disabled, skipped", doc.repo);
    }
    for finding in &doc.findings {
        log_finding(&doc.repo, finding);
    }
}

fn log_finding(repo: &str, finding: &Finding) {
    let line = format_finding(repo, finding);
    match finding.severity {
        Severity::Error => error!("{line}"),
        Severity::Warning => warn!("{line}"),
    }
}

fn cmd_validate(
    cli: &Cli,
    report_out: Option<&Utf8Path>,
    markdown_out: Option<&Utf8Path>,
    max_annotations: Option<usize>,
    as_of: Option<Date>,
) -> anyhow::Result<i32> {
    let config_text = read_config(&cli.config)?;

    let output = run_validate(ValidateInput {
        config_text: &config_text,
        overrides: overrides(cli),
        as_of: as_of_or_today(as_of),
    })?;
    let report = &output.report;

    for repo in &report.repositories {
        if let Some(err) = &repo.structural_error {
            error!("{}: {err}", repo.repo);
        }
        for finding in &repo.findings {
            log_finding(&repo.repo, finding);
        }
    }

    if let Some(path) = report_out {
        write_report(path, report).context("write report json")?;
        info!("written: {path}");
    }
    if let Some(path) = markdown_out {
        write_text(path, &run_markdown(report)).context("write markdown")?;
        info!("written: {path}");
    }
    if let Some(max) = max_annotations {
        for annotation in run_annotations(report, max) {
            println!("{annotation}");
        }
    }

    info!(
        "{} repositories checked, {} findings: {}",
        report.data.repositories_scanned,
        report.data.findings_total,
        verdict_label(report.verdict)
    );
    Ok(verdict_exit_code(report.verdict))
}

fn cmd_lint(cli: &Cli, file: &Utf8Path, as_of: Option<Date>) -> anyhow::Result<i32> {
    let config_text = read_config(&cli.config)?;
    let resolved = sockguard_app::load_config(&config_text, overrides(cli))?;
    let text = std::fs::read_to_string(file).with_context(|| format!("read {file}"))?;

    let output = run_lint(LintInput {
        name: file.as_str(),
        text: &text,
        as_of: as_of_or_today(as_of),
        fail_on: resolved.fail_on,
    })?;

    for finding in &output.report.findings {
        println!("{}", format_finding(file.as_str(), finding));
    }
    info!("{file}: {}", verdict_label(output.report.verdict));
    Ok(verdict_exit_code(output.report.verdict))
}

fn cmd_explain(code: &str) -> i32 {
    match run_explain(code) {
        ExplainOutput::Found(exp) => {
            print!("{}", sockguard_app::format_explanation(&exp));
            0
        }
        ExplainOutput::NotFound {
            identifier,
            available_codes,
        } => {
            eprint!(
                "{}",
                sockguard_app::format_not_found(&identifier, available_codes)
            );
            EXIT_RUNTIME_ERROR
        }
    }
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Pass => "pass",
        Verdict::Warn => "warn",
        Verdict::Fail => "fail",
    }
}
