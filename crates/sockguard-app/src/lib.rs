//! Use case orchestration for sockguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and terminal output.

#![forbid(unsafe_code)]

mod config;
mod explain;
mod generate;
mod lint;
mod render;
mod resolve;
mod validate;

pub use config::load_config;
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use generate::{
    GenerateInput, GenerateOutput, GeneratedDocument, format_dry_run, run_generate,
    write_documents,
};
pub use lint::{LintInput, LintOutput, run_lint};
pub use render::{
    format_finding, run_annotations, run_markdown, serialize_report, write_report, write_text,
};
pub use validate::{ValidateInput, ValidateOutput, run_validate, verdict_exit_code};
