use crate::model::ResolvedPolicy;
use crate::policy::{FailOn, compute_verdict};
use sockguard_types::{Finding, SeverityCounts, Verdict};

/// Result of one resolution run: the policy to distribute and what validation found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assembly {
    pub policy: ResolvedPolicy,
    pub findings: Vec<Finding>,
}

impl Assembly {
    /// Error findings block unattended generation.
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    pub fn counts(&self) -> SeverityCounts {
        SeverityCounts::from_findings(&self.findings)
    }

    pub fn verdict(&self, fail_on: FailOn) -> Verdict {
        compute_verdict(&self.findings, fail_on)
    }
}
