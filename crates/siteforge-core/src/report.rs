// ── Assignment reporting ──

use serde::Serialize;
use tracing::warn;

use siteforge_api::AssignmentResult;

const UNKNOWN_REASON: &str = "unknown";

/// One MAC the API refused to assign, paired with its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentFailure {
    pub mac: String,
    pub reason: String,
}

/// Result of the assignment step, ready to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentReport {
    pub site_name: String,
    pub assigned: Vec<String>,
    pub failures: Vec<AssignmentFailure>,
}

impl AssignmentReport {
    /// Pair `error[i]` with `reason[i]`.
    ///
    /// A failed MAC without a reason at its position is reported as
    /// `unknown`; surplus reasons are dropped.
    pub fn new(site_name: impl Into<String>, result: AssignmentResult) -> Self {
        let AssignmentResult {
            success,
            error,
            reason,
        } = result;

        if error.len() != reason.len() {
            warn!(
                errors = error.len(),
                reasons = reason.len(),
                "assignment errors and reasons are not paired one-to-one"
            );
        }

        let mut reasons = reason.into_iter();
        let failures = error
            .into_iter()
            .map(|mac| AssignmentFailure {
                mac,
                reason: reasons.next().unwrap_or_else(|| UNKNOWN_REASON.to_owned()),
            })
            .collect();

        Self {
            site_name: site_name.into(),
            assigned: success,
            failures,
        }
    }

    pub fn success_count(&self) -> usize {
        self.assigned.len()
    }

    /// `true` when the request went through but some MACs were refused.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "devices added to site '{}': {}",
            self.site_name,
            self.success_count()
        )
    }

    pub fn failure_lines(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|f| format!("device '{}' error: {}", f.mac, f.reason))
            .collect()
    }
}
