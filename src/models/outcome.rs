use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ResponseInfo, TableCheck};

/// Failures that leave a check inconclusive. Both variants are caught locally
/// and folded into [`CheckOutcome::Unknown`]; neither aborts the remaining
/// checks.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CheckError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("200 response is not a JSON array: {0}")]
    MalformedBody(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecureReason {
    /// 200 with an empty result set: RLS filtered every row.
    EmptyResultSet,
    /// The anonymous key was rejected outright.
    AccessDenied { status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Secure,
    Vulnerable,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CheckOutcome {
    Secure {
        reason: SecureReason,
    },
    Vulnerable {
        /// Rows the anonymous key was able to read. The payload itself is the
        /// evidence, echoed to the operator.
        rows: Vec<serde_json::Value>,
        /// Column paths in the leaked rows that look sensitive.
        sensitive_fields: Vec<String>,
    },
    Unknown {
        error: CheckError,
    },
}

impl CheckOutcome {
    pub fn verdict(&self) -> Verdict {
        match self {
            CheckOutcome::Secure { .. } => Verdict::Secure,
            CheckOutcome::Vulnerable { .. } => Verdict::Vulnerable,
            CheckOutcome::Unknown { .. } => Verdict::Unknown,
        }
    }

    pub fn is_secure(&self) -> bool {
        self.verdict() == Verdict::Secure
    }

    pub fn is_vulnerable(&self) -> bool {
        self.verdict() == Verdict::Vulnerable
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub table: TableCheck,
    pub response: ResponseInfo,
    pub outcome: CheckOutcome,
    pub duration_ms: u64,
}

impl CheckResult {
    pub fn new(
        table: TableCheck,
        response: ResponseInfo,
        outcome: CheckOutcome,
        duration_ms: u64,
    ) -> Self {
        Self {
            table,
            response,
            outcome,
            duration_ms,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.table.is_primary()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_tables: usize,
    pub duration_ms: u64,
    pub secure_count: usize,
    pub vulnerable_count: usize,
    pub unknown_count: usize,
    /// Verdict of the primary table. Secondary tables are informational and
    /// never change the aggregate verdict.
    pub primary: Verdict,
}

impl RunSummary {
    pub fn from_results(results: &[CheckResult], total_duration_ms: u64) -> Self {
        let mut summary = Self {
            total_tables: results.len(),
            duration_ms: total_duration_ms,
            secure_count: 0,
            vulnerable_count: 0,
            unknown_count: 0,
            primary: Verdict::Unknown,
        };

        for result in results {
            match result.outcome.verdict() {
                Verdict::Secure => summary.secure_count += 1,
                Verdict::Vulnerable => summary.vulnerable_count += 1,
                Verdict::Unknown => summary.unknown_count += 1,
            }

            if result.is_primary() {
                summary.primary = result.outcome.verdict();
            }
        }

        summary
    }

    pub fn database_secure(&self) -> bool {
        self.primary == Verdict::Secure
    }
}
