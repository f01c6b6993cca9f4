use serde_json::Value;

use crate::models::{CheckError, CheckOutcome, ResponseInfo, SecureReason};

use super::sensitive::SensitiveFieldScanner;

/// Classifies a single anonymous read against the RLS contract: an empty
/// result set or an outright denial means the policy held, returned rows mean
/// it did not, anything else is inconclusive.
pub struct RlsAnalyzer {
    scanner: SensitiveFieldScanner,
}

impl RlsAnalyzer {
    pub fn new() -> Self {
        Self {
            scanner: SensitiveFieldScanner::new(),
        }
    }

    pub fn classify(&self, response: &ResponseInfo) -> CheckOutcome {
        if let Some(err) = &response.error {
            return CheckOutcome::Unknown {
                error: CheckError::Transport(err.clone()),
            };
        }

        match response.status {
            200 => self.classify_body(response),
            401 | 403 => CheckOutcome::Secure {
                reason: SecureReason::AccessDenied {
                    status: response.status,
                },
            },
            status => CheckOutcome::Unknown {
                error: CheckError::UnexpectedStatus {
                    status,
                    body: response.text.clone(),
                },
            },
        }
    }

    fn classify_body(&self, response: &ResponseInfo) -> CheckOutcome {
        // Table reads return arrays. A 200 with any other shape is not
        // evidence either way.
        match &response.body {
            Some(Value::Array(rows)) if rows.is_empty() => CheckOutcome::Secure {
                reason: SecureReason::EmptyResultSet,
            },
            Some(Value::Array(rows)) => CheckOutcome::Vulnerable {
                sensitive_fields: self.scanner.scan_rows(rows),
                rows: rows.clone(),
            },
            _ => CheckOutcome::Unknown {
                error: CheckError::MalformedBody(response.text.clone()),
            },
        }
    }
}

impl Default for RlsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
