use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseInfo {
    pub status: u16,
    pub size: usize,
    pub body: Option<serde_json::Value>,
    /// Raw body text, kept even when the body is not valid JSON.
    pub text: String,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl ResponseInfo {
    pub fn new(
        status: u16,
        size: usize,
        body: Option<serde_json::Value>,
        text: String,
        duration_ms: u64,
    ) -> Self {
        Self {
            status,
            size,
            body,
            text,
            duration_ms,
            error: None,
        }
    }

    pub fn error(err: String) -> Self {
        Self {
            status: 0,
            size: 0,
            body: None,
            text: String::new(),
            duration_ms: 0,
            error: Some(err),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Number of rows in the body when it is a JSON array.
    pub fn row_count(&self) -> Option<usize> {
        match &self.body {
            Some(serde_json::Value::Array(rows)) => Some(rows.len()),
            _ => None,
        }
    }
}
