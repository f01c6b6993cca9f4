use anyhow::Result;
use reqwest::Client;
use std::time::{Duration, Instant};

use crate::config::Credentials;
use crate::models::{ResponseInfo, TableCheck};

/// Anonymous PostgREST client. Every request carries the anon key both as the
/// `apikey` header and as a bearer token, exactly as an unauthenticated
/// browser client would.
pub struct RestClient {
    client: Client,
    credentials: Credentials,
}

impl RestClient {
    pub fn new(credentials: Credentials, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(false)
            .build()?;

        Ok(Self {
            client,
            credentials,
        })
    }

    /// Single-attempt read of all rows the anon key can see. Transport
    /// failures come back as a `ResponseInfo` with `error` set; they never
    /// propagate.
    pub async fn fetch_rows(&self, table: &TableCheck) -> ResponseInfo {
        let start = Instant::now();
        let url = format!("{}{}", self.credentials.base_url, table.rest_path());

        let request = self
            .client
            .get(&url)
            .header("apikey", &self.credentials.anon_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.anon_key),
            )
            .header("Accept", "application/json");

        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let bytes = response.bytes().await.unwrap_or_default();
                let size = bytes.len();
                let text = String::from_utf8_lossy(&bytes).into_owned();
                let body: Option<serde_json::Value> = serde_json::from_slice(&bytes).ok();
                let duration_ms = start.elapsed().as_millis() as u64;

                ResponseInfo::new(status, size, body, text, duration_ms)
            }
            Err(e) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                let mut info = ResponseInfo::error(e.to_string());
                info.duration_ms = duration_ms;
                info
            }
        }
    }
}
