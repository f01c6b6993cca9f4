use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use crate::analyzer::RlsAnalyzer;
use crate::config::Credentials;
use crate::http::RestClient;
use crate::models::{CheckResult, RunSummary, TableCheck};

/// Runs the anonymous-read check against each table strictly in sequence.
/// A failed check never aborts the run; the remaining tables are still
/// probed.
pub struct Checker {
    client: RestClient,
    analyzer: RlsAnalyzer,
    quiet: bool,
}

impl Checker {
    pub fn new(credentials: Credentials, timeout: u64, quiet: bool) -> Self {
        let client =
            RestClient::new(credentials, timeout).expect("Failed to create HTTP client");

        Self {
            client,
            analyzer: RlsAnalyzer::new(),
            quiet,
        }
    }

    pub async fn run(&self, tables: Vec<TableCheck>) -> (Vec<CheckResult>, RunSummary) {
        let start = Instant::now();
        let mut results = Vec::with_capacity(tables.len());

        for table in tables {
            results.push(self.check_table(table).await);
        }

        let summary = RunSummary::from_results(&results, start.elapsed().as_millis() as u64);
        (results, summary)
    }

    async fn check_table(&self, table: TableCheck) -> CheckResult {
        let pb = self.create_spinner(&table);
        let start = Instant::now();

        let response = self.client.fetch_rows(&table).await;
        let outcome = self.analyzer.classify(&response);

        pb.finish_and_clear();
        CheckResult::new(table, response, outcome, start.elapsed().as_millis() as u64)
    }

    fn create_spinner(&self, table: &TableCheck) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Invalid progress bar template"),
        );
        pb.set_message(table.display_path());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}
