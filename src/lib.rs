pub mod analyzer;
pub mod checker;
pub mod cli;
pub mod config;
pub mod http;
pub mod models;
pub mod reporter;

pub use analyzer::{RlsAnalyzer, SensitiveFieldScanner};
pub use checker::{Checker, TableListParser};
pub use config::Credentials;
pub use models::{
    CheckError, CheckOutcome, CheckResult, ResponseInfo, RunSummary, SecureReason, TableCheck,
    TableRole, Verdict,
};
pub use reporter::{ConsoleReporter, HtmlExporter, JsonExporter};
