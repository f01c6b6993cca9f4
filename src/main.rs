use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;

use rlsprobe::checker::{Checker, TableListParser};
use rlsprobe::cli::{Cli, Commands};
use rlsprobe::config::Credentials;
use rlsprobe::models::{RunSummary, TableCheck, Verdict};
use rlsprobe::reporter::{ConsoleReporter, HtmlExporter, JsonExporter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            url,
            key,
            tables,
            timeout,
            output,
            format,
            quiet,
        } => match run_check(url, key, tables, timeout, output, format, quiet).await {
            Ok(summary) => match summary.primary {
                Verdict::Secure => ExitCode::SUCCESS,
                Verdict::Vulnerable => ExitCode::from(1),
                Verdict::Unknown => ExitCode::from(2),
            },
            Err(e) => fail(e),
        },

        Commands::Report {
            input,
            format,
            output,
        } => match run_report(input, format, output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fail(e),
        },
    }
}

fn fail(e: anyhow::Error) -> ExitCode {
    eprintln!("{} {:#}", "error:".red().bold(), e);
    ExitCode::from(2)
}

#[allow(clippy::too_many_arguments)]
async fn run_check(
    url: Option<String>,
    key: Option<String>,
    tables: Option<String>,
    timeout: u64,
    output: Option<String>,
    format: String,
    quiet: bool,
) -> Result<RunSummary> {
    let credentials = Credentials::resolve(url, key)?;

    let mut checks = vec![TableCheck::primary("profiles"), TableCheck::secondary("meals")];
    if let Some(list) = tables {
        for name in TableListParser::parse(&list)? {
            if !checks.iter().any(|c| c.name == name) {
                checks.push(TableCheck::secondary(name));
            }
        }
    }

    let reporter = ConsoleReporter::new();
    reporter.print_header();

    let checker = Checker::new(credentials, timeout, quiet);
    let (results, summary) = checker.run(checks).await;

    for result in &results {
        reporter.print_check(result);
    }
    reporter.print_matrix(&results);
    reporter.print_summary(&summary);

    if let Some(path) = output {
        match format.as_str() {
            "json" => JsonExporter::export(&results, &summary, &path)?,
            "html" => HtmlExporter::export(&results, &summary, &path)?,
            other => bail!("Unknown output format: '{}'. Supported: json, html", other),
        }
        println!("\nResultados gravados em {}", path);
    }

    Ok(summary)
}

fn run_report(input: String, format: String, output: Option<String>) -> Result<()> {
    let (results, summary) = JsonExporter::load(&input)?;

    match format.as_str() {
        "html" => {
            let path = output
                .unwrap_or_else(|| format!("{}.html", input.trim_end_matches(".json")));
            HtmlExporter::export(&results, &summary, &path)?;
            println!("Relatório gravado em {}", path);
        }
        "text" => {
            let reporter = ConsoleReporter::new();
            for result in &results {
                reporter.print_check(result);
            }
            reporter.print_matrix(&results);
            reporter.print_summary(&summary);
        }
        other => bail!("Unknown report format: '{}'. Supported: html, text", other),
    }

    Ok(())
}
