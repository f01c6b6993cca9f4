use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rlsprobe")]
#[command(version, about = "Row-Level Security verification tool for Supabase REST APIs")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe tables with the anonymous key and report the RLS verdict
    Check {
        /// Project base URL (falls back to SUPABASE_URL)
        #[arg(short, long)]
        url: Option<String>,

        /// Anonymous API key (falls back to SUPABASE_ANON_KEY)
        #[arg(short, long)]
        key: Option<String>,

        /// Extra secondary tables to probe, comma-separated
        #[arg(long)]
        tables: Option<String>,

        #[arg(short, long, default_value = "10")]
        timeout: u64,

        /// Write results to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Output file format: json or html
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Suppress the per-request spinner
        #[arg(short, long)]
        quiet: bool,
    },

    /// Re-render a saved JSON run
    Report {
        #[arg(short, long)]
        input: String,

        #[arg(short, long, default_value = "html")]
        format: String,

        #[arg(short, long)]
        output: Option<String>,
    },
}
