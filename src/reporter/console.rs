use colored::Colorize;
use tabled::{Table, Tabled, settings::{Style, Modify, object::Rows, Alignment}};

use crate::models::{CheckOutcome, CheckResult, RunSummary, SecureReason, Verdict};

const SEPARATOR_WIDTH: usize = 60;

/// Operator-facing output. Verdict wording stays in Portuguese, matching the
/// product the checked backend belongs to.
pub struct ConsoleReporter;

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Tabela")]
    table: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Linhas")]
    rows: String,
    #[tabled(rename = "Veredito")]
    verdict: String,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_header(&self) {
        println!("\n{}", "🔐".repeat(30));
        println!("{}", "TESTE DE SEGURANÇA: Row Level Security (RLS)".bold());
        println!("{}", "🔐".repeat(30));
    }

    pub fn print_check(&self, result: &CheckResult) {
        println!("\n{}", "=".repeat(SEPARATOR_WIDTH));
        println!(
            "TESTE: Acesso à tabela {} com chave anônima",
            result.table.name.to_uppercase().bold()
        );
        println!("{}", "=".repeat(SEPARATOR_WIDTH));

        if let Some(err) = &result.response.error {
            println!("\n{} Erro na requisição: {}", "❌".red(), err);
            return;
        }

        println!("\n✓ Status Code: {}", result.response.status);
        if let Some(count) = result.response.row_count() {
            println!("✓ Linhas retornadas: {}", count);
        }

        match &result.outcome {
            CheckOutcome::Secure { reason } => self.print_secure(reason),
            CheckOutcome::Vulnerable {
                rows,
                sensitive_fields,
            } => self.print_vulnerable(rows, sensitive_fields),
            CheckOutcome::Unknown { error } => {
                println!("\n{} Resposta inesperada: {}", "❓".yellow(), error);
            }
        }
    }

    fn print_secure(&self, reason: &SecureReason) {
        match reason {
            SecureReason::EmptyResultSet => {
                println!("\n🎉 {} Nenhuma linha retornada.", "SEGURO!".green().bold());
                println!("   A política RLS está funcionando corretamente!");
            }
            SecureReason::AccessDenied { status } => {
                println!("\n🎉 {} Acesso negado ({}).", "SEGURO!".green().bold(), status);
                println!("   A política RLS está funcionando perfeitamente!");
            }
        }
    }

    fn print_vulnerable(&self, rows: &[serde_json::Value], sensitive_fields: &[String]) {
        println!(
            "\n⚠️  {} {} linha(s) expostas:",
            "VULNERÁVEL!".red().bold(),
            rows.len()
        );

        let payload = serde_json::to_string_pretty(rows)
            .unwrap_or_else(|_| format!("{:?}", rows));
        println!("{}", payload);

        if !sensitive_fields.is_empty() {
            println!(
                "\n   {} {}",
                "Campos sensíveis expostos:".yellow(),
                sensitive_fields.join(", ")
            );
        }

        println!("\n   {} Aplique a migration urgentemente!", "❌".red());
    }

    pub fn print_matrix(&self, results: &[CheckResult]) {
        let rows: Vec<TableRow> = results
            .iter()
            .map(|result| {
                let status = if result.response.is_error() {
                    "ERR".to_string()
                } else {
                    result.response.status.to_string()
                };

                let row_count = result
                    .response
                    .row_count()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string());

                let verdict = match result.outcome.verdict() {
                    Verdict::Secure => "SEGURO".green().to_string(),
                    Verdict::Vulnerable => "VULNERÁVEL".red().bold().to_string(),
                    Verdict::Unknown => "INDEFINIDO".yellow().to_string(),
                };

                TableRow {
                    table: result.table.name.clone(),
                    status,
                    rows: row_count,
                    verdict,
                }
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();

        println!("\n{}", table);
    }

    pub fn print_summary(&self, summary: &RunSummary) {
        println!("\n{}", "=".repeat(SEPARATOR_WIDTH));
        println!("{}", "RESUMO".bold().underline());
        println!("{}", "=".repeat(SEPARATOR_WIDTH));
        println!(
            "{} tabela(s) verificadas em {:.2}s",
            summary.total_tables,
            summary.duration_ms as f64 / 1000.0
        );

        if summary.database_secure() {
            println!("\n{}", "✅ Banco de dados SEGURO!".green().bold());
            println!("   Os dados dos usuários estão protegidos.");
        } else {
            println!("\n{}", "❌ Banco de dados VULNERÁVEL!".red().bold());
            println!(
                "   {} Aplique a migration {}",
                "AÇÃO NECESSÁRIA:".red(),
                "0011_fix_profiles_rls.sql".bold()
            );
            println!("   1. Abra Supabase Dashboard > SQL Editor");
            println!("   2. Cole o conteúdo da migration");
            println!("   3. Execute");
            println!("   4. Execute esta verificação novamente");
        }

        println!("{}", "=".repeat(SEPARATOR_WIDTH));
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
