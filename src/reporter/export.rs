use anyhow::{Result, Context};
use std::fs;
use tera::{Tera, Context as TeraContext};
use chrono::Utc;

use crate::models::{CheckResult, RunSummary, Verdict};

pub struct JsonExporter;

impl JsonExporter {
    pub fn export(results: &[CheckResult], summary: &RunSummary, path: &str) -> Result<()> {
        let output = ExportData {
            scan_time: Utc::now().to_rfc3339(),
            results: results.to_vec(),
            summary: summary.clone(),
        };

        let json = serde_json::to_string_pretty(&output)?;
        fs::write(path, json).with_context(|| format!("Failed to write to {}", path))?;
        Ok(())
    }

    pub fn load(path: &str) -> Result<(Vec<CheckResult>, RunSummary)> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path))?;

        let data: ExportData = serde_json::from_str(&content)?;
        Ok((data.results, data.summary))
    }
}

pub struct HtmlExporter;

impl HtmlExporter {
    pub fn export(results: &[CheckResult], summary: &RunSummary, path: &str) -> Result<()> {
        let template = Self::get_template();
        let mut tera = Tera::default();
        tera.add_raw_template("report", &template)?;

        let mut context = TeraContext::new();
        context.insert("scan_time", &Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string());
        context.insert("total_tables", &summary.total_tables);
        context.insert("secure_count", &summary.secure_count);
        context.insert("vulnerable_count", &summary.vulnerable_count);
        context.insert("unknown_count", &summary.unknown_count);
        context.insert("database_secure", &summary.database_secure());

        let rows: Vec<HtmlRow> = results
            .iter()
            .map(|r| {
                let verdict = match r.outcome.verdict() {
                    Verdict::Secure => "SEGURO",
                    Verdict::Vulnerable => "VULNERÁVEL",
                    Verdict::Unknown => "INDEFINIDO",
                };

                let detail = match &r.outcome {
                    crate::models::CheckOutcome::Secure { .. } => String::new(),
                    crate::models::CheckOutcome::Vulnerable {
                        rows,
                        sensitive_fields,
                    } => {
                        if sensitive_fields.is_empty() {
                            format!("{} linha(s) expostas", rows.len())
                        } else {
                            format!(
                                "{} linha(s) expostas — campos sensíveis: {}",
                                rows.len(),
                                sensitive_fields.join(", ")
                            )
                        }
                    }
                    crate::models::CheckOutcome::Unknown { error } => error.to_string(),
                };

                HtmlRow {
                    table: r.table.name.clone(),
                    role: r.table.role.to_string(),
                    status: if r.response.is_error() {
                        "ERR".to_string()
                    } else {
                        r.response.status.to_string()
                    },
                    verdict: verdict.to_string(),
                    verdict_class: Self::verdict_class(r.outcome.verdict()),
                    detail,
                }
            })
            .collect();

        context.insert("rows", &rows);

        let html = tera.render("report", &context)?;
        fs::write(path, html).with_context(|| format!("Failed to write to {}", path))?;
        Ok(())
    }

    fn verdict_class(verdict: Verdict) -> String {
        match verdict {
            Verdict::Secure => "secure",
            Verdict::Vulnerable => "vulnerable",
            Verdict::Unknown => "unknown",
        }.to_string()
    }

    fn get_template() -> String {
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Relatório RLS</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #0d1117; color: #c9d1d9; line-height: 1.6; }
        .container { max-width: 960px; margin: 0 auto; padding: 2rem; }
        h1 { color: #58a6ff; margin-bottom: 0.5rem; }
        .subtitle { color: #8b949e; margin-bottom: 2rem; }
        .banner { border-radius: 6px; padding: 1rem; margin-bottom: 2rem; font-weight: 600; }
        .banner.secure { background: #3fb95022; border: 1px solid #3fb950; color: #3fb950; }
        .banner.vulnerable { background: #f8514922; border: 1px solid #f85149; color: #f85149; }
        .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
        .stat { background: #161b22; border: 1px solid #30363d; border-radius: 6px; padding: 1rem; text-align: center; }
        .stat-value { font-size: 2rem; font-weight: bold; }
        .stat-label { color: #8b949e; font-size: 0.875rem; }
        .secure .stat-value { color: #3fb950; }
        .vulnerable .stat-value { color: #f85149; }
        .unknown .stat-value { color: #d29922; }
        table { width: 100%; border-collapse: collapse; background: #161b22; border: 1px solid #30363d; border-radius: 6px; overflow: hidden; }
        th, td { padding: 0.75rem 1rem; text-align: left; border-bottom: 1px solid #30363d; }
        th { background: #21262d; color: #c9d1d9; font-weight: 600; }
        tr:hover { background: #21262d; }
        .verdict { padding: 0.25rem 0.5rem; border-radius: 4px; font-size: 0.75rem; font-weight: 600; }
        .verdict.secure { background: #3fb95033; color: #3fb950; }
        .verdict.vulnerable { background: #f8514933; color: #f85149; }
        .verdict.unknown { background: #d2992233; color: #d29922; }
        .detail { font-size: 0.875rem; color: #8b949e; margin-top: 0.5rem; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Relatório RLS</h1>
        <p class="subtitle">Gerado em: {{ scan_time }}</p>

        {% if database_secure %}
        <div class="banner secure">✅ Banco de dados SEGURO — os dados dos usuários estão protegidos.</div>
        {% else %}
        <div class="banner vulnerable">❌ Banco de dados VULNERÁVEL — aplique a migration 0011_fix_profiles_rls.sql.</div>
        {% endif %}

        <div class="summary">
            <div class="stat">
                <div class="stat-value">{{ total_tables }}</div>
                <div class="stat-label">Tabelas</div>
            </div>
            <div class="stat secure">
                <div class="stat-value">{{ secure_count }}</div>
                <div class="stat-label">Seguras</div>
            </div>
            <div class="stat vulnerable">
                <div class="stat-value">{{ vulnerable_count }}</div>
                <div class="stat-label">Vulneráveis</div>
            </div>
            <div class="stat unknown">
                <div class="stat-value">{{ unknown_count }}</div>
                <div class="stat-label">Indefinidas</div>
            </div>
        </div>

        <table>
            <thead>
                <tr>
                    <th>Tabela</th>
                    <th>Papel</th>
                    <th>Status</th>
                    <th>Veredito</th>
                </tr>
            </thead>
            <tbody>
                {% for row in rows %}
                <tr>
                    <td>
                        {{ row.table }}
                        {% if row.detail %}
                        <div class="detail">{{ row.detail }}</div>
                        {% endif %}
                    </td>
                    <td>{{ row.role }}</td>
                    <td>{{ row.status }}</td>
                    <td><span class="verdict {{ row.verdict_class }}">{{ row.verdict }}</span></td>
                </tr>
                {% endfor %}
            </tbody>
        </table>
    </div>
</body>
</html>"#.to_string()
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct ExportData {
    scan_time: String,
    results: Vec<CheckResult>,
    summary: RunSummary,
}

#[derive(serde::Serialize)]
struct HtmlRow {
    table: String,
    role: String,
    status: String,
    verdict: String,
    verdict_class: String,
    detail: String,
}
