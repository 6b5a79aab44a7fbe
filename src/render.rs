// 🖨️ Report Rendering - plain-text tables and JSON

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, CellAlignment, Table};
use std::fmt::Write;

use crate::normalizer::NormalizationMap;
use crate::report::{FlowSummary, Report};

/// "$1,234.56" / "-$1,234.56"
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let digits = dollars.to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

fn format_optional(amount: Option<f64>) -> String {
    amount.map(format_currency).unwrap_or_else(|| "n/a".to_string())
}

/// Styled table; columns from `numeric_from` on are right-aligned
fn create_table(headers: &[&str], numeric_from: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(headers.to_vec());
    for i in numeric_from..headers.len() {
        if let Some(column) = table.column_mut(i) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

fn flow_row(label: &str, flow: &FlowSummary) -> Vec<String> {
    vec![
        label.to_string(),
        format_currency(flow.total),
        format_optional(flow.monthly_average),
        format_optional(flow.yearly_average),
    ]
}

pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    if let Some(period) = &report.period {
        let _ = writeln!(out, "Period: {} to {} ({:.1} months)\n", period.start, period.end, period.months);
    }

    let _ = writeln!(out, "Top {} Companies by Transaction Volume", report.companies.len());
    let mut companies = create_table(
        &["Company", "Total Amount", "Monthly Average", "Yearly Average", "Transaction Count"],
        1,
    );
    for c in &report.companies {
        companies.add_row(vec![
            c.company.clone(),
            format_currency(c.total_amount),
            format_optional(c.monthly_average),
            format_optional(c.yearly_average),
            c.transaction_count.to_string(),
        ]);
    }
    let _ = writeln!(out, "{}", companies);

    let _ = writeln!(out, "\nTotal Money Flows");
    let mut flows = create_table(&["Type", "Total", "Monthly Average", "Yearly Average"], 1);
    flows.add_row(flow_row("Deposits", &report.flows.deposits));
    flows.add_row(flow_row("Withdrawals", &report.flows.withdrawals));
    flows.add_row(flow_row("Net Flow", &report.flows.net));
    let _ = writeln!(out, "{}", flows);

    let total_spending: f64 = report.categories.iter().map(|c| c.total_amount).sum();
    let _ = writeln!(out, "\nSpending by Category (Total Spending: {})", format_currency(total_spending));
    let mut categories = create_table(
        &["Category", "Keywords", "Total Amount", "Transaction Count", "Share"],
        2,
    );
    for c in &report.categories {
        categories.add_row(vec![
            c.category.clone(),
            c.keywords.join(", "),
            format_currency(c.total_amount),
            c.transaction_count.to_string(),
            format!("{:.1}%", c.share_of_max),
        ]);
    }
    let _ = writeln!(out, "{}", categories);

    out
}

pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

/// "cleaned → canonical" rows, in map order
pub fn render_map_text(map: &NormalizationMap) -> String {
    let mut table = create_table(&["Cleaned Name", "Canonical Name"], 2);
    for (cleaned, canonical) in map.iter() {
        table.add_row(vec![cleaned, canonical]);
    }
    format!("{}\n", table)
}

// ============================================================================
// TESTS
// ============================================================================
