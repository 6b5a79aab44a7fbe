// 📊 Spending Report - totals by company, overall flows, outflows by category
// Averages use a 30.44-day month over the ledger's date span.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::pipeline::ResolvedTransaction;
use crate::rules::{CategoryTable, OTHER_CATEGORY};

/// Average days per month
pub const DAYS_PER_MONTH: f64 = 30.44;

/// Companies shown by default
pub const DEFAULT_TOP_COMPANIES: usize = 40;

// ============================================================================
// REPORT PERIOD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub months: f64,
    pub years: f64,
}

impl ReportPeriod {
    /// Earliest to latest date; None for an empty ledger
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<Self> {
        let mut iter = dates.into_iter();
        let first = iter.next()?;
        let (start, end) = iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

        let months = (end - start).num_days() as f64 / DAYS_PER_MONTH;
        Some(ReportPeriod {
            start,
            end,
            months,
            years: months / 12.0,
        })
    }

    /// Per-month average, absent when the span is zero days
    pub fn monthly(&self, total: f64) -> Option<f64> {
        (self.months > 0.0).then(|| total / self.months)
    }

    pub fn yearly(&self, total: f64) -> Option<f64> {
        (self.years > 0.0).then(|| total / self.years)
    }
}

// ============================================================================
// REPORT ROWS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySpending {
    pub company: String,

    /// Absolute value of the signed sum
    pub total_amount: f64,
    pub transaction_count: usize,
    pub monthly_average: Option<f64>,
    pub yearly_average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSummary {
    pub total: f64,
    pub monthly_average: Option<f64>,
    pub yearly_average: Option<f64>,
}

impl FlowSummary {
    fn new(total: f64, period: Option<&ReportPeriod>) -> Self {
        FlowSummary {
            total,
            monthly_average: period.and_then(|p| p.monthly(total)),
            yearly_average: period.and_then(|p| p.yearly(total)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalFlows {
    pub deposits: FlowSummary,
    pub withdrawals: FlowSummary,
    pub net: FlowSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFlow {
    pub category: String,

    /// Absolute value of outflows in this category
    pub total_amount: f64,
    pub transaction_count: usize,

    /// Percent of the largest category's total (the largest is 100)
    pub share_of_max: f64,

    /// Keywords that route descriptions into this category
    pub keywords: Vec<String>,
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub period: Option<ReportPeriod>,
    pub companies: Vec<CompanySpending>,
    pub flows: TotalFlows,
    pub categories: Vec<CategoryFlow>,
}

impl Report {
    pub fn build(transactions: &[ResolvedTransaction], categories: &CategoryTable, top: usize) -> Self {
        let period = ReportPeriod::from_dates(transactions.iter().map(|t| t.date));

        Report {
            companies: company_spending(transactions, period.as_ref(), top),
            flows: total_flows(transactions, period.as_ref()),
            categories: category_flows(transactions, categories),
            period,
        }
    }
}

/// Per-company totals, largest first, truncated to `top`
pub fn company_spending(
    transactions: &[ResolvedTransaction],
    period: Option<&ReportPeriod>,
    top: usize,
) -> Vec<CompanySpending> {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for tx in transactions {
        let entry = sums.entry(tx.company.as_str()).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let mut rows: Vec<CompanySpending> = sums
        .into_iter()
        .map(|(company, (sum, count))| {
            let total = sum.abs();
            CompanySpending {
                company: company.to_string(),
                total_amount: total,
                transaction_count: count,
                monthly_average: period.and_then(|p| p.monthly(total)),
                yearly_average: period.and_then(|p| p.yearly(total)),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_amount
            .total_cmp(&a.total_amount)
            .then_with(|| a.company.cmp(&b.company))
    });
    rows.truncate(top);
    rows
}

pub fn total_flows(transactions: &[ResolvedTransaction], period: Option<&ReportPeriod>) -> TotalFlows {
    let deposits: f64 = transactions.iter().filter(|t| t.amount > 0.0).map(|t| t.amount).sum();
    let withdrawals: f64 = transactions
        .iter()
        .filter(|t| t.is_outflow())
        .map(|t| t.amount)
        .sum::<f64>()
        .abs();

    TotalFlows {
        deposits: FlowSummary::new(deposits, period),
        withdrawals: FlowSummary::new(withdrawals, period),
        net: FlowSummary::new(deposits - withdrawals, period),
    }
}

/// Outflows only, grouped by category, largest first
///
/// Each row carries its keywords from `table` (categories missing from the
/// table, such as "Other", list their own name) and its size relative to the
/// largest category.
pub fn category_flows(transactions: &[ResolvedTransaction], table: &CategoryTable) -> Vec<CategoryFlow> {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.is_outflow()) {
        let entry = sums.entry(tx.category.as_str()).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let mut rows: Vec<CategoryFlow> = sums
        .into_iter()
        .map(|(category, (sum, count))| CategoryFlow {
            category: category.to_string(),
            total_amount: sum.abs(),
            transaction_count: count,
            share_of_max: 0.0,
            keywords: table
                .keywords_for(category)
                .map(|k| k.to_vec())
                .unwrap_or_else(|| vec![category.to_string()]),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_amount
            .total_cmp(&a.total_amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    let max = rows.first().map(|r| r.total_amount).unwrap_or(0.0);
    if max > 0.0 {
        for row in &mut rows {
            row.share_of_max = row.total_amount / max * 100.0;
        }
    }
    rows
}

// ============================================================================
// TESTS
// ============================================================================
