// 📂 Ledger - load transactions from CSV
// Expected headers: Date, Description, Amount (extra columns are ignored)
// Amount is signed: negative = money out.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: &str, amount: f64) -> Self {
        Transaction {
            date,
            description: description.to_string(),
            amount,
        }
    }
}

/// Row as it appears in the file, before validation
#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Date")]
    date: String,

    #[serde(rename = "Description", default)]
    description: String,

    #[serde(rename = "Amount")]
    amount: String,
}

pub fn load_csv(csv_path: &Path) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open file: {}", csv_path.display()))?;

    let transactions = read_transactions(file)
        .with_context(|| format!("Failed to load ledger: {}", csv_path.display()))?;

    info!(path = %csv_path.display(), count = transactions.len(), "loaded ledger");
    Ok(transactions)
}

/// Parse a ledger from any reader (headers required)
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();

    for (index, result) in rdr.deserialize::<LedgerRow>().enumerate() {
        // +2: 1-indexed plus the header row
        let line = index + 2;
        let row = result.with_context(|| format!("Failed to parse CSV line {}", line))?;

        let date = parse_date(&row.date)
            .ok_or_else(|| anyhow!("Line {}: invalid date {:?}", line, row.date))?;
        let amount = parse_amount(&row.amount)
            .ok_or_else(|| anyhow!("Line {}: invalid amount {:?}", line, row.amount))?;

        transactions.push(Transaction {
            date,
            description: row.description,
            amount,
        });
    }

    Ok(transactions)
}

/// Parse date from string (supports YYYY-MM-DD, MM/DD/YYYY and MM/DD/YY)
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let s = date_str.trim();

    // Two-digit years first: %Y would read "24" as year 24
    ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a signed amount: "-45.99", "$1,234.50", "-$855.94"
pub fn parse_amount(amount_str: &str) -> Option<f64> {
    let s = amount_str.trim();
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let digits = unsigned.strip_prefix('$').unwrap_or(unsigned).replace(',', "");
    if digits.is_empty() {
        return None;
    }

    let value: f64 = digits.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(if negative { -value } else { value })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-12-25"), Some(date(2024, 12, 25)));
        assert_eq!(parse_date("12/25/2024"), Some(date(2024, 12, 25)));
        assert_eq!(parse_date(" 1/5/24 "), Some(date(2024, 1, 5)));
        assert_eq!(parse_date("25.12.2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("-45.99"), Some(-45.99));
        assert_eq!(parse_amount("100"), Some(100.0));
        assert_eq!(parse_amount("$1,234.50"), Some(1234.5));
        assert_eq!(parse_amount("-$855.94"), Some(-855.94));
        assert_eq!(parse_amount("+12.00"), Some(12.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_read_transactions_trims_headers_and_fields() {
        let csv = "Date , Description ,Amount,Type\n\
                   2024-01-02, STARBUCKS STORE #05123 ,-5.75,Withdrawal\n\
                   01/03/2024,PAYROLL ACME,\"2,500.00\",Deposit\n";
        let txs = read_transactions(csv.as_bytes()).unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0], Transaction::new(date(2024, 1, 2), "STARBUCKS STORE #05123", -5.75));
        assert_eq!(txs[1].amount, 2500.0);
    }

    #[test]
    fn test_bad_amount_reports_line() {
        let csv = "Date,Description,Amount\n2024-01-02,A,1.00\n2024-01-03,B,oops\n";
        let err = read_transactions(csv.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("Line 3"), "{}", err);
    }

    #[test]
    fn test_bad_date_reports_line() {
        let csv = "Date,Description,Amount\nyesterday,A,1.00\n";
        let err = read_transactions(csv.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("Line 2"), "{}", err);
    }

    #[test]
    fn test_missing_column_is_error() {
        let csv = "Date,Description\n2024-01-02,A\n";
        assert!(read_transactions(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_csv_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Description,Amount").unwrap();
        writeln!(file, "2024-02-01,NETFLIX.COM,-15.49").unwrap();

        let txs = load_csv(file.path()).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].description, "NETFLIX.COM");
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv(Path::new("/nonexistent/ledger.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open file"));
    }
}
