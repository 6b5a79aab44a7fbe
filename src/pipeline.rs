// 🔗 Resolution Pipeline - attach company and category to every row
//
// 1. Build the normalization map once over all descriptions
// 2. Normalize each row through it
// 3. Consolidate the normalized names (second greedy pass)
// 4. Categorize each raw description independently

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

use crate::ledger::Transaction;
use crate::resolver::Resolver;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,

    /// Per-row result of the normalization map
    pub normalized: String,

    /// Final company after consolidation
    pub company: String,

    pub category: String,
}

impl ResolvedTransaction {
    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }
}

pub fn resolve_transactions(resolver: &Resolver, transactions: &[Transaction]) -> Vec<ResolvedTransaction> {
    let descriptions: Vec<&str> = transactions.iter().map(|t| t.description.as_str()).collect();
    let map = resolver.build_groups(&descriptions);

    let normalized: Vec<String> = descriptions
        .iter()
        .map(|raw| resolver.normalize(raw, &map))
        .collect();

    let companies = {
        let mut seen = HashSet::new();
        let distinct: Vec<String> = normalized
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect();
        resolver.clusterer().consolidate(&distinct)
    };

    let resolved: Vec<ResolvedTransaction> = transactions
        .iter()
        .zip(normalized)
        .map(|(tx, normalized)| {
            let company = companies.get(&normalized).unwrap_or(normalized.as_str()).to_string();
            ResolvedTransaction {
                date: tx.date,
                description: tx.description.clone(),
                amount: tx.amount,
                category: resolver.categorize(&tx.description).to_string(),
                normalized,
                company,
            }
        })
        .collect();

    info!(
        transactions = resolved.len(),
        companies = companies.canonicals().len(),
        "resolved transactions"
    );

    resolved
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(day: u32, description: &str, amount: f64) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(2024, 3, day).unwrap(), description, amount)
    }

    #[test]
    fn test_resolves_company_and_category() {
        let resolver = Resolver::with_defaults().unwrap();
        let txs = vec![
            tx(1, "WAL-MART #2637", -20.0),
            tx(2, "WM SUPERCENTER #1129", -30.0),
            tx(3, "STARBUCKS STORE #05123", -5.0),
            tx(4, "ZELLE PAYMENT TO JOHN DOE", -100.0),
        ];

        let resolved = resolve_transactions(&resolver, &txs);

        assert_eq!(resolved.len(), 4);
        assert_eq!(resolved[0].company, "WALMART");
        assert_eq!(resolved[1].company, "WALMART");
        // categories come from the raw text, not the resolved company
        assert_eq!(resolved[0].category, "Other");
        assert_eq!(resolved[2].company, "STARBUCKS STORE");
        assert_eq!(resolved[2].category, "Food & Dining");
        assert_eq!(resolved[3].company, "ZELLE PAYMENT TO JOHN DOE");
        assert_eq!(resolved[3].category, "Transfers");
    }

    #[test]
    fn test_preserves_row_fields() {
        let resolver = Resolver::with_defaults().unwrap();
        let txs = vec![tx(7, "NETFLIX 866-579-7172, CA", -15.49)];

        let resolved = resolve_transactions(&resolver, &txs);

        assert_eq!(resolved[0].date, txs[0].date);
        assert_eq!(resolved[0].description, "NETFLIX 866-579-7172, CA");
        assert_eq!(resolved[0].amount, -15.49);
        assert!(resolved[0].is_outflow());
        assert_eq!(resolved[0].normalized, "NETFLIX");
        assert_eq!(resolved[0].category, "Entertainment");
    }

    #[test]
    fn test_empty_batch() {
        let resolver = Resolver::with_defaults().unwrap();
        assert!(resolve_transactions(&resolver, &[]).is_empty());
    }
}
