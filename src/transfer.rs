// 🔒 Transfer Guard - descriptions that must never be fuzzily merged
// Wire transfers and peer-payment apps share prefixes ("ZELLE PAYMENT TO ...")
// with unrelated payees, so they always resolve to themselves.

use serde::{Deserialize, Serialize};

/// Default markers for transfer-type descriptions
pub const DEFAULT_TRANSFER_KEYWORDS: &[&str] = &["ZELLE", "INTERNET TRANSFER", "TRANSFER TO"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferGuard {
    /// Uppercased literal markers
    keywords: Vec<String>,
}

impl TransferGuard {
    /// Build a guard from literal markers (matched case-insensitively)
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        TransferGuard {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_uppercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// True when the uppercased description contains any marker
    pub fn is_transfer(&self, description: &str) -> bool {
        let upper = description.to_uppercase();
        self.keywords.iter().any(|k| upper.contains(k.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for TransferGuard {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSFER_KEYWORDS)
    }
}

// ============================================================================
// TESTS
// ============================================================================
