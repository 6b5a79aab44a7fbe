// 🏪 Alias Table - literal prefix → canonical brand overrides
// Checked before fuzzy clustering; first matching prefix wins.

use serde::{Deserialize, Serialize};

// ============================================================================
// ALIAS ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Literal prefix of a cleaned name (compared as-is, no wildcards)
    pub prefix: String,

    /// Brand name every matching cleaned name resolves to
    pub canonical: String,
}

impl AliasEntry {
    pub fn new(prefix: &str, canonical: &str) -> Self {
        AliasEntry {
            prefix: prefix.to_string(),
            canonical: canonical.to_string(),
        }
    }
}

// ============================================================================
// ALIAS TABLE
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn new(entries: Vec<AliasEntry>) -> Self {
        AliasTable { entries }
    }

    /// Built-in store and payment-processor prefixes
    pub fn with_defaults() -> Self {
        let pairs = [
            ("WM SUPERCENTER", "WALMART"),
            ("WALMART.COM", "WALMART"),
            ("WAL-MART", "WALMART"),
            ("WALMART WALMART", "WALMART"),
            ("WALMART 800", "WALMART"),
            ("SAMSCLUB", "SAMS CLUB"),
            ("HEB ONLINE", "HEB"),
            ("DD DOORDASH", "DOORDASH"),
            ("DOORDASH*", "DOORDASH"),
            ("IC* INSTACART", "INSTACART"),
            ("ATT*", "AT&T"),
            ("AMEX", "AMERICAN EXPRESS"),
            ("PP*", "PAYPAL"),
            ("SQ *", "SQUARE"),
            ("GRUBHUB*", "GRUBHUB"),
            ("UBER   *", "UBER"),
            ("APPLE.COM", "APPLE"),
            ("GOOGLE *", "GOOGLE"),
        ];

        AliasTable::new(
            pairs
                .iter()
                .map(|(prefix, canonical)| AliasEntry::new(prefix, canonical))
                .collect(),
        )
    }

    /// Canonical name for the first entry whose prefix starts `cleaned_name`
    pub fn lookup(&self, cleaned_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| !entry.prefix.is_empty() && cleaned_name.starts_with(entry.prefix.as_str()))
            .map(|entry| entry.canonical.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
