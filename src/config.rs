// ⚙️ Resolver Configuration - tables and thresholds as data
// Everything the engine treats as policy lives here, loadable from JSON.
// Omitted fields fall back to the built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::aliases::AliasTable;
use crate::clustering::ScanOrder;
use crate::rules::CategoryTable;
use crate::similarity::DEFAULT_THRESHOLD;
use crate::transfer::DEFAULT_TRANSFER_KEYWORDS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Similarity score (0-100) above which names merge
    pub similarity_threshold: u8,

    /// Markers for descriptions that must never be merged
    pub transfer_keywords: Vec<String>,

    /// Prefix → canonical overrides, first match wins
    pub aliases: AliasTable,

    /// Category → keywords, first match wins
    pub categories: CategoryTable,

    /// Visiting order for the clustering pass
    pub scan_order: ScanOrder,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            similarity_threshold: DEFAULT_THRESHOLD,
            transfer_keywords: DEFAULT_TRANSFER_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            aliases: AliasTable::with_defaults(),
            categories: CategoryTable::with_defaults(),
            scan_order: ScanOrder::default(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
            .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ResolverConfig =
            serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.similarity_threshold > 100 {
            anyhow::bail!(
                "similarity_threshold must be between 0 and 100, got {}",
                self.similarity_threshold
            );
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }
}

// ============================================================================
// TESTS
// ============================================================================
