// 🎯 Resolver - one configured instance of the whole engine
// Clean, group, normalize and categorize with a shared configuration.

use anyhow::Result;
use tracing::{debug, warn};

use crate::clustering::Clusterer;
use crate::config::ResolverConfig;
use crate::cleaner::TextCleaner;
use crate::normalizer::{NormalizationMap, Normalizer};
use crate::rules::{Categorizer, CategoryTable};
use crate::transfer::TransferGuard;

#[derive(Debug, Clone)]
pub struct Resolver {
    cleaner: TextCleaner,
    clusterer: Clusterer,
    normalizer: Normalizer,
    categorizer: Categorizer,
}

impl Resolver {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        config.validate()?;

        let guard = TransferGuard::new(&config.transfer_keywords);
        let cleaner = TextCleaner::new(guard)?;

        if config.categories.is_empty() {
            warn!("no category rules configured; every row will be Other");
        }
        debug!(
            threshold = config.similarity_threshold,
            aliases = config.aliases.len(),
            categories = config.categories.len(),
            scan_order = ?config.scan_order,
            "resolver configured"
        );

        Ok(Resolver {
            clusterer: Clusterer::new(
                cleaner.clone(),
                config.aliases.clone(),
                config.similarity_threshold,
                config.scan_order,
            ),
            normalizer: Normalizer::new(cleaner.clone(), config.similarity_threshold),
            categorizer: Categorizer::new(config.categories.clone()),
            cleaner,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(&ResolverConfig::default())
    }

    pub fn clean(&self, raw: &str) -> String {
        self.cleaner.clean(raw)
    }

    pub fn is_transfer(&self, description: &str) -> bool {
        self.cleaner.guard().is_transfer(description)
    }

    /// Build the batch mapping (run once, before any `normalize`)
    pub fn build_groups<S: AsRef<str>>(&self, descriptions: &[S]) -> NormalizationMap {
        self.clusterer.build_groups(descriptions)
    }

    pub fn normalize(&self, raw: &str, map: &NormalizationMap) -> String {
        self.normalizer.normalize(raw, map)
    }

    pub fn categorize(&self, raw: &str) -> &str {
        self.categorizer.categorize(raw)
    }

    pub fn clusterer(&self) -> &Clusterer {
        &self.clusterer
    }

    /// Category table in effect, for reports that list keywords
    pub fn categories(&self) -> &CategoryTable {
        self.categorizer.table()
    }
}

// ============================================================================
// TESTS
// ============================================================================
