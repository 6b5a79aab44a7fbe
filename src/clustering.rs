// 🧩 Clustering Engine - group near-duplicate merchant names
// Builds the cleaned-name → canonical-name map for one batch.
//
// Single greedy pass, not transitive closure: if A ~ B and B ~ C but not
// A ~ C, whether C joins depends on which name the scan reaches first.
// The scan order is therefore a parameter, not an accident of hashing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::aliases::AliasTable;
use crate::cleaner::TextCleaner;
use crate::normalizer::NormalizationMap;
use crate::similarity::similarity;

// ============================================================================
// SCAN ORDER
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Order of first occurrence in the batch
    #[default]
    FirstSeen,

    /// Ascending byte order, independent of input order
    Sorted,
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Names judged equivalent, with the representative every member maps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyGroup {
    pub canonical: String,

    /// Members in scan order; always contains `canonical`
    pub members: Vec<String>,
}

/// How one distinct cleaned name (or group of names) was resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Transfer or empty name: maps to itself, never merged
    SelfMapped(String),

    /// Alias table prefix hit
    Alias { name: String, canonical: String },

    /// Fuzzy group (possibly a singleton)
    Group(CompanyGroup),
}

impl Resolution {
    /// (cleaned, canonical) pairs this resolution contributes
    pub fn assignments(&self) -> Vec<(&str, &str)> {
        match self {
            Resolution::SelfMapped(name) => vec![(name.as_str(), name.as_str())],
            Resolution::Alias { name, canonical } => vec![(name.as_str(), canonical.as_str())],
            Resolution::Group(group) => group
                .members
                .iter()
                .map(|m| (m.as_str(), group.canonical.as_str()))
                .collect(),
        }
    }
}

// ============================================================================
// CLUSTERER
// ============================================================================

#[derive(Debug, Clone)]
pub struct Clusterer {
    cleaner: TextCleaner,
    aliases: AliasTable,

    /// Merge when similarity is strictly above this (default: 85)
    threshold: u8,

    scan_order: ScanOrder,
}

impl Clusterer {
    pub fn new(cleaner: TextCleaner, aliases: AliasTable, threshold: u8, scan_order: ScanOrder) -> Self {
        Clusterer {
            cleaner,
            aliases,
            threshold,
            scan_order,
        }
    }

    /// Clean, group and flatten a batch of raw descriptions
    pub fn build_groups<S: AsRef<str>>(&self, descriptions: &[S]) -> NormalizationMap {
        let names = self.distinct_names(descriptions);
        let resolutions = self.partition(&names);

        let mut map = NormalizationMap::new();
        for resolution in &resolutions {
            for (cleaned, canonical) in resolution.assignments() {
                map.insert(cleaned.to_string(), canonical.to_string());
            }
        }

        debug!(
            descriptions = descriptions.len(),
            distinct = names.len(),
            canonicals = map.canonicals().len(),
            "built normalization map"
        );

        map
    }

    /// Distinct cleaned names in the configured scan order
    pub fn distinct_names<S: AsRef<str>>(&self, descriptions: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names: Vec<String> = descriptions
            .iter()
            .map(|d| self.cleaner.clean(d.as_ref()))
            .filter(|name| seen.insert(name.clone()))
            .collect();

        if self.scan_order == ScanOrder::Sorted {
            names.sort();
        }

        names
    }

    /// Resolve every name in `names`, visiting them in the given order
    ///
    /// `names` is expected to be distinct; duplicates are resolved once.
    pub fn partition(&self, names: &[String]) -> Vec<Resolution> {
        let guard = self.cleaner.guard();
        let mut processed = vec![false; names.len()];
        let mut resolutions = Vec::new();

        for i in 0..names.len() {
            if processed[i] {
                continue;
            }
            processed[i] = true;
            let name = &names[i];

            if name.is_empty() || guard.is_transfer(name) {
                resolutions.push(Resolution::SelfMapped(name.clone()));
                continue;
            }

            if let Some(canonical) = self.aliases.lookup(name) {
                resolutions.push(Resolution::Alias {
                    name: name.clone(),
                    canonical: canonical.to_string(),
                });
                continue;
            }

            // Greedy neighbor scan over what is still unclaimed
            let mut members = vec![name.clone()];
            for j in (i + 1)..names.len() {
                if processed[j] {
                    continue;
                }
                let other = &names[j];
                if other == name {
                    processed[j] = true;
                    continue;
                }
                if guard.is_transfer(other) {
                    continue;
                }
                if similarity(name, other) > self.threshold {
                    members.push(other.clone());
                    processed[j] = true;
                }
            }

            resolutions.push(Resolution::Group(CompanyGroup {
                canonical: shortest(&members).to_string(),
                members,
            }));
        }

        resolutions
    }

    /// Second greedy pass over already-normalized names
    ///
    /// Each group is represented by its first name in scan order (not the
    /// shortest), and aliases are not consulted. Transfers map to themselves.
    pub fn consolidate(&self, names: &[String]) -> NormalizationMap {
        let guard = self.cleaner.guard();
        let mut processed = vec![false; names.len()];
        let mut map = NormalizationMap::new();

        for i in 0..names.len() {
            if processed[i] {
                continue;
            }
            processed[i] = true;
            let head = &names[i];
            map.insert(head.clone(), head.clone());

            if head.is_empty() || guard.is_transfer(head) {
                continue;
            }

            for j in (i + 1)..names.len() {
                if processed[j] || guard.is_transfer(&names[j]) {
                    continue;
                }
                if similarity(head, &names[j]) > self.threshold {
                    map.insert(names[j].clone(), head.clone());
                    processed[j] = true;
                }
            }
        }

        map
    }
}

/// Shortest member by character count; the earliest wins ties
fn shortest(members: &[String]) -> &str {
    members
        .iter()
        .min_by_key(|m| m.chars().count())
        .map(|m| m.as_str())
        .unwrap_or_default()
}

// ============================================================================
// TESTS
// ============================================================================
