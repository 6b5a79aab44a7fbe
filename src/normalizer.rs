// 🔁 Normalizer - per-transaction lookup through the batch mapping
//
// clean → transfer? → exact key in map → best fuzzy match among canonicals
// → otherwise the cleaned name itself (never added back to the map)

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tracing::trace;

use crate::cleaner::TextCleaner;
use crate::similarity::similarity;

// ============================================================================
// NORMALIZATION MAP
// ============================================================================

/// cleaned name → canonical name, in first-insertion order
///
/// Built once per batch, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl NormalizationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mapping. A cleaned name keeps its first canonical; returns
    /// false if it was already present.
    pub fn insert(&mut self, cleaned: String, canonical: String) -> bool {
        if self.contains(&cleaned) {
            return false;
        }
        self.index.insert(cleaned.clone(), self.entries.len());
        self.entries.push((cleaned, canonical));
        true
    }

    pub fn get(&self, cleaned: &str) -> Option<&str> {
        self.index
            .get(cleaned)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, cleaned: &str) -> bool {
        self.index.contains_key(cleaned)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (cleaned, canonical) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Distinct canonical names, in order of first appearance
    pub fn canonicals(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .map(|(_, v)| v.as_str())
            .filter(|v| seen.insert(*v))
            .collect()
    }
}

impl Serialize for NormalizationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (cleaned, canonical) in &self.entries {
            map.serialize_entry(cleaned, canonical)?;
        }
        map.end()
    }
}

// ============================================================================
// NORMALIZER
// ============================================================================

#[derive(Debug, Clone)]
pub struct Normalizer {
    cleaner: TextCleaner,
    threshold: u8,
}

impl Normalizer {
    pub fn new(cleaner: TextCleaner, threshold: u8) -> Self {
        Normalizer { cleaner, threshold }
    }

    /// Canonical company name for one raw description
    pub fn normalize(&self, raw: &str, map: &NormalizationMap) -> String {
        let cleaned = self.cleaner.clean(raw);

        // Transfers are self-canonical even when unseen in the batch
        if self.cleaner.guard().is_transfer(&cleaned) {
            return cleaned;
        }

        if let Some(canonical) = map.get(&cleaned) {
            return canonical.to_string();
        }

        match self.best_match(&cleaned, map.canonicals()) {
            Some(known) => {
                trace!(cleaned = %cleaned, canonical = %known, "fuzzy fallback matched");
                known.to_string()
            }
            None => cleaned,
        }
    }

    /// Highest-scoring candidate at or above the threshold; earliest wins ties
    pub fn best_match<'a, I>(&self, name: &str, candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&'a str, u8)> = None;

        for candidate in candidates {
            let score = similarity(name, candidate);
            if score < self.threshold {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }

        best.map(|(candidate, _)| candidate)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::DEFAULT_THRESHOLD;
    use crate::transfer::TransferGuard;

    fn normalizer() -> Normalizer {
        Normalizer::new(TextCleaner::new(TransferGuard::default()).unwrap(), DEFAULT_THRESHOLD)
    }

    fn sample_map() -> NormalizationMap {
        let mut map = NormalizationMap::new();
        map.insert("WAL-MART".to_string(), "WALMART".to_string());
        map.insert("STARBUCKS".to_string(), "STARBUCKS".to_string());
        map.insert("STARBUCKS STORE".to_string(), "STARBUCKS".to_string());
        map.insert("CHIPOTLE ONLINE".to_string(), "CHIPOTLE ONLINE".to_string());
        map
    }

    #[test]
    fn test_map_keeps_first_insert() {
        let mut map = NormalizationMap::new();

        assert!(map.insert("A".to_string(), "X".to_string()));
        assert!(!map.insert("A".to_string(), "Y".to_string()));
        assert_eq!(map.get("A"), Some("X"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_canonicals_are_distinct_and_ordered() {
        assert_eq!(
            sample_map().canonicals(),
            vec!["WALMART", "STARBUCKS", "CHIPOTLE ONLINE"]
        );
    }

    #[test]
    fn test_map_serializes_in_order() {
        let json = serde_json::to_string(&sample_map()).unwrap();
        assert!(json.starts_with(r#"{"WAL-MART":"WALMART","STARBUCKS":"STARBUCKS""#));
    }

    #[test]
    fn test_exact_key() {
        assert_eq!(normalizer().normalize("WAL-MART #2637", &sample_map()), "WALMART");
        assert_eq!(normalizer().normalize("Starbucks Store #77", &sample_map()), "STARBUCKS");
    }

    #[test]
    fn test_fuzzy_fallback_against_canonicals() {
        // "CHIPOTLE ONLIN" is not a key, but is close to a canonical value
        assert_eq!(
            normalizer().normalize("CHIPOTLE ONLIN", &sample_map()),
            "CHIPOTLE ONLINE"
        );
    }

    #[test]
    fn test_fallback_ignores_non_canonical_keys() {
        // Close to the key "WAL-MART" but not to any canonical value
        let mut map = NormalizationMap::new();
        map.insert("WAL-MART".to_string(), "WALMART".to_string());

        assert_eq!(normalizer().normalize("WAL-MART X", &map), "WAL-MART X");
    }

    #[test]
    fn test_unmatched_returns_cleaned() {
        let map = sample_map();
        let n = normalizer();

        assert_eq!(n.normalize("BLUE BOTTLE COFFEE #12", &map), "BLUE BOTTLE COFFEE");
        // Not added: map is unchanged
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_transfer_is_self_canonical() {
        let mut map = NormalizationMap::new();
        map.insert(
            "ZELLE PAYMENT TO JOHN DOF".to_string(),
            "ZELLE PAYMENT TO JOHN DOF".to_string(),
        );

        assert_eq!(
            normalizer().normalize("zelle payment to john doe", &map),
            "ZELLE PAYMENT TO JOHN DOE"
        );
    }

    #[test]
    fn test_best_match_prefers_highest_then_earliest() {
        let n = normalizer();

        assert_eq!(n.best_match("STARBUCKS", ["STARBUCK", "STARBUCKS"]), Some("STARBUCKS"));
        // equal scores: earliest candidate wins
        assert_eq!(n.best_match("ABCDEFGHIJ", ["ABCDEFGHIX", "ABCDEFGHIY"]), Some("ABCDEFGHIX"));
        assert_eq!(n.best_match("STARBUCKS", ["AMAZON"]), None);
    }

    #[test]
    fn test_threshold_is_inclusive_for_fallback() {
        // LCS 17 over 40 chars → exactly 85
        let a = "ABCDEFGHIJKLMNOPQRST";
        let b = "ABCDEFGHIJKLMNOPQXYZ";
        assert_eq!(similarity(a, b), 85);

        let n = Normalizer::new(TextCleaner::new(TransferGuard::default()).unwrap(), 85);
        assert_eq!(n.best_match(a, [b]), Some(b));

        let strict = Normalizer::new(TextCleaner::new(TransferGuard::default()).unwrap(), 86);
        assert_eq!(strict.best_match(a, [b]), None);
    }
}
