// 🧹 Text Cleaner - strip noise from raw transaction descriptions
// "WALMART.COM 8009256278 702 SW 8TH ST BENTONVILLE, AR, US" → "WALMART.COM 702 SW"
//
// Patterns run once each, in a fixed order. Later patterns see the output of
// earlier ones, so the order is part of the contract.

use anyhow::{Context, Result};
use regex::Regex;

use crate::transfer::TransferGuard;

// ============================================================================
// NOISE PATTERNS
// ============================================================================

/// How many times a pattern is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Passes {
    Once,

    /// Re-applied until the text stops changing
    UntilStable,
}

/// (pattern, replacement, passes), applied top to bottom
const NOISE_PATTERNS: &[(&str, &str, Passes)] = &[
    // Account / order numbers
    (r"\s+\d{6,}", "", Passes::Once),
    // Store codes
    (r"#\d+", "", Passes::Once),
    (r"F\d{4,}", "", Passes::Once),
    // Payment-processor reference codes (SQ *ABC123, AMZN MKTP US*2K4RT0)
    (r"\*[A-Z0-9]+", "", Passes::Once),
    // Payment-method suffixes
    (r"\s+PMT\s*$", "", Passes::Once),
    (r"\s+RETRY\s+PYMT\s*$", "", Passes::Once),
    (r"ACH\s+PMT\s*$", "", Passes::Once),
    (r"AUTO\s+PYMT\s*$", "", Passes::Once),
    (r"\s+MOBILE\s+PMT\s*$", "", Passes::Once),
    (r"\s+ONLINE\s+PMT\s*$", "", Passes::Once),
    // Phone numbers
    (r"\b\d{3}-\d{3}-\d{4}\b", "", Passes::Once),
    // Street addresses
    (r"\b\d{1,3}\s*[A-Z\s]+ST[A-Z\s]*\b", "", Passes::Once),
    (
        r"\s+\d{1,5}\s+[A-Z\s]+(?:STREET|ST|AVENUE|AVE|ROAD|RD|DRIVE|DR|LANE|LN|BLVD|PARKWAY|PKWY|PKY|HWY)\b",
        "",
        Passes::Once,
    ),
    // ZIP / ZIP+4, only when whitespace-delimited; delimiters are kept.
    // A match consumes its trailing delimiter, so back-to-back codes need
    // another pass.
    (r"(\s)\d{5}(?:-\d{4})?(\s|$)", "${1}${2}", Passes::UntilStable),
    // URLs
    (r"WWW\.[A-Z0-9.-]+\.[A-Z]{2,}", "", Passes::Once),
    (r"\.COM/?[A-Z]*\s*$", "", Passes::Once),
    // ", STATE, COUNTRY" and ", STATE"
    (r",\s*[A-Z]{2},\s*USA?$", "", Passes::Once),
    (r",\s*[A-Z]{2}\s*$", "", Passes::Once),
];

#[derive(Debug, Clone)]
struct NoisePattern {
    regex: Regex,
    replacement: &'static str,
    passes: Passes,
}

impl NoisePattern {
    fn apply(&self, mut text: String) -> String {
        loop {
            let next = self.regex.replace_all(&text, self.replacement).into_owned();
            if self.passes == Passes::Once || next == text {
                return next;
            }
            text = next;
        }
    }
}

// ============================================================================
// TEXT CLEANER
// ============================================================================

#[derive(Debug, Clone)]
pub struct TextCleaner {
    guard: TransferGuard,
    patterns: Vec<NoisePattern>,
}

impl TextCleaner {
    /// Compile the noise patterns. Transfer descriptions bypass them.
    pub fn new(guard: TransferGuard) -> Result<Self> {
        let patterns = NOISE_PATTERNS
            .iter()
            .map(|(pattern, replacement, passes)| {
                Regex::new(pattern)
                    .with_context(|| format!("Failed to compile noise pattern: {}", pattern))
                    .map(|regex| NoisePattern {
                        regex,
                        replacement: *replacement,
                        passes: *passes,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TextCleaner { guard, patterns })
    }

    /// Canonicalize a raw description into a cleaned name
    ///
    /// Transfers come back uppercased and trimmed, nothing else.
    pub fn clean(&self, raw: &str) -> String {
        let upper = raw.trim().to_uppercase();

        if upper.is_empty() || self.guard.is_transfer(&upper) {
            return upper;
        }

        let stripped = self.patterns.iter().fold(upper, |text, p| p.apply(text));

        stripped
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .trim_matches(|c: char| c == '*' || c == ' ')
            .to_string()
    }

    pub fn guard(&self) -> &TransferGuard {
        &self.guard
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> TextCleaner {
        TextCleaner::new(TransferGuard::default()).unwrap()
    }

    #[test]
    fn test_walmart_full_address() {
        let cleaned = cleaner().clean("WALMART.COM 8009256278 702 SW 8TH ST BENTONVILLE, AR, US");
        assert_eq!(cleaned, "WALMART.COM 702 SW");
        assert!(cleaned.starts_with("WALMART"));
    }

    #[test]
    fn test_store_codes() {
        let c = cleaner();
        assert_eq!(c.clean("WAL-MART #2637"), "WAL-MART");
        assert_eq!(c.clean("WM SUPERCENTER #1129"), "WM SUPERCENTER");
        assert_eq!(c.clean("starbucks store #05123"), "STARBUCKS STORE");
    }

    #[test]
    fn test_processor_reference_codes() {
        let c = cleaner();
        assert_eq!(c.clean("AMZN MKTP US*2K4RT0"), "AMZN MKTP US");
        assert_eq!(c.clean("SQ *BLUE BOTTLE"), "SQ BOTTLE");
    }

    #[test]
    fn test_payment_suffixes() {
        let c = cleaner();
        assert_eq!(c.clean("SYNCHRONY BANK PMT"), "SYNCHRONY BANK");
        assert_eq!(c.clean("CHASE RETRY PYMT"), "CHASE");
        assert_eq!(c.clean("GEICO AUTO PYMT"), "GEICO");
    }

    #[test]
    fn test_generic_pmt_suffix_runs_first() {
        let c = cleaner();
        // " PMT" is stripped before the longer suffixes get a chance
        assert_eq!(c.clean("CHASE MOBILE PMT"), "CHASE MOBILE");
        assert_eq!(c.clean("VERIZON ONLINE PMT"), "VERIZON ONLINE");
        assert_eq!(c.clean("ADP ACH PMT"), "ADP ACH");
        assert_eq!(c.clean("ACH PMT"), "ACH");
    }

    #[test]
    fn test_phone_and_state() {
        assert_eq!(cleaner().clean("NETFLIX 866-579-7172, CA"), "NETFLIX");
    }

    #[test]
    fn test_state_and_country_suffix() {
        let c = cleaner();
        assert_eq!(c.clean("TARGET AUSTIN, TX, USA"), "TARGET AUSTIN");
        assert_eq!(c.clean("TARGET AUSTIN, TX, US"), "TARGET AUSTIN");
    }

    #[test]
    fn test_street_addresses() {
        let c = cleaner();
        assert_eq!(c.clean("SHELL OIL 123 MAIN ST AUSTIN"), "SHELL OIL");
        assert_eq!(c.clean("CHEVRON 4501 W SLAUGHTER LN"), "CHEVRON");
    }

    #[test]
    fn test_zip_codes() {
        let c = cleaner();
        assert_eq!(c.clean("HEB 78745 AUSTIN"), "HEB AUSTIN");
        assert_eq!(c.clean("HEB ONLINE 78745-1234"), "HEB ONLINE");
    }

    #[test]
    fn test_adjacent_zip_codes() {
        let c = cleaner();
        assert_eq!(c.clean("ACME 78745 78701 AUSTIN"), "ACME AUSTIN");
        assert_eq!(c.clean("ACME 78745 78701-1234 AUSTIN"), "ACME AUSTIN");
        assert_eq!(c.clean("HEB 78745 78701"), "HEB");
    }

    #[test]
    fn test_urls() {
        let c = cleaner();
        assert_eq!(c.clean("PAYPAL WWW.PAYPAL.COM"), "PAYPAL");
        assert_eq!(c.clean("WALMART WALMART.COM"), "WALMART WALMART");
    }

    #[test]
    fn test_transfer_is_left_alone() {
        let c = cleaner();
        assert_eq!(
            c.clean("  Zelle payment to John Doe #12345678  "),
            "ZELLE PAYMENT TO JOHN DOE #12345678"
        );
    }

    #[test]
    fn test_empty_and_whitespace() {
        let c = cleaner();
        assert_eq!(c.clean(""), "");
        assert_eq!(c.clean("   "), "");
        assert_eq!(c.clean("***"), "");
    }

    #[test]
    fn test_collapses_whitespace_and_stars() {
        assert_eq!(cleaner().clean("* UBER   EATS  *"), "UBER EATS");
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let c = cleaner();
        for input in ["STARBUCKS", "WALMART.COM 702 SW", "HEB AUSTIN", "UBER EATS"] {
            let once = c.clean(input);
            assert_eq!(c.clean(&once), once, "not idempotent for {}", input);
        }
    }
}
