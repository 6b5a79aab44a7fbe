// Merchant Resolver - Core Library
// Resolves noisy transaction descriptions into canonical company names and
// assigns spending categories. Used by the CLI and by tests.

pub mod transfer;    // Transfer guard - never merge peer payments / wires
pub mod cleaner;     // Noise stripping
pub mod similarity;  // 0-100 edit-distance ratio
pub mod aliases;     // Prefix → brand overrides
pub mod clustering;  // Greedy batch grouping
pub mod normalizer;  // Per-row lookup + NormalizationMap
pub mod rules;       // Ordered category keyword table
pub mod config;
pub mod resolver;
pub mod ledger;      // CSV ingestion
pub mod pipeline;
pub mod report;
pub mod render;

// Re-export commonly used types
pub use transfer::{TransferGuard, DEFAULT_TRANSFER_KEYWORDS};
pub use cleaner::TextCleaner;
pub use similarity::{similarity, DEFAULT_THRESHOLD};
pub use aliases::{AliasEntry, AliasTable};
pub use clustering::{Clusterer, CompanyGroup, Resolution, ScanOrder};
pub use normalizer::{NormalizationMap, Normalizer};
pub use rules::{CategoryRule, CategoryTable, Categorizer, OTHER_CATEGORY};
pub use config::ResolverConfig;
pub use resolver::Resolver;
pub use ledger::{load_csv, read_transactions, Transaction};
pub use pipeline::{resolve_transactions, ResolvedTransaction};
pub use report::{CategoryFlow, CompanySpending, Report, ReportPeriod, TotalFlows};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
