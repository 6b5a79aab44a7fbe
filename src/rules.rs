// 🏷️ Category Rules - ordered keyword table, first match wins
// "STARBUCKS STORE #05123" → "Food & Dining"
//
// Table order is observable: a description that hits keywords from two
// categories lands in whichever category comes first.

use serde::{Deserialize, Serialize};

/// Category for descriptions no rule matches
pub const OTHER_CATEGORY: &str = "Other";

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category label (e.g. "Food & Dining")
    pub name: String,

    /// Substrings matched against the uppercased description
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        CategoryRule {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// First keyword contained in an already-uppercased description
    pub fn matching_keyword(&self, upper_description: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(|k| k.as_str())
            .find(|k| !k.is_empty() && upper_description.contains(&k.to_uppercase()))
    }
}

// ============================================================================
// CATEGORY TABLE
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        CategoryTable { rules }
    }

    /// Built-in spending categories, in precedence order
    pub fn with_defaults() -> Self {
        CategoryTable::new(vec![
            CategoryRule::new(
                "Entertainment",
                &[
                    "HULU", "NETFLIX", "SPOTIFY", "APPLE.COM", "GOOGLE", "PARAMOUNT+",
                    "PEACOCK", "EPIC GAMES", "STEAM", "TWITCH", "AMAZON PRIME", "HUMBLE",
                    "GAMESTOP", "AMC", "PATREON", "PRIME VIDEO", "NYTIMES", "NY POST",
                    "YOUTUBE", "NINTENDO", "LASTPASS",
                ],
            ),
            CategoryRule::new(
                "Food & Dining",
                &[
                    "MCDONALD", "BURGER KING", "STARBUCKS", "DUNKIN", "PANERA", "TORCHYS",
                    "HEB", "BUSHS CHICKEN", "PIZZA", "DELI", "SUSHI", "85 C", "P. TERRYS",
                    "FALAFEL", "BREAD PLUS", "SMOOTHIE", "ORGANIC", "SKILLET",
                    "LUCKY STRIKE", "MANDOLAS", "JAYS DELI", "CUPPRIMO", "VTG FAMI",
                    "GREAT WALL", "THUNDER", "FAT DR", "JETS P",
                ],
            ),
            CategoryRule::new(
                "Food Delivery",
                &["DOORDASH", "GRUBHUB", "UBER EATS", "INSTACART"],
            ),
            CategoryRule::new(
                "Shopping",
                &[
                    "WALMART", "AMAZON", "MATTRESS", "SAMS CLUB", "WALGREENS", "GOLDBELLY",
                    "ETSY", "EBAY", "DOLLAR TR", "HOME DEPOT", "LOWES", "BED BATH",
                    "TEMU.COM", "AFTERPAY", "SEZZLE", "WORLD MARKET", "NST", "BEST BUY",
                    "EURO PR", "CELEBRATIONS", "RAINWALK", "KIDROBOT", "TURTLE", "SHOP",
                    "THE SWISS", "DALLMANN",
                ],
            ),
            CategoryRule::new(
                "Travel",
                &[
                    "EXXON", "SHELL", "CHEVRON", "UBER TRIP", "HERTZ", "DELTA", "SUNOCO",
                    "LAKE ST MOBILE", "E-ZPASS", "AVIS", "BP", "JETBLUE", "TAKE 5", "JFK",
                    "HAMPTON INN", "WESTIN", "RZ FOOD MART", "AIRPORT", "SMARTPAY",
                    "FLIGHT", "BUC-EE",
                ],
            ),
            CategoryRule::new(
                "Loans & Credit",
                &[
                    "CAPITAL ONE", "SYNCHRONY", "AMEX", "GREENSKY", "AFFIRM", "WELLS FARGO",
                    "HMF", "SCRATCHPAY", "PROG COUNTY MUT", "AMZ_STORECRD", "CUSTOMERS BANK",
                    "STORECRD", "CRCARDPMT", "KOHLS CHG", "KLARNA",
                ],
            ),
            CategoryRule::new(
                "Utilities",
                &["ATT", "PUBLIC STORAGE", "CITY OF AUSTIN", "STORAGE", "AWS", "WEB SERV"],
            ),
            CategoryRule::new(
                "Transfers",
                &[
                    "TRANSFER", "ZELLE", "VENMO", "PAYPAL", "CASH APP", "INTERNET TRANSFER",
                    "OVERDRAFT TRANSFER",
                ],
            ),
            CategoryRule::new(
                "Healthcare",
                &[
                    "RADIOLOGY", "CAPSULE", "AUSTIN FAMILY", "SETON", "DIAGNOSTIC", "PHARMACY",
                    "DELL SETON", "CLINIC", "DSMC", "HOLY RO", "COMPOUND PHA", "WELLNESS",
                ],
            ),
            CategoryRule::new("Smoke & Vape", &["TRIPPIEZ", "SMOKE", "VAPE", "D8AUSTIN", "NU AGE"]),
            CategoryRule::new(
                "Home Improvement",
                &[
                    "AC PROS", "SAFELITE", "WE DUMP", "HOMEAGLOW", "PARADISE SPAS",
                    "HILL COUNTRY WA",
                ],
            ),
        ])
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Keywords configured for a category, if it exists
    pub fn keywords_for(&self, category: &str) -> Option<&[String]> {
        self.rules
            .iter()
            .find(|rule| rule.name == category)
            .map(|rule| rule.keywords.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ============================================================================
// CATEGORIZER
// ============================================================================

/// Result of scanning the table, with the keyword that decided it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch<'a> {
    pub category: &'a str,
    pub keyword: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    table: CategoryTable,
}

impl Categorizer {
    pub fn new(table: CategoryTable) -> Self {
        Categorizer { table }
    }

    /// Category label for a raw description, `"Other"` when nothing matches
    pub fn categorize(&self, raw: &str) -> &str {
        self.explain(raw).category
    }

    /// Same scan as `categorize`, also reporting the winning keyword
    pub fn explain(&self, raw: &str) -> CategoryMatch<'_> {
        let upper = raw.to_uppercase();

        for rule in &self.table.rules {
            if let Some(keyword) = rule.matching_keyword(&upper) {
                return CategoryMatch {
                    category: &rule.name,
                    keyword: Some(keyword),
                };
            }
        }

        CategoryMatch {
            category: OTHER_CATEGORY,
            keyword: None,
        }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starbucks_is_food() {
        let categorizer = Categorizer::new(CategoryTable::with_defaults());
        assert_eq!(categorizer.categorize("STARBUCKS STORE #05123"), "Food & Dining");
    }

    #[test]
    fn test_no_match_is_other() {
        let categorizer = Categorizer::new(CategoryTable::with_defaults());

        assert_eq!(categorizer.categorize("QWXZ 0000"), OTHER_CATEGORY);
        assert_eq!(categorizer.categorize(""), OTHER_CATEGORY);
    }

    #[test]
    fn test_case_insensitive() {
        let categorizer = Categorizer::new(CategoryTable::with_defaults());
        assert_eq!(categorizer.categorize("netflix.com los gatos"), "Entertainment");
    }

    #[test]
    fn test_lowercase_keywords_still_match() {
        let categorizer = Categorizer::new(CategoryTable::new(vec![CategoryRule::new(
            "Groceries",
            &["trader joe"],
        )]));
        assert_eq!(categorizer.categorize("TRADER JOE'S #552"), "Groceries");
    }

    #[test]
    fn test_first_category_wins() {
        let categorizer = Categorizer::new(CategoryTable::new(vec![
            CategoryRule::new("A", &["COFFEE"]),
            CategoryRule::new("B", &["STARBUCKS"]),
        ]));
        assert_eq!(categorizer.categorize("STARBUCKS COFFEE"), "A");

        let reversed = Categorizer::new(CategoryTable::new(vec![
            CategoryRule::new("B", &["STARBUCKS"]),
            CategoryRule::new("A", &["COFFEE"]),
        ]));
        assert_eq!(reversed.categorize("STARBUCKS COFFEE"), "B");
    }

    #[test]
    fn test_default_order_is_load_bearing() {
        let categorizer = Categorizer::new(CategoryTable::with_defaults());

        // "GOOGLE" (Entertainment) comes before "SHOP" (Shopping)
        assert_eq!(categorizer.categorize("GOOGLE SHOPPING"), "Entertainment");
        // "DOORDASH" (Food Delivery) comes before "SHOP" (Shopping)
        assert_eq!(categorizer.categorize("DOORDASH SHOP"), "Food Delivery");
    }

    #[test]
    fn test_explain_reports_keyword() {
        let categorizer = Categorizer::new(CategoryTable::with_defaults());

        let hit = categorizer.explain("ZELLE PAYMENT TO JOHN DOE");
        assert_eq!(hit.category, "Transfers");
        assert_eq!(hit.keyword, Some("ZELLE"));

        let miss = categorizer.explain("QWXZ");
        assert_eq!(miss.category, OTHER_CATEGORY);
        assert_eq!(miss.keyword, None);
    }

    #[test]
    fn test_keywords_for() {
        let table = CategoryTable::with_defaults();

        assert_eq!(table.len(), 11);
        assert!(table.keywords_for("Food Delivery").unwrap().contains(&"GRUBHUB".to_string()));
        assert!(table.keywords_for("Nope").is_none());
    }
}
