// 📏 Similarity Scorer - normalized edit-distance ratio in [0, 100]
//
// ratio = 200 * LCS / (len_a + len_b), rounded half to even
//
// i.e. 100 minus the share of insertions + deletions (a substitution costs 2).
// The quotient stays an integer fraction instead of a float, so a .5 tie is
// an exact tie: 85.5 becomes 86 and merges at the default threshold, while
// 84.5 becomes 84.

/// Default merge threshold used by clustering and fallback matching
pub const DEFAULT_THRESHOLD: u8 = 85;

/// Similarity of two strings, 100 = identical
///
/// Symmetric and pure. Two empty strings score 100; one empty string scores 0.
///
/// Example:
/// - similarity("WALMART", "WAL MART") = 93
/// - similarity("STARBUCKS", "AMAZON") = 13
pub fn similarity(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();

    if total == 0 {
        return 100;
    }

    let lcs = longest_common_subsequence(&a_chars, &b_chars);
    round_half_even(200 * lcs, total) as u8
}

/// Length of the longest common subsequence (two-row DP)
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                std::cmp::max(prev[j + 1], curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// numerator / denominator rounded to nearest, ties to even
fn round_half_even(numerator: usize, denominator: usize) -> usize {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);

    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

// ============================================================================
// TESTS
// ============================================================================
