//! Fuzzy word-overlap matching for team and league names. Scraped sources
//! disagree on hyphenation, punctuation, and qualifiers, so exact equality
//! misses matches that are obviously the same fixture to a human.

use std::collections::HashSet;

/// Tokens that carry no identity in league names and are removed before
/// comparison.
const LEAGUE_NOISE_TOKENS: [&str; 9] = [
    "standings",
    "qualification",
    "play",
    "offs",
    "round",
    "group",
    "stage",
    "phase",
    "preliminary",
];

/// Split on punctuation and whitespace, lowercase, drop empties.
fn tokenize(name: &str) -> HashSet<String> {
    name.to_lowercase()
        .split(|c: char| c.is_whitespace() || "-.:,/()".contains(c))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Overlap ratio relative to the smaller token set. 1.0 when one name's
/// tokens are a subset of the other's.
fn overlap_ratio(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let shared = small.iter().filter(|t| large.contains(*t)).count();
    shared as f64 / small.len() as f64
}

/// Whether two team names refer to the same team, at the given minimum
/// overlap ratio.
pub fn teams_match(a: &str, b: &str, min_overlap: f64) -> bool {
    overlap_ratio(&tokenize(a), &tokenize(b)) >= min_overlap
}

/// Whether two league names refer to the same competition. Noise tokens
/// (qualifiers, stage markers) are stripped before comparison.
pub fn leagues_match(a: &str, b: &str, min_overlap: f64) -> bool {
    let strip = |name: &str| {
        let mut tokens = tokenize(name);
        for noise in LEAGUE_NOISE_TOKENS {
            tokens.remove(noise);
        }
        tokens
    };
    overlap_ratio(&strip(a), &strip(b)) >= min_overlap
}
