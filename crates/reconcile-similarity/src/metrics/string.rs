use std::collections::BTreeSet;

use reconcile_core::config::StringMetric;
use reconcile_core::constants::round_similarity;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const PADDING: &str = "##";

/// Lowercase, fold accents, replace punctuation with spaces, collapse whitespace.
pub fn normalize_label(input: &str) -> String {
    let folded: String = input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn trigrams(normalized: &str) -> BTreeSet<String> {
    let padded: Vec<char> = format!("{PADDING}{normalized}{PADDING}").chars().collect();
    padded.windows(3).map(|w| w.iter().collect()).collect()
}

/// Dice coefficient over padded character trigrams of two normalized strings.
pub fn trigram_similarity(a: &str, b: &str) -> f64 {
    let (ta, tb) = (trigrams(a), trigrams(b));
    let shared = ta.intersection(&tb).count();
    round_similarity(2.0 * shared as f64 / (ta.len() + tb.len()) as f64)
}

pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    // strsim's prefix weighting is direction independent, so this stays symmetric.
    round_similarity(strsim::jaro_winkler(a, b))
}

/// Compare two raw strings with the configured metric. Absent when either side
/// is empty after normalization.
pub fn compare_labels(a: &str, b: &str, metric: StringMetric) -> Option<f64> {
    let (na, nb) = (normalize_label(a), normalize_label(b));
    if na.is_empty() || nb.is_empty() {
        return None;
    }
    Some(match metric {
        StringMetric::Trigram => trigram_similarity(&na, &nb),
        StringMetric::JaroWinkler => jaro_winkler_similarity(&na, &nb),
    })
}

/// [`compare_labels`] lifted over optional values.
pub fn compare_optional(a: Option<&str>, b: Option<&str>, metric: StringMetric) -> Option<f64> {
    compare_labels(a?, b?, metric)
}
