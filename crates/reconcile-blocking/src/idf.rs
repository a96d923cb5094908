use std::collections::{BTreeSet, HashMap};

use reconcile_similarity::metrics::normalize_label;

/// Inverse document frequency of label tokens over one set of labels.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    documents: usize,
    frequencies: HashMap<String, usize>,
}

impl IdfTable {
    /// Count every distinct token once per label.
    pub fn build<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = Self::default();
        for label in labels {
            table.documents += 1;
            let normalized = normalize_label(label);
            let tokens: BTreeSet<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
            for token in tokens {
                *table.frequencies.entry(token.to_string()).or_insert(0) += 1;
            }
        }
        table
    }

    pub fn documents(&self) -> usize {
        self.documents
    }

    /// `ln(documents / frequency)`. Unseen tokens get the highest value.
    pub fn idf(&self, token: &str) -> f64 {
        let df = self.frequencies.get(token).copied().unwrap_or(0).max(1);
        (self.documents.max(1) as f64 / df as f64).ln()
    }

    /// The `top` tokens of a normalized label with the highest IDF, ties broken
    /// lexicographically, returned in sorted order.
    pub fn top_tokens(&self, normalized: &str, top: usize) -> Vec<String> {
        let tokens: BTreeSet<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
        let mut ranked: Vec<(&str, f64)> = tokens.into_iter().map(|t| (t, self.idf(t))).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let mut chosen: Vec<String> = ranked.into_iter().take(top).map(|(t, _)| t.to_string()).collect();
        chosen.sort();
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rare_tokens_rank_first() {
        let table = IdfTable::build(["Lake Geneva", "Lake Tahoe", "Lake Placid", "Geneva"]);
        assert_eq!(table.documents(), 4);
        assert!(table.idf("tahoe") > table.idf("geneva"));
        assert!(table.idf("geneva") > table.idf("lake"));
        assert_eq!(table.top_tokens("lake tahoe", 1), vec!["tahoe"]);
        assert_eq!(table.top_tokens("lake tahoe", 5), vec!["lake", "tahoe"]);
    }

    #[test]
    fn repeated_tokens_count_once_per_label() {
        let table = IdfTable::build(["new new york", "york"]);
        assert_eq!(table.idf("new"), (2.0f64).ln());
        assert_eq!(table.idf("york"), 0.0);
    }
}
