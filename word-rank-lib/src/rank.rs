//! Merging worker counts and selecting the most frequent words.

use crate::types::{RankedEntry, WordCountMap};

/// Number of entries the pipeline reports.
pub const TOP_WORDS: usize = 10;

/// Sum per-worker partial maps into one global count map.
///
/// Addition is commutative and associative, so the result is identical for
/// every partition of the observations and every merge order; worker
/// completion order never shows through.
pub fn merge<I>(partials: I) -> WordCountMap
where
    I: IntoIterator<Item = WordCountMap>,
{
    let mut global = WordCountMap::new();
    for partial in partials {
        for (word, count) in partial {
            *global.entry(word).or_insert(0) += count;
        }
    }
    global
}

/// Select the `k` highest-count entries.
///
/// Ordered by count descending; equal counts order lexicographically
/// ascending by word so repeated runs on identical input produce an
/// identical result. Returns `min(k, distinct words)` entries.
pub fn top_k(global: &WordCountMap, k: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = global
        .iter()
        .map(|(word, count)| RankedEntry {
            word: word.clone(),
            count: *count,
        })
        .collect();

    entries.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    entries.truncate(k);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, u64)]) -> WordCountMap {
        pairs
            .iter()
            .map(|(w, c)| (w.to_string(), *c))
            .collect()
    }

    #[test]
    fn merge_sums_across_partials() {
        let merged = merge(vec![
            map(&[("data", 2), ("systems", 1)]),
            map(&[("systems", 2)]),
        ]);

        assert_eq!(merged, map(&[("data", 2), ("systems", 3)]));
    }

    #[test]
    fn merge_is_independent_of_partition_and_order() {
        // The same observations split three different ways.
        let observations = map(&[("alpha", 4), ("beta", 2), ("gamma", 1)]);

        let split_a = vec![
            map(&[("alpha", 1), ("beta", 2)]),
            map(&[("alpha", 3), ("gamma", 1)]),
        ];
        let split_b = vec![
            map(&[("gamma", 1)]),
            map(&[("alpha", 2)]),
            map(&[("alpha", 2), ("beta", 2)]),
        ];
        let mut split_a_reversed = split_a.clone();
        split_a_reversed.reverse();

        assert_eq!(merge(split_a), observations);
        assert_eq!(merge(split_b), observations);
        assert_eq!(merge(split_a_reversed), observations);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        assert!(merge(Vec::new()).is_empty());
    }

    #[test]
    fn top_k_orders_by_count_descending() {
        let ranked = top_k(&map(&[("data", 2), ("systems", 3)]), 2);

        assert_eq!(ranked[0].word, "systems");
        assert_eq!(ranked[0].count, 3);
        assert_eq!(ranked[1].word, "data");
        assert_eq!(ranked[1].count, 2);
    }

    #[test]
    fn top_k_breaks_ties_lexicographically() {
        let ranked = top_k(&map(&[("pear", 2), ("apple", 2), ("mango", 5), ("kiwi", 2)]), 4);

        let words: Vec<&str> = ranked.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["mango", "apple", "kiwi", "pear"]);
    }

    #[test]
    fn top_k_never_exceeds_k() {
        let counts = map(&[("one", 1), ("two", 2), ("three", 3), ("four", 4)]);
        assert_eq!(top_k(&counts, 2).len(), 2);
    }

    #[test]
    fn top_k_returns_everything_when_fewer_than_k() {
        let counts = map(&[("solo", 7)]);
        let ranked = top_k(&counts, TOP_WORDS);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].word, "solo");
    }

    #[test]
    fn top_k_of_empty_map_is_empty() {
        assert!(top_k(&WordCountMap::new(), TOP_WORDS).is_empty());
    }
}
