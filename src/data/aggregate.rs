use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::OnceLock;

use super::model::PaperRecord;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// How many journals `top_journals` keeps by default.
pub const DEFAULT_TOP_JOURNALS: usize = 10;
/// How many title words `top_title_words` keeps by default.
pub const DEFAULT_TOP_WORDS: usize = 20;
/// Minimum token length for title-word analysis.
pub const DEFAULT_MIN_WORD_LEN: usize = 3;
/// Grouping key for records without a journal.
pub const UNKNOWN_JOURNAL: &str = "Unknown";

// ---------------------------------------------------------------------------
// Stop words
// ---------------------------------------------------------------------------

/// Common English function words excluded from title-word frequencies,
/// defined once for the whole pipeline.  Entries shorter than
/// [`DEFAULT_MIN_WORD_LEN`] are redundant with the length cutoff but keep
/// the set complete should a caller lower the minimum.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to",
    "for", "of", "with", "by", "is", "are", "was", "were", "be", "been",
    "have", "has", "had", "do", "does", "did", "will", "would", "could", "should",
    "may", "might", "must", "can", "this", "that", "these", "those", "i", "you",
    "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
    "my", "your", "his", "its", "our", "their", "from", "about", "as", "into",
    "like", "through", "after", "over", "between", "out", "against", "during",
    "without", "before", "under", "around", "among",
];

static STOP_WORD_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn stop_word_set() -> &'static HashSet<&'static str> {
    STOP_WORD_SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Whether a lowercased token is a stop word.
pub fn is_stop_word(token: &str) -> bool {
    stop_word_set().contains(token)
}

// ---------------------------------------------------------------------------
// FrequencyTable: ranked key → count mapping
// ---------------------------------------------------------------------------

/// Key → occurrence count with a defined presentation order.
///
/// Counting preserves first-seen key order and both sorts are stable, so a
/// tie always resolves to the key encountered first.  That keeps every
/// aggregation reproducible for identical input tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, usize)>,
}

impl<K: Clone + Eq + Hash> FrequencyTable<K> {
    /// Count keys, recording each distinct key at its first appearance.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut entries: Vec<(K, usize)> = Vec::new();
        for key in keys {
            if let Some(&slot) = index.get(&key) {
                entries[slot].1 += 1;
            } else {
                index.insert(key.clone(), entries.len());
                entries.push((key, 1));
            }
        }
        FrequencyTable { entries }
    }

    /// Sort ascending by key (used for year tables).
    pub fn sort_by_key_asc(&mut self)
    where
        K: Ord,
    {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
    }

    /// Sort descending by count.  `sort_by` is stable, so equal counts keep
    /// their first-seen order.
    pub fn sort_by_count_desc(&mut self) {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
    }

    /// Keep only the `k` highest-ranked entries.
    pub fn truncate(&mut self, k: usize) {
        self.entries.truncate(k);
    }

    /// Ranked `(key, count)` pairs.
    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    /// Count for one key, if present.
    pub fn count(&self, key: &K) -> Option<usize> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, n)| *n)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Title tokenization
// ---------------------------------------------------------------------------

/// Lowercase a title and break it into countable tokens.
///
/// Only ASCII letters survive: digits, punctuation, and non-ASCII characters
/// all become separators.  Tokens shorter than `min_word_len` or present in
/// [`STOP_WORDS`] are dropped; the two checks are independent, so their
/// order cannot change the result.
pub fn tokenize_title(title: &str, min_word_len: usize) -> Vec<String> {
    let sanitized: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    sanitized
        .split_whitespace()
        .filter(|token| token.len() >= min_word_len && !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Papers per publication year, ascending by year.
pub fn counts_by_year(records: &[PaperRecord]) -> FrequencyTable<i32> {
    let mut table = FrequencyTable::from_keys(records.iter().map(|r| r.year));
    table.sort_by_key_asc();
    table
}

/// The `k` most frequent journals, descending by count.  Records without a
/// journal count under [`UNKNOWN_JOURNAL`]; present names group on their
/// exact text, with no trimming or case folding.  Ties rank in first-seen
/// order.
pub fn top_journals(records: &[PaperRecord], k: usize) -> FrequencyTable<String> {
    let mut table = FrequencyTable::from_keys(
        records
            .iter()
            .map(|r| r.journal.clone().unwrap_or_else(|| UNKNOWN_JOURNAL.to_string())),
    );
    table.sort_by_count_desc();
    table.truncate(k);
    table
}

/// Papers per source archive, descending by count.  Records without a source
/// are left out of the table rather than grouped under a placeholder; ties
/// rank in first-seen order.
pub fn counts_by_source(records: &[PaperRecord]) -> FrequencyTable<String> {
    let mut table = FrequencyTable::from_keys(records.iter().filter_map(|r| r.source.clone()));
    table.sort_by_count_desc();
    table
}

/// Ranked title words plus the full filtered token stream.  The stream feeds
/// word-weighting views; the ranked table feeds plain listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleWordStats {
    pub ranked: FrequencyTable<String>,
    pub tokens: Vec<String>,
}

/// The `k` most frequent title words across the whole table, after
/// tokenization and stop-word filtering; ties rank in first-seen order.
pub fn top_title_words(records: &[PaperRecord], k: usize, min_word_len: usize) -> TitleWordStats {
    let tokens: Vec<String> = records
        .iter()
        .flat_map(|r| tokenize_title(&r.title, min_word_len))
        .collect();

    let mut ranked = FrequencyTable::from_keys(tokens.iter().cloned());
    ranked.sort_by_count_desc();
    ranked.truncate(k);

    TitleWordStats { ranked, tokens }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn paper(title: &str, journal: Option<&str>, year: i32) -> PaperRecord {
        PaperRecord {
            title: title.to_string(),
            abstract_text: None,
            authors: None,
            journal: journal.map(String::from),
            publish_time: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            source: None,
            year,
            abstract_word_count: 0,
            title_word_count: word_count_of(title),
        }
    }

    fn word_count_of(text: &str) -> usize {
        text.split_whitespace().count()
    }

    #[test]
    fn frequency_table_counts_in_first_seen_order() {
        let table = FrequencyTable::from_keys(["b", "a", "b", "c", "a", "b"]);
        assert_eq!(table.entries(), &[("b", 3), ("a", 2), ("c", 1)]);
        assert_eq!(table.count(&"a"), Some(2));
        assert_eq!(table.count(&"z"), None);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn descending_sort_breaks_ties_by_first_seen() {
        let mut table = FrequencyTable::from_keys(["x", "y", "y", "x", "z"]);
        table.sort_by_count_desc();
        assert_eq!(table.entries(), &[("x", 2), ("y", 2), ("z", 1)]);
    }

    #[test]
    fn counts_by_year_sorts_ascending_and_sums_to_row_count() {
        let records = vec![
            paper("A", None, 2021),
            paper("B", None, 2019),
            paper("C", None, 2020),
            paper("D", None, 2019),
        ];
        let by_year = counts_by_year(&records);
        assert_eq!(by_year.entries(), &[(2019, 2), (2020, 1), (2021, 1)]);
        assert_eq!(by_year.total(), records.len());
    }

    #[test]
    fn missing_journals_group_under_unknown() {
        let records = vec![
            paper("A", None, 2020),
            paper("B", Some("Nature"), 2020),
            paper("C", Some("Nature"), 2020),
            paper("D", None, 2020),
        ];

        let journals = top_journals(&records, DEFAULT_TOP_JOURNALS);
        assert_eq!(
            journals.entries(),
            &[
                ("Unknown".to_string(), 2),
                ("Nature".to_string(), 2),
            ]
        );

        let top_one = top_journals(&records, 1);
        assert_eq!(top_one.entries(), &[("Unknown".to_string(), 2)]);
    }

    #[test]
    fn journal_keys_group_on_their_exact_text() {
        let records = vec![
            paper("A", Some(" Nature"), 2020),
            paper("B", Some("Nature"), 2020),
            paper("C", Some("Nature"), 2021),
        ];

        let journals = top_journals(&records, DEFAULT_TOP_JOURNALS);
        assert_eq!(
            journals.entries(),
            &[("Nature".to_string(), 2), (" Nature".to_string(), 1)]
        );
    }

    #[test]
    fn source_counts_skip_records_without_a_source() {
        let with_source = |title: &str, source: &str| PaperRecord {
            source: Some(source.to_string()),
            ..paper(title, None, 2020)
        };
        let records = vec![
            with_source("A", "PMC"),
            paper("B", None, 2020),
            with_source("C", "WHO"),
            with_source("D", "PMC"),
        ];

        let sources = counts_by_source(&records);
        assert_eq!(
            sources.entries(),
            &[("PMC".to_string(), 2), ("WHO".to_string(), 1)]
        );
        assert_eq!(sources.total(), 3);
    }

    #[test]
    fn tokenizer_keeps_only_ascii_letter_runs() {
        assert_eq!(
            tokenize_title("COVID-19: truth?", DEFAULT_MIN_WORD_LEN),
            vec!["covid", "truth"]
        );
        // Non-ASCII letters split their word; the short leftovers fall to the
        // length cutoff.
        assert_eq!(
            tokenize_title("naïve café", DEFAULT_MIN_WORD_LEN),
            vec!["caf"]
        );
        assert_eq!(
            tokenize_title("The rise AND fall of it", DEFAULT_MIN_WORD_LEN),
            vec!["rise", "fall"]
        );
        assert!(tokenize_title("", DEFAULT_MIN_WORD_LEN).is_empty());
    }

    #[test]
    fn short_stop_words_stay_excluded_at_lower_minimums() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("a"));
        assert!(!is_stop_word("covid"));

        assert_eq!(tokenize_title("A an apple", 1), vec!["apple"]);
    }

    #[test]
    fn title_word_ranking_matches_first_seen_tie_order() {
        let records = vec![
            paper("Covid impact study", None, 2020),
            paper("Impact of Covid on health", None, 2021),
        ];

        let stats = top_title_words(&records, 2, DEFAULT_MIN_WORD_LEN);
        assert_eq!(
            stats.tokens,
            vec!["covid", "impact", "study", "impact", "covid", "health"]
        );
        assert_eq!(
            stats.ranked.entries(),
            &[("covid".to_string(), 2), ("impact".to_string(), 2)]
        );
    }

    #[test]
    fn empty_table_aggregates_to_empty_results() {
        let records: Vec<PaperRecord> = Vec::new();
        assert!(counts_by_year(&records).is_empty());
        assert!(top_journals(&records, DEFAULT_TOP_JOURNALS).is_empty());
        assert!(counts_by_source(&records).is_empty());

        let words = top_title_words(&records, DEFAULT_TOP_WORDS, DEFAULT_MIN_WORD_LEN);
        assert!(words.ranked.is_empty());
        assert!(words.tokens.is_empty());
    }
}
