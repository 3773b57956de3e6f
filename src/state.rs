use std::collections::HashSet;

use crate::data::aggregate::{
    counts_by_source, counts_by_year, top_journals, top_title_words, FrequencyTable,
    TitleWordStats, DEFAULT_MIN_WORD_LEN, DEFAULT_TOP_JOURNALS, DEFAULT_TOP_WORDS,
};
use crate::data::filter::{filter_by_year, year_span, YearRange};
use crate::data::model::PaperRecord;

// ---------------------------------------------------------------------------
// Corpus summary
// ---------------------------------------------------------------------------

/// Everything the explorer shows for one subset of the corpus: headline
/// metrics plus the four aggregation tables.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusSummary {
    pub total_papers: usize,
    /// Distinct journal names, compared on their exact text; records without
    /// a journal do not count here even though `top_journals` groups them
    /// under "Unknown".
    pub unique_journals: usize,
    /// Mean abstract length in words, 0.0 for an empty subset.
    pub mean_abstract_words: f64,
    pub by_year: FrequencyTable<i32>,
    pub journals: FrequencyTable<String>,
    pub title_words: TitleWordStats,
    /// Full source distribution; records without a source are excluded.
    pub sources: FrequencyTable<String>,
}

impl CorpusSummary {
    /// Aggregate one subset of the corpus.
    pub fn compute(records: &[PaperRecord], top_journals_k: usize, top_words_k: usize) -> Self {
        let unique_journals = records
            .iter()
            .filter_map(|r| r.journal.as_deref())
            .collect::<HashSet<&str>>()
            .len();

        let mean_abstract_words = if records.is_empty() {
            0.0
        } else {
            let total: usize = records.iter().map(|r| r.abstract_word_count).sum();
            total as f64 / records.len() as f64
        };

        CorpusSummary {
            total_papers: records.len(),
            unique_journals,
            mean_abstract_words,
            by_year: counts_by_year(records),
            journals: top_journals(records, top_journals_k),
            title_words: top_title_words(records, top_words_k, DEFAULT_MIN_WORD_LEN),
            sources: counts_by_source(records),
        }
    }
}

// ---------------------------------------------------------------------------
// Explorer state
// ---------------------------------------------------------------------------

/// The explorer's full state, independent of any presentation layer.
///
/// The enriched table is ingested once; every year-range change recomputes
/// the visible subset and its summary from that table, so narrowing and
/// widening the range never loses rows.
pub struct ExplorerState {
    /// The full enriched corpus (empty until a table is ingested).
    pub records: Vec<PaperRecord>,

    /// Active year filter (None until a corpus is ingested).
    pub year_range: Option<YearRange>,

    /// Records passing the current year filter (cached).
    pub visible: Vec<PaperRecord>,

    /// Summary of the visible subset (cached).
    pub summary: Option<CorpusSummary>,

    /// How many journals the summary ranks.
    pub top_journals_k: usize,

    /// How many title words the summary ranks.
    pub top_words_k: usize,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            year_range: None,
            visible: Vec::new(),
            summary: None,
            top_journals_k: DEFAULT_TOP_JOURNALS,
            top_words_k: DEFAULT_TOP_WORDS,
        }
    }
}

impl ExplorerState {
    /// Ingest an enriched table, select its full year span, and summarise.
    pub fn set_corpus(&mut self, records: Vec<PaperRecord>) {
        self.year_range = year_span(&records);
        self.records = records;
        self.refilter();
    }

    /// Narrow or widen the year filter and recompute the visible subset.
    pub fn set_year_range(&mut self, range: YearRange) {
        self.year_range = Some(range);
        self.refilter();
    }

    /// Restore the filter to the corpus's full year span.
    pub fn reset_year_range(&mut self) {
        self.year_range = year_span(&self.records);
        self.refilter();
    }

    /// Recompute `visible` and `summary` from the current range.  Pure with
    /// respect to `records`; calling it again without a state change is a
    /// no-op.
    pub fn refilter(&mut self) {
        self.visible = match self.year_range {
            Some(range) => filter_by_year(&self.records, range),
            None => self.records.clone(),
        };
        self.summary = Some(CorpusSummary::compute(
            &self.visible,
            self.top_journals_k,
            self.top_words_k,
        ));
    }
}
