//! Batch EDA pipeline for research-paper metadata.
//!
//! One tabular file (CSV, JSON, or Parquet) goes in; the crate profiles it,
//! drops rows unusable for time analysis, derives per-paper features, and
//! aggregates publication years, journals, title words, and sources.
//! [`ExplorerState`] carries the filter-and-summarise cycle so a
//! presentation layer can re-run it cheaply on year-range subsets.

/// Record types and the load → clean → derive → aggregate pipeline.
pub mod data;
/// Plain-text rendering of profiles, cleaning stats, and summaries.
pub mod report;
/// Explorer state: the corpus, its active year filter, and cached summaries.
pub mod state;

pub use data::aggregate::{
    counts_by_source, counts_by_year, is_stop_word, tokenize_title, top_journals, top_title_words,
    FrequencyTable, TitleWordStats, DEFAULT_MIN_WORD_LEN, DEFAULT_TOP_JOURNALS, DEFAULT_TOP_WORDS,
    STOP_WORDS, UNKNOWN_JOURNAL,
};
pub use data::clean::{clean, derive_features, parse_publish_time, word_count, CleanStats};
pub use data::explore::{profile, TableProfile};
pub use data::filter::{filter_by_year, year_span, YearRange};
pub use data::loader::{load_file, SchemaError};
pub use data::model::{CleanRecord, PaperRecord, RawRecord, REQUIRED_COLUMNS};
pub use data::writer::write_csv;
pub use report::render_report;
pub use state::{CorpusSummary, ExplorerState};
