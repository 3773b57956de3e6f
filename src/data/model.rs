use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_TITLE: &str = "title";
pub const COL_ABSTRACT: &str = "abstract";
pub const COL_AUTHORS: &str = "authors";
pub const COL_JOURNAL: &str = "journal";
pub const COL_PUBLISH_TIME: &str = "publish_time";
pub const COL_SOURCE: &str = "source";

/// Columns the input header must contain. A header lacking any of these is a
/// fatal schema error; the run aborts before any rows are parsed.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_TITLE,
    COL_ABSTRACT,
    COL_AUTHORS,
    COL_JOURNAL,
    COL_PUBLISH_TIME,
];

/// Accepted header spellings for the source column. Corpus exports name it
/// `source_x` (a leftover of an upstream join); both map to [`RawRecord::source`].
pub const SOURCE_ALIASES: &[&str] = &[COL_SOURCE, "source_x"];

/// Column order of the written table: input columns first, derived columns
/// last. Must match [`PaperRecord`]'s field order.
pub const OUTPUT_COLUMNS: &[&str] = &[
    COL_TITLE,
    COL_ABSTRACT,
    COL_AUTHORS,
    COL_JOURNAL,
    COL_PUBLISH_TIME,
    COL_SOURCE,
    "year",
    "abstract_word_count",
    "title_word_count",
];

// ---------------------------------------------------------------------------
// RawRecord: one row as loaded, before validation
// ---------------------------------------------------------------------------

/// One row of paper metadata exactly as loaded. Every field is optional;
/// empty cells come through as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    /// Publish date as the loader found it; parsed during cleaning.
    pub publish_time: Option<String>,
    pub source: Option<String>,
}

// ---------------------------------------------------------------------------
// CleanRecord: a row that survived cleaning
// ---------------------------------------------------------------------------

/// A record that passed validation: the title is present and non-empty and
/// the publish date parsed to a real calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRecord {
    pub title: String,
    pub abstract_text: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub publish_time: NaiveDate,
    pub source: Option<String>,
}

impl CleanRecord {
    /// Downgrade to a raw record, formatting the date as ISO. Re-cleaning the
    /// result reproduces this record exactly, so cleaning is idempotent.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            title: Some(self.title.clone()),
            abstract_text: self.abstract_text.clone(),
            authors: self.authors.clone(),
            journal: self.journal.clone(),
            publish_time: Some(self.publish_time.format("%Y-%m-%d").to_string()),
            source: self.source.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// PaperRecord: a clean row plus derived features
// ---------------------------------------------------------------------------

/// A cleaned record with its derived columns. Field order doubles as the
/// output column order: original columns first, derived columns last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperRecord {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub publish_time: NaiveDate,
    pub source: Option<String>,
    /// Calendar year of `publish_time`.
    pub year: i32,
    /// Whitespace-token count of the abstract; 0 when the abstract is absent.
    pub abstract_word_count: usize,
    /// Whitespace-token count of the title.
    pub title_word_count: usize,
}

impl PaperRecord {
    /// The clean-record view of this row, derived fields stripped.
    pub fn to_clean(&self) -> CleanRecord {
        CleanRecord {
            title: self.title.clone(),
            abstract_text: self.abstract_text.clone(),
            authors: self.authors.clone(),
            journal: self.journal.clone(),
            publish_time: self.publish_time,
            source: self.source.clone(),
        }
    }
}
