use super::model::{
    RawRecord, COL_ABSTRACT, COL_AUTHORS, COL_JOURNAL, COL_PUBLISH_TIME, COL_SOURCE, COL_TITLE,
};

// ---------------------------------------------------------------------------
// Pre-clean table profile
// ---------------------------------------------------------------------------

/// Shape and missing-value census of a freshly loaded table, taken before
/// any row is dropped so the explorer can show what cleaning is up against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableProfile {
    /// Loaded row count.
    pub rows: usize,
    /// Tracked column count.
    pub columns: usize,
    /// `(column name, rows missing a value)` in column order.
    pub missing: Vec<(String, usize)>,
}

impl TableProfile {
    /// Missing count for one column, if tracked.
    pub fn missing_in(&self, column: &str) -> Option<usize> {
        self.missing
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, n)| *n)
    }
}

/// Profile a loaded table: dimensions plus per-column missing counts.
/// Loaders already map blank cells to `None`, so "missing" means absent or
/// blank in the source file.
pub fn profile(records: &[RawRecord]) -> TableProfile {
    let columns: &[(&str, fn(&RawRecord) -> bool)] = &[
        (COL_TITLE, |r| r.title.is_none()),
        (COL_ABSTRACT, |r| r.abstract_text.is_none()),
        (COL_AUTHORS, |r| r.authors.is_none()),
        (COL_JOURNAL, |r| r.journal.is_none()),
        (COL_PUBLISH_TIME, |r| r.publish_time.is_none()),
        (COL_SOURCE, |r| r.source.is_none()),
    ];

    let missing = columns
        .iter()
        .map(|(name, is_missing)| {
            let count = records.iter().filter(|r| is_missing(r)).count();
            (name.to_string(), count)
        })
        .collect();

    TableProfile {
        rows: records.len(),
        columns: columns.len(),
        missing,
    }
}
