use chrono::{Datelike, NaiveDate};

use super::model::{CleanRecord, PaperRecord, RawRecord};

// ---------------------------------------------------------------------------
// Cleaning statistics
// ---------------------------------------------------------------------------

/// Row-drop accounting for one cleaning pass.  Queryable so callers and
/// tests never have to scrape console output for the counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub input_rows: usize,
    /// Rows dropped because the title or publish date was absent or blank.
    pub dropped_missing_required: usize,
    /// Rows dropped because the publish date did not parse.
    pub dropped_invalid_date: usize,
    pub kept_rows: usize,
}

impl CleanStats {
    /// Total rows excluded by this pass.
    pub fn dropped_total(&self) -> usize {
        self.dropped_missing_required + self.dropped_invalid_date
    }
}

// ---------------------------------------------------------------------------
// Cleaner
// ---------------------------------------------------------------------------

/// Validate raw rows into clean ones.
///
/// A stable filter: survivors keep their original relative order, which is
/// what makes downstream tie-breaking reproducible.  Bad rows are counted,
/// never raised; `kept_rows + dropped_* == input_rows` always holds.
pub fn clean(records: &[RawRecord]) -> (Vec<CleanRecord>, CleanStats) {
    let mut stats = CleanStats {
        input_rows: records.len(),
        ..CleanStats::default()
    };
    let mut cleaned = Vec::with_capacity(records.len());

    for (row_no, record) in records.iter().enumerate() {
        let title = match record.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                stats.dropped_missing_required += 1;
                log::debug!("row {row_no}: dropped, title missing");
                continue;
            }
        };
        let raw_date = match record.publish_time.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => {
                stats.dropped_missing_required += 1;
                log::debug!("row {row_no}: dropped, publish_time missing");
                continue;
            }
        };

        let Some(publish_time) = parse_publish_time(raw_date) else {
            stats.dropped_invalid_date += 1;
            log::debug!("row {row_no}: dropped, unparseable publish_time {raw_date:?}");
            continue;
        };

        cleaned.push(CleanRecord {
            title: title.to_string(),
            abstract_text: record.abstract_text.clone(),
            authors: record.authors.clone(),
            journal: record.journal.clone(),
            publish_time,
            source: record.source.clone(),
        });
    }

    stats.kept_rows = cleaned.len();
    (cleaned, stats)
}

// ---------------------------------------------------------------------------
// Tolerant date parsing
// ---------------------------------------------------------------------------

/// Formats tried for an exact full-date match.  `%B` accepts abbreviated
/// month names as well as full ones.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y %B %d"];

/// Parse a publish date from the forms that occur in the corpus.
///
/// Accepts `2020-03-15`, `2020/03/15`, `2020 Dec 15`, the month-precision
/// forms `2020-03` and `2020 Dec` (anchored to day 1), and a bare `2020`
/// (anchored to January 1).  Returns `None` on anything else; the caller
/// counts the drop.
pub fn parse_publish_time(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    // Month precision: anchor to the first of the month.
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{trimmed}-1"), "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{trimmed} 1"), "%Y %B %d") {
        return Some(date);
    }

    // Year precision: anchor to January 1.
    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let year = trimmed.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

// ---------------------------------------------------------------------------
// Feature deriver
// ---------------------------------------------------------------------------

/// Count whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Add the derived columns (`year`, `abstract_word_count`,
/// `title_word_count`).  Never drops or reorders rows, copies the existing
/// column values verbatim, and reads nothing but its input.
pub fn derive_features(records: &[CleanRecord]) -> Vec<PaperRecord> {
    records
        .iter()
        .map(|r| PaperRecord {
            title: r.title.clone(),
            abstract_text: r.abstract_text.clone(),
            authors: r.authors.clone(),
            journal: r.journal.clone(),
            publish_time: r.publish_time,
            source: r.source.clone(),
            year: r.publish_time.year(),
            abstract_word_count: r.abstract_text.as_deref().map_or(0, word_count),
            title_word_count: word_count(&r.title),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: Option<&str>, publish_time: Option<&str>) -> RawRecord {
        RawRecord {
            title: title.map(String::from),
            publish_time: publish_time.map(String::from),
            ..RawRecord::default()
        }
    }

    #[test]
    fn parses_corpus_date_formats() {
        let expect = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);

        assert_eq!(parse_publish_time("2020-03-15"), expect(2020, 3, 15));
        assert_eq!(parse_publish_time("2020/03/15"), expect(2020, 3, 15));
        assert_eq!(parse_publish_time("2020 Dec 15"), expect(2020, 12, 15));
        assert_eq!(parse_publish_time("2020 December 15"), expect(2020, 12, 15));
        assert_eq!(parse_publish_time("2020-05"), expect(2020, 5, 1));
        assert_eq!(parse_publish_time("2020 Dec"), expect(2020, 12, 1));
        assert_eq!(parse_publish_time("2020"), expect(2020, 1, 1));
        assert_eq!(parse_publish_time("  2020-03-15  "), expect(2020, 3, 15));

        assert_eq!(parse_publish_time(""), None);
        assert_eq!(parse_publish_time("not-a-date"), None);
        assert_eq!(parse_publish_time("15-03-2020"), None);
        assert_eq!(parse_publish_time("2020-13-01"), None);
        assert_eq!(parse_publish_time("2020-02-30"), None);
        assert_eq!(parse_publish_time("March 2020"), None);
        assert_eq!(parse_publish_time("20"), None);
    }

    #[test]
    fn drop_counts_conserve_row_totals() {
        let records = vec![
            raw(Some("Kept A"), Some("2020-01-01")),
            raw(None, Some("2020-01-01")),          // missing title
            raw(Some("   "), Some("2020-01-01")),   // blank title
            raw(Some("No date"), None),             // missing date
            raw(Some("Blank date"), Some("  ")),    // blank date
            raw(Some("Bad date"), Some("soon")),    // unparseable date
            raw(Some("Kept B"), Some("2021")),
        ];

        let (cleaned, stats) = clean(&records);

        assert_eq!(stats.input_rows, 7);
        assert_eq!(stats.dropped_missing_required, 4);
        assert_eq!(stats.dropped_invalid_date, 1);
        assert_eq!(stats.kept_rows, 2);
        assert_eq!(
            stats.kept_rows + stats.dropped_total(),
            stats.input_rows
        );

        // Stable filter: survivors keep their input order.
        assert_eq!(cleaned[0].title, "Kept A");
        assert_eq!(cleaned[1].title, "Kept B");
        assert_eq!(
            cleaned[1].publish_time,
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
        );
    }

    #[test]
    fn cleaning_is_idempotent() {
        let records = vec![
            raw(Some("A"), Some("2020 Dec 15")),
            raw(Some("B"), Some("2019-07")),
            raw(None, Some("2020-01-01")),
        ];

        let (once, first_stats) = clean(&records);
        assert_eq!(first_stats.kept_rows, 2);

        let downgraded: Vec<RawRecord> = once.iter().map(CleanRecord::to_raw).collect();
        let (twice, second_stats) = clean(&downgraded);

        assert_eq!(once, twice);
        assert_eq!(second_stats.dropped_total(), 0);
    }

    #[test]
    fn derives_word_counts_and_year() {
        let base = CleanRecord {
            title: "Covid impact study".to_string(),
            abstract_text: Some("a b c".to_string()),
            authors: Some("Doe, J.".to_string()),
            journal: None,
            publish_time: NaiveDate::from_ymd_opt(2020, 12, 15).unwrap(),
            source: None,
        };
        let records = vec![
            base.clone(),
            CleanRecord {
                abstract_text: Some(String::new()),
                ..base.clone()
            },
            CleanRecord {
                abstract_text: None,
                ..base.clone()
            },
        ];

        let enriched = derive_features(&records);
        assert_eq!(enriched.len(), records.len());

        assert_eq!(enriched[0].year, 2020);
        assert_eq!(enriched[0].title_word_count, 3);
        assert_eq!(enriched[0].abstract_word_count, 3);
        assert_eq!(enriched[1].abstract_word_count, 0);
        assert_eq!(enriched[2].abstract_word_count, 0);

        // Existing column values come through untouched.
        for (clean_rec, paper) in records.iter().zip(&enriched) {
            assert_eq!(&paper.to_clean(), clean_rec);
        }
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("a b c"), 3);
        assert_eq!(word_count("  a \t b\nc  "), 3);
    }
}
