use super::model::PaperRecord;

// ---------------------------------------------------------------------------
// Year-range filtering
// ---------------------------------------------------------------------------

/// Inclusive range of publication years, the filter the explorer exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        YearRange { start, end }
    }

    /// Whether `year` falls inside the range, both bounds included.
    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// A range with `start > end` selects nothing.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Records whose publication year falls inside `range`, in input order.
/// The input is left untouched; narrowing and widening the range never
/// loses rows.
pub fn filter_by_year(records: &[PaperRecord], range: YearRange) -> Vec<PaperRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.year))
        .cloned()
        .collect()
}

/// The `[min, max]` publication-year span of a table, or `None` when the
/// table is empty.  Used to initialise the explorer's range selector.
pub fn year_span(records: &[PaperRecord]) -> Option<YearRange> {
    let years = records.iter().map(|r| r.year);
    let start = years.clone().min()?;
    let end = years.max()?;
    Some(YearRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn paper_in(year: i32) -> PaperRecord {
        PaperRecord {
            title: format!("Paper {year}"),
            abstract_text: None,
            authors: None,
            journal: None,
            publish_time: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            source: None,
            year,
            abstract_word_count: 0,
            title_word_count: 2,
        }
    }

    #[test]
    fn keeps_only_years_inside_the_range() {
        let records = vec![paper_in(2019), paper_in(2020), paper_in(2021), paper_in(2022)];
        let kept = filter_by_year(&records, YearRange::new(2020, 2021));
        let years: Vec<i32> = kept.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2020, 2021]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = YearRange::new(2020, 2020);
        assert!(range.contains(2020));
        assert!(!range.contains(2019));
        assert!(!range.contains(2021));

        let records = vec![paper_in(2020)];
        assert_eq!(filter_by_year(&records, range).len(), 1);
    }

    #[test]
    fn inverted_range_selects_nothing() {
        let range = YearRange::new(2021, 2019);
        assert!(range.is_empty());

        let records = vec![paper_in(2019), paper_in(2020), paper_in(2021)];
        assert!(filter_by_year(&records, range).is_empty());
    }

    #[test]
    fn filtering_preserves_input_order_and_input() {
        let records = vec![paper_in(2021), paper_in(2019), paper_in(2021), paper_in(2020)];
        let kept = filter_by_year(&records, YearRange::new(2020, 2021));
        let years: Vec<i32> = kept.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2021, 2021, 2020]);
        // Source table is intact, so widening the range again recovers rows.
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn year_span_covers_min_to_max() {
        assert_eq!(year_span(&[]), None);

        let records = vec![paper_in(2020), paper_in(2017), paper_in(2023)];
        assert_eq!(year_span(&records), Some(YearRange::new(2017, 2023)));
    }
}
