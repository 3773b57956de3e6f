use std::io;

use crate::data::clean::CleanStats;
use crate::data::explore::TableProfile;
use crate::state::ExplorerState;

// ---------------------------------------------------------------------------
// Plain-text report
// ---------------------------------------------------------------------------

const RULE_WIDTH: usize = 60;
const BAR_WIDTH: usize = 40;
const SAMPLE_ROWS: usize = 5;
const TITLE_CLIP: usize = 48;

/// Render the whole analysis as a plain-text report: input profile,
/// cleaning outcome, headline metrics, and the four aggregation tables
/// for the currently visible subset.
pub fn render_report<W: io::Write>(
    out: &mut W,
    profile: &TableProfile,
    stats: &CleanStats,
    state: &ExplorerState,
) -> io::Result<()> {
    writeln!(out, "PAPER METADATA ANALYSIS")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    write_profile(out, profile)?;
    write_clean_stats(out, stats)?;
    write_summary(out, state)?;

    Ok(())
}

fn write_profile<W: io::Write>(out: &mut W, profile: &TableProfile) -> io::Result<()> {
    writeln!(out, "\nINPUT TABLE")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(out, "Rows:    {}", profile.rows)?;
    writeln!(out, "Columns: {}", profile.columns)?;
    writeln!(out, "Missing values per column:")?;
    for (column, count) in &profile.missing {
        writeln!(out, "  {:<14} {:>8}", column, count)?;
    }
    Ok(())
}

fn write_clean_stats<W: io::Write>(out: &mut W, stats: &CleanStats) -> io::Result<()> {
    writeln!(out, "\nCLEANING")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(out, "Input rows:               {:>8}", stats.input_rows)?;
    writeln!(
        out,
        "Dropped (missing fields): {:>8}",
        stats.dropped_missing_required
    )?;
    writeln!(
        out,
        "Dropped (invalid date):   {:>8}",
        stats.dropped_invalid_date
    )?;
    writeln!(out, "Kept rows:                {:>8}", stats.kept_rows)?;
    Ok(())
}

fn write_summary<W: io::Write>(out: &mut W, state: &ExplorerState) -> io::Result<()> {
    let Some(summary) = &state.summary else {
        writeln!(out, "\nNo corpus ingested; nothing to summarise.")?;
        return Ok(());
    };

    writeln!(out, "\nCORPUS OVERVIEW")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    match state.year_range {
        Some(range) => writeln!(out, "Year filter:         {} to {}", range.start, range.end)?,
        None => writeln!(out, "Year filter:         none")?,
    }
    writeln!(out, "Papers:              {}", summary.total_papers)?;
    writeln!(out, "Unique journals:     {}", summary.unique_journals)?;
    writeln!(
        out,
        "Mean abstract words: {:.1}",
        summary.mean_abstract_words
    )?;

    writeln!(out, "\nPUBLICATIONS BY YEAR")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    if summary.by_year.is_empty() {
        writeln!(out, "(no rows)")?;
    } else {
        let max = summary
            .by_year
            .entries()
            .iter()
            .map(|(_, n)| *n)
            .max()
            .unwrap_or(1);
        for (year, count) in summary.by_year.entries() {
            writeln!(out, "{:<6} {:>6}  {}", year, count, bar(*count, max))?;
        }
    }

    writeln!(out, "\nTOP JOURNALS")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    if summary.journals.is_empty() {
        writeln!(out, "(no rows)")?;
    } else {
        for (rank, (journal, count)) in summary.journals.entries().iter().enumerate() {
            writeln!(out, "{:>3}. {:<44} {:>6}", rank + 1, journal, count)?;
        }
    }

    writeln!(out, "\nTOP TITLE WORDS")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    if summary.title_words.ranked.is_empty() {
        writeln!(out, "(no rows)")?;
    } else {
        for (rank, (word, count)) in summary.title_words.ranked.entries().iter().enumerate() {
            writeln!(out, "{:>3}. {:<44} {:>6}", rank + 1, word, count)?;
        }
    }

    writeln!(out, "\nPAPERS BY SOURCE")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    if summary.sources.is_empty() {
        writeln!(out, "(no sources recorded)")?;
    } else {
        let total = summary.sources.total();
        for (source, count) in summary.sources.entries() {
            let share = *count as f64 * 100.0 / total as f64;
            writeln!(out, "{:<24} {:>6}  {:>5.1}%", source, count, share)?;
        }
    }

    writeln!(out, "\nSAMPLE OF VISIBLE PAPERS")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    if state.visible.is_empty() {
        writeln!(out, "(no visible rows)")?;
    } else {
        for record in state.visible.iter().take(SAMPLE_ROWS) {
            let journal = record.journal.as_deref().unwrap_or("Unknown");
            writeln!(
                out,
                "{:<4} {:<50} {}",
                record.year,
                clip(&record.title, TITLE_CLIP),
                journal
            )?;
        }
        if state.visible.len() > SAMPLE_ROWS {
            writeln!(out, "... and {} more", state.visible.len() - SAMPLE_ROWS)?;
        }
    }

    Ok(())
}

/// A `#` bar scaled against the largest count in the table.  Non-zero
/// counts always draw at least one mark.
fn bar(count: usize, max: usize) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH / max).max(1);
    "#".repeat(len)
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let clipped: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{clipped}...")
}
