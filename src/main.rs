use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use paper_trends::data::aggregate::{DEFAULT_TOP_JOURNALS, DEFAULT_TOP_WORDS};
use paper_trends::data::clean::{clean, derive_features};
use paper_trends::data::explore::profile;
use paper_trends::data::filter::YearRange;
use paper_trends::data::loader::load_file;
use paper_trends::data::writer::write_csv;
use paper_trends::report::render_report;
use paper_trends::state::ExplorerState;

#[derive(Parser)]
#[command(name = "paper-trends")]
#[command(version, about = "Clean, enrich, and summarise research-paper metadata", long_about = None)]
struct Cli {
    /// Input metadata table (.csv, .json, or .parquet)
    input: PathBuf,

    /// Where to write the cleaned, feature-enriched CSV
    #[arg(short, long, default_value = "cleaned_metadata.csv")]
    output: PathBuf,

    /// How many journals to rank in the report
    #[arg(long, default_value_t = DEFAULT_TOP_JOURNALS)]
    top_journals: usize,

    /// How many title words to rank in the report
    #[arg(long, default_value_t = DEFAULT_TOP_WORDS)]
    top_words: usize,

    /// Only summarise papers published in or after this year
    #[arg(long)]
    from: Option<i32>,

    /// Only summarise papers published in or before this year
    #[arg(long)]
    to: Option<i32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let raw = load_file(&cli.input)?;
    let table_profile = profile(&raw);

    let (cleaned, stats) = clean(&raw);
    log::info!(
        "Cleaned {} rows: kept {}, dropped {} missing fields, {} invalid dates",
        stats.input_rows,
        stats.kept_rows,
        stats.dropped_missing_required,
        stats.dropped_invalid_date
    );

    let enriched = derive_features(&cleaned);
    write_csv(&cli.output, &enriched)?;

    let mut state = ExplorerState {
        top_journals_k: cli.top_journals,
        top_words_k: cli.top_words,
        ..Default::default()
    };
    state.set_corpus(enriched);
    if let Some(range) = requested_range(&cli, state.year_range) {
        state.set_year_range(range);
    }

    let stdout = io::stdout();
    render_report(&mut stdout.lock(), &table_profile, &stats, &state)?;
    Ok(())
}

/// The year range the flags ask for, with missing ends defaulting to the
/// corpus span.  None when no flag was given or the corpus is empty.
fn requested_range(cli: &Cli, span: Option<YearRange>) -> Option<YearRange> {
    if cli.from.is_none() && cli.to.is_none() {
        return None;
    }
    let span = span?;
    Some(YearRange::new(
        cli.from.unwrap_or(span.start),
        cli.to.unwrap_or(span.end),
    ))
}
