use std::sync::Arc;

use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const ROWS: usize = 120;

const TITLE_WORDS: &[&str] = &[
    "covid", "transmission", "dynamics", "vaccine", "response", "clinical",
    "outcomes", "respiratory", "infection", "modelling", "genomic",
    "surveillance", "antibody", "immunity", "hospital", "patients",
    "pandemic", "spread", "variant", "screening", "COVID-19", "SARS-CoV-2",
];

const FILLER_WORDS: &[&str] = &[
    "the", "of", "and", "in", "we", "study", "results", "data", "analysis",
    "method", "observed", "cohort", "between", "significant", "measured",
];

const JOURNALS: &[&str] = &[
    "The Lancet", "Nature Medicine", "JAMA", "BMJ", "PLOS ONE", "Cell",
    "Science", "Journal of Virology",
];

const SOURCES: &[&str] = &["PMC", "Elsevier", "WHO", "medRxiv", "biorxiv"];

const AUTHOR_NAMES: &[&str] = &[
    "Chen, L.", "Garcia, M.", "Smith, J.", "Kumar, A.", "Tanaka, H.",
    "Okafor, C.", "Rossi, F.", "Park, S.",
];

// Skewed towards the pandemic years, like the real corpus.
const YEARS: &[i32] = &[2018, 2019, 2019, 2020, 2020, 2020, 2021, 2021, 2022, 2023];

const MONTH_NAMES: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct",
    "Nov", "Dec",
];

const INVALID_DATES: &[&str] = &["unknown", "n.d.", "15-06-2021", "2020-19-88"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn pick<'a>(rng: &mut SimpleRng, items: &'a [&'a str]) -> &'a str {
    items[rng.below(items.len())]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn make_title(rng: &mut SimpleRng) -> String {
    let len = 3 + rng.below(5);
    let words: Vec<&str> = (0..len).map(|_| pick(rng, TITLE_WORDS)).collect();
    let mut title = capitalize(words[0]);
    for word in &words[1..] {
        title.push(' ');
        title.push_str(word);
    }
    title
}

fn make_abstract(rng: &mut SimpleRng) -> String {
    let len = rng.gauss(120.0, 40.0).max(20.0) as usize;
    let words: Vec<&str> = (0..len)
        .map(|i| {
            if i % 3 == 0 {
                pick(rng, TITLE_WORDS)
            } else {
                pick(rng, FILLER_WORDS)
            }
        })
        .collect();
    words.join(" ")
}

fn make_authors(rng: &mut SimpleRng) -> String {
    let count = 1 + rng.below(3);
    let names: Vec<&str> = (0..count).map(|_| pick(rng, AUTHOR_NAMES)).collect();
    names.join("; ")
}

/// A date string in one of the formats the corpus actually contains.
fn make_date(rng: &mut SimpleRng) -> String {
    let year = YEARS[rng.below(YEARS.len())];
    let month = 1 + rng.below(12);
    let day = 1 + rng.below(28);

    match rng.below(10) {
        0..=3 => format!("{year}-{month:02}-{day:02}"),
        4..=5 => format!("{year}/{month:02}/{day:02}"),
        6 => format!("{year} {} {day}", MONTH_NAMES[month - 1]),
        7 => format!("{year}-{month:02}"),
        8 => format!("{year} {}", MONTH_NAMES[month - 1]),
        _ => format!("{year}"),
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Collect all rows
    let mut all_title: Vec<Option<String>> = Vec::new();
    let mut all_abstract: Vec<Option<String>> = Vec::new();
    let mut all_authors: Vec<Option<String>> = Vec::new();
    let mut all_journal: Vec<Option<String>> = Vec::new();
    let mut all_date: Vec<Option<String>> = Vec::new();
    let mut all_source: Vec<Option<String>> = Vec::new();

    for _ in 0..ROWS {
        let title = if rng.chance(0.08) {
            None
        } else {
            Some(make_title(&mut rng))
        };
        let abstract_text = if rng.chance(0.25) {
            None
        } else {
            Some(make_abstract(&mut rng))
        };
        let authors = if rng.chance(0.10) {
            None
        } else {
            Some(make_authors(&mut rng))
        };
        let journal = if rng.chance(0.15) {
            None
        } else {
            Some(pick(&mut rng, JOURNALS).to_string())
        };
        let publish_time = if rng.chance(0.05) {
            None
        } else if rng.chance(0.04) {
            Some(pick(&mut rng, INVALID_DATES).to_string())
        } else {
            Some(make_date(&mut rng))
        };
        let source = if rng.chance(0.20) {
            None
        } else {
            Some(pick(&mut rng, SOURCES).to_string())
        };

        all_title.push(title);
        all_abstract.push(abstract_text);
        all_authors.push(authors);
        all_journal.push(journal);
        all_date.push(publish_time);
        all_source.push(source);
    }

    // Write CSV. The source column keeps the corpus's original header name.
    let csv_path = "sample_metadata.csv";
    let mut writer =
        csv::Writer::from_path(csv_path).expect("Failed to create sample CSV");
    writer
        .write_record([
            "title",
            "abstract",
            "authors",
            "journal",
            "publish_time",
            "source_x",
        ])
        .expect("Failed to write CSV header");
    for i in 0..ROWS {
        let cell = |field: &[Option<String>]| field[i].clone().unwrap_or_default();
        writer
            .write_record([
                cell(&all_title),
                cell(&all_abstract),
                cell(&all_authors),
                cell(&all_journal),
                cell(&all_date),
                cell(&all_source),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    // Build Arrow arrays
    let title_array = StringArray::from(all_title);
    let abstract_array = StringArray::from(all_abstract);
    let authors_array = StringArray::from(all_authors);
    let journal_array = StringArray::from(all_journal);
    let date_array = StringArray::from(all_date);
    let source_array = StringArray::from(all_source);

    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, true),
        Field::new("abstract", DataType::Utf8, true),
        Field::new("authors", DataType::Utf8, true),
        Field::new("journal", DataType::Utf8, true),
        Field::new("publish_time", DataType::Utf8, true),
        Field::new("source_x", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(title_array),
            Arc::new(abstract_array),
            Arc::new(authors_array),
            Arc::new(journal_array),
            Arc::new(date_array),
            Arc::new(source_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_metadata.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {ROWS} paper records to {csv_path} and {parquet_path}");
}
