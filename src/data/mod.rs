//! Data layer: record types and the load → clean → derive → aggregate
//! pipeline.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<RawRecord>, schema check
//!   └──────────┘
//!        │
//!        ├──────────────► explore: rows × columns, missing counts
//!        ▼
//!   ┌──────────┐
//!   │  clean    │  drop unusable rows, parse dates, derive features
//!   └──────────┘
//!        │
//!        ├──────────────► writer: cleaned table → CSV
//!        ▼
//!   ┌──────────────┐
//!   │ aggregate     │  by year, top journals, title words, sources
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  year-range selection for the explorer
//!   └──────────┘
//! ```

pub mod aggregate;
pub mod clean;
pub mod explore;
pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;
