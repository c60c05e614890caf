//! pennywise-ingest: raw statement rows, field parsers, and row normalization.

pub mod csv_rows;
pub mod normalize;
pub mod parsers;
pub mod sample;
pub mod types;

pub use csv_rows::{read_csv_rows, read_csv_rows_from_reader};
pub use normalize::{NormalizeReport, RowNormalizer, SkipReason, SkippedRow};
pub use parsers::{DateParser, parse_amount};
pub use sample::{sample_rows, write_sample_csv};
pub use types::{Field, RawRow};
