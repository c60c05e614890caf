//! Field-level parsers for statement cells

pub mod amount;
pub mod dates;

pub use amount::parse_amount;
pub use dates::DateParser;
