pub mod csv;

pub use csv::{parse_csv, CsvValue, ParsedCsv, RawRow};
