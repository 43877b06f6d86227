pub mod csv_parser;
pub mod error;
pub mod table_formatter;

pub use csv_parser::{parse_products, ParseOutcome};
pub use error::{ImportError, RowError};
pub use table_formatter::TableFormatter;
