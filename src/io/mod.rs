//! I/O handling for the CSV front end
//!
//! - `csv_format`: pure row/record conversion and account output
//! - `reader`: streaming command reader over an input file

pub mod csv_format;
pub mod reader;

pub use csv_format::write_accounts_csv;
pub use reader::CommandReader;
