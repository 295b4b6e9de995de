//! Streaming CSV command reader with iterator interface
//!
//! Provides a streaming iterator over ledger commands from a CSV file,
//! delegating format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row parsing errors are yielded as Err variants in the
//!   iterator, with line numbers for debugging, so one malformed row never
//!   stops the stream

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::Command;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader over ledger command rows
///
/// Reads one CSV record at a time; memory usage is constant in the file
/// size.
#[derive(Debug)]
pub struct CommandReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl CommandReader {
    /// Open a command CSV file for streaming iteration
    ///
    /// The reader trims whitespace from all fields and tolerates short rows
    /// (open rows routinely omit the destination column).
    ///
    /// # Errors
    ///
    /// Returns an error string if the file cannot be opened.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        Ok(CommandReader {
            reader,
            line_num: 1, // header row
        })
    }
}

impl Iterator for CommandReader {
    type Item = Result<Command, String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line_num += 1;
        let mut deserializer = self.reader.deserialize::<CsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => Some(
                convert_csv_record(csv_record)
                    .map_err(|e| format!("Line {}: {}", self.line_num, e)),
            ),
            Err(e) => Some(Err(format!(
                "Line {}: CSV parse error: {}",
                self.line_num, e
            ))),
        }
    }
}
