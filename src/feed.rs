//! CSV row feed
//!
//! Standalone stand-in for a host row pipeline: the header row becomes the
//! schema, every following record becomes a row. The schema is read once at
//! open; records are streamed.

use crate::error::Result;
use crate::types::{Row, RowSchema, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Streaming CSV row source
pub struct CsvFeed<R: Read> {
    reader: csv::Reader<R>,
    schema: RowSchema,
    record: csv::StringRecord,
}

impl CsvFeed<BufReader<File>> {
    /// Open a CSV file as a row feed
    pub fn open(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), delimiter)
    }
}

impl<R: Read> CsvFeed<R> {
    /// Build a feed from any reader, useful for tests
    pub fn from_reader(reader: R, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let schema = RowSchema::new(headers.iter());

        Ok(Self {
            reader,
            schema,
            record: csv::StringRecord::new(),
        })
    }

    /// Column schema read from the header row
    pub const fn schema(&self) -> &RowSchema {
        &self.schema
    }
}

impl<R: Read> Iterator for CsvFeed<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                let cells = self
                    .record
                    .iter()
                    .map(|cell| Value::Text(cell.to_string()))
                    .collect();
                Some(Ok(Row::new(cells)))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_becomes_schema() {
        let data = "title,body,user_id\nServer down,details,7\n";
        let feed = CsvFeed::from_reader(Cursor::new(data), b',').unwrap();
        assert_eq!(feed.schema().columns(), ["title", "body", "user_id"]);
    }

    #[test]
    fn test_records_stream_as_rows() {
        let data = "title,body\nfirst,a\nsecond,b\n";
        let mut feed = CsvFeed::from_reader(Cursor::new(data), b',').unwrap();

        let row = feed.next().unwrap().unwrap();
        assert_eq!(row.get(0), Some(&Value::Text("first".to_string())));

        let row = feed.next().unwrap().unwrap();
        assert_eq!(row.get(1), Some(&Value::Text("b".to_string())));

        assert!(feed.next().is_none());
    }

    #[test]
    fn test_semicolon_delimiter() {
        let data = "title;body\nhello;world\n";
        let mut feed = CsvFeed::from_reader(Cursor::new(data), b';').unwrap();
        assert_eq!(feed.schema().columns(), ["title", "body"]);

        let row = feed.next().unwrap().unwrap();
        assert_eq!(row.get(1), Some(&Value::Text("world".to_string())));
    }

    #[test]
    fn test_short_record_yields_short_row() {
        let data = "title,body\nonly-title\n";
        let mut feed = CsvFeed::from_reader(Cursor::new(data), b',').unwrap();

        let row = feed.next().unwrap().unwrap();
        assert_eq!(row.get(0), Some(&Value::Text("only-title".to_string())));
        assert_eq!(row.get(1), None);
    }

    #[test]
    fn test_open_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "title\nfrom-file\n").unwrap();

        let mut feed = CsvFeed::open(&path, b',').unwrap();
        assert_eq!(feed.schema().columns(), ["title"]);
        assert!(feed.next().unwrap().is_ok());
    }
}
