use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::BlastError;

/// One CSV data row, keyed by header name. Lives for one loop iteration.
pub type Row = HashMap<String, String>;

/// The parsed recipient data: header order plus one map per data row.
#[derive(Debug)]
pub struct RecipientList {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl RecipientList {
    /// Load recipient rows from a CSV file with a header line.
    pub fn from_path(path: &Path) -> Result<Self, BlastError> {
        let file = File::open(path).map_err(|source| BlastError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BlastError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for row in csv_reader.deserialize::<Row>() {
            rows.push(row?);
        }

        Ok(Self { headers, rows })
    }

    /// First column whose name looks like it holds email addresses.
    pub fn detect_email_column(&self) -> Option<&str> {
        self.headers.iter().map(String::as_str).find(|header| {
            let header = header.to_lowercase();
            header.contains("email") || header.contains("e-mail")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Full Name,Email Address,city\nAlice,a@x.com,Zurich\nBob,b@x.com,Basel\n";

    #[test]
    fn reads_header_and_rows() {
        let list = RecipientList::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(list.headers, vec!["Full Name", "Email Address", "city"]);
        assert_eq!(list.rows.len(), 2);
        assert_eq!(list.rows[0]["Full Name"], "Alice");
        assert_eq!(list.rows[1]["Email Address"], "b@x.com");
    }

    #[test]
    fn detects_email_column_case_insensitively() {
        let list = RecipientList::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(list.detect_email_column(), Some("Email Address"));
    }

    #[test]
    fn detects_hyphenated_email_column() {
        let list = RecipientList::from_reader("name,E-Mail\nAlice,a@x.com\n".as_bytes()).unwrap();
        assert_eq!(list.detect_email_column(), Some("E-Mail"));
    }

    #[test]
    fn no_email_column_detected() {
        let list = RecipientList::from_reader("name,city\nAlice,Zurich\n".as_bytes()).unwrap();
        assert_eq!(list.detect_email_column(), None);
    }

    #[test]
    fn ragged_row_is_an_error() {
        let result = RecipientList::from_reader("name,email\nAlice\n".as_bytes());
        assert!(matches!(result, Err(BlastError::Csv(_))));
    }
}
