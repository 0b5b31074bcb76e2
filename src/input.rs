//! Reading name frequency tables and must-have lists.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::Reader;
use serde::Deserialize;

use crate::error::Result;

/// One row of the name frequency table (`name,n,rank`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NameRow {
    pub name: String,
    /// Number of occurrences on this row.
    #[serde(rename = "n")]
    pub frequency: u64,
    /// Popularity rank on this row (lower = more popular).
    pub rank: u32,
}

impl NameRow {
    pub fn new(name: impl Into<String>, frequency: u64, rank: u32) -> Self {
        Self {
            name: name.into(),
            frequency,
            rank,
        }
    }
}

/// Parse every row of a headed CSV. The first malformed row aborts the read.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<NameRow>> {
    let mut rows = Vec::new();
    for record in Reader::from_reader(reader).into_deserialize::<NameRow>() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Parse a CSV file from disk.
pub fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<NameRow>> {
    read_rows(File::open(path)?)
}

/// Names exempt from degree pruning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MustHave {
    names: HashSet<String>,
}

impl MustHave {
    /// Read one name per line; blank lines are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut names = HashSet::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let name = line.trim();
            if !name.is_empty() {
                names.insert(name.to_string());
            }
        }
        Ok(Self { names })
    }

    /// Read a must-have list from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Whether `name` is listed (exact match).
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for MustHave {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn reads_rows_with_extra_columns() {
        let data = "name,n,rank,year\nAmy,50,1,2019\nAmber,5,2,2019\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows, vec![NameRow::new("Amy", 50, 1), NameRow::new("Amber", 5, 2)]);
    }

    #[test]
    fn non_integer_frequency_is_fatal() {
        let data = "name,n,rank\nAmy,fifty,1\n";
        assert!(matches!(read_rows(data.as_bytes()), Err(NetworkError::Csv(_))));
    }

    #[test]
    fn non_integer_rank_is_fatal() {
        let data = "name,n,rank\nAmy,50,1\nZoe,12,2.5\n";
        assert!(read_rows(data.as_bytes()).is_err());
    }

    #[test]
    fn header_only_yields_no_rows() {
        assert!(read_rows("name,n,rank\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn must_have_skips_blank_lines() {
        let list = MustHave::from_reader("Amy\n\n  Zoe  \n".as_bytes()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("Zoe"));
        assert!(!list.contains("amy"));
    }
}
