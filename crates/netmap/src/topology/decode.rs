use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::error::TopologyError;

/// A decoded table: header row plus data rows in input order.
#[derive(Debug, Clone, Default)]
pub struct DecodedTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl DecodedTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

/// One data row keyed by header name.
///
/// Columns past the end of a short row are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based data row number (header excluded, blank lines skipped).
    pub row: usize,
    pub fields: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Field value, with empty strings treated as absent.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value:?}")?;
        }
        write!(f, "}}")
    }
}

/// Decode header-row CSV text into ordered records.
///
/// Field values are trimmed; header names are matched exactly and must be unique. Blank lines
/// are skipped. Rows may be shorter or longer than the header; extra trailing fields are dropped.
pub fn decode(text: &str) -> Result<DecodedTable, TopologyError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut seen = HashSet::new();
    if let Some(duplicate) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(TopologyError::Decode {
            message: format!("duplicate column '{duplicate}' in header"),
        });
    }

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        records.push(RawRecord { row: i + 1, fields });
    }

    tracing::trace!(
        columns = headers.len(),
        rows = records.len(),
        "decoded topology table"
    );

    Ok(DecodedTable { headers, records })
}
