use std::fmt;

/// Parse-time failure. Any of these aborts the whole parse; no partial graph is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The table has a header but no data rows (or no content at all).
    EmptyInput,
    /// One or more of the required columns is absent from the header.
    MissingColumns { columns: Vec<String> },
    /// A row has an empty required field.
    RowValidation {
        row: usize,
        column: &'static str,
        record: String,
    },
    /// The text could not be read as CSV at all.
    Decode { message: String },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "CSV file is empty"),
            Self::MissingColumns { columns } => {
                write!(f, "Missing required columns: {}", columns.join(", "))
            }
            Self::RowValidation {
                row,
                column,
                record,
            } => write!(
                f,
                "Invalid row {row}: required column '{column}' is empty in {record}"
            ),
            Self::Decode { message } => write!(f, "Failed to parse CSV: {message}"),
        }
    }
}

impl std::error::Error for TopologyError {}

impl From<csv::Error> for TopologyError {
    fn from(err: csv::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}
