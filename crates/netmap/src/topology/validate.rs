use super::decode::{DecodedTable, RawRecord};
use super::error::TopologyError;
use super::types::ConnectionRecord;

/// Columns every topology table must have, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 3] = ["source", "target", "type"];

/// Turn decoded rows into connection records.
///
/// All-or-nothing: the first failing row aborts the whole table.
pub fn validate(table: &DecodedTable) -> Result<Vec<ConnectionRecord>, TopologyError> {
    if table.records.is_empty() {
        return Err(TopologyError::EmptyInput);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !table.has_column(col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TopologyError::MissingColumns { columns: missing });
    }

    table.records.iter().map(validate_row).collect()
}

fn validate_row(raw: &RawRecord) -> Result<ConnectionRecord, TopologyError> {
    let required = |column: &'static str| -> Result<String, TopologyError> {
        raw.non_empty(column)
            .map(str::to_string)
            .ok_or_else(|| TopologyError::RowValidation {
                row: raw.row,
                column,
                record: raw.to_string(),
            })
    };
    let optional = |column: &str| raw.non_empty(column).map(str::to_string);

    Ok(ConnectionRecord {
        row: raw.row,
        source: required("source")?,
        target: required("target")?,
        device_type: required("type")?,
        local_port: optional("localPort"),
        remote_port: optional("remotePort"),
        local_port_name: optional("localPortName"),
        remote_port_name: optional("remotePortName"),
        bandwidth: optional("bandwidth"),
        label: optional("label"),
    })
}
