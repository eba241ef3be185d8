//! Serialization of export directives into file bodies.
//!
//! CSV columns come from the first record only. Fields that appear only in
//! later records are dropped; missing ones become empty cells.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::shell::{DataType, ExportData, ExportFormat};

/// A rendered export ready to be written or sent to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub body: String,
    pub format: ExportFormat,
}

pub fn filename(format: ExportFormat, data_type: DataType) -> String {
    format!("jobshell_{data_type}.{format}")
}

pub fn render(format: ExportFormat, data_type: DataType, data: &ExportData) -> Result<ExportFile> {
    let body = match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(data).context("Failed to serialize export to JSON")?
        }
        ExportFormat::Csv => to_csv(data)?,
    };

    Ok(ExportFile {
        filename: filename(format, data_type),
        body,
        format,
    })
}

fn to_csv(data: &ExportData) -> Result<String> {
    let records = data
        .to_records()
        .context("Failed to convert export records")?;
    let Some(Value::Object(first)) = records.first() else {
        return Ok(String::new());
    };
    let header: Vec<String> = first.keys().cloned().collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for record in &records {
        let row = header
            .iter()
            .map(|key| record.get(key).map(cell).unwrap_or_default());
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join("; "),
        other => other.to_string(),
    }
}
