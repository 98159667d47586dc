use std::io::Write;

use super::columns::REPORT_COLUMNS;
use crate::contributions::ReportRow;
use crate::fmt::format_amount;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes rows as CSV using the report's column headers. Amounts keep two decimals and no symbol.
pub fn write_csv<W: Write>(writer: W, rows: &[ReportRow]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(REPORT_COLUMNS.iter().map(|column| column.header))?;

    for row in rows {
        csv_writer.write_record(REPORT_COLUMNS.iter().map(|column| {
            column
                .amount(row)
                .map(format_amount)
                .unwrap_or_else(|| column.field.text(row).into_owned())
        }))?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string(rows: &[ReportRow]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
