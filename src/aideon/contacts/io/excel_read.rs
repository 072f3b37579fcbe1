use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek};

use calamine::{DataType, Range, Reader, Xls, Xlsx};
use tracing::debug;

use crate::aideon::contacts::error::{ContactError, Result};

/// One worksheet row keyed by the original (unnormalized) header text. Empty
/// cells are left out.
pub type SheetRow = BTreeMap<String, String>;

/// Container formats accepted for spreadsheet sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Office Open XML workbook (`.xlsx`).
    Xlsx,
    /// Excel 97-2003 binary workbook (`.xls`).
    Xls,
}

/// Reads the first worksheet of an in-memory workbook into header-keyed rows.
pub fn read_first_sheet(data: &[u8], format: WorkbookFormat) -> Result<Vec<SheetRow>> {
    let cursor = Cursor::new(data);
    match format {
        WorkbookFormat::Xlsx => {
            let workbook: Xlsx<_> = Xlsx::new(cursor)?;
            first_sheet_rows(workbook)
        }
        WorkbookFormat::Xls => {
            let workbook: Xls<_> = Xls::new(cursor)?;
            first_sheet_rows(workbook)
        }
    }
}

fn first_sheet_rows<RS, R>(mut workbook: R) -> Result<Vec<SheetRow>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    ContactError: From<R::Error>,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ContactError::InvalidWorkbook("workbook has no worksheets".into()))??;
    let rows = rows_from_range(&range);
    debug!(row_count = rows.len(), "read rows from first worksheet");
    Ok(rows)
}

fn rows_from_range(range: &Range<DataType>) -> Vec<SheetRow> {
    let headers: Vec<String> = match range.rows().next() {
        Some(first_row) => first_row.iter().map(cell_text).collect(),
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    for row in range.rows().skip(1) {
        let mut record = SheetRow::new();
        for (col_idx, cell) in row.iter().enumerate() {
            let Some(header) = headers.get(col_idx) else {
                continue;
            };
            if header.trim().is_empty() {
                continue;
            }

            let value = cell_text(cell);
            if value.trim().is_empty() {
                continue;
            }
            record.entry(header.clone()).or_insert(value);
        }

        if !record.is_empty() {
            rows.push(record);
        }
    }
    rows
}

/// Text shown for a cell. Whole numbers lose their fractional part so phone
/// numbers stored as numbers read back as digits.
fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(text) => text.clone(),
        DataType::Float(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
            format!("{number:.0}")
        }
        other => other.to_string(),
    }
}
