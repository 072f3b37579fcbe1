use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::aideon::contacts::error::{ContactError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header cells plus data rows of a delimited-text document, blank lines
/// removed and every cell trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimitedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Tokenizes comma-separated text. Quoted fields may carry commas, doubled
/// quotes, and line breaks, and may be preceded by blanks (`a, "b"`); rows
/// may be shorter or longer than the header. A quoted field left open at the
/// end of the input is an error.
pub fn read_table(data: &[u8]) -> Result<DelimitedTable> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let data = unpad_quoted_fields(data)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data.as_slice());

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if headers.is_none() {
            headers = Some(cells);
        } else {
            rows.push(cells);
        }
    }

    let headers = headers.unwrap_or_default();
    debug!(
        column_count = headers.len(),
        row_count = rows.len(),
        "tokenized delimited text"
    );
    Ok(DelimitedTable { headers, rows })
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

/// Drops blanks between a delimiter and an opening quote, which the CSV
/// reader would otherwise keep as literal text, and rejects input that ends
/// inside a quoted field.
fn unpad_quoted_fields(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(data.len());
    let mut padding: Vec<u8> = Vec::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut after_closing_quote = false;
    let mut line = 1usize;
    let mut opened_on = 0usize;

    for &byte in data {
        if byte == b'\n' {
            line += 1;
        }

        if in_quotes {
            output.push(byte);
            if byte == b'"' {
                in_quotes = false;
                after_closing_quote = true;
            }
            continue;
        }

        if field_start && matches!(byte, b' ' | b'\t') {
            padding.push(byte);
            continue;
        }

        // A quote right after a closing one is an escaped `""`.
        if byte == b'"' && (field_start || after_closing_quote) {
            if field_start {
                padding.clear();
                opened_on = line;
            }
            in_quotes = true;
            field_start = false;
            after_closing_quote = false;
            output.push(byte);
            continue;
        }

        output.append(&mut padding);
        output.push(byte);
        field_start = matches!(byte, b',' | b'\n' | b'\r');
        after_closing_quote = false;
    }

    if in_quotes {
        return Err(ContactError::InvalidDelimited(format!(
            "quoted field opened on line {opened_on} is never closed"
        )));
    }

    output.append(&mut padding);
    Ok(output)
}
