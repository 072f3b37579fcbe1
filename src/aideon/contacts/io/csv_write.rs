use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::aideon::contacts::error::{ContactError, Result};

/// Writes `header_line` verbatim followed by `rows`, quoting every field.
pub fn write_quoted<I, R, F>(header_line: &str, rows: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut buffer = Vec::with_capacity(header_line.len() + 2);
    buffer.extend_from_slice(header_line.as_bytes());
    buffer.push(b'\n');

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    for row in rows {
        writer.write_record(row)?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|err| ContactError::Export(format!("failed to flush CSV writer: {err}")))?;
    String::from_utf8(buffer)
        .map_err(|err| ContactError::Export(format!("CSV output is not UTF-8: {err}")))
}
