use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::aideon::contacts::error::Result;
use crate::aideon::contacts::io::csv_write;
use crate::aideon::contacts::io::excel_write::{self, SheetTable};
use crate::aideon::contacts::model::ContactGroup;

/// Header line emitted at the top of every CSV export.
pub const CSV_HEADER: &str = "Name, Email, Phone";

const SHEET_COLUMNS: [&str; 3] = ["Name", "Email", "Phone"];

/// A rendered group ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument<C = String> {
    pub file_name: String,
    pub contents: C,
}

impl<C: AsRef<[u8]>> ExportedDocument<C> {
    /// Writes the document into `dir` under its own file name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, self.contents.as_ref())?;
        debug!(path = %path.display(), "export written");
        Ok(path)
    }
}

/// File name used for the CSV export of the group with `ordinal`.
pub fn csv_file_name(ordinal: usize) -> String {
    format!("contacts-group-{ordinal}.csv")
}

/// File name used for the workbook export of the group with `ordinal`.
pub fn xlsx_file_name(ordinal: usize) -> String {
    format!("contacts-group-{ordinal}.xlsx")
}

/// Serializes one group to quoted comma-separated text. An absent phone is
/// written as an empty quoted field.
#[instrument(level = "debug", skip_all, fields(ordinal = group.ordinal, size = group.len()))]
pub fn export_group(group: &ContactGroup) -> Result<ExportedDocument> {
    let rows = group.contacts.iter().map(|contact| {
        [
            contact.name.as_str(),
            contact.email.as_str(),
            contact.phone.as_deref().unwrap_or_default(),
        ]
    });
    let contents = csv_write::write_quoted(CSV_HEADER, rows)?;
    Ok(ExportedDocument {
        file_name: csv_file_name(group.ordinal),
        contents,
    })
}

/// Serializes one group to a single-sheet `.xlsx` workbook.
#[instrument(level = "debug", skip_all, fields(ordinal = group.ordinal, size = group.len()))]
pub fn export_group_xlsx(group: &ContactGroup) -> Result<ExportedDocument<Vec<u8>>> {
    let table = SheetTable {
        sheet_name: format!("Group {}", group.ordinal),
        columns: SHEET_COLUMNS.iter().map(|column| column.to_string()).collect(),
        rows: group
            .contacts
            .iter()
            .map(|contact| {
                vec![
                    contact.name.clone(),
                    contact.email.clone(),
                    contact.phone.clone().unwrap_or_default(),
                ]
            })
            .collect(),
    };
    let contents = excel_write::write_workbook(&table)?;
    Ok(ExportedDocument {
        file_name: xlsx_file_name(group.ordinal),
        contents,
    })
}
