//! Maps heterogeneous source columns onto the canonical [`Contact`] shape.
//!
//! Delimited text is matched by lower-cased header name with a positional
//! fallback. Spreadsheet rows keep their original header text, so each field
//! is resolved by scanning a fixed, prioritized list of accepted keys.

use std::collections::HashMap;

use crate::aideon::contacts::io::csv_read::DelimitedTable;
use crate::aideon::contacts::io::excel_read::SheetRow;
use crate::aideon::contacts::model::Contact;

/// One of the three fields every contact is reduced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Name,
    Email,
    Phone,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 3] = [Self::Name, Self::Email, Self::Phone];

    /// Lower-case header recognised in delimited text.
    pub fn header(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Column used when the delimited header does not name the field.
    pub fn position(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Phone => 2,
        }
    }

    /// Spreadsheet header keys probed in order; the first present one wins.
    pub fn sheet_keys(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["name", "Name", "NAME", "contact", "Contact"],
            Self::Email => &["email", "Email", "EMAIL", "e_mail", "E_mail"],
            Self::Phone => &["phone", "Phone", "PHONE", "mobile", "Mobile"],
        }
    }
}

/// Resolves canonical fields to column indices for one delimited header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    indices: HashMap<CanonicalField, usize>,
}

impl ColumnMap {
    /// Builds the map from raw header cells. Headers are trimmed and
    /// lower-cased; the first column carrying a name wins.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            by_name
                .entry(header.as_ref().trim().to_lowercase())
                .or_insert(index);
        }

        let indices = CanonicalField::ALL
            .into_iter()
            .map(|field| {
                let index = by_name
                    .get(field.header())
                    .copied()
                    .unwrap_or_else(|| field.position());
                (field, index)
            })
            .collect();

        Self { indices }
    }

    pub fn index_of(&self, field: CanonicalField) -> usize {
        self.indices
            .get(&field)
            .copied()
            .unwrap_or_else(|| field.position())
    }

    fn extract<'a>(&self, row: &'a [String], field: CanonicalField) -> Option<&'a str> {
        row.get(self.index_of(field)).map(String::as_str)
    }
}

/// Converts every data row of a delimited table into a contact.
pub fn normalize_delimited(table: &DelimitedTable) -> Vec<Contact> {
    let columns = ColumnMap::from_headers(&table.headers);
    table
        .rows
        .iter()
        .map(|row| {
            Contact::new(
                columns.extract(row, CanonicalField::Name),
                columns.extract(row, CanonicalField::Email),
                columns.extract(row, CanonicalField::Phone),
            )
        })
        .collect()
}

/// Converts header-keyed spreadsheet rows into contacts.
pub fn normalize_sheet_rows(rows: &[SheetRow]) -> Vec<Contact> {
    rows.iter().map(normalize_sheet_row).collect()
}

pub fn normalize_sheet_row(row: &SheetRow) -> Contact {
    Contact::new(
        lookup(row, CanonicalField::Name),
        lookup(row, CanonicalField::Email),
        lookup(row, CanonicalField::Phone),
    )
}

fn lookup(row: &SheetRow, field: CanonicalField) -> Option<&str> {
    field
        .sheet_keys()
        .iter()
        .find_map(|key| row.get(*key))
        .map(String::as_str)
}
