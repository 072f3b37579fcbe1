//! End-to-end pipeline: dispatch by extension, decode, normalize, filter,
//! chunk.

use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::aideon::contacts::chunk::{self, ChunkConfig};
use crate::aideon::contacts::error::{ContactError, Result};
use crate::aideon::contacts::filter;
use crate::aideon::contacts::io::csv_read;
use crate::aideon::contacts::io::excel_read::{self, WorkbookFormat};
use crate::aideon::contacts::model::{Contact, Ingestion};
use crate::aideon::contacts::normalize;

/// A user-selected file: its name drives format detection, its bytes are
/// decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Loads a file from disk.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ContactError::MissingInput(path.to_path_buf()));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ContactError::InvalidSourceName(path.to_path_buf()))?;
        let bytes = fs::read(path)?;
        Ok(Self { name, bytes })
    }

    pub fn kind(&self) -> Option<SourceKind> {
        SourceKind::from_file_name(&self.name)
    }
}

/// Decoding strategy selected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Delimited,
    Workbook(WorkbookFormat),
}

impl SourceKind {
    /// Matches the text after the last `.` case-insensitively, so a file
    /// named just `.csv` still counts. Unknown or missing extensions return
    /// `None`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Delimited),
            "xlsx" => Some(Self::Workbook(WorkbookFormat::Xlsx)),
            "xls" => Some(Self::Workbook(WorkbookFormat::Xls)),
            _ => None,
        }
    }
}

/// Decodes and normalizes every record of `source`, valid or not. Files with
/// an unsupported extension produce no contacts.
#[instrument(level = "debug", skip_all, fields(source = %source.name))]
pub fn decode_contacts(source: &SourceFile) -> Result<Vec<Contact>> {
    let contacts = match source.kind() {
        Some(SourceKind::Delimited) => {
            let table = csv_read::read_table(&source.bytes)?;
            normalize::normalize_delimited(&table)
        }
        Some(SourceKind::Workbook(format)) => {
            let rows = excel_read::read_first_sheet(&source.bytes, format)?;
            normalize::normalize_sheet_rows(&rows)
        }
        None => {
            warn!(source = %source.name, "unsupported file extension, no contacts read");
            Vec::new()
        }
    };
    debug!(record_count = contacts.len(), "normalized records");
    Ok(contacts)
}

/// Runs the full pipeline over `source`. A decode failure returns an error
/// and produces no groups.
#[instrument(
    level = "info",
    skip_all,
    fields(source = %source.name, chunk_size = config.chunk_size.get())
)]
pub fn ingest(source: &SourceFile, config: &ChunkConfig) -> Result<Ingestion> {
    let records = decode_contacts(source)?;
    let record_count = records.len();
    let contacts = filter::filter_valid(records);
    info!(
        record_count,
        valid_count = contacts.len(),
        "filtered contacts"
    );

    let groups = chunk::chunk(&contacts, config);
    info!(group_count = groups.len(), "contacts grouped");

    Ok(Ingestion {
        source: source.name.clone(),
        total_contacts: contacts.len(),
        chunk_size: config.chunk_size.get(),
        groups,
    })
}

/// Reads `path` from disk and runs [`ingest`] over it.
pub fn ingest_path(path: &Path, config: &ChunkConfig) -> Result<Ingestion> {
    let source = SourceFile::read(path)?;
    ingest(&source, config)
}
