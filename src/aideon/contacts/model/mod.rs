use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder stored in `name` and `email` when the source did not provide a
/// value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Phone value some exports write in place of a missing number.
pub const UNDEFINED_PHONE: &str = "undefined";

/// Canonical contact record produced regardless of the source column naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name, or [`NOT_AVAILABLE`].
    pub name: String,
    /// Email address, or [`NOT_AVAILABLE`].
    pub email: String,
    /// Phone number when the source provided one.
    pub phone: Option<String>,
}

impl Contact {
    /// Creates a contact, substituting the placeholder for missing name and
    /// email values and dropping blank phone numbers.
    pub fn new(name: Option<&str>, email: Option<&str>, phone: Option<&str>) -> Self {
        Self {
            name: present(name).unwrap_or(NOT_AVAILABLE).to_string(),
            email: present(email).unwrap_or(NOT_AVAILABLE).to_string(),
            phone: present(phone).map(str::to_string),
        }
    }

    /// Returns `true` when the email holds a real value.
    pub fn has_email(&self) -> bool {
        !self.email.is_empty() && self.email != NOT_AVAILABLE
    }

    /// Returns `true` when the phone holds a real value.
    pub fn has_phone(&self) -> bool {
        self.phone
            .as_deref()
            .is_some_and(|phone| !phone.is_empty() && phone != UNDEFINED_PHONE)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// A contiguous window of valid contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactGroup {
    /// Identifier derived from the window position, stable across runs.
    pub id: Uuid,
    /// 1-based sequence number.
    pub ordinal: usize,
    pub contacts: Vec<Contact>,
    /// 1-based inclusive index of the first contact in the valid sequence.
    pub start_index: usize,
    /// 1-based inclusive index of the last contact in the valid sequence.
    pub end_index: usize,
}

impl ContactGroup {
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// Outcome of one full pipeline run over a single source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingestion {
    /// File name the contacts were read from.
    pub source: String,
    /// Number of contacts that survived the validity filter.
    pub total_contacts: usize,
    /// Maximum group size used when chunking.
    pub chunk_size: usize,
    pub groups: Vec<ContactGroup>,
}

impl Ingestion {
    /// Looks up a group by its 1-based ordinal.
    pub fn group(&self, ordinal: usize) -> Option<&ContactGroup> {
        ordinal
            .checked_sub(1)
            .and_then(|index| self.groups.get(index))
    }

    /// Builds the lightweight view shown to users.
    pub fn summary(&self) -> IngestionSummary {
        IngestionSummary {
            source: self.source.clone(),
            total_contacts: self.total_contacts,
            group_count: self.groups.len(),
            chunk_size: self.chunk_size,
            groups: self
                .groups
                .iter()
                .map(|group| GroupSummary {
                    ordinal: group.ordinal,
                    start_index: group.start_index,
                    end_index: group.end_index,
                    size: group.len(),
                })
                .collect(),
        }
    }
}

/// Totals and group ranges without the contact payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionSummary {
    pub source: String,
    pub total_contacts: usize,
    pub group_count: usize,
    pub chunk_size: usize,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub ordinal: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub size: usize,
}
