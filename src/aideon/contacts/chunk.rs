use std::num::NonZeroUsize;

use uuid::Uuid;

use crate::aideon::contacts::model::{Contact, ContactGroup};

/// Maximum number of contacts per group unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

const DEFAULT_CHUNK: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CHUNK_SIZE) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Namespace for the v5 identifiers handed out to groups.
const GROUP_NAMESPACE: Uuid = Uuid::from_u128(0x6f2a_4c1e_93d7_5b08_a1e4_0c3f_7d92_b615);

/// Configuration for contact chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum contacts per group.
    pub chunk_size: NonZeroUsize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK,
        }
    }
}

impl ChunkConfig {
    /// Sets the maximum group size.
    pub fn with_chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Splits `contacts` into consecutive groups of at most `chunk_size`
/// contacts. Only the final group may be shorter; an empty input yields no
/// groups.
pub fn chunk(contacts: &[Contact], config: &ChunkConfig) -> Vec<ContactGroup> {
    let size = config.chunk_size.get();
    contacts
        .chunks(size)
        .enumerate()
        .map(|(window, members)| {
            let start_index = window * size + 1;
            ContactGroup {
                id: group_id(window),
                ordinal: window + 1,
                contacts: members.to_vec(),
                start_index,
                end_index: start_index + members.len() - 1,
            }
        })
        .collect()
}

/// Identifier for the group built from the 0-based `window`.
pub fn group_id(window: usize) -> Uuid {
    Uuid::new_v5(&GROUP_NAMESPACE, format!("contacts-group:{window}").as_bytes())
}
