//! Single-owner holder of the most recent ingestion.
//!
//! Decoding may finish out of order when the user picks a new file before the
//! previous one is done. Every ingestion is started with [`IngestionSession::begin`],
//! which invalidates all earlier tickets; a completion carrying a stale ticket
//! is dropped so it can never replace newer state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::aideon::contacts::error::Result;
use crate::aideon::contacts::model::Ingestion;

/// Proof that an ingestion was started, tied to one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionTicket {
    generation: u64,
    source: String,
}

impl IngestionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// What [`IngestionSession::complete`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The result replaced the previous snapshot.
    Committed,
    /// A newer ingestion was started; the result was discarded.
    Stale,
}

#[derive(Debug, Default)]
pub struct IngestionSession {
    generation: u64,
    current: Option<Arc<Ingestion>>,
}

impl IngestionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new ingestion of `source`, superseding any in flight.
    pub fn begin(&mut self, source: impl Into<String>) -> IngestionTicket {
        self.generation += 1;
        let ticket = IngestionTicket {
            generation: self.generation,
            source: source.into(),
        };
        debug!(generation = ticket.generation, source = %ticket.source, "ingestion started");
        ticket
    }

    /// Applies the result of the ingestion identified by `ticket`.
    ///
    /// Results from superseded tickets are discarded, failures included. A
    /// failure of the current ingestion is returned to the caller and leaves
    /// the previous snapshot in place.
    pub fn complete(
        &mut self,
        ticket: IngestionTicket,
        result: Result<Ingestion>,
    ) -> Result<CommitOutcome> {
        if ticket.generation != self.generation {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                source = %ticket.source,
                "discarding stale ingestion result"
            );
            return Ok(CommitOutcome::Stale);
        }

        match result {
            Ok(ingestion) => {
                info!(
                    source = %ticket.source,
                    total_contacts = ingestion.total_contacts,
                    group_count = ingestion.groups.len(),
                    "ingestion committed"
                );
                self.current = Some(Arc::new(ingestion));
                Ok(CommitOutcome::Committed)
            }
            Err(error) => {
                warn!(source = %ticket.source, %error, "ingestion failed, keeping previous groups");
                Err(error)
            }
        }
    }

    /// Latest committed snapshot, if any.
    pub fn current(&self) -> Option<Arc<Ingestion>> {
        self.current.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
