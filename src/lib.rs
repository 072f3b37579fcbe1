//! Core library for the aideon-contacts command line application.
//!
//! The library turns a user supplied contact list into fixed-size groups that
//! can be handed to batch operations one at a time. Responsibilities are kept
//! narrow: byte-level readers and writers live under [`aideon::contacts::io`],
//! the canonical record in [`aideon::contacts::model`], header mapping in
//! [`aideon::contacts::normalize`], grouping in [`aideon::contacts::chunk`], and
//! the end-to-end pipeline under [`aideon::contacts::ingest`].

pub mod aideon;

pub use aideon::contacts::{
    ContactError, Result, chunk, error, export, filter, ingest, io, model, normalize, session,
};
