pub mod chunk;
pub mod error;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod io;
pub mod model;
pub mod normalize;
pub mod session;

pub use error::{ContactError, Result};
