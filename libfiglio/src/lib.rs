// libfiglio/src/lib.rs

//! libfiglio
//!
//! Card-resident playback-resume storage for MIFARE Classic cards: a
//! geometry model, per-sector authentication, block transport over a
//! pluggable reader driver, and codecs for the metadata and playlist text
//! records.

pub mod card;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod geometry;
pub mod prelude;
pub mod record;
pub mod resume;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
