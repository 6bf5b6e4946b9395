//! Record-level operations composed from the session's authenticated block
//! primitives. `CardSession` exposes each of these as a method.

pub mod format;
pub mod metadata;
pub mod state;
pub mod text;
