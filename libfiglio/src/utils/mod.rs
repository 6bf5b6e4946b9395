//! Utilities for libfiglio: small helpers shared by the codecs, the reader
//! and the log output.

pub mod hex;

pub use hex::*;
