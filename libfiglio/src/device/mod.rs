// libfiglio/src/device/mod.rs

//! Block transport: the [`Reader`] handle wrapping a reader driver.

pub mod builder;
pub mod handle;

pub use builder::ReaderBuilder;
pub use handle::{Initialized, Reader, Uninitialized};
