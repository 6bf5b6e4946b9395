// libfiglio/src/device/builder.rs

use crate::device::handle::{Reader, Uninitialized};
use crate::geometry::Geometry;
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a Reader with optional configuration.
#[derive(Default)]
pub struct ReaderBuilder {
    transport: Option<Box<dyn Transport>>,
    geometry: Option<Geometry>,
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Card layout to use; defaults to MIFARE Classic 1K.
    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Consume the builder and return an uninitialized Reader.
    /// Requires a transport to be provided; otherwise returns ReaderNotFound.
    pub fn build_uninitialized(self) -> Result<Reader<Uninitialized>> {
        let transport = self.transport.ok_or(Error::ReaderNotFound)?;
        Ok(Reader::new_with_transport(
            transport,
            self.geometry.unwrap_or_default(),
        ))
    }
}
