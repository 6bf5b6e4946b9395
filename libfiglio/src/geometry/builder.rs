// libfiglio/src/geometry/builder.rs

use std::collections::HashSet;

use crate::constants::MANUFACTURER_BLOCK;
use crate::geometry::{Geometry, Sector};
use crate::types::{CardClass, KeyA};
use crate::{Error, Result};

/// Builder for layouts other than the stock Classic 1K/4K tables.
///
/// Sectors are kept in insertion order; that order defines the data block
/// sequence the text record follows.
#[derive(Debug, Default)]
pub struct GeometryBuilder {
    class: Option<CardClass>,
    sectors: Vec<Sector>,
}

impl GeometryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, class: CardClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn sector(mut self, trailer: u8, data_blocks: &[u8], key_a: KeyA) -> Self {
        self.sectors
            .push(Sector::new(trailer, data_blocks.to_vec(), key_a));
        self
    }

    /// Validate the layout: every block is claimed by at most one sector,
    /// trailers never double as data blocks and the manufacturer block is
    /// never payload.
    pub fn build(self) -> Result<Geometry> {
        if self.sectors.is_empty() {
            return Err(Error::InvalidConfig("geometry has no sectors".into()));
        }

        let mut seen = HashSet::new();
        for sector in &self.sectors {
            if !seen.insert(sector.trailer()) {
                return Err(Error::InvalidBlock(sector.trailer()));
            }
            for &b in sector.data_blocks() {
                if b == MANUFACTURER_BLOCK || !seen.insert(b) {
                    return Err(Error::InvalidBlock(b));
                }
            }
        }

        Ok(Geometry::from_sectors(self.class, self.sectors))
    }
}
