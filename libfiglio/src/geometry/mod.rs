// libfiglio/src/geometry/mod.rs

//! Static memory layout of a MIFARE Classic card.
//!
//! A [`Geometry`] answers three questions for every other component: which
//! blocks may carry payload (in order), which sector trailer authenticates a
//! block, and which Key A opens that trailer's sector. It is built once and
//! never mutated afterwards.

use crate::constants::{BLOCK_SIZE, MANUFACTURER_BLOCK};
use crate::types::{CardClass, KeyA};
use crate::{Error, Result};

mod builder;
pub use builder::GeometryBuilder;

/// One sector: its data blocks, its trailer and the key for the trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sector {
    trailer: u8,
    data_blocks: Vec<u8>,
    key_a: KeyA,
}

impl Sector {
    pub fn new(trailer: u8, data_blocks: Vec<u8>, key_a: KeyA) -> Self {
        Self {
            trailer,
            data_blocks,
            key_a,
        }
    }

    pub fn trailer(&self) -> u8 {
        self.trailer
    }

    pub fn data_blocks(&self) -> &[u8] {
        &self.data_blocks
    }

    pub fn key_a(&self) -> KeyA {
        self.key_a
    }
}

#[derive(Debug, Clone)]
pub struct Geometry {
    class: Option<CardClass>,
    sectors: Vec<Sector>,
    data_blocks: Vec<u8>,
    // block number -> owning trailer, for data blocks and trailers alike
    owner: [Option<u8>; 256],
}

impl Geometry {
    /// MIFARE Classic 1K: 16 sectors of 4 blocks. Block 0 is the
    /// manufacturer block and never carries payload.
    pub fn classic_1k() -> Self {
        Self::classic_layout(CardClass::Classic1k, 16, 0)
    }

    /// MIFARE Classic 4K: sectors 0-31 hold 4 blocks, sectors 32-39 hold
    /// 16 blocks each.
    pub fn classic_4k() -> Self {
        Self::classic_layout(CardClass::Classic4k, 32, 8)
    }

    pub fn for_class(class: CardClass) -> Self {
        match class {
            CardClass::Classic1k => Self::classic_1k(),
            CardClass::Classic4k => Self::classic_4k(),
        }
    }

    pub fn builder() -> GeometryBuilder {
        GeometryBuilder::new()
    }

    fn classic_layout(class: CardClass, small_sectors: usize, large_sectors: usize) -> Self {
        let mut sectors = Vec::with_capacity(small_sectors + large_sectors);
        let mut base = 0usize;
        for size in std::iter::repeat(4usize)
            .take(small_sectors)
            .chain(std::iter::repeat(16usize).take(large_sectors))
        {
            let trailer = (base + size - 1) as u8;
            let data = (base..base + size - 1)
                .map(|b| b as u8)
                .filter(|&b| b != MANUFACTURER_BLOCK)
                .collect();
            sectors.push(Sector::new(trailer, data, KeyA::DEFAULT));
            base += size;
        }
        Self::from_sectors(Some(class), sectors)
    }

    // Callers guarantee the sector list satisfies the layout invariants;
    // GeometryBuilder::build checks them for custom layouts.
    pub(crate) fn from_sectors(class: Option<CardClass>, sectors: Vec<Sector>) -> Self {
        let mut owner = [None; 256];
        let mut data_blocks = Vec::new();
        for sector in &sectors {
            owner[sector.trailer as usize] = Some(sector.trailer);
            for &b in &sector.data_blocks {
                owner[b as usize] = Some(sector.trailer);
                data_blocks.push(b);
            }
        }
        Self {
            class,
            sectors,
            data_blocks,
            owner,
        }
    }

    /// Card class this layout was generated for, `None` for custom layouts.
    pub fn class(&self) -> Option<CardClass> {
        self.class
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// All payload blocks in card order.
    pub fn data_blocks(&self) -> &[u8] {
        &self.data_blocks
    }

    /// Payload blocks from `start` (inclusive) to the end of the card.
    pub fn data_blocks_from(&self, start: u8) -> Result<&[u8]> {
        let idx = self
            .data_blocks
            .iter()
            .position(|&b| b == start)
            .ok_or(Error::InvalidBlock(start))?;
        Ok(&self.data_blocks[idx..])
    }

    /// Trailer block that authenticates `block`. A trailer maps to itself.
    pub fn sector_trailer_of(&self, block: u8) -> Result<u8> {
        self.owner[block as usize].ok_or(Error::InvalidBlock(block))
    }

    pub fn key_a_of(&self, sector_trailer: u8) -> Result<KeyA> {
        self.sectors
            .iter()
            .find(|s| s.trailer == sector_trailer)
            .map(|s| s.key_a)
            .ok_or(Error::InvalidBlock(sector_trailer))
    }

    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    pub fn is_data_block(&self, block: u8) -> bool {
        matches!(self.owner[block as usize], Some(t) if t != block)
    }

    pub fn is_trailer(&self, block: u8) -> bool {
        self.owner[block as usize] == Some(block)
    }

    /// Number of addressable blocks, manufacturer block included.
    pub fn total_blocks(&self) -> usize {
        self.owner
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1)
    }

    /// Replace the Key A of one sector, e.g. for cards provisioned with a
    /// site-specific key instead of the transport key.
    pub fn with_key_a(mut self, sector_trailer: u8, key: KeyA) -> Result<Self> {
        let sector = self
            .sectors
            .iter_mut()
            .find(|s| s.trailer == sector_trailer)
            .ok_or(Error::InvalidBlock(sector_trailer))?;
        sector.key_a = key;
        Ok(self)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::classic_1k()
    }
}
