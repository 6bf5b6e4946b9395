// libfiglio/src/transport/traits.rs

use crate::Result;
use crate::types::{BlockData, KeyA, Uid};

/// Transport trait abstracts the physical reader driver (MFRC522 and
/// friends) away from the storage protocol.
///
/// Implementations report every unsuccessful command as `Err`, whatever
/// the underlying driver's convention is. The reader layer maps those
/// errors onto the crate's taxonomy; it never inspects the error payload.
pub trait Transport: Send {
    /// Bring the reader chip into a known state (soft reset, antenna on).
    fn reset(&mut self) -> Result<()>;

    /// ISO 14443A REQA: ask whether a card is in the field.
    fn request(&mut self) -> Result<()>;

    /// Anticollision loop, returning the UID of one card in the field.
    fn anticollision(&mut self) -> Result<Uid>;

    /// Select the card with `uid`, returning its SAK byte.
    fn select(&mut self, uid: &Uid) -> Result<u8>;

    /// MIFARE Classic authentication with Key A for the sector owning
    /// `block`.
    fn authenticate(&mut self, uid: &Uid, block: u8, key: &KeyA) -> Result<()>;

    /// Read one block. The driver returns whatever it received; length
    /// checks are the caller's job.
    fn read(&mut self, block: u8) -> Result<Vec<u8>>;

    /// Write one block.
    fn write(&mut self, block: u8, data: &BlockData) -> Result<()>;

    /// Drop the Crypto1 state so the next card starts unauthenticated.
    fn stop_crypto(&mut self) -> Result<()>;
}
