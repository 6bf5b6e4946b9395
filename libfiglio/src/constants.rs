// libfiglio/src/constants.rs
//! Common card layout constants used across the crate

/// Size of one MIFARE Classic block in bytes
pub const BLOCK_SIZE: usize = 16;

/// Length of a sector key (Key A / Key B) in bytes
pub const KEY_LEN: usize = 6;

/// Transport key shipped on blank MIFARE Classic cards
pub const DEFAULT_KEY_A: [u8; KEY_LEN] = [0xFF; KEY_LEN];

/// Manufacturer block: read-only, holds the UID
pub const MANUFACTURER_BLOCK: u8 = 0;

/// Block holding the metadata record (volume, language, track, progress)
pub const DEFAULT_METADATA_BLOCK: u8 = 2;

/// First block of the playlist text record
pub const DEFAULT_TEXT_START_BLOCK: u8 = 8;

/// request/anticollision/select rounds attempted before giving up
pub const DEFAULT_POLL_ATTEMPTS: usize = 3;

/// Metadata record byte ranges within its block
pub const VOLUME_OFFSET: usize = 0;
pub const LANGUAGE_RANGE: std::ops::Range<usize> = 1..3;
pub const TRACK_NR_RANGE: std::ops::Range<usize> = 3..5;
pub const PROGRESS_RANGE: std::ops::Range<usize> = 5..9;

/// Defaults written to a freshly provisioned card
pub const DEFAULT_VOLUME: u8 = 25;
pub const DEFAULT_LANGUAGE: &str = "DE";
