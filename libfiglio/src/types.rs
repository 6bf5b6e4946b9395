// libfiglio/src/types.rs

use crate::Error;
use crate::constants::{BLOCK_SIZE, DEFAULT_KEY_A, KEY_LEN};
use std::convert::TryFrom;

/// UID / NUID - Newtype Pattern (4 または 5 バイト)
///
/// Single-size MIFARE Classic cards report a 4 byte NUID; readers that
/// return the anticollision frame verbatim append the BCC byte, giving 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid {
    bytes: [u8; 5],
    len: usize,
}

impl Uid {
    pub const MIN_LEN: usize = 4;
    pub const MAX_LEN: usize = 5;

    /// Build a UID from a 4 byte NUID.
    pub fn from_nuid(nuid: [u8; 4]) -> Self {
        let mut bytes = [0u8; 5];
        bytes[..4].copy_from_slice(&nuid);
        Self { bytes, len: 4 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() < Self::MIN_LEN || bytes.len() > Self::MAX_LEN {
            return Err(Error::InvalidLength {
                expected: Self::MAX_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 5];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            len: bytes.len(),
        })
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::utils::bytes_to_hex_spaced(self.as_bytes()))
    }
}

/// Key A (6 バイト)
#[derive(Clone, Copy, PartialEq, Eq, Hash, derive_more::From)]
pub struct KeyA([u8; KEY_LEN]);

impl KeyA {
    pub const DEFAULT: Self = Self(DEFAULT_KEY_A);

    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a key written as hex digits, e.g. `"FF FF FF FF FF FF"`.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let bytes = crate::utils::parse_hex(s)?;
        let arr: [u8; KEY_LEN] = bytes.as_slice().try_into().map_err(|_| Error::InvalidLength {
            expected: KEY_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Default for KeyA {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// Keys never end up in logs verbatim.
impl std::fmt::Debug for KeyA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyA(******)")
    }
}

/// BlockData (16 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::From)]
pub struct BlockData([u8; BLOCK_SIZE]);

impl BlockData {
    pub const fn zeroed() -> Self {
        Self([0u8; BLOCK_SIZE])
    }

    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; BLOCK_SIZE] {
        &mut self.0
    }

    /// True when the block holds at least one 0x00 byte.
    pub fn has_terminator(&self) -> bool {
        self.0.contains(&0x00)
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }

    pub fn to_ascii_safe(&self) -> String {
        self.0
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != BLOCK_SIZE {
            return Err(Error::InvalidLength {
                expected: BLOCK_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; BLOCK_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// Supported MIFARE Classic card classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardClass {
    #[default]
    Classic1k,
    Classic4k,
}

impl CardClass {
    /// Identify the card class from the SAK byte returned on select.
    pub fn from_sak(sak: u8) -> Option<Self> {
        match sak {
            0x08 | 0x88 => Some(Self::Classic1k),
            0x18 => Some(Self::Classic4k),
            _ => None,
        }
    }
}
