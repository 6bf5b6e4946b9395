// libfiglio/src/record/metadata.rs
//! Metadata record codec.
//!
//! One block holds four fields at fixed offsets, multi-byte fields
//! big-endian. Bytes 9..16 are reserved and carried through unchanged.
//!
//! | bytes | field       |
//! |-------|-------------|
//! | 0     | volume      |
//! | 1..3  | language    |
//! | 3..5  | track_nr    |
//! | 5..9  | progress_ms |

use std::ops::Range;

use crate::constants::{LANGUAGE_RANGE, PROGRESS_RANGE, TRACK_NR_RANGE, VOLUME_OFFSET};
use crate::types::BlockData;
use crate::{Error, Result};

/// Two-byte language tag, e.g. `DE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Language([u8; 2]);

impl Language {
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }

    /// Invalid UTF-8 is replaced rather than rejected; a tag read back from
    /// a card is informational.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl TryFrom<&str> for Language {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        let bytes: [u8; 2] = s
            .as_bytes()
            .try_into()
            .map_err(|_| overflow("language", LANGUAGE_RANGE.len(), s))?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl PartialEq<&str> for Language {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_slice() == other.as_bytes()
    }
}

/// Decoded metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataRecord {
    pub volume: u8,
    pub language: Language,
    pub track_nr: u16,
    pub progress_ms: u32,
}

impl MetadataRecord {
    pub fn decode(raw: &BlockData) -> Self {
        let b = raw.as_bytes();
        let mut track = [0u8; 2];
        track.copy_from_slice(&b[TRACK_NR_RANGE]);
        let mut progress = [0u8; 4];
        progress.copy_from_slice(&b[PROGRESS_RANGE]);
        let mut language = [0u8; 2];
        language.copy_from_slice(&b[LANGUAGE_RANGE]);

        Self {
            volume: b[VOLUME_OFFSET],
            language: Language(language),
            track_nr: u16::from_be_bytes(track),
            progress_ms: u32::from_be_bytes(progress),
        }
    }

    /// Write all four fields over `existing`, keeping its reserved bytes.
    pub fn encode_into(&self, existing: &BlockData) -> BlockData {
        let mut out = *existing;
        let b = out.as_bytes_mut();
        b[VOLUME_OFFSET] = self.volume;
        b[LANGUAGE_RANGE].copy_from_slice(&self.language.0);
        b[TRACK_NR_RANGE].copy_from_slice(&self.track_nr.to_be_bytes());
        b[PROGRESS_RANGE].copy_from_slice(&self.progress_ms.to_be_bytes());
        out
    }

    /// Apply one field update in memory.
    pub fn apply(&mut self, field: &MetadataField) -> Result<()> {
        let encoded = encode_metadata_field(&self.encode_into(&BlockData::zeroed()), field)?;
        *self = Self::decode(&encoded);
        Ok(())
    }
}

/// A single metadata field together with its new value.
///
/// Numeric values are taken wide so that out-of-range input is reported
/// as [`Error::EncodingOverflow`] instead of being truncated by the caller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MetadataField {
    #[display(fmt = "volume={}", _0)]
    Volume(u8),
    #[display(fmt = "language={}", _0)]
    Language(String),
    #[display(fmt = "track_nr={}", _0)]
    TrackNr(u64),
    #[display(fmt = "progress_ms={}", _0)]
    Progress(u64),
}

impl MetadataField {
    pub fn name(&self) -> &'static str {
        match self {
            MetadataField::Volume(_) => "volume",
            MetadataField::Language(_) => "language",
            MetadataField::TrackNr(_) => "track_nr",
            MetadataField::Progress(_) => "progress_ms",
        }
    }

    /// Byte range the field occupies in the block.
    pub fn range(&self) -> Range<usize> {
        match self {
            MetadataField::Volume(_) => VOLUME_OFFSET..VOLUME_OFFSET + 1,
            MetadataField::Language(_) => LANGUAGE_RANGE,
            MetadataField::TrackNr(_) => TRACK_NR_RANGE,
            MetadataField::Progress(_) => PROGRESS_RANGE,
        }
    }

    /// Check that the value fits its field without touching any block.
    pub fn validate(&self) -> Result<()> {
        self.encode().map(|_| ())
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let width = self.range().len();
        match self {
            MetadataField::Volume(v) => Ok(vec![*v]),
            MetadataField::Language(s) => Ok(Language::try_from(s.as_str())?.0.to_vec()),
            MetadataField::TrackNr(n) => u16::try_from(*n)
                .map(|t| t.to_be_bytes().to_vec())
                .map_err(|_| overflow(self.name(), width, n)),
            MetadataField::Progress(n) => u32::try_from(*n)
                .map(|p| p.to_be_bytes().to_vec())
                .map_err(|_| overflow(self.name(), width, n)),
        }
    }
}

fn overflow(field: &'static str, width: usize, value: impl std::fmt::Display) -> Error {
    Error::EncodingOverflow {
        field,
        width,
        value: value.to_string(),
    }
}

pub fn decode_metadata(raw: &BlockData) -> MetadataRecord {
    MetadataRecord::decode(raw)
}

/// Splice one field into an existing metadata block. Every other byte of
/// `existing` is preserved.
pub fn encode_metadata_field(existing: &BlockData, field: &MetadataField) -> Result<BlockData> {
    let bytes = field.encode()?;
    let mut out = *existing;
    out.as_bytes_mut()[field.range()].copy_from_slice(&bytes);
    Ok(out)
}
