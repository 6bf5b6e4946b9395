// libfiglio/src/config.rs
//! Runtime configuration: where the records live on the card and what a
//! freshly provisioned card contains.

use crate::constants::{
    DEFAULT_LANGUAGE, DEFAULT_METADATA_BLOCK, DEFAULT_POLL_ATTEMPTS, DEFAULT_TEXT_START_BLOCK,
    DEFAULT_VOLUME,
};
use crate::geometry::Geometry;
use crate::record::metadata::{Language, MetadataRecord};
use crate::resume::ResumeState;
use crate::{Error, Result};

/// Block placement of the two records and the poll budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    pub metadata_block: u8,
    pub text_start_block: u8,
    pub poll_attempts: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            metadata_block: DEFAULT_METADATA_BLOCK,
            text_start_block: DEFAULT_TEXT_START_BLOCK,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
        }
    }
}

impl LayoutConfig {
    /// Check the layout against a card geometry: both records must start
    /// on data blocks and the metadata block must not sit inside the text
    /// range.
    pub fn validate(&self, geometry: &Geometry) -> Result<()> {
        if !geometry.is_data_block(self.metadata_block) {
            return Err(Error::InvalidBlock(self.metadata_block));
        }
        let text_blocks = geometry.data_blocks_from(self.text_start_block)?;
        if text_blocks.contains(&self.metadata_block) {
            return Err(Error::InvalidConfig(format!(
                "metadata block #{:02} lies inside the text range starting at #{:02}",
                self.metadata_block, self.text_start_block
            )));
        }
        Ok(())
    }
}

/// Values written by provisioning and used when a card cannot be read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResumeDefaults {
    pub volume: u8,
    pub language: String,
    pub track_nr: u16,
    pub progress_ms: u32,
}

impl Default for ResumeDefaults {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            language: DEFAULT_LANGUAGE.to_string(),
            track_nr: 0,
            progress_ms: 0,
        }
    }
}

impl ResumeDefaults {
    pub fn metadata(&self) -> Result<MetadataRecord> {
        Ok(MetadataRecord {
            volume: self.volume,
            language: Language::try_from(self.language.as_str())?,
            track_nr: self.track_nr,
            progress_ms: self.progress_ms,
        })
    }

    /// State to apply when a card could not be read: no playlist, start
    /// from the beginning at the default volume.
    pub fn fallback_state(&self) -> Result<ResumeState> {
        Ok(ResumeState {
            playlist: String::new(),
            metadata: self.metadata()?,
        })
    }
}
