use crate::record::metadata::{MetadataField, MetadataRecord};

/// Everything a card stores: which playlist, and where in it to resume.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResumeState {
    pub playlist: String,
    pub metadata: MetadataRecord,
}

impl ResumeState {
    pub fn new(playlist: impl Into<String>, metadata: MetadataRecord) -> Self {
        Self {
            playlist: playlist.into(),
            metadata,
        }
    }

    /// Field updates that persist the playback position and volume. The
    /// language tag is left alone.
    pub fn progress_fields(volume: u8, track_nr: u16, progress_ms: u32) -> [MetadataField; 3] {
        [
            MetadataField::Volume(volume),
            MetadataField::TrackNr(track_nr.into()),
            MetadataField::Progress(progress_ms.into()),
        ]
    }
}
