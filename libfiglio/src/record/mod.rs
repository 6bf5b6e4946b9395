// libfiglio/src/record/mod.rs
//! Pure codecs for the two records stored on a card. Nothing in here talks
//! to hardware.

pub mod metadata;
pub mod text;

pub use metadata::{
    Language, MetadataField, MetadataRecord, decode_metadata, encode_metadata_field,
};
pub use text::{TextAccumulator, encode_text_blocks, is_safely_terminated};
