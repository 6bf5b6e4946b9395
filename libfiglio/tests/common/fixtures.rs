// fixtures.rs — commonly used card images and UIDs

use libfiglio::types::{BlockData, Uid};

pub fn sample_nuid() -> [u8; 4] {
    [0xDE, 0xAD, 0xBE, 0xEF]
}

pub fn sample_uid() -> Uid {
    Uid::from_nuid(sample_nuid())
}

/// Metadata block of a card paused at track 3, 100 s in, volume 25, "DE",
/// with non-zero reserved bytes.
pub const PAUSED_METADATA_HEX: &str = "19444500030001 86a0 aabbccddeeff11";

/// "/music/album1.m3u" as it sits in blocks 8 and 9.
pub const PLAYLIST_BLOCK_8_HEX: &str = "2f6d757369632f616c62756d312e6d33";
pub const PLAYLIST_BLOCK_9_HEX: &str = "75000000000000000000000000000000";
pub const PLAYLIST: &str = "/music/album1.m3u";

pub fn block_from_hex(s: &str) -> BlockData {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = hex::decode(compact).expect("fixture hex");
    BlockData::try_from(bytes.as_slice()).expect("fixture is one block")
}

pub fn pattern_block(byte: u8) -> BlockData {
    BlockData::from_bytes([byte; 16])
}
