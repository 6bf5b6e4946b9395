// libfiglio/src/record/text.rs
//! Zero-terminated text record spread over consecutive data blocks.

use crate::constants::BLOCK_SIZE;
use crate::types::BlockData;
use crate::{Error, Result};

/// Split `text` into 16-byte blocks, zero-padding the last one.
///
/// Empty text still yields one all-zero block so the record reads back as
/// empty. Text whose length is an exact multiple of [`BLOCK_SIZE`] gets no
/// padding and therefore carries no terminator of its own; see
/// [`is_safely_terminated`].
pub fn encode_text_blocks(text: &str) -> Vec<BlockData> {
    if text.is_empty() {
        return vec![BlockData::zeroed()];
    }
    text.as_bytes()
        .chunks(BLOCK_SIZE)
        .map(|chunk| {
            let mut block = BlockData::zeroed();
            block.as_bytes_mut()[..chunk.len()].copy_from_slice(chunk);
            block
        })
        .collect()
}

/// True when the encoded blocks of `text` contain their own 0x00 byte.
pub fn is_safely_terminated(text: &str) -> bool {
    text.is_empty() || text.len() % BLOCK_SIZE != 0
}

/// Reject text that would be cut short on read.
pub(crate) fn check_encodable(text: &str) -> Result<()> {
    match text.bytes().position(|b| b == 0) {
        Some(pos) => Err(Error::InvalidText(format!(
            "text contains a NUL byte at offset {}",
            pos
        ))),
        None => Ok(()),
    }
}

/// Collects blocks read back from the card until a terminator shows up.
#[derive(Debug, Default)]
pub struct TextAccumulator {
    buf: Vec<u8>,
    terminated: bool,
}

impl TextAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one block. Returns `true` once a 0x00 byte has been seen.
    pub fn push(&mut self, block: &BlockData) -> bool {
        self.buf.extend_from_slice(block.as_bytes());
        self.terminated |= block.has_terminator();
        self.terminated
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn blocks(&self) -> usize {
        self.buf.len() / BLOCK_SIZE
    }

    /// Decode everything before the first 0x00 as UTF-8.
    pub fn finish(self) -> Result<String> {
        let end = self
            .buf
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.buf.len());
        let text = std::str::from_utf8(&self.buf[..end])
            .map_err(|e| Error::InvalidText(e.to_string()))?;
        Ok(text.to_owned())
    }
}
