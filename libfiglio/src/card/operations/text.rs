use log::{debug, info, warn};

use crate::card::CardSession;
use crate::geometry::Geometry;
use crate::record::text::{
    TextAccumulator, check_encodable, encode_text_blocks, is_safely_terminated,
};
use crate::types::BlockData;
use crate::{Error, Result};

/// Read the zero-terminated text record starting at `start_block`,
/// following the geometry's data-block order across sector boundaries.
pub fn read_text(session: &mut CardSession<'_>, start_block: u8) -> Result<String> {
    let blocks = session.geometry().data_blocks_from(start_block)?.to_vec();
    let mut acc = TextAccumulator::new();
    for block in blocks {
        let data = session.read_data_block(block)?;
        if acc.push(&data) {
            debug!(
                "text record at #{:02} terminated in block #{:02} ({} blocks)",
                start_block,
                block,
                acc.blocks()
            );
            return acc.finish();
        }
    }
    Err(Error::EndOfCard { start_block })
}

/// Pair each encoded chunk of `text` with the block it goes to. Fails
/// before any hardware access when the text cannot be stored.
///
/// A payload that exactly fills its last block has no 0x00 of its own and
/// would read back joined to whatever follows it, so it is refused with
/// [`Error::EndOfCard`] like any other record that leaves no room for its
/// terminator.
pub(crate) fn plan_text(
    geometry: &Geometry,
    start_block: u8,
    text: &str,
) -> Result<Vec<(u8, BlockData)>> {
    check_encodable(text)?;
    let blocks = geometry.data_blocks_from(start_block)?;
    if !is_safely_terminated(text) {
        warn!(
            "text of {} bytes fills its last block exactly and leaves no terminator",
            text.len()
        );
        return Err(Error::EndOfCard { start_block });
    }
    let chunks = encode_text_blocks(text);
    if chunks.len() > blocks.len() {
        return Err(Error::EndOfCard { start_block });
    }
    Ok(blocks.iter().copied().zip(chunks).collect())
}

pub fn write_text(session: &mut CardSession<'_>, start_block: u8, text: &str) -> Result<()> {
    let plan = plan_text(session.geometry(), start_block, text)?;
    for (block, data) in &plan {
        session.write_data_block(*block, data)?;
    }
    info!(
        "text record of {} bytes written at block #{:02} ({} blocks)",
        text.len(),
        start_block,
        plan.len()
    );
    Ok(())
}
