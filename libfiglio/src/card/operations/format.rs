use log::info;

use crate::Result;
use crate::card::CardSession;
use crate::types::BlockData;

/// Write `pattern` to every data block from `start_block` to the end of the
/// card.
pub fn format_with(
    session: &mut CardSession<'_>,
    start_block: u8,
    pattern: BlockData,
) -> Result<()> {
    let blocks = session.geometry().data_blocks_from(start_block)?.to_vec();
    for block in &blocks {
        session.write_data_block(*block, &pattern)?;
    }
    info!(
        "formatted {} data blocks from #{:02} with {}",
        blocks.len(),
        start_block,
        pattern.to_hex()
    );
    Ok(())
}
