use log::info;

use crate::card::CardSession;
use crate::card::operations::{format, metadata, text};
use crate::config::ResumeDefaults;
use crate::resume::ResumeState;
use crate::types::BlockData;
use crate::{Error, Result};

pub fn read_state(session: &mut CardSession<'_>) -> Result<ResumeState> {
    let start = session.config().text_start_block;
    let playlist = text::read_text(session, start)?;
    let metadata = metadata::read_metadata(session)?;
    Ok(ResumeState { playlist, metadata })
}

pub fn write_state(session: &mut CardSession<'_>, state: &ResumeState) -> Result<()> {
    let start = session.config().text_start_block;
    text::write_text(session, start, &state.playlist)?;
    metadata::write_metadata(session, &state.metadata)
}

/// Format the card from its first data block, then write `playlist` and
/// the default metadata. Everything that can be checked up front is
/// checked before the first block is wiped.
pub fn provision(
    session: &mut CardSession<'_>,
    playlist: &str,
    defaults: &ResumeDefaults,
) -> Result<()> {
    let record = defaults.metadata()?;
    let start = session.config().text_start_block;
    text::plan_text(session.geometry(), start, playlist)?;
    let first = session
        .geometry()
        .data_blocks()
        .first()
        .copied()
        .ok_or_else(|| Error::InvalidConfig("geometry has no data blocks".into()))?;

    format::format_with(session, first, BlockData::zeroed())?;
    text::write_text(session, start, playlist)?;
    metadata::write_metadata(session, &record)?;
    info!(
        "card {} provisioned with playlist {:?}",
        session.card().uid(),
        playlist
    );
    Ok(())
}
