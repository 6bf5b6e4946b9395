//! Walk through the card lifecycle against the mock reader: provision a
//! blank card, pause playback, then resume from the stored position.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p libfiglio --example resume_demo

use libfiglio::config::{LayoutConfig, ResumeDefaults};
use libfiglio::device::ReaderBuilder;
use libfiglio::geometry::Geometry;
use libfiglio::record::MetadataField;
use libfiglio::resume::ResumeState;
use libfiglio::transport::MockTransport;
use libfiglio::{Result, utils};

fn main() -> Result<()> {
    env_logger::init();

    let mock = MockTransport::with_card([0xDE, 0xAD, 0xBE, 0xEF]);
    let mut reader = ReaderBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .geometry(Geometry::classic_1k())
        .build_uninitialized()?
        .initialize()?;
    let layout = LayoutConfig::default();

    {
        let mut session = reader.open_session(&layout)?;
        println!("provisioning card {}", session.card().uid());
        session.provision("m3u:rockantenne.m3u", &ResumeDefaults::default())?;
    }

    {
        let mut session = reader.open_session(&layout)?;
        session.update_metadata(&ResumeState::progress_fields(40, 3, 95_500))?;
        session.write_metadata_field(MetadataField::Language("EN".into()))?;
    }

    if let Some(block) = mock.block(layout.metadata_block) {
        println!("metadata block: {}", utils::bytes_to_hex_spaced(block.as_bytes()));
    }

    let mut session = reader.open_session(&layout)?;
    let state = session.read_state()?;
    println!(
        "resume {} at track {} / {} ms, volume {}, language {}",
        state.playlist,
        state.metadata.track_nr,
        state.metadata.progress_ms,
        state.metadata.volume,
        state.metadata.language
    );
    session.close();
    Ok(())
}
