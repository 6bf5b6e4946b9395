#[path = "../common/mod.rs"]
mod common;

use libfiglio::config::{LayoutConfig, ResumeDefaults};
use libfiglio::resume::{CardEvent, SessionWorker};

use common::recorder::{Outcome, Recorder};
use common::{fixtures, helpers};

#[tokio::test]
async fn run_async_drains_tokio_channel() -> anyhow::Result<()> {
    let (mock, reader) = helpers::classic_1k_reader()?;
    mock.set_block(8, fixtures::block_from_hex(fixtures::PLAYLIST_BLOCK_8_HEX));
    mock.set_block(9, fixtures::block_from_hex(fixtures::PLAYLIST_BLOCK_9_HEX));
    let mut worker = SessionWorker::new(
        reader,
        LayoutConfig::default(),
        &ResumeDefaults::default(),
        Recorder::default(),
    )?;

    let (tx, rx) = tokio::sync::mpsc::channel(4);
    tx.send(CardEvent::Inserted).await?;
    tx.send(CardEvent::Removed).await?;
    drop(tx);

    assert_eq!(worker.run_async(rx).await, 2);
    match worker.handler().outcomes.as_slice() {
        [Outcome::Resumed(_, state), Outcome::Removed] => {
            assert_eq!(state.playlist, fixtures::PLAYLIST);
        }
        other => panic!("unexpected outcomes {:?}", other),
    }
    Ok(())
}
