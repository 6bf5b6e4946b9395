#[path = "../common/mod.rs"]
mod common;

use libfiglio::Error;
use libfiglio::transport::mock::MockCall;
use libfiglio::types::KeyA;

use common::{fixtures, helpers};

#[test]
fn read_after_authenticate() -> anyhow::Result<()> {
    let (mock, mut reader) = helpers::classic_1k_reader()?;
    mock.set_block(8, fixtures::block_from_hex(fixtures::PLAYLIST_BLOCK_8_HEX));
    let card = reader.poll_for_card(1)?;

    reader.authenticate(&card, 11, &KeyA::DEFAULT)?;
    let block = reader.read_block(8)?;
    assert_eq!(block.to_ascii_safe(), "/music/album1.m3");
    Ok(())
}

#[test]
fn read_without_authentication_fails() -> anyhow::Result<()> {
    let (_mock, mut reader) = helpers::classic_1k_reader()?;
    reader.poll_for_card(1)?;

    match reader.read_block(8) {
        Err(Error::TransportFailure { op: "read", detail }) => {
            assert!(detail.contains("#08"), "detail: {}", detail);
        }
        other => panic!("expected TransportFailure, got {:?}", other),
    }
    Ok(())
}

#[test]
fn write_failure_is_reported() -> anyhow::Result<()> {
    let (mock, mut reader) = helpers::classic_1k_reader()?;
    mock.fail_write(9);
    let card = reader.poll_for_card(1)?;
    reader.authenticate(&card, 11, &KeyA::DEFAULT)?;

    assert!(matches!(
        reader.write_block(9, &fixtures::pattern_block(1)),
        Err(Error::TransportFailure { op: "write", .. })
    ));
    assert_eq!(mock.block(9), Some(fixtures::pattern_block(0)));
    Ok(())
}

#[test]
fn end_session_drops_authentication() -> anyhow::Result<()> {
    let (mock, mut reader) = helpers::classic_1k_reader()?;
    let card = reader.poll_for_card(1)?;
    reader.authenticate(&card, 11, &KeyA::DEFAULT)?;
    assert_eq!(mock.authenticated(), Some(11));

    reader.end_session();
    assert_eq!(mock.authenticated(), None);
    assert_eq!(mock.calls().last(), Some(&MockCall::StopCrypto));
    Ok(())
}
