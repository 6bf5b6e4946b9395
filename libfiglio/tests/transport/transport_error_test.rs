#[path = "../common/mod.rs"]
mod common;

use libfiglio::Error;
use libfiglio::transport::Transport;
use libfiglio::transport::mock::MockTransport;
use libfiglio::types::KeyA;

use common::{fixtures, helpers};

#[test]
fn mock_reports_raw_driver_errors() {
    let mut m = MockTransport::with_card(fixtures::sample_nuid());
    m.fail_auth(7);
    let err = m
        .authenticate(&fixtures::sample_uid(), 4, &KeyA::DEFAULT)
        .unwrap_err();
    assert!(matches!(err, Error::Driver(_)));
    assert!(!err.is_hardware());
}

#[test]
fn reader_maps_driver_errors_to_taxonomy() -> anyhow::Result<()> {
    let (mock, mut reader) = helpers::classic_1k_reader()?;
    let card = reader.poll_for_card(1)?;

    mock.fail_auth(7);
    let auth = reader.authenticate(&card, 7, &KeyA::DEFAULT).unwrap_err();
    assert!(matches!(auth, Error::AuthenticationFailure { trailer: 7 }));
    assert!(auth.is_hardware());

    reader.authenticate(&card, 3, &KeyA::DEFAULT)?;
    mock.short_read(1);
    let short = reader.read_block(1).unwrap_err();
    assert!(matches!(short, Error::TransportFailure { op: "read", .. }));
    assert!(short.to_string().contains("invalid length"));
    Ok(())
}
