use libfiglio::Error;
use libfiglio::device::{Initialized, Reader, ReaderBuilder, Uninitialized};
use libfiglio::geometry::Geometry;
use libfiglio::transport::mock::{MockCall, MockTransport};
use libfiglio::types::CardClass;

#[test]
fn builder_without_transport_is_reader_not_found() {
    match ReaderBuilder::default().build_uninitialized() {
        Err(Error::ReaderNotFound) => {}
        Err(other) => panic!("expected ReaderNotFound, got {:?}", other),
        Ok(_) => panic!("expected ReaderNotFound"),
    }
}

#[test]
fn builder_to_initialized_reader() -> anyhow::Result<()> {
    let mock = MockTransport::new(Geometry::classic_4k());
    let reader: Reader<Uninitialized> = ReaderBuilder::default()
        .with_transport(Box::new(mock.clone()))
        .geometry(Geometry::classic_4k())
        .build_uninitialized()?;
    assert_eq!(reader.geometry().class(), Some(CardClass::Classic4k));

    let reader: Reader<Initialized> = reader.initialize()?;
    assert_eq!(reader.geometry().data_blocks().len(), 215);
    assert_eq!(mock.calls(), vec![MockCall::Reset]);
    Ok(())
}
