use log::info;

use crate::Result;
use crate::card::CardSession;
use crate::record::metadata::{
    MetadataField, MetadataRecord, decode_metadata, encode_metadata_field,
};

pub fn read_metadata(session: &mut CardSession<'_>) -> Result<MetadataRecord> {
    let block = session.config().metadata_block;
    let raw = session.read_data_block(block)?;
    Ok(decode_metadata(&raw))
}

/// Read the metadata block, splice in `field` and write it back. The value
/// is checked before the card is touched.
pub fn write_metadata_field(session: &mut CardSession<'_>, field: &MetadataField) -> Result<()> {
    update_metadata(session, std::slice::from_ref(field))
}

pub fn update_metadata(session: &mut CardSession<'_>, fields: &[MetadataField]) -> Result<()> {
    for field in fields {
        field.validate()?;
    }
    let block = session.config().metadata_block;
    let existing = session.read_data_block(block)?;
    let updated = fields
        .iter()
        .try_fold(existing, |raw, field| encode_metadata_field(&raw, field))?;
    session.write_data_block(block, &updated)?;

    let summary: Vec<String> = fields.iter().map(ToString::to_string).collect();
    info!("metadata block #{:02} updated: {}", block, summary.join(", "));
    Ok(())
}

/// Overwrite all four fields. Reserved bytes already on the card are kept.
pub fn write_metadata(session: &mut CardSession<'_>, record: &MetadataRecord) -> Result<()> {
    let block = session.config().metadata_block;
    let existing = session.read_data_block(block)?;
    session.write_data_block(block, &record.encode_into(&existing))?;
    info!("metadata block #{:02} written: {:?}", block, record);
    Ok(())
}
