// libfiglio/src/card/session.rs

use log::{debug, info, warn};

use crate::card::operations;
use crate::card::{AuthSession, Card};
use crate::config::{LayoutConfig, ResumeDefaults};
use crate::device::{Initialized, Reader};
use crate::geometry::Geometry;
use crate::record::metadata::{MetadataField, MetadataRecord};
use crate::resume::ResumeState;
use crate::types::BlockData;
use crate::{Error, Result};

/// An open session on one connected card.
///
/// The session mutably borrows its [`Reader`], so at most one session can
/// exist per reader. It is closed exactly once: explicitly via
/// [`CardSession::close`], automatically after any hardware error, or when
/// dropped.
pub struct CardSession<'r> {
    reader: &'r mut Reader<Initialized>,
    auth: AuthSession,
    config: LayoutConfig,
    closed: bool,
}

impl<'r> CardSession<'r> {
    /// Validate `config` against the reader's geometry, then poll for a card.
    pub fn open(reader: &'r mut Reader<Initialized>, config: &LayoutConfig) -> Result<Self> {
        config.validate(reader.geometry())?;
        let card = reader.poll_for_card(config.poll_attempts)?;
        info!("session opened on card {}", card.uid());
        Ok(Self {
            reader,
            auth: AuthSession::new(card),
            config: *config,
            closed: false,
        })
    }

    pub fn card(&self) -> &Card {
        self.auth.card()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        self.reader.geometry()
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Release the reader's authentication state. Calling it again is a
    /// no-op.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.reader.end_session();
        self.auth.reset();
        self.closed = true;
        info!("session on card {} closed", self.auth.card().uid());
    }

    pub fn read_metadata(&mut self) -> Result<MetadataRecord> {
        operations::metadata::read_metadata(self)
    }

    /// Read-modify-write of a single metadata field.
    pub fn write_metadata_field(&mut self, field: MetadataField) -> Result<()> {
        operations::metadata::write_metadata_field(self, &field)
    }

    pub fn write_metadata(&mut self, record: &MetadataRecord) -> Result<()> {
        operations::metadata::write_metadata(self, record)
    }

    /// Apply several field updates with one read and one write.
    pub fn update_metadata(&mut self, fields: &[MetadataField]) -> Result<()> {
        operations::metadata::update_metadata(self, fields)
    }

    pub fn read_text(&mut self, start_block: u8) -> Result<String> {
        operations::text::read_text(self, start_block)
    }

    pub fn write_text(&mut self, start_block: u8, text: &str) -> Result<()> {
        operations::text::write_text(self, start_block, text)
    }

    /// Zero every data block from `start_block` to the end of the card.
    pub fn format(&mut self, start_block: u8) -> Result<()> {
        operations::format::format_with(self, start_block, BlockData::zeroed())
    }

    pub fn format_with(&mut self, start_block: u8, pattern: BlockData) -> Result<()> {
        operations::format::format_with(self, start_block, pattern)
    }

    /// Playlist text and metadata at the configured blocks.
    pub fn read_state(&mut self) -> Result<ResumeState> {
        operations::state::read_state(self)
    }

    pub fn write_state(&mut self, state: &ResumeState) -> Result<()> {
        operations::state::write_state(self, state)
    }

    /// Wipe the card and write a fresh record set for `playlist`.
    pub fn provision(&mut self, playlist: &str, defaults: &ResumeDefaults) -> Result<()> {
        operations::state::provision(self, playlist, defaults)
    }

    /// Read one data block, authenticating its sector first.
    pub(crate) fn read_data_block(&mut self, block: u8) -> Result<BlockData> {
        self.check_data_block(block)?;
        let result = self.read_authenticated(block);
        self.guard(result)
    }

    /// Write one data block, authenticating its sector first.
    pub(crate) fn write_data_block(&mut self, block: u8, data: &BlockData) -> Result<()> {
        self.check_data_block(block)?;
        let result = self.write_authenticated(block, data);
        self.guard(result)
    }

    fn check_data_block(&self, block: u8) -> Result<()> {
        if self.closed {
            return Err(Error::SessionClosed);
        }
        if !self.reader.geometry().is_data_block(block) {
            return Err(Error::InvalidBlock(block));
        }
        Ok(())
    }

    fn read_authenticated(&mut self, block: u8) -> Result<BlockData> {
        self.auth.ensure_authenticated(self.reader, block)?;
        self.reader.read_block(block)
    }

    fn write_authenticated(&mut self, block: u8, data: &BlockData) -> Result<()> {
        self.auth.ensure_authenticated(self.reader, block)?;
        self.reader.write_block(block, data)
    }

    // Hardware errors end the session before they reach the caller.
    fn guard<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_hardware() {
                warn!(
                    "closing session on card {} after hardware error: {}",
                    self.auth.card().uid(),
                    e
                );
                self.close();
            } else {
                debug!("operation failed without closing the session: {}", e);
            }
        }
        result
    }
}

impl Drop for CardSession<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for CardSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardSession")
            .field("card", self.auth.card())
            .field("auth", &self.auth.state())
            .field("config", &self.config)
            .field("closed", &self.closed)
            .finish()
    }
}
