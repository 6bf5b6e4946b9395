// libfiglio/src/device/handle.rs

use std::marker::PhantomData;

use log::{debug, info, warn};

use crate::card::{Card, CardSession};
use crate::config::LayoutConfig;
use crate::geometry::Geometry;
use crate::transport::Transport;
use crate::types::{BlockData, KeyA};
use crate::{Error, Result};

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized;

/// Reader handle that enforces initialization state at compile time.
///
/// This is the block transport layer: every driver failure is reported as
/// one of `CardNotPresent`, `AuthenticationFailure` or `TransportFailure`,
/// and nothing is ever substituted for a missing or short reply.
pub struct Reader<State = Uninitialized> {
    transport: Box<dyn Transport>,
    geometry: Geometry,
    _state: PhantomData<State>,
}

impl<State> Reader<State> {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

impl Reader<Uninitialized> {
    /// Create a Reader from an existing Transport instance, e.g. a
    /// MockTransport in tests or a hardware driver in the application.
    pub fn new_with_transport(transport: Box<dyn Transport>, geometry: Geometry) -> Self {
        Self {
            transport,
            geometry,
            _state: PhantomData,
        }
    }

    /// Reset the reader chip. Returns an initialized Reader on success.
    pub fn initialize(mut self) -> Result<Reader<Initialized>> {
        self.transport
            .reset()
            .map_err(|e| transport_failure("reset", None, e))?;

        Ok(Reader {
            transport: self.transport,
            geometry: self.geometry,
            _state: PhantomData,
        })
    }
}

impl Reader<Initialized> {
    /// Run request -> anticollision -> select up to `max_attempts` times,
    /// back to back, and return the first card that answers.
    ///
    /// If a card answered a request but never got selected, the reader is
    /// released with [`Reader::end_session`] before `CardNotPresent` is
    /// returned.
    pub fn poll_for_card(&mut self, max_attempts: usize) -> Result<Card> {
        let mut answered = false;
        for attempt in 1..=max_attempts {
            match self.connect_once(&mut answered) {
                Ok(card) => {
                    info!("card {} selected on attempt {}", card.uid(), attempt);
                    self.check_card_class(&card);
                    return Ok(card);
                }
                Err(e) => debug!("poll attempt {}/{} failed: {}", attempt, max_attempts, e),
            }
        }
        if answered {
            self.end_session();
        }
        Err(Error::CardNotPresent {
            attempts: max_attempts,
        })
    }

    fn connect_once(&mut self, answered: &mut bool) -> Result<Card> {
        self.transport.request()?;
        *answered = true;
        let uid = self.transport.anticollision()?;
        let sak = self.transport.select(&uid)?;
        Ok(Card::new(uid, sak))
    }

    fn check_card_class(&self, card: &Card) {
        if let (Some(found), Some(expected)) = (card.class(), self.geometry.class()) {
            if found != expected {
                warn!(
                    "card {} reports {:?} but reader is configured for {:?}",
                    card.uid(),
                    found,
                    expected
                );
            }
        }
    }

    /// Authenticate the sector owning `block` with Key A.
    pub fn authenticate(&mut self, card: &Card, block: u8, key: &KeyA) -> Result<()> {
        self.transport
            .authenticate(card.uid(), block, key)
            .map_err(|e| {
                debug!("auth block #{:02} failed: {}", block, e);
                Error::AuthenticationFailure { trailer: block }
            })?;
        debug!("authenticated block #{:02}", block);
        Ok(())
    }

    /// Read one block. Anything other than exactly one full block counts
    /// as a failed read.
    pub fn read_block(&mut self, block: u8) -> Result<BlockData> {
        let raw = self
            .transport
            .read(block)
            .map_err(|e| transport_failure("read", Some(block), e))?;
        let data = BlockData::try_from(raw.as_slice()).map_err(|e| Error::TransportFailure {
            op: "read",
            detail: format!("block #{:02}: {}", block, e),
        })?;
        debug!("read block #{:02}: {}", block, data.to_hex());
        Ok(data)
    }

    pub fn write_block(&mut self, block: u8, data: &BlockData) -> Result<()> {
        debug!("write block #{:02}: {}", block, data.to_hex());
        self.transport
            .write(block, data)
            .map_err(|e| transport_failure("write", Some(block), e))
    }

    /// Release the reader's crypto state. Failures are logged only: there
    /// is nothing a caller could do about them and the next poll resets
    /// the card anyway.
    pub fn end_session(&mut self) {
        if let Err(e) = self.transport.stop_crypto() {
            warn!("stop_crypto failed: {}", e);
        }
    }

    /// Poll for a card and open a session on it.
    pub fn open_session(&mut self, config: &LayoutConfig) -> Result<CardSession<'_>> {
        CardSession::open(self, config)
    }
}

fn transport_failure(op: &'static str, block: Option<u8>, cause: Error) -> Error {
    let detail = match block {
        Some(b) => format!("block #{:02}: {}", b, cause),
        None => cause.to_string(),
    };
    Error::TransportFailure { op, detail }
}
