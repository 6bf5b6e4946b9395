// libfiglio/src/card/auth.rs

use log::debug;

use crate::Result;
use crate::card::Card;
use crate::device::{Initialized, Reader};

/// Which sector trailer the reader currently holds authentication for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    AuthenticatedTo(u8),
}

/// Per-card authentication state machine.
///
/// Every block access goes through [`AuthSession::ensure_authenticated`];
/// it re-authenticates only when the target block belongs to a different
/// sector trailer than the current one.
#[derive(Debug)]
pub struct AuthSession {
    card: Card,
    state: AuthState,
}

impl AuthSession {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            state: AuthState::Unauthenticated,
        }
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Make sure the sector owning `block` is authenticated. Returns the
    /// trailer now in effect.
    pub fn ensure_authenticated(
        &mut self,
        reader: &mut Reader<Initialized>,
        block: u8,
    ) -> Result<u8> {
        let trailer = reader.geometry().sector_trailer_of(block)?;
        if self.state == AuthState::AuthenticatedTo(trailer) {
            return Ok(trailer);
        }
        let key = reader.geometry().key_a_of(trailer)?;

        debug!(
            "block #{:02}: authenticating trailer #{:02} (was {:?})",
            block, trailer, self.state
        );
        // A failed attempt leaves the reader without any authenticated sector.
        self.state = AuthState::Unauthenticated;
        reader.authenticate(&self.card, trailer, &key)?;
        self.state = AuthState::AuthenticatedTo(trailer);
        Ok(trailer)
    }

    pub fn reset(&mut self) {
        self.state = AuthState::Unauthenticated;
    }
}
