// libfiglio/src/card/mod.rs

use crate::types::{CardClass, Uid};

mod auth;
pub use auth::{AuthSession, AuthState};

mod session;
pub use session::CardSession;

pub mod operations;

/// A selected card: the identity returned by the connect sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    uid: Uid,
    sak: u8,
}

impl Card {
    pub fn new(uid: Uid, sak: u8) -> Self {
        Self { uid, sak }
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn sak(&self) -> u8 {
        self.sak
    }

    /// Card class derived from the SAK, if it is one we know.
    pub fn class(&self) -> Option<CardClass> {
        CardClass::from_sak(self.sak)
    }
}
