// libfiglio/src/error.rs

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("reader not found")]
    ReaderNotFound,

    #[error("card not present after {attempts} poll attempts")]
    CardNotPresent { attempts: usize },

    #[error("authentication failed for sector trailer #{trailer:02}")]
    AuthenticationFailure { trailer: u8 },

    #[error("transport failure during {op}: {detail}")]
    TransportFailure { op: &'static str, detail: String },

    #[error("end of card reached starting from block #{start_block:02}")]
    EndOfCard { start_block: u8 },

    #[error("value {value} does not fit the {width}-byte {field} field")]
    EncodingOverflow {
        field: &'static str,
        width: usize,
        value: String,
    },

    #[error("invalid block #{0:02} for this card geometry")]
    InvalidBlock(u8),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid text record: {0}")]
    InvalidText(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("card session already closed")]
    SessionClosed,

    // Raw failure reported by a reader driver. The reader maps these onto
    // the taxonomy above before they reach callers.
    #[error("driver error: {0}")]
    Driver(String),
}

impl Error {
    /// True for failures that originate from the reader or the card and
    /// therefore invalidate the current session.
    pub fn is_hardware(&self) -> bool {
        matches!(
            self,
            Error::CardNotPresent { .. }
                | Error::AuthenticationFailure { .. }
                | Error::TransportFailure { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
