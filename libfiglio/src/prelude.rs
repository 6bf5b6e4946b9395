// libfiglio/src/prelude.rs

pub use crate::card::{AuthSession, AuthState, Card, CardSession};
pub use crate::config::{LayoutConfig, ResumeDefaults};
pub use crate::device::{Initialized, Reader, ReaderBuilder, Uninitialized};
pub use crate::geometry::{Geometry, GeometryBuilder, Sector};
pub use crate::record::{MetadataField, MetadataRecord};
pub use crate::resume::{CardEvent, ResumeHandler, ResumeState, SessionWorker, event_channel};
pub use crate::transport::Transport;
pub use crate::{BlockData, CardClass, Error, KeyA, Result, Uid};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, parse_hex};
