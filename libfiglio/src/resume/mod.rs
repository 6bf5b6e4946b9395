//! Playback-resume state and the single-consumer event worker that drives
//! card sessions from insertion/removal signals.

mod state;
pub use state::ResumeState;

mod worker;
pub use worker::{CardEvent, ResumeHandler, SessionWorker, event_channel};
