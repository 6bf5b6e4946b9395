use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, info, warn};

use crate::Result;
use crate::card::Card;
use crate::config::{LayoutConfig, ResumeDefaults};
use crate::device::{Initialized, Reader};
use crate::error::Error;
use crate::resume::ResumeState;

/// Discrete signals from the card slot and the playback side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    /// A card entered the field.
    Inserted,
    /// The card left the field.
    Removed,
    /// Persist the current playback position on the card.
    SaveProgress {
        volume: u8,
        track_nr: u16,
        progress_ms: u32,
    },
}

/// Receives the outcome of each event. Implemented by the playback side.
pub trait ResumeHandler {
    /// State read from a freshly inserted card.
    fn resumed(&mut self, card: &Card, state: &ResumeState);

    /// The card could not be read; `fallback` is the state to apply instead.
    fn resume_failed(&mut self, error: &Error, fallback: &ResumeState);

    fn removed(&mut self) {}

    fn saved(&mut self, _card: &Card) {}

    /// The position was not persisted. Nothing on the card can be assumed
    /// to have changed.
    fn save_failed(&mut self, error: &Error) {
        warn!("progress not saved: {}", error);
    }
}

/// Owns the reader and drains card events one at a time, so no two card
/// sessions ever overlap.
pub struct SessionWorker<H> {
    reader: Reader<Initialized>,
    config: LayoutConfig,
    fallback: ResumeState,
    handler: H,
}

impl<H: ResumeHandler> SessionWorker<H> {
    pub fn new(
        reader: Reader<Initialized>,
        config: LayoutConfig,
        defaults: &ResumeDefaults,
        handler: H,
    ) -> Result<Self> {
        config.validate(reader.geometry())?;
        let fallback = defaults.fallback_state()?;
        Ok(Self {
            reader,
            config,
            fallback,
            handler,
        })
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_parts(self) -> (Reader<Initialized>, H) {
        (self.reader, self.handler)
    }

    /// Run one event to completion, including closing its session.
    pub fn handle(&mut self, event: CardEvent) {
        debug!("handling {:?}", event);
        match event {
            CardEvent::Inserted => self.resume(),
            CardEvent::Removed => {
                info!("card removed");
                self.handler.removed();
            }
            CardEvent::SaveProgress {
                volume,
                track_nr,
                progress_ms,
            } => self.save(volume, track_nr, progress_ms),
        }
    }

    fn resume(&mut self) {
        let outcome = self.reader.open_session(&self.config).and_then(|mut session| {
            let state = session.read_state()?;
            Ok((*session.card(), state))
        });
        match outcome {
            Ok((card, state)) => {
                info!(
                    "resuming {:?} at track {} / {} ms",
                    state.playlist, state.metadata.track_nr, state.metadata.progress_ms
                );
                self.handler.resumed(&card, &state);
            }
            Err(e) => {
                warn!("resume failed, falling back to defaults: {}", e);
                self.handler.resume_failed(&e, &self.fallback);
            }
        }
    }

    fn save(&mut self, volume: u8, track_nr: u16, progress_ms: u32) {
        let fields = ResumeState::progress_fields(volume, track_nr, progress_ms);
        let outcome = self.reader.open_session(&self.config).and_then(|mut session| {
            session.update_metadata(&fields)?;
            Ok(*session.card())
        });
        match outcome {
            Ok(card) => self.handler.saved(&card),
            Err(e) => self.handler.save_failed(&e),
        }
    }

    /// Drain `events` until every sender is gone. Returns the number of
    /// events handled.
    pub fn run(&mut self, events: Receiver<CardEvent>) -> usize {
        let mut handled = 0;
        for event in events {
            self.handle(event);
            handled += 1;
        }
        info!("event queue closed after {} events", handled);
        handled
    }

    /// Async variant of [`SessionWorker::run`]. Card I/O stays blocking, so
    /// give this task a runtime thread of its own.
    #[cfg(feature = "async")]
    pub async fn run_async(&mut self, mut events: tokio::sync::mpsc::Receiver<CardEvent>) -> usize {
        let mut handled = 0;
        while let Some(event) = events.recv().await {
            self.handle(event);
            handled += 1;
        }
        info!("event queue closed after {} events", handled);
        handled
    }
}

/// The single-consumer queue a [`SessionWorker`] drains.
pub fn event_channel() -> (Sender<CardEvent>, Receiver<CardEvent>) {
    mpsc::channel()
}
