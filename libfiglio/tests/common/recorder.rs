// recorder.rs — a ResumeHandler that records what the worker reported

use libfiglio::Error;
use libfiglio::card::Card;
use libfiglio::resume::{ResumeHandler, ResumeState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resumed(String, ResumeState),
    ResumeFailed(String, ResumeState),
    Removed,
    Saved(String),
    SaveFailed(String),
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub outcomes: Vec<Outcome>,
}

impl ResumeHandler for Recorder {
    fn resumed(&mut self, card: &Card, state: &ResumeState) {
        self.outcomes
            .push(Outcome::Resumed(card.uid().to_hex(), state.clone()));
    }

    fn resume_failed(&mut self, error: &Error, fallback: &ResumeState) {
        self.outcomes
            .push(Outcome::ResumeFailed(error.to_string(), fallback.clone()));
    }

    fn removed(&mut self) {
        self.outcomes.push(Outcome::Removed);
    }

    fn saved(&mut self, card: &Card) {
        self.outcomes.push(Outcome::Saved(card.uid().to_hex()));
    }

    fn save_failed(&mut self, error: &Error) {
        self.outcomes.push(Outcome::SaveFailed(error.to_string()));
    }
}
