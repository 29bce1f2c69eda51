use crate::session::PracticeMode;
use iced::keyboard::{Key, Modifiers};
use std::sync::Arc;
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    TopicSelected(String),
    ModeSelected(PracticeMode),
    DelayChanged(u8),
    Next,
    Previous,
    Replay,
    StopSpeech,
    ToggleTheme,
    SafeQuit,
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    SpeechFinished {
        request_id: u64,
        fingerprint: String,
        outcome: SpeechOutcome,
    },
    Tick(Instant),
}

impl Message {
    /// Whether handling this message should re-run the speech decision.
    /// Only practice actions qualify; a failed synthesis waits for the next one.
    pub(super) fn reevaluates_speech(&self) -> bool {
        matches!(
            self,
            Message::TopicSelected(_)
                | Message::ModeSelected(_)
                | Message::DelayChanged(_)
                | Message::Next
                | Message::Previous
                | Message::Replay
        )
    }
}

/// Result of one delayed synthesis request.
#[derive(Debug, Clone)]
pub enum SpeechOutcome {
    Ready(Arc<Vec<u8>>),
    Cancelled,
    Failed(String),
}
