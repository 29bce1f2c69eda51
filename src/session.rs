//! Navigation and speech-gating state for one practice session.
//!
//! [`SessionState`] is owned by the UI state and mutated only through the
//! action methods below. The speech decision is keyed by a fingerprint of
//! `(cursor, mode)`: once a fingerprint has been handed out as a
//! [`SpeechRequest`], re-evaluating the same state yields nothing until
//! navigation, [`SessionState::replay`] or a reported failure clears it.

use crate::dataset::{Dataset, QaEntry};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const MIN_ANSWER_DELAY_SECS: u8 = 3;
pub const MAX_ANSWER_DELAY_SECS: u8 = 10;
pub const DEFAULT_ANSWER_DELAY_SECS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("topic `{topic}` has no entries")]
    NoEntry { topic: String },
    #[error("no topic selected")]
    NoTopic,
    #[error("answer delay {0}s is outside 3..=10 seconds")]
    DelayOutOfRange(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PracticeMode {
    AskQuestion,
    AnswerPractice,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 2] = [PracticeMode::AskQuestion, PracticeMode::AnswerPractice];
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PracticeMode::AskQuestion => "Ask Question",
            PracticeMode::AnswerPractice => "Answer Practice",
        };
        write!(f, "{}", label)
    }
}

/// Text to speak for one `(cursor, mode)` pair, and how long to wait first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub fingerprint: String,
    pub mode: PracticeMode,
    pub text: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    cursor: usize,
    current_topic: Option<String>,
    current_mode: Option<PracticeMode>,
    last_spoken_fingerprint: String,
    answer_delay_secs: u8,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DEFAULT_ANSWER_DELAY_SECS)
    }
}

impl SessionState {
    /// Fresh session: cursor 0, no topic, no mode. `answer_delay_secs` is
    /// clamped into the allowed range.
    pub fn new(answer_delay_secs: u8) -> Self {
        Self {
            cursor: 0,
            current_topic: None,
            current_mode: None,
            last_spoken_fingerprint: String::new(),
            answer_delay_secs: answer_delay_secs
                .clamp(MIN_ANSWER_DELAY_SECS, MAX_ANSWER_DELAY_SECS),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_topic(&self) -> Option<&str> {
        self.current_topic.as_deref()
    }

    pub fn current_mode(&self) -> Option<PracticeMode> {
        self.current_mode
    }

    pub fn answer_delay_secs(&self) -> u8 {
        self.answer_delay_secs
    }

    pub fn last_spoken_fingerprint(&self) -> &str {
        &self.last_spoken_fingerprint
    }

    /// Switch topics. Returns `false` when `topic` is already selected.
    pub fn select_topic(&mut self, topic: &str) -> bool {
        if self.current_topic.as_deref() == Some(topic) {
            return false;
        }
        info!(topic, "Selected topic");
        self.current_topic = Some(topic.to_string());
        self.cursor = 0;
        self.last_spoken_fingerprint.clear();
        true
    }

    /// Record the practice mode. `None` leaves the current choice in place,
    /// and the spoken fingerprint is never reset here.
    pub fn select_mode(&mut self, mode: Option<PracticeMode>) {
        if let Some(mode) = mode {
            if self.current_mode != Some(mode) {
                info!(%mode, "Selected practice mode");
            }
            self.current_mode = Some(mode);
        }
    }

    pub fn set_delay(&mut self, seconds: u8) -> Result<(), SessionError> {
        if !(MIN_ANSWER_DELAY_SECS..=MAX_ANSWER_DELAY_SECS).contains(&seconds) {
            return Err(SessionError::DelayOutOfRange(seconds));
        }
        debug!(seconds, "Answer delay changed");
        self.answer_delay_secs = seconds;
        Ok(())
    }

    /// Advance within the current topic. No-op when the topic is empty.
    pub fn next(&mut self, dataset: &Dataset) {
        let len = self.topic_len(dataset);
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1).min(len - 1);
        self.last_spoken_fingerprint.clear();
        debug!(cursor = self.cursor, len, "Moved to next entry");
    }

    /// Step back within the current topic. No-op when the topic is empty.
    pub fn previous(&mut self, dataset: &Dataset) {
        let len = self.topic_len(dataset);
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_sub(1).min(len - 1);
        self.last_spoken_fingerprint.clear();
        debug!(cursor = self.cursor, len, "Moved to previous entry");
    }

    /// Forget what was spoken so the current row is spoken again.
    pub fn replay(&mut self) {
        self.last_spoken_fingerprint.clear();
    }

    pub fn current_entry<'a>(&self, dataset: &'a Dataset) -> Result<&'a QaEntry, SessionError> {
        let topic = self.current_topic.as_deref().ok_or(SessionError::NoTopic)?;
        dataset
            .entries_for_topic(topic)
            .get(self.cursor)
            .copied()
            .ok_or_else(|| SessionError::NoEntry {
                topic: topic.to_string(),
            })
    }

    /// `"{cursor}_{mode}"`, or `None` before a mode is chosen.
    pub fn fingerprint(&self) -> Option<String> {
        self.current_mode
            .map(|mode| format!("{}_{}", self.cursor, mode))
    }

    /// Decide whether the current row should be spoken. Safe to call after
    /// every state change: a given `(cursor, mode)` pair yields at most one
    /// request.
    pub fn speech_trigger(&mut self, dataset: &Dataset) -> Option<SpeechRequest> {
        let mode = self.current_mode?;
        let fingerprint = self.fingerprint()?;
        if fingerprint == self.last_spoken_fingerprint {
            return None;
        }
        let entry = self.current_entry(dataset).ok()?;

        self.last_spoken_fingerprint = fingerprint.clone();
        let (text, delay) = match mode {
            PracticeMode::AskQuestion => (entry.question_speech_text(), Duration::ZERO),
            PracticeMode::AnswerPractice => (
                entry.answer_speech_text(),
                Duration::from_secs(u64::from(self.answer_delay_secs)),
            ),
        };
        if text.is_empty() {
            debug!(%fingerprint, "Nothing to speak for current entry");
            return None;
        }

        debug!(%fingerprint, delay_secs = delay.as_secs(), "Speech triggered");
        Some(SpeechRequest {
            fingerprint,
            mode,
            text: text.to_string(),
            delay,
        })
    }

    /// Un-mark `fingerprint` after a failed synthesis so a later evaluation
    /// retries it. Ignored if the session has since moved on.
    pub fn speech_failed(&mut self, fingerprint: &str) {
        if self.last_spoken_fingerprint == fingerprint {
            self.last_spoken_fingerprint.clear();
        }
    }

    fn topic_len(&self, dataset: &Dataset) -> usize {
        self.current_topic
            .as_deref()
            .map(|topic| dataset.topic_len(topic))
            .unwrap_or(0)
    }
}
