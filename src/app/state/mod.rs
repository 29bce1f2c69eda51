mod speech;

use crate::config::AppConfig;
use crate::dataset::{Dataset, QaEntry};
use crate::session::{SessionError, SessionState};
use crate::tts::TtsEngine;
use iced::Task;
use tracing::info;

use super::messages::Message;

pub(in crate::app) use speech::{PendingSpeech, SpeechState};

/// Core application state: the loaded sheet, one practice session and the
/// speech runtime around it.
pub struct App {
    pub(super) dataset: Dataset,
    pub(super) session: SessionState,
    pub(super) speech: SpeechState,
    pub(super) config: AppConfig,
}

impl App {
    pub fn bootstrap(dataset: Dataset, config: AppConfig) -> (Self, Task<Message>) {
        let engine = TtsEngine::from_config(&config);
        let mut session = SessionState::new(config.answer_delay_secs);
        // The topic picker always shows a selection, so start on the first one.
        if let Some(first) = dataset.topics().first() {
            session.select_topic(first);
        }
        info!(
            topics = dataset.topics().len(),
            rows = dataset.len(),
            topic = ?session.current_topic(),
            delay_secs = session.answer_delay_secs(),
            "Practice session started"
        );

        let app = App {
            dataset,
            session,
            speech: SpeechState::new(engine),
            config,
        };
        (app, Task::none())
    }

    pub(super) fn current_entry(&self) -> Result<&QaEntry, SessionError> {
        self.session.current_entry(&self.dataset)
    }

    pub(super) fn current_topic_len(&self) -> usize {
        self.session
            .current_topic()
            .map(|topic| self.dataset.topic_len(topic))
            .unwrap_or(0)
    }
}
