use crate::cancellation::CancellationToken;
use crate::session::PracticeMode;
use crate::tts::{SpeechPlayback, TtsEngine};
use std::time::{Duration, Instant};

/// A speech request waiting out its delay or its synthesis.
pub struct PendingSpeech {
    pub(in crate::app) request_id: u64,
    pub(in crate::app) fingerprint: String,
    pub(in crate::app) mode: PracticeMode,
    pub(in crate::app) due_at: Instant,
    pub(in crate::app) token: CancellationToken,
}

impl PendingSpeech {
    pub(in crate::app) fn remaining(&self, now: Instant) -> Duration {
        self.due_at.saturating_duration_since(now)
    }
}

/// Runtime speech model (voice settings live in `AppConfig`).
pub struct SpeechState {
    pub(in crate::app) engine: TtsEngine,
    pub(in crate::app) playback: Option<SpeechPlayback>,
    pub(in crate::app) pending: Option<PendingSpeech>,
    pub(in crate::app) request_id: u64,
    pub(in crate::app) last_error: Option<String>,
}

impl SpeechState {
    pub(in crate::app) fn new(engine: TtsEngine) -> Self {
        Self {
            engine,
            playback: None,
            pending: None,
            request_id: 0,
            last_error: None,
        }
    }

    pub(in crate::app) fn next_request_id(&mut self) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.request_id
    }

    /// Cancel the pending request, if any, and forget it.
    pub(in crate::app) fn cancel_pending(&mut self) -> Option<PendingSpeech> {
        let pending = self.pending.take()?;
        pending.token.cancel();
        Some(pending)
    }

    pub(in crate::app) fn is_current(&self, request_id: u64) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.request_id == request_id)
    }

    pub(in crate::app) fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|playback| !playback.is_finished())
    }

    pub(in crate::app) fn stop_playback(&mut self) {
        if let Some(playback) = self.playback.take() {
            playback.stop();
        }
    }
}
