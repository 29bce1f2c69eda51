use super::super::messages::SpeechOutcome;
use super::super::state::{App, PendingSpeech};
use super::Effect;
use crate::cancellation::CancellationToken;
use std::time::Instant;
use tracing::{debug, info, warn};

impl App {
    /// Ask the session whether the current row needs speaking and, if so,
    /// queue a single cancellable request for it.
    pub(super) fn evaluate_speech(&mut self, effects: &mut Vec<Effect>) {
        let Some(request) = self.session.speech_trigger(&self.dataset) else {
            return;
        };

        self.speech.cancel_pending();
        effects.push(Effect::StopAudio);
        let request_id = self.speech.next_request_id();
        let token = CancellationToken::new();
        info!(
            request_id,
            fingerprint = %request.fingerprint,
            mode = %request.mode,
            delay_secs = request.delay.as_secs(),
            "Queued speech"
        );
        self.speech.pending = Some(PendingSpeech {
            request_id,
            fingerprint: request.fingerprint.clone(),
            mode: request.mode,
            due_at: Instant::now() + request.delay,
            token: token.clone(),
        });
        self.speech.last_error = None;
        effects.push(Effect::Speak {
            request_id,
            request,
            token,
        });
    }

    pub(super) fn handle_speech_finished(
        &mut self,
        request_id: u64,
        fingerprint: &str,
        outcome: SpeechOutcome,
        effects: &mut Vec<Effect>,
    ) {
        if !self.speech.is_current(request_id) {
            debug!(request_id, "Dropping stale speech result");
            return;
        }
        self.speech.pending = None;

        match outcome {
            SpeechOutcome::Ready(audio) => {
                debug!(request_id, bytes = audio.len(), "Speech ready");
                effects.push(Effect::PlayClip(audio));
            }
            SpeechOutcome::Cancelled => {
                debug!(request_id, "Speech request cancelled");
            }
            SpeechOutcome::Failed(err) => {
                warn!(request_id, fingerprint, "Speech synthesis failed: {err}");
                self.session.speech_failed(fingerprint);
                self.speech.last_error = Some(err);
            }
        }
    }

    pub(super) fn handle_tick(&mut self) {
        if self.speech.playback.is_some() && !self.speech.is_playing() {
            self.speech.playback = None;
        }
    }
}
