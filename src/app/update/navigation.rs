use super::super::state::App;
use super::Effect;
use crate::session::PracticeMode;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_topic_selected(&mut self, topic: &str, effects: &mut Vec<Effect>) {
        if !self.dataset.topics().iter().any(|known| known == topic) {
            warn!(topic, "Ignoring unknown topic");
            return;
        }
        if self.session.select_topic(topic) {
            self.interrupt_speech(effects);
        }
    }

    pub(super) fn handle_mode_selected(&mut self, mode: PracticeMode) {
        self.session.select_mode(Some(mode));
    }

    pub(super) fn handle_delay_changed(&mut self, seconds: u8) {
        if let Err(err) = self.session.set_delay(seconds) {
            warn!("Rejected delay change: {err}");
        }
    }

    pub(super) fn handle_next(&mut self, effects: &mut Vec<Effect>) {
        self.session.next(&self.dataset);
        if self.current_topic_len() > 0 {
            self.interrupt_speech(effects);
        }
    }

    pub(super) fn handle_previous(&mut self, effects: &mut Vec<Effect>) {
        self.session.previous(&self.dataset);
        if self.current_topic_len() > 0 {
            self.interrupt_speech(effects);
        }
    }

    pub(super) fn handle_replay(&mut self, effects: &mut Vec<Effect>) {
        debug!(
            cursor = self.session.cursor(),
            spoken = self.session.last_spoken_fingerprint(),
            "Replaying current entry"
        );
        self.session.replay();
        self.interrupt_speech(effects);
    }

    pub(super) fn handle_stop_speech(&mut self, effects: &mut Vec<Effect>) {
        info!("Speech stopped by user");
        self.interrupt_speech(effects);
    }

    pub(super) fn handle_toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        debug!(theme = %self.config.theme, "Theme toggled");
    }

    /// Drop any queued request and silence the current clip.
    fn interrupt_speech(&mut self, effects: &mut Vec<Effect>) {
        if let Some(pending) = self.speech.cancel_pending() {
            debug!(
                request_id = pending.request_id,
                fingerprint = %pending.fingerprint,
                "Cancelled pending speech"
            );
        }
        self.speech.last_error = None;
        effects.push(Effect::StopAudio);
    }
}
