use super::super::super::messages::{Message, SpeechOutcome};
use super::super::super::state::App;
use super::super::Effect;
use crate::tts::{SpeechError, SpeechPlayback};
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::window;
use tracing::{info, warn};

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::Speak {
                request_id,
                request,
                token,
            } => {
                let engine = self.speech.engine.clone();
                let fingerprint = request.fingerprint.clone();
                Task::perform(
                    async move { engine.speak_after(request.text, request.delay, token).await },
                    move |result| Message::SpeechFinished {
                        request_id,
                        fingerprint: fingerprint.clone(),
                        outcome: match result {
                            Ok(audio) => SpeechOutcome::Ready(audio),
                            Err(SpeechError::Cancelled(_)) => SpeechOutcome::Cancelled,
                            Err(err) => SpeechOutcome::Failed(err.to_string()),
                        },
                    },
                )
            }
            Effect::PlayClip(audio) => {
                self.speech.stop_playback();
                match SpeechPlayback::start(&audio, self.config.tts_volume) {
                    Ok(playback) => self.speech.playback = Some(playback),
                    Err(err) => {
                        warn!("Audio playback failed: {err}");
                        self.speech.last_error = Some(err.to_string());
                    }
                }
                Task::none()
            }
            Effect::StopAudio => {
                self.speech.stop_playback();
                Task::none()
            }
            Effect::QuitSafely => {
                info!("Quitting practice session");
                self.speech.cancel_pending();
                self.speech.stop_playback();
                iced::exit()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
