use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use tracing::debug;

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();
        let reevaluate = message.reevaluates_speech();

        match message {
            Message::TopicSelected(topic) => self.handle_topic_selected(&topic, &mut effects),
            Message::ModeSelected(mode) => self.handle_mode_selected(mode),
            Message::DelayChanged(seconds) => self.handle_delay_changed(seconds),
            Message::Next => self.handle_next(&mut effects),
            Message::Previous => self.handle_previous(&mut effects),
            Message::Replay => self.handle_replay(&mut effects),
            Message::StopSpeech => self.handle_stop_speech(&mut effects),
            Message::ToggleTheme => self.handle_toggle_theme(),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
            Message::KeyPressed { key, modifiers } => {
                if let Some(mapped) = self.shortcut_message_for_key(key, modifiers) {
                    debug!(?mapped, "Keyboard shortcut");
                    return self.reduce(mapped);
                }
                return effects;
            }
            Message::SpeechFinished {
                request_id,
                fingerprint,
                outcome,
            } => self.handle_speech_finished(request_id, &fingerprint, outcome, &mut effects),
            Message::Tick(_) => self.handle_tick(),
        }

        if reevaluate {
            self.evaluate_speech(&mut effects);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::super::messages::SpeechOutcome;
    use super::*;
    use crate::config::AppConfig;
    use crate::dataset::Dataset;
    use crate::dataset::tests::entry;
    use crate::session::PracticeMode;
    use iced::keyboard::{Key, Modifiers, key};
    use std::sync::Arc;
    use std::time::Duration;

    fn greetings_app() -> App {
        let dataset = Dataset::new(vec![
            entry("Greetings", 1, "Hello!", "Hi there."),
            entry("Greetings", 2, "Good morning.", "Morning!"),
            entry("Greetings", 3, "How are you?", "I am fine."),
            entry("Travel", 1, "Where is the station?", "Over there."),
        ]);
        let config = AppConfig {
            tts_cache_enabled: false,
            ..AppConfig::default()
        };
        App::bootstrap(dataset, config).0
    }

    fn speak_request(effects: &[Effect]) -> Option<(u64, &crate::session::SpeechRequest)> {
        effects.iter().find_map(|effect| match effect {
            Effect::Speak {
                request_id,
                request,
                ..
            } => Some((*request_id, request)),
            _ => None,
        })
    }

    #[test]
    fn nothing_is_spoken_before_a_mode_is_chosen() {
        let mut app = greetings_app();
        let effects = app.reduce(Message::Next);
        assert!(speak_request(&effects).is_none());
        assert_eq!(app.session.cursor(), 1);
    }

    #[test]
    fn answer_practice_speaks_after_delay_and_next_cancels_it() {
        let mut app = greetings_app();
        let effects = app.reduce(Message::ModeSelected(PracticeMode::AnswerPractice));
        let (first_id, request) = speak_request(&effects).expect("speech for first row");
        assert_eq!(request.text, "Hi there.");
        assert_eq!(request.delay, Duration::from_secs(5));
        assert_eq!(request.fingerprint, "0_Answer Practice");
        let first_token = app
            .speech
            .pending
            .as_ref()
            .map(|pending| pending.token.clone())
            .expect("pending request");

        let effects = app.reduce(Message::Next);
        assert!(first_token.is_cancelled());
        assert!(effects.iter().any(|e| matches!(e, Effect::StopAudio)));
        let (second_id, request) = speak_request(&effects).expect("speech for second row");
        assert_ne!(first_id, second_id);
        assert_eq!(request.text, "Morning!");
        assert_eq!(request.fingerprint, "1_Answer Practice");
    }

    #[test]
    fn repeated_evaluation_does_not_respeak() {
        let mut app = greetings_app();
        let effects = app.reduce(Message::ModeSelected(PracticeMode::AskQuestion));
        let (_, request) = speak_request(&effects).expect("question speech");
        assert_eq!(request.delay, Duration::ZERO);

        let effects = app.reduce(Message::ModeSelected(PracticeMode::AskQuestion));
        assert!(speak_request(&effects).is_none());
        let effects = app.reduce(Message::DelayChanged(7));
        assert!(speak_request(&effects).is_none());
        assert_eq!(app.session.answer_delay_secs(), 7);
    }

    #[test]
    fn topic_change_resets_cursor_and_speaks_first_row() {
        let mut app = greetings_app();
        app.reduce(Message::ModeSelected(PracticeMode::AskQuestion));
        app.reduce(Message::Next);
        let effects = app.reduce(Message::TopicSelected("Travel".to_string()));
        assert_eq!(app.session.cursor(), 0);
        let (_, request) = speak_request(&effects).expect("travel speech");
        assert_eq!(request.text, "Where is the station?");
    }

    #[test]
    fn stale_speech_result_is_ignored() {
        let mut app = greetings_app();
        let effects = app.reduce(Message::ModeSelected(PracticeMode::AskQuestion));
        let (first_id, _) = speak_request(&effects).expect("first speech");
        let effects = app.reduce(Message::Next);
        let (second_id, _) = speak_request(&effects).expect("second speech");

        let effects = app.reduce(Message::SpeechFinished {
            request_id: first_id,
            fingerprint: "0_Ask Question".to_string(),
            outcome: SpeechOutcome::Ready(Arc::new(vec![1, 2, 3])),
        });
        assert!(effects.is_empty());
        assert!(app.speech.is_current(second_id));
    }

    #[test]
    fn ready_speech_is_played_and_clears_pending() {
        let mut app = greetings_app();
        let effects = app.reduce(Message::ModeSelected(PracticeMode::AskQuestion));
        let (id, request) = speak_request(&effects).expect("speech");
        let fingerprint = request.fingerprint.clone();

        let effects = app.reduce(Message::SpeechFinished {
            request_id: id,
            fingerprint,
            outcome: SpeechOutcome::Ready(Arc::new(vec![0xff])),
        });
        assert!(effects.iter().any(|e| matches!(e, Effect::PlayClip(_))));
        assert!(app.speech.pending.is_none());
    }

    #[test]
    fn failed_speech_is_retried_on_next_practice_action() {
        let mut app = greetings_app();
        let effects = app.reduce(Message::ModeSelected(PracticeMode::AskQuestion));
        let (id, request) = speak_request(&effects).expect("speech");
        let fingerprint = request.fingerprint.clone();

        let effects = app.reduce(Message::SpeechFinished {
            request_id: id,
            fingerprint,
            outcome: SpeechOutcome::Failed("offline".to_string()),
        });
        assert!(speak_request(&effects).is_none());
        assert_eq!(app.session.last_spoken_fingerprint(), "");
        assert!(app.speech.last_error.is_some());

        let effects = app.reduce(Message::DelayChanged(4));
        assert!(speak_request(&effects).is_some());
    }

    fn fail_current_speech(app: &mut App) {
        let effects = app.reduce(Message::ModeSelected(PracticeMode::AskQuestion));
        let (id, request) = speak_request(&effects).expect("speech");
        let fingerprint = request.fingerprint.clone();
        app.reduce(Message::SpeechFinished {
            request_id: id,
            fingerprint,
            outcome: SpeechOutcome::Failed("offline".to_string()),
        });
    }

    #[test]
    fn stop_after_failure_stays_silent() {
        let mut app = greetings_app();
        fail_current_speech(&mut app);

        let effects = app.reduce(Message::StopSpeech);
        assert!(effects.iter().any(|e| matches!(e, Effect::StopAudio)));
        assert!(speak_request(&effects).is_none());
        assert!(app.speech.pending.is_none());
    }

    #[test]
    fn quit_and_theme_after_failure_do_not_speak() {
        let mut app = greetings_app();
        fail_current_speech(&mut app);

        let effects = app.reduce(Message::ToggleTheme);
        assert!(speak_request(&effects).is_none());
        let effects = app.reduce(Message::SafeQuit);
        assert!(speak_request(&effects).is_none());
        assert!(effects.iter().any(|e| matches!(e, Effect::QuitSafely)));
    }

    #[test]
    fn mode_switch_silences_previous_clip_before_speaking() {
        let mut app = greetings_app();
        app.reduce(Message::ModeSelected(PracticeMode::AskQuestion));
        let effects = app.reduce(Message::ModeSelected(PracticeMode::AnswerPractice));
        let stop_at = effects
            .iter()
            .position(|e| matches!(e, Effect::StopAudio))
            .expect("stop effect");
        let speak_at = effects
            .iter()
            .position(|e| matches!(e, Effect::Speak { .. }))
            .expect("speak effect");
        assert!(stop_at < speak_at);
    }

    #[test]
    fn replay_speaks_current_row_again() {
        let mut app = greetings_app();
        app.reduce(Message::ModeSelected(PracticeMode::AskQuestion));
        let effects = app.reduce(Message::Replay);
        let (_, request) = speak_request(&effects).expect("replayed speech");
        assert_eq!(request.text, "Hello!");
    }

    #[test]
    fn stop_cancels_without_respeaking() {
        let mut app = greetings_app();
        app.reduce(Message::ModeSelected(PracticeMode::AnswerPractice));
        let effects = app.reduce(Message::StopSpeech);
        assert!(effects.iter().any(|e| matches!(e, Effect::StopAudio)));
        assert!(speak_request(&effects).is_none());
        assert!(app.speech.pending.is_none());
    }

    #[test]
    fn keyboard_shortcuts_drive_navigation() {
        let mut app = greetings_app();
        app.reduce(Message::KeyPressed {
            key: Key::Named(key::Named::ArrowRight),
            modifiers: Modifiers::default(),
        });
        assert_eq!(app.session.cursor(), 1);
        app.reduce(Message::KeyPressed {
            key: Key::Named(key::Named::ArrowLeft),
            modifiers: Modifiers::default(),
        });
        assert_eq!(app.session.cursor(), 0);
        let effects = app.reduce(Message::KeyPressed {
            key: Key::Character("q".into()),
            modifiers: Modifiers::default(),
        });
        assert!(effects.iter().any(|e| matches!(e, Effect::QuitSafely)));
    }
}
