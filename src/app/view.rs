use super::messages::Message;
use super::state::App;
use crate::config::ThemeMode;
use crate::dataset::QaEntry;
use crate::session::{MAX_ANSWER_DELAY_SECS, MIN_ANSWER_DELAY_SECS, PracticeMode, SessionError};
use iced::alignment::Vertical;
use iced::widget::text::Wrapping;
use iced::widget::{
    Column, button, column, container, horizontal_space, pick_list, radio, row, scrollable,
    slider, text,
};
use iced::{Element, Length};
use std::time::Instant;

const TITLE: &str = "Conversation Practice";

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let theme_label = if matches!(self.config.theme, ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };

        let header = row![
            text(TITLE).size(self.config.font_size as f32 + 8.0),
            horizontal_space(),
            button(theme_label).on_press(Message::ToggleTheme),
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        let topic_picker = pick_list(
            self.dataset.topics(),
            self.session.current_topic().map(str::to_string),
            Message::TopicSelected,
        )
        .placeholder("Select a topic");

        let mode_radios = PracticeMode::ALL.iter().fold(row![].spacing(16), |row, mode| {
            row.push(radio(
                mode.to_string(),
                *mode,
                self.session.current_mode(),
                Message::ModeSelected,
            ))
        });

        let delay = self.session.answer_delay_secs();
        let delay_control = column![
            text(format!("Answer speaking delay: {delay}s")),
            slider(
                MIN_ANSWER_DELAY_SECS..=MAX_ANSWER_DELAY_SECS,
                delay,
                Message::DelayChanged,
            )
        ]
        .spacing(4);

        let controls = column![
            row![text("Topic:"), topic_picker]
                .spacing(10)
                .align_y(Vertical::Center),
            row![text("Mode:"), mode_radios]
                .spacing(10)
                .align_y(Vertical::Center),
            delay_control,
        ]
        .spacing(12);

        let body: Element<'_, Message> = match self.current_entry() {
            Ok(entry) => self.entry_view(entry),
            Err(SessionError::NoTopic) => text("Select a topic to begin.").into(),
            Err(err) => text(format!("{err}. Pick another topic.")).into(),
        };

        let has_rows = self.current_topic_len() > 0;
        let nav = row![
            button("Previous").on_press_maybe(has_rows.then_some(Message::Previous)),
            button("Replay").on_press_maybe(has_rows.then_some(Message::Replay)),
            button("Stop").on_press(Message::StopSpeech),
            button("Next").on_press_maybe(has_rows.then_some(Message::Next)),
            horizontal_space(),
            text(self.status_label()),
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        let content = column![
            header,
            controls,
            scrollable(container(body).padding(8).width(Length::Fill)).height(Length::Fill),
            nav,
        ]
        .spacing(16)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn entry_view<'a>(&'a self, entry: &'a QaEntry) -> Element<'a, Message> {
        let size = self.config.font_size as f32;
        let topic = self.session.current_topic().unwrap_or_default();
        let position = format!(
            "{} of {}",
            self.session.cursor() + 1,
            self.current_topic_len()
        );

        let mut question: Column<'a, Message> = column![
            text("Question").size(size - 2.0),
            text(&entry.question).size(size + 4.0).wrapping(Wrapping::Word),
        ]
        .spacing(4);
        question = push_hints(
            question,
            &entry.question_pronounce,
            &entry.question_translation,
            size,
        );

        let mut answer: Column<'a, Message> = column![
            text("Answer").size(size - 2.0),
            text(&entry.answer).size(size + 4.0).wrapping(Wrapping::Word),
        ]
        .spacing(4);
        answer = push_hints(answer, &entry.answer_pronounce, &entry.answer_translation, size);

        column![
            row![
                text(match entry.serial {
                    Some(serial) => format!("{topic} – Question {serial}"),
                    None => format!("{topic} – Question"),
                })
                .size(size + 2.0),
                horizontal_space(),
                text(position).size(size - 2.0),
            ]
            .align_y(Vertical::Center),
            question,
            answer,
        ]
        .spacing(20)
        .into()
    }

    fn status_label(&self) -> String {
        if let Some(err) = &self.speech.last_error {
            return format!("Speech unavailable: {err}");
        }
        if let Some(pending) = &self.speech.pending {
            let remaining = pending.remaining(Instant::now());
            return match pending.mode {
                PracticeMode::AnswerPractice if !remaining.is_zero() => {
                    format!("Speaking answer in {}s", remaining.as_secs_f32().ceil() as u64)
                }
                _ => "Preparing audio…".to_string(),
            };
        }
        if self.speech.is_playing() {
            return "Playing audio".to_string();
        }
        String::new()
    }
}

fn push_hints<'a>(
    mut block: Column<'a, Message>,
    pronounce: &'a str,
    translation: &'a str,
    size: f32,
) -> Column<'a, Message> {
    if !pronounce.is_empty() {
        block = block.push(text(format!("Pronounce: {pronounce}")).size(size - 1.0));
    }
    if !translation.is_empty() {
        block = block.push(text(format!("Meaning: {translation}")).size(size - 1.0));
    }
    block
}
