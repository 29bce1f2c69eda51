use crate::session::DEFAULT_ANSWER_DELAY_SECS;

pub(crate) fn default_data_path() -> String {
    "conversation_data1.xlsx".to_string()
}

pub(crate) fn default_answer_delay_secs() -> u8 {
    DEFAULT_ANSWER_DELAY_SECS
}

pub(crate) fn default_tts_lang() -> String {
    "en".to_string()
}

/// Regional Google domain; `co.in` gives the Indian English voice.
pub(crate) fn default_tts_tld() -> String {
    "co.in".to_string()
}

pub(crate) fn default_tts_volume() -> f32 {
    1.0
}

pub(crate) fn default_tts_timeout_secs() -> u64 {
    15
}

pub(crate) fn default_tts_cache_enabled() -> bool {
    true
}

pub(crate) fn default_cache_dir() -> String {
    ".cache".to_string()
}

pub(crate) fn default_font_size() -> u32 {
    18
}

pub(crate) fn default_window_width() -> f32 {
    900.0
}

pub(crate) fn default_window_height() -> f32 {
    760.0
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::default()
}

pub(crate) fn default_key_next() -> String {
    "right".to_string()
}

pub(crate) fn default_key_previous() -> String {
    "left".to_string()
}

pub(crate) fn default_key_replay() -> String {
    "r".to_string()
}

pub(crate) fn default_key_stop() -> String {
    "s".to_string()
}

pub(crate) fn default_key_quit() -> String {
    "q".to_string()
}
