use serde::Deserialize;

/// High-level app configuration, flattened from the TOML tables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: String,
    pub data_sheet: Option<String>,
    pub answer_delay_secs: u8,
    pub tts_lang: String,
    pub tts_tld: String,
    pub tts_slow: bool,
    pub tts_volume: f32,
    pub tts_timeout_secs: u64,
    pub tts_cache_enabled: bool,
    pub tts_cache_dir: String,
    pub theme: ThemeMode,
    pub font_size: u32,
    pub window_width: f32,
    pub window_height: f32,
    pub log_level: LogLevel,
    pub key_next: String,
    pub key_previous: String,
    pub key_replay: String,
    pub key_stop: String,
    pub key_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: crate::config::defaults::default_data_path(),
            data_sheet: None,
            answer_delay_secs: crate::config::defaults::default_answer_delay_secs(),
            tts_lang: crate::config::defaults::default_tts_lang(),
            tts_tld: crate::config::defaults::default_tts_tld(),
            tts_slow: false,
            tts_volume: crate::config::defaults::default_tts_volume(),
            tts_timeout_secs: crate::config::defaults::default_tts_timeout_secs(),
            tts_cache_enabled: crate::config::defaults::default_tts_cache_enabled(),
            tts_cache_dir: crate::config::defaults::default_cache_dir(),
            theme: ThemeMode::default(),
            font_size: crate::config::defaults::default_font_size(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            log_level: crate::config::defaults::default_log_level(),
            key_next: crate::config::defaults::default_key_next(),
            key_previous: crate::config::defaults::default_key_previous(),
            key_replay: crate::config::defaults::default_key_replay(),
            key_stop: crate::config::defaults::default_key_stop(),
            key_quit: crate::config::defaults::default_key_quit(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    #[default]
    Day,
    Night,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
