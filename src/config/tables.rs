use super::defaults;
use super::models::{AppConfig, LogLevel, ThemeMode};
use serde::Deserialize;

/// On-disk layout of `conf/config.toml`, one table per concern.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct ConfigTables {
    #[serde(default)]
    data: DataConfig,
    #[serde(default)]
    practice: PracticeConfig,
    #[serde(default)]
    tts: TtsConfig,
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            data_path: tables.data.path,
            data_sheet: tables.data.sheet,
            answer_delay_secs: tables.practice.answer_delay_secs,
            tts_lang: tables.tts.lang,
            tts_tld: tables.tts.tld,
            tts_slow: tables.tts.slow,
            tts_volume: tables.tts.volume,
            tts_timeout_secs: tables.tts.timeout_secs,
            tts_cache_enabled: tables.tts.cache_enabled,
            tts_cache_dir: tables.tts.cache_dir,
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            window_width: tables.ui.window_width,
            window_height: tables.ui.window_height,
            log_level: tables.logging.log_level,
            key_next: tables.keys.next,
            key_previous: tables.keys.previous,
            key_replay: tables.keys.replay,
            key_stop: tables.keys.stop,
            key_quit: tables.keys.quit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DataConfig {
    #[serde(default = "defaults::default_data_path")]
    path: String,
    #[serde(default)]
    sheet: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            path: defaults::default_data_path(),
            sheet: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PracticeConfig {
    #[serde(default = "defaults::default_answer_delay_secs")]
    answer_delay_secs: u8,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        PracticeConfig {
            answer_delay_secs: defaults::default_answer_delay_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TtsConfig {
    #[serde(default = "defaults::default_tts_lang")]
    lang: String,
    #[serde(default = "defaults::default_tts_tld")]
    tld: String,
    #[serde(default)]
    slow: bool,
    #[serde(default = "defaults::default_tts_volume")]
    volume: f32,
    #[serde(default = "defaults::default_tts_timeout_secs")]
    timeout_secs: u64,
    #[serde(default = "defaults::default_tts_cache_enabled")]
    cache_enabled: bool,
    #[serde(default = "defaults::default_cache_dir")]
    cache_dir: String,
}

impl Default for TtsConfig {
    fn default() -> Self {
        TtsConfig {
            lang: defaults::default_tts_lang(),
            tld: defaults::default_tts_tld(),
            slow: false,
            volume: defaults::default_tts_volume(),
            timeout_secs: defaults::default_tts_timeout_secs(),
            cache_enabled: defaults::default_tts_cache_enabled(),
            cache_dir: defaults::default_cache_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct UiConfig {
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_next")]
    next: String,
    #[serde(default = "defaults::default_key_previous")]
    previous: String,
    #[serde(default = "defaults::default_key_replay")]
    replay: String,
    #[serde(default = "defaults::default_key_stop")]
    stop: String,
    #[serde(default = "defaults::default_key_quit")]
    quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            next: defaults::default_key_next(),
            previous: defaults::default_key_previous(),
            replay: defaults::default_key_replay(),
            stop: defaults::default_key_stop(),
            quit: defaults::default_key_quit(),
        }
    }
}
