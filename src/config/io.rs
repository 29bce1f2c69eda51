use super::models::AppConfig;
use super::tables::ConfigTables;
use crate::session::{MAX_ANSWER_DELAY_SECS, MIN_ANSWER_DELAY_SECS};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const MIN_FONT_SIZE: u32 = 12;
const MAX_FONT_SIZE: u32 = 36;
const MAX_TTS_VOLUME: f32 = 2.0;

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

/// Parse the tabled TOML layout and clamp out-of-range values.
pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    let tables: ConfigTables = toml::from_str(contents)?;
    let mut config = AppConfig::from(tables);
    clamp_config(&mut config);
    Ok(config)
}

fn clamp_config(config: &mut AppConfig) {
    let delay = config
        .answer_delay_secs
        .clamp(MIN_ANSWER_DELAY_SECS, MAX_ANSWER_DELAY_SECS);
    if delay != config.answer_delay_secs {
        warn!(
            requested = config.answer_delay_secs,
            applied = delay,
            "Answer delay out of range; clamped"
        );
        config.answer_delay_secs = delay;
    }
    config.font_size = config.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    config.tts_volume = if config.tts_volume.is_finite() {
        config.tts_volume.clamp(0.0, MAX_TTS_VOLUME)
    } else {
        1.0
    };
    if config.tts_tld.trim().is_empty() {
        config.tts_tld = super::defaults::default_tts_tld();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ThemeMode};

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_sectioned_tables() {
        let config = parse_config(
            r#"
[data]
path = "data/practice.csv"
sheet = "Week 1"

[practice]
answer_delay_secs = 7

[tts]
tld = "com"
slow = true

[appearance]
theme = "night"

[logging]
log_level = "debug"

[keys]
next = "n"
"#,
        )
        .unwrap();

        assert_eq!(config.data_path, "data/practice.csv");
        assert_eq!(config.data_sheet.as_deref(), Some("Week 1"));
        assert_eq!(config.answer_delay_secs, 7);
        assert_eq!(config.tts_tld, "com");
        assert!(config.tts_slow);
        assert_eq!(config.tts_lang, "en");
        assert_eq!(config.theme, ThemeMode::Night);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.key_next, "n");
        assert_eq!(config.key_previous, "left");
    }

    #[test]
    fn clamps_out_of_range_values() {
        let config = parse_config(
            "[practice]\nanswer_delay_secs = 30\n[tts]\nvolume = 9.0\n[appearance]\nfont_size = 2\n",
        )
        .unwrap();
        assert_eq!(config.answer_delay_secs, MAX_ANSWER_DELAY_SECS);
        assert_eq!(config.tts_volume, MAX_TTS_VOLUME);
        assert_eq!(config.font_size, MIN_FONT_SIZE);
    }

    #[test]
    fn log_level_defaults_to_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
        let config = parse_config("[logging]\n").unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn unknown_table_is_an_error() {
        assert!(parse_config("[reader]\nfont = 1\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/conf/config.toml"));
        assert_eq!(config, AppConfig::default());
    }
}
