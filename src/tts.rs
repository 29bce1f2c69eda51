//! Text-to-speech through the Google Translate speech endpoint, with clips
//! cached in `.cache/tts` and played back through `rodio`.
//!
//! Synthesis is a blocking HTTP exchange; [`TtsEngine::speak_after`] runs it
//! on tokio's blocking pool after a cancellable delay so the UI thread never
//! waits on the network.

use crate::cache::{self, VoiceKey};
use crate::cancellation::{Cancelled, CancellationToken};
use crate::config::AppConfig;
use crate::text_utils::{MAX_SPEECH_CHUNK_CHARS, split_for_speech};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use rodio::{Decoder, OutputStream, Sink};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) convo-practice/0.1";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("nothing to speak")]
    EmptyText,
    #[error("speech request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("speech service returned status {0}")]
    HttpStatus(StatusCode),
    #[error("speech service returned no audio")]
    EmptyAudio,
    #[error("speech worker failed: {0}")]
    Worker(String),
    #[error("audio playback failed: {0}")]
    Playback(String),
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

#[derive(Debug, Clone)]
pub struct TtsEngine {
    lang: String,
    tld: String,
    slow: bool,
    timeout: Duration,
    cache_dir: Option<PathBuf>,
}

impl TtsEngine {
    pub fn from_config(config: &AppConfig) -> Self {
        let engine = Self {
            lang: config.tts_lang.clone(),
            tld: config.tts_tld.clone(),
            slow: config.tts_slow,
            timeout: Duration::from_secs(config.tts_timeout_secs.max(1)),
            cache_dir: config
                .tts_cache_enabled
                .then(|| PathBuf::from(&config.tts_cache_dir)),
        };
        info!(
            lang = %engine.lang,
            tld = %engine.tld,
            slow = engine.slow,
            cache = ?engine.cache_dir,
            "Initialized TTS engine"
        );
        engine
    }

    fn voice(&self) -> VoiceKey<'_> {
        VoiceKey {
            lang: &self.lang,
            tld: &self.tld,
            slow: self.slow,
        }
    }

    fn endpoint(&self) -> String {
        format!("https://translate.google.{}/translate_tts", self.tld)
    }

    /// Produce MP3 bytes for `text`, from cache when possible.
    pub fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let cached_path = self
            .cache_dir
            .as_ref()
            .map(|dir| cache::clip_path(dir, &self.voice(), text));
        if let Some(bytes) = cached_path.as_deref().and_then(cache::load_clip) {
            return Ok(bytes);
        }

        let chunks = split_for_speech(text, MAX_SPEECH_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!(idx, total, chars = chunk.chars().count(), "Requesting speech chunk");
            let params = self.query_params(chunk, idx, total);
            let response = client.get(self.endpoint()).query(&params).send()?;
            let status = response.status();
            if !status.is_success() {
                warn!(%status, idx, "Speech service rejected request");
                return Err(SpeechError::HttpStatus(status));
            }
            audio.extend_from_slice(&response.bytes()?);
        }

        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        info!(chunks = total, bytes = audio.len(), "Synthesized speech");
        if let Some(path) = cached_path {
            cache::store_clip(&path, &audio);
        }
        Ok(audio)
    }

    fn query_params(&self, chunk: &str, idx: usize, total: usize) -> Vec<(&'static str, String)> {
        vec![
            ("ie", "UTF-8".to_string()),
            ("q", chunk.to_string()),
            ("tl", self.lang.clone()),
            ("client", "tw-ob".to_string()),
            ("ttsspeed", if self.slow { "0.3" } else { "1" }.to_string()),
            ("total", total.to_string()),
            ("idx", idx.to_string()),
            ("textlen", chunk.chars().count().to_string()),
        ]
    }

    /// Wait `delay` (abandoned if `token` is cancelled), then synthesize
    /// `text` on the blocking pool.
    pub async fn speak_after(
        &self,
        text: String,
        delay: Duration,
        token: CancellationToken,
    ) -> Result<Arc<Vec<u8>>, SpeechError> {
        if !delay.is_zero() {
            debug!(delay_ms = delay.as_millis(), "Waiting before speaking");
        }
        token.sleep(delay).await?;

        let engine = self.clone();
        let audio = tokio::task::spawn_blocking(move || engine.synthesize(&text))
            .await
            .map_err(|err| SpeechError::Worker(err.to_string()))??;

        token.check_cancelled("synthesis")?;
        Ok(Arc::new(audio))
    }
}

/// A clip playing on the default output device. Dropping it stops audio.
pub struct SpeechPlayback {
    _stream: OutputStream,
    sink: Sink,
}

impl SpeechPlayback {
    pub fn start(audio: &[u8], volume: f32) -> Result<Self, SpeechError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|err| SpeechError::Playback(err.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|err| SpeechError::Playback(err.to_string()))?;
        let source = Decoder::new(Cursor::new(audio.to_vec()))
            .map_err(|err| SpeechError::Playback(err.to_string()))?;

        sink.set_volume(volume);
        sink.append(source);
        sink.play();
        debug!(bytes = audio.len(), volume, "Started speech playback");
        Ok(Self {
            _stream: stream,
            sink,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    pub fn stop(self) {
        debug!("Stopping speech playback");
        self.sink.stop();
    }
}
