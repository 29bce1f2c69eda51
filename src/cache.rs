//! On-disk cache of synthesized speech clips.
//!
//! Clips live under `<cache_dir>/tts/` and are named by a SHA-256 of the
//! voice settings and the spoken text, so the same sentence is fetched from
//! the speech service only once. Cache I/O failures are logged and otherwise
//! ignored; a miss just means another synthesis request.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Voice parameters that change the produced audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceKey<'a> {
    pub lang: &'a str,
    pub tld: &'a str,
    pub slow: bool,
}

pub fn audio_dir(cache_dir: &Path) -> PathBuf {
    cache_dir.join("tts")
}

pub fn clip_path(cache_dir: &Path, voice: &VoiceKey<'_>, text: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(voice.lang.as_bytes());
    hasher.update([0u8]);
    hasher.update(voice.tld.as_bytes());
    hasher.update([u8::from(voice.slow)]);
    hasher.update(text.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    audio_dir(cache_dir).join(format!("tts-{hash}.mp3"))
}

/// Load a cached clip, if present and non-empty.
pub fn load_clip(path: &Path) -> Option<Vec<u8>> {
    let bytes = fs::read(path).ok()?;
    if bytes.is_empty() {
        return None;
    }
    debug!(path = %path.display(), bytes = bytes.len(), "Speech cache hit");
    Some(bytes)
}

/// Persist a clip. Errors are logged so playback is never blocked on disk.
pub fn store_clip(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            warn!(path = %parent.display(), "Failed to create speech cache dir: {err}");
            return;
        }
    }
    if let Err(err) = fs::write(path, bytes) {
        warn!(path = %path.display(), "Failed to write speech cache entry: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOICE: VoiceKey<'static> = VoiceKey {
        lang: "en",
        tld: "co.in",
        slow: false,
    };

    #[test]
    fn clip_path_depends_on_voice_and_text() {
        let root = Path::new("/tmp/cache");
        let base = clip_path(root, &VOICE, "Hello");
        assert!(base.starts_with("/tmp/cache/tts"));
        assert_eq!(base, clip_path(root, &VOICE, "Hello"));
        assert_ne!(base, clip_path(root, &VOICE, "Hello!"));

        let slow = VoiceKey { slow: true, ..VOICE };
        assert_ne!(base, clip_path(root, &slow, "Hello"));
        let us = VoiceKey { tld: "com", ..VOICE };
        assert_ne!(base, clip_path(root, &us, "Hello"));
    }

    #[test]
    fn stores_and_loads_clips() {
        let dir = tempfile::tempdir().unwrap();
        let path = clip_path(dir.path(), &VOICE, "Good morning");
        assert!(load_clip(&path).is_none());

        store_clip(&path, b"ID3fake");
        assert_eq!(load_clip(&path), Some(b"ID3fake".to_vec()));
    }

    #[test]
    fn empty_file_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let path = clip_path(dir.path(), &VOICE, "Empty");
        store_clip(&path, b"");
        assert!(load_clip(&path).is_none());
    }
}
