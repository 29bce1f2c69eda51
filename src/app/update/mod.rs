use crate::cancellation::CancellationToken;
use crate::session::SpeechRequest;
use std::sync::Arc;

mod core;
mod navigation;
mod speech;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug)]
pub(super) enum Effect {
    Speak {
        request_id: u64,
        request: SpeechRequest,
        token: CancellationToken,
    },
    PlayClip(Arc<Vec<u8>>),
    StopAudio,
    QuitSafely,
}
