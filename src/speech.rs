//! Speech I/O capability boundary — voice capture and playback are host
//! capabilities injected into the orchestrator, never implemented here.
//! Fake implementations live at the bottom so the capture/playback flows
//! are testable without any audio stack.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    /// The host environment has no usable speech capability. Surfaced to
    /// the user once per session; the feature disables itself.
    #[error("Speech capability not supported: {0}")]
    Unsupported(String),

    #[error("Speech provider error: {0}")]
    Provider(String),
}

/// Events emitted by a capture implementation during one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Incremental transcript while the user is still speaking.
    Partial(String),
    /// Final transcript; ends the utterance.
    Final(String),
    /// Provider-defined error code (e.g. "not-allowed", "network").
    Error { code: String },
}

/// Voice capture capability. `start` yields the event stream for the
/// session; `stop` ends capture early.
pub trait SpeechCapture: Send + Sync {
    fn start(&self) -> Result<mpsc::Receiver<CaptureEvent>, SpeechError>;
    fn stop(&self);
}

/// Voice playback capability. `speak` resolves once playback has been
/// accepted by the host; `cancel` interrupts anything in flight.
#[async_trait]
pub trait SpeechPlayback: Send + Sync {
    async fn speak(&self, text: &str, language_tag: &str) -> Result<(), SpeechError>;
    fn cancel(&self);
}

// ── Fakes for deterministic tests ───────────────────────────

/// Playback that records what would have been spoken.
#[derive(Default)]
pub struct RecordingPlayback {
    spoken: Mutex<Vec<(String, String)>>,
    cancelled: AtomicBool,
}

impl RecordingPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechPlayback for RecordingPlayback {
    async fn speak(&self, text: &str, language_tag: &str) -> Result<(), SpeechError> {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push((text.to_string(), language_tag.to_string()));
        }
        Ok(())
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// Playback for hosts without a speech synthesis capability.
pub struct UnsupportedPlayback;

#[async_trait]
impl SpeechPlayback for UnsupportedPlayback {
    async fn speak(&self, _text: &str, _language_tag: &str) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported("no synthesis capability".into()))
    }

    fn cancel(&self) {}
}

/// Capture that replays a scripted event sequence once.
pub struct ScriptedCapture {
    events: Mutex<Option<Vec<CaptureEvent>>>,
    stopped: AtomicBool,
}

impl ScriptedCapture {
    pub fn new(events: Vec<CaptureEvent>) -> Self {
        Self {
            events: Mutex::new(Some(events)),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn was_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl SpeechCapture for ScriptedCapture {
    fn start(&self) -> Result<mpsc::Receiver<CaptureEvent>, SpeechError> {
        let events = self
            .events
            .lock()
            .ok()
            .and_then(|mut e| e.take())
            .ok_or_else(|| SpeechError::Provider("capture already consumed".into()))?;

        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            // Channel is sized to the script; sends cannot fail here.
            let _ = tx.try_send(event);
        }
        Ok(rx)
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}
