//! Conversation orchestrator — the turn-level state machine behind the
//! chat feature.
//!
//! One turn: detect the input language, translate into the pivot language,
//! run extraction + ranking, compose the response (blending the external
//! completion), translate back, append to the log, drive speech playback.
//! Every external call is bounded and has an explicit fallback; the only
//! failure that aborts a turn is a completion outage on the model-only
//! path, surfaced as a dismissible notice.
//!
//! Overlapping turns are allowed: a turn takes a generation id at entry
//! and a result arriving after a newer turn has started is discarded
//! instead of being appended out of order.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::HealthCatalog;
use crate::config;
use crate::inference::{extract, rank_conditions, ComposeError, ResponseComposer};
use crate::locale::{self, UiCopy};
use crate::models::{ConversationLog, ConversationState, Message};
use crate::prefs::{keys, PreferenceStore};
use crate::providers::{CompletionProvider, LanguageDetector, Translator};
use crate::speech::{CaptureEvent, SpeechCapture, SpeechError, SpeechPlayback};

/// Where the state machine currently is. Observable for UI affordances;
/// `Idle` is both the initial and terminal state of every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Idle,
    Capturing,
    Detecting,
    TranslatingIn,
    Analyzing,
    Composing,
    TranslatingOut,
    Speaking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    CompletionUnavailable,
    SpeechUnavailable,
    LanguageSuggestion,
}

/// A dismissible, user-visible notice. Emitted outside the message log.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// How a submitted utterance ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Empty input, discarded without side effects.
    Ignored,
    /// Assistant reply appended to the log.
    Answered { message_id: Uuid },
    /// A newer turn started while this one awaited the network; the
    /// result was discarded rather than appended out of order.
    Superseded,
    /// Completion provider failed with nothing local to fall back on.
    /// The user message stays in the log, unanswered.
    Aborted,
}

pub struct Orchestrator {
    catalog: Arc<HealthCatalog>,
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<dyn Translator>,
    composer: ResponseComposer,
    playback: Option<Arc<dyn SpeechPlayback>>,
    prefs: Arc<dyn PreferenceStore>,
    state: Mutex<ConversationState>,
    log: Mutex<ConversationLog>,
    notices: Mutex<Vec<Notice>>,
    phase: Mutex<TurnPhase>,
    generation: AtomicU64,
    speech_enabled: AtomicBool,
    speech_notice_sent: AtomicBool,
    capture_buffer: Mutex<String>,
    external_timeout: Duration,
}

impl Orchestrator {
    /// Build an orchestrator over the injected capabilities. Initial
    /// toggle state comes from the preference store.
    pub fn new(
        catalog: Arc<HealthCatalog>,
        detector: Arc<dyn LanguageDetector>,
        translator: Arc<dyn Translator>,
        completion: Arc<dyn CompletionProvider>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        let state = ConversationState {
            working_language: prefs
                .get(keys::WORKING_LANGUAGE)
                .unwrap_or_else(|| config::DEFAULT_LANGUAGE.to_string()),
            auto_translate: prefs
                .get(keys::AUTO_TRANSLATE)
                .map(|v| v == "true")
                .unwrap_or(true),
            symptom_model_enabled: prefs
                .get(keys::SYMPTOM_MODEL_ENABLED)
                .map(|v| v == "true")
                .unwrap_or(true),
        };

        Self {
            catalog,
            detector,
            translator,
            composer: ResponseComposer::new(completion),
            playback: None,
            prefs,
            state: Mutex::new(state),
            log: Mutex::new(ConversationLog::new()),
            notices: Mutex::new(Vec::new()),
            phase: Mutex::new(TurnPhase::Idle),
            generation: AtomicU64::new(0),
            speech_enabled: AtomicBool::new(true),
            speech_notice_sent: AtomicBool::new(false),
            capture_buffer: Mutex::new(String::new()),
            external_timeout: Duration::from_secs(config::EXTERNAL_CALL_TIMEOUT_SECS),
        }
    }

    pub fn with_playback(mut self, playback: Arc<dyn SpeechPlayback>) -> Self {
        self.playback = Some(playback);
        self
    }

    pub fn with_external_timeout(mut self, timeout: Duration) -> Self {
        self.external_timeout = timeout;
        self.composer = self.composer.with_timeout(timeout);
        self
    }

    // ── Turn driver ─────────────────────────────────────────

    /// Run one full turn for a finalized utterance.
    pub async fn submit_text(&self, input: &str) -> TurnOutcome {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.set_phase(TurnPhase::Idle);
            return TurnOutcome::Ignored;
        }

        let turn = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let state = self.state();

        self.set_phase(TurnPhase::Detecting);
        let detected = self
            .bounded(self.detector.detect(trimmed, &state.working_language), || {
                state.working_language.clone()
            })
            .await;

        if detected != state.working_language {
            self.push_notice(
                NoticeKind::LanguageSuggestion,
                locale::ui_copy(&state.working_language, UiCopy::LanguageSuggestion),
            );
        }

        self.set_phase(TurnPhase::TranslatingIn);
        let pivot_text = if detected != config::PIVOT_LANGUAGE {
            self.bounded(
                self.translator
                    .translate(trimmed, config::PIVOT_LANGUAGE, Some(&detected)),
                || trimmed.to_string(),
            )
            .await
        } else {
            trimmed.to_string()
        };

        // The user message is in the log from here on, even if the turn
        // aborts further down.
        self.append_message(Message::user(trimmed));

        self.set_phase(TurnPhase::Analyzing);
        let (symptoms, matches) = if state.symptom_model_enabled {
            let symptoms = extract(&self.catalog, &pivot_text);
            let ids: Vec<&str> = symptoms.iter().map(|s| s.id.as_str()).collect();
            let matches = rank_conditions(&self.catalog, &ids);
            (symptoms, matches)
        } else {
            (Vec::new(), Vec::new())
        };

        self.set_phase(TurnPhase::Composing);
        let composed = match self.composer.compose(&symptoms, &matches, &pivot_text).await {
            Ok(text) => text,
            Err(ComposeError::CompletionUnavailable(e)) => {
                tracing::warn!("Turn {turn} aborted, completion provider unavailable: {e}");
                self.push_notice(
                    NoticeKind::CompletionUnavailable,
                    locale::ui_copy(&state.working_language, UiCopy::CompletionUnavailable),
                );
                self.set_phase(TurnPhase::Idle);
                return TurnOutcome::Aborted;
            }
        };

        self.set_phase(TurnPhase::TranslatingOut);
        let translate_out = state.auto_translate && detected != config::PIVOT_LANGUAGE;
        let delivered = if translate_out {
            self.bounded(
                self.translator
                    .translate(&composed, &detected, Some(config::PIVOT_LANGUAGE)),
                || composed.clone(),
            )
            .await
        } else {
            composed.clone()
        };

        // Stale-turn guard: a newer turn may have started while this one
        // awaited the network.
        if self.generation.load(Ordering::SeqCst) != turn {
            tracing::info!("Discarding result of superseded turn {turn}");
            return TurnOutcome::Superseded;
        }

        let mut message = Message::assistant(delivered.clone());
        if delivered != composed {
            message = message.with_original(composed);
        }
        if state.symptom_model_enabled {
            message = message.with_analysis(
                symptoms.iter().map(|s| (*s).clone()).collect(),
                matches.iter().map(|m| m.condition.clone()).collect(),
            );
        }
        let message_id = message.id;
        self.append_message(message);

        self.set_phase(TurnPhase::Speaking);
        let output_language = if translate_out {
            detected.as_str()
        } else {
            config::PIVOT_LANGUAGE
        };
        self.dispatch_speech(&delivered, output_language).await;

        self.set_phase(TurnPhase::Idle);
        TurnOutcome::Answered { message_id }
    }

    /// Feed one speech-capture event into the state machine. `Final`
    /// transcripts run a full turn; empty finals are discarded.
    pub async fn handle_capture_event(&self, event: CaptureEvent) -> Option<TurnOutcome> {
        match event {
            CaptureEvent::Partial(chunk) => {
                self.set_phase(TurnPhase::Capturing);
                if let Ok(mut buffer) = self.capture_buffer.lock() {
                    *buffer = chunk;
                }
                None
            }
            CaptureEvent::Final(transcript) => {
                if let Ok(mut buffer) = self.capture_buffer.lock() {
                    buffer.clear();
                }
                Some(self.submit_text(&transcript).await)
            }
            CaptureEvent::Error { code } => {
                match code.as_str() {
                    "not-allowed" | "service-not-allowed" | "unsupported" => {
                        self.disable_speech(&code);
                    }
                    _ => tracing::warn!("Speech capture error: {code}"),
                }
                self.set_phase(TurnPhase::Idle);
                None
            }
        }
    }

    /// Drive a whole capture session: start the capture capability and
    /// feed every event through the state machine until the stream ends.
    /// Returns the outcome of the last completed turn, if any.
    pub async fn run_capture(
        &self,
        capture: &dyn SpeechCapture,
    ) -> Result<Option<TurnOutcome>, SpeechError> {
        let mut events = match capture.start() {
            Ok(rx) => rx,
            Err(SpeechError::Unsupported(reason)) => {
                self.disable_speech(&reason);
                return Err(SpeechError::Unsupported(reason));
            }
            Err(e) => return Err(e),
        };

        let mut last = None;
        while let Some(event) = events.recv().await {
            if let Some(outcome) = self.handle_capture_event(event).await {
                last = Some(outcome);
            }
        }
        Ok(last)
    }

    /// The in-progress partial transcript, for live display.
    pub fn capture_buffer(&self) -> String {
        self.capture_buffer
            .lock()
            .map(|b| b.clone())
            .unwrap_or_default()
    }

    // ── Session setup ───────────────────────────────────────

    /// Append the localized assistant greeting as the opening log entry.
    pub fn seed_greeting(&self) {
        let lang = self.state().working_language;
        self.append_message(Message::assistant(locale::ui_copy(&lang, UiCopy::Greeting)));
    }

    // ── User-gesture toggles ────────────────────────────────

    /// Confirmed language switch. Does not retroactively alter messages
    /// already in the log.
    pub fn set_working_language(&self, lang: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.working_language = lang.to_string();
        }
        self.prefs.set(keys::WORKING_LANGUAGE, lang);
    }

    pub fn set_auto_translate(&self, enabled: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.auto_translate = enabled;
        }
        self.prefs
            .set(keys::AUTO_TRANSLATE, if enabled { "true" } else { "false" });
    }

    pub fn set_symptom_model_enabled(&self, enabled: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.symptom_model_enabled = enabled;
        }
        self.prefs.set(
            keys::SYMPTOM_MODEL_ENABLED,
            if enabled { "true" } else { "false" },
        );
    }

    // ── Observability ───────────────────────────────────────

    pub fn state(&self) -> ConversationState {
        self.state.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase.lock().map(|p| *p).unwrap_or(TurnPhase::Idle)
    }

    pub fn messages(&self) -> Vec<Message> {
        self.log
            .lock()
            .map(|log| log.messages().to_vec())
            .unwrap_or_default()
    }

    /// Drain pending notices for display.
    pub fn take_notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }

    pub fn speech_enabled(&self) -> bool {
        self.speech_enabled.load(Ordering::SeqCst)
    }

    // ── Internal ────────────────────────────────────────────

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = T>,
        fallback: impl FnOnce() -> T,
    ) -> T {
        match tokio::time::timeout(self.external_timeout, fut).await {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(
                    "External call exceeded {}s, taking fallback",
                    self.external_timeout.as_secs(),
                );
                fallback()
            }
        }
    }

    async fn dispatch_speech(&self, text: &str, language_tag: &str) {
        if !self.speech_enabled.load(Ordering::SeqCst) {
            return;
        }
        let Some(playback) = &self.playback else {
            return;
        };
        match playback.speak(text, language_tag).await {
            Ok(()) => {}
            Err(SpeechError::Unsupported(reason)) => self.disable_speech(&reason),
            Err(e) => tracing::warn!("Speech playback failed: {e}"),
        }
    }

    fn disable_speech(&self, reason: &str) {
        self.speech_enabled.store(false, Ordering::SeqCst);
        if !self.speech_notice_sent.swap(true, Ordering::SeqCst) {
            tracing::warn!("Speech capability unavailable: {reason}");
            let lang = self.state().working_language;
            self.push_notice(
                NoticeKind::SpeechUnavailable,
                locale::ui_copy(&lang, UiCopy::SpeechUnavailable),
            );
        }
    }

    fn append_message(&self, message: Message) {
        if let Ok(mut log) = self.log.lock() {
            log.append(message);
        }
    }

    fn push_notice(&self, kind: NoticeKind, text: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice {
                kind,
                text: text.to_string(),
            });
        }
    }

    fn set_phase(&self, phase: TurnPhase) {
        if let Ok(mut current) = self.phase.lock() {
            *current = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;
    use crate::prefs::MemoryPreferenceStore;
    use crate::providers::mock::{MockCompletion, MockDetector, MockTranslator};
    use crate::providers::ProviderError;
    use crate::speech::{RecordingPlayback, ScriptedCapture, UnsupportedPlayback};
    use async_trait::async_trait;

    fn orchestrator_with(
        detector: MockDetector,
        translator: MockTranslator,
        completion: MockCompletion,
    ) -> Orchestrator {
        Orchestrator::new(
            Arc::new(HealthCatalog::bundled()),
            Arc::new(detector),
            Arc::new(translator),
            Arc::new(completion),
            Arc::new(MemoryPreferenceStore::new()),
        )
    }

    fn english_orchestrator(completion: MockCompletion) -> Orchestrator {
        orchestrator_with(MockDetector::fixed("en"), MockTranslator::tagging(), completion)
    }

    // ── Turn basics ─────────────────────────────────────────

    #[tokio::test]
    async fn empty_input_is_discarded_without_side_effects() {
        let orch = english_orchestrator(MockCompletion::fixed("reply"));
        assert_eq!(orch.submit_text("").await, TurnOutcome::Ignored);
        assert_eq!(orch.submit_text("   \n").await, TurnOutcome::Ignored);
        assert!(orch.messages().is_empty());
        assert!(orch.take_notices().is_empty());
        assert_eq!(orch.phase(), TurnPhase::Idle);
    }

    #[tokio::test]
    async fn end_to_end_headache_and_fever() {
        let orch = english_orchestrator(MockCompletion::fixed("Watch your temperature."));
        let outcome = orch.submit_text("I have a headache and fever").await;

        let messages = orch.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "I have a headache and fever");

        let reply = &messages[1];
        assert_eq!(reply.sender, Sender::Assistant);
        assert!(matches!(outcome, TurnOutcome::Answered { message_id } if message_id == reply.id));
        assert!(reply.text.starts_with("Based on the symptoms you've described"));
        assert!(reply.text.ends_with("Watch your temperature."));

        let symptom_ids: Vec<&str> = reply
            .detected_symptoms
            .as_ref()
            .unwrap()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(symptom_ids, vec!["fever", "headache"]);

        let condition_ids: Vec<&str> = reply
            .matched_conditions
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert!(condition_ids.contains(&"migraine"));
        assert!(!condition_ids.contains(&"common_cold"));
        assert_eq!(orch.phase(), TurnPhase::Idle);
    }

    #[tokio::test]
    async fn foreign_turn_translates_in_and_out() {
        let orch = orchestrator_with(
            MockDetector::fixed("es"),
            MockTranslator::tagging(),
            MockCompletion::fixed("Cuida tu temperatura."),
        );
        // Spanish keyword variants survive the tagging "translation".
        orch.submit_text("tengo fiebre y dolor de cabeza").await;

        let messages = orch.messages();
        let reply = &messages[1];
        // Delivered text went through the out-translation to "es"…
        assert!(reply.text.ends_with("[es]"));
        // …and the pivot-language body is retained alongside, not rewritten.
        let original = reply.original_text.as_ref().unwrap();
        assert!(original.starts_with("Based on the symptoms you've described"));
        assert!(!original.ends_with("[es]"));

        // Working language (en) differs from detected (es): a switch is offered.
        let notices = orch.take_notices();
        assert!(notices.iter().any(|n| n.kind == NoticeKind::LanguageSuggestion));
    }

    #[tokio::test]
    async fn auto_translate_off_delivers_pivot_text() {
        let orch = orchestrator_with(
            MockDetector::fixed("es"),
            MockTranslator::tagging(),
            MockCompletion::fixed("extra"),
        );
        orch.set_auto_translate(false);
        orch.submit_text("tengo fiebre y tos y me duele la cabeza").await;

        let reply = orch.messages().pop().unwrap();
        assert!(!reply.text.ends_with("[es]"));
        assert!(reply.original_text.is_none());
    }

    #[tokio::test]
    async fn translator_outage_degrades_to_untranslated_text() {
        let orch = orchestrator_with(
            MockDetector::fixed("es"),
            MockTranslator::failing(),
            MockCompletion::fixed("extra"),
        );
        let outcome = orch.submit_text("tengo fiebre y dolor de cabeza").await;
        // The turn still completes; analysis ran on the untranslated text
        // (the lexicon's Spanish variants make that workable).
        assert!(matches!(outcome, TurnOutcome::Answered { .. }));
        let reply = orch.messages().pop().unwrap();
        assert!(reply.text.starts_with("Based on the symptoms you've described"));
    }

    #[tokio::test]
    async fn detector_outage_falls_back_to_working_language() {
        let orch = orchestrator_with(
            MockDetector::failing(),
            MockTranslator::tagging(),
            MockCompletion::fixed("extra"),
        );
        let outcome = orch.submit_text("I have a cough").await;
        assert!(matches!(outcome, TurnOutcome::Answered { .. }));
        // Detected == working language: no suggestion, no out-translation.
        assert!(orch.take_notices().is_empty());
        assert!(!orch.messages().pop().unwrap().text.ends_with("[en]"));
    }

    // ── Completion failure taxonomy ─────────────────────────

    #[tokio::test]
    async fn completion_outage_aborts_model_only_turn_with_one_notice() {
        let orch = english_orchestrator(MockCompletion::failing());
        let outcome = orch.submit_text("how do I sleep better at night?").await;

        assert_eq!(outcome, TurnOutcome::Aborted);
        // User message remains, unanswered.
        let messages = orch.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::User);

        let notices = orch.take_notices();
        let completion_notices: Vec<_> = notices
            .iter()
            .filter(|n| n.kind == NoticeKind::CompletionUnavailable)
            .collect();
        assert_eq!(completion_notices.len(), 1);
        assert_eq!(orch.phase(), TurnPhase::Idle);
    }

    #[tokio::test]
    async fn completion_outage_degrades_when_local_inference_matched() {
        let orch = english_orchestrator(MockCompletion::failing());
        let outcome = orch.submit_text("I have a headache and fever").await;

        assert!(matches!(outcome, TurnOutcome::Answered { .. }));
        let reply = orch.messages().pop().unwrap();
        assert!(reply.text.starts_with("Based on the symptoms you've described"));
        assert!(!orch
            .take_notices()
            .iter()
            .any(|n| n.kind == NoticeKind::CompletionUnavailable));
    }

    #[tokio::test]
    async fn disabled_symptom_model_goes_model_only() {
        let orch = english_orchestrator(MockCompletion::fixed("From the model."));
        orch.set_symptom_model_enabled(false);
        orch.submit_text("I have a headache and fever").await;

        let reply = orch.messages().pop().unwrap();
        assert_eq!(reply.text, "From the model.");
        assert!(reply.detected_symptoms.is_none());
        assert!(reply.matched_conditions.is_none());
    }

    // ── Stale-turn discard ──────────────────────────────────

    /// Completion that parks its first call until released; later calls
    /// answer immediately.
    struct SlowFirstCompletion {
        first_pending: AtomicBool,
        gate: tokio::sync::Notify,
    }

    impl SlowFirstCompletion {
        fn new() -> Self {
            Self {
                first_pending: AtomicBool::new(true),
                gate: tokio::sync::Notify::new(),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for SlowFirstCompletion {
        async fn complete(&self, _p: &str, _s: &str) -> Result<String, ProviderError> {
            if self.first_pending.swap(false, Ordering::SeqCst) {
                self.gate.notified().await;
                Ok("slow reply".into())
            } else {
                Ok("fast reply".into())
            }
        }
    }

    #[tokio::test]
    async fn stale_turn_result_is_discarded() {
        let completion = Arc::new(SlowFirstCompletion::new());
        let orch = Arc::new(Orchestrator::new(
            Arc::new(HealthCatalog::bundled()),
            Arc::new(MockDetector::fixed("en")),
            Arc::new(MockTranslator::tagging()),
            Arc::clone(&completion) as Arc<dyn CompletionProvider>,
            Arc::new(MemoryPreferenceStore::new()),
        ));

        // Turn A parks inside the completion call (model-only input).
        let turn_a = {
            let orch = Arc::clone(&orch);
            tokio::spawn(async move { orch.submit_text("how do I sleep better?").await })
        };
        tokio::task::yield_now().await;

        // Turn B starts and finishes while A is still in flight.
        let outcome_b = orch.submit_text("what about daytime naps?").await;
        assert!(matches!(outcome_b, TurnOutcome::Answered { .. }));

        // A's delayed result arrives — and must not be appended.
        completion.gate.notify_one();
        let outcome_a = turn_a.await.unwrap();
        assert_eq!(outcome_a, TurnOutcome::Superseded);

        let messages = orch.messages();
        assert_eq!(messages.len(), 3); // user A, user B, assistant B
        assert!(messages.iter().all(|m| m.text != "slow reply"));
        assert_eq!(messages[2].text, "fast reply");
    }

    // ── Speech ──────────────────────────────────────────────

    #[tokio::test]
    async fn playback_receives_resolved_output_language() {
        let playback = Arc::new(RecordingPlayback::new());
        let orch = orchestrator_with(
            MockDetector::fixed("es"),
            MockTranslator::tagging(),
            MockCompletion::fixed("extra"),
        )
        .with_playback(Arc::clone(&playback) as Arc<dyn SpeechPlayback>);

        orch.submit_text("tengo fiebre y dolor de cabeza").await;

        let spoken = playback.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].1, "es");
        assert!(spoken[0].0.ends_with("[es]"));
    }

    #[tokio::test]
    async fn unsupported_playback_notices_once_and_disables() {
        let orch = english_orchestrator(MockCompletion::fixed("extra"))
            .with_playback(Arc::new(UnsupportedPlayback));

        orch.submit_text("I have a cough").await;
        orch.submit_text("and a fever too").await;

        let speech_notices: Vec<_> = orch
            .take_notices()
            .into_iter()
            .filter(|n| n.kind == NoticeKind::SpeechUnavailable)
            .collect();
        assert_eq!(speech_notices.len(), 1);
        assert!(!orch.speech_enabled());
    }

    #[tokio::test]
    async fn capture_events_drive_turns() {
        let orch = english_orchestrator(MockCompletion::fixed("extra"));

        let none = orch
            .handle_capture_event(CaptureEvent::Partial("I'm experiencing".into()))
            .await;
        assert!(none.is_none());
        assert_eq!(orch.phase(), TurnPhase::Capturing);
        assert_eq!(orch.capture_buffer(), "I'm experiencing");

        let outcome = orch
            .handle_capture_event(CaptureEvent::Final(
                "I'm experiencing headache and fever since yesterday.".into(),
            ))
            .await;
        assert!(matches!(outcome, Some(TurnOutcome::Answered { .. })));
        assert!(orch.capture_buffer().is_empty());
        assert_eq!(orch.messages().len(), 2);
    }

    #[tokio::test]
    async fn run_capture_drives_a_full_session() {
        let orch = english_orchestrator(MockCompletion::fixed("extra"));
        let capture = ScriptedCapture::new(vec![
            CaptureEvent::Partial("I'm experiencing".into()),
            CaptureEvent::Final("I'm experiencing headache and fever since yesterday.".into()),
        ]);

        let last = orch.run_capture(&capture).await.unwrap();
        assert!(matches!(last, Some(TurnOutcome::Answered { .. })));
        assert_eq!(orch.messages().len(), 2);
    }

    #[tokio::test]
    async fn empty_final_transcript_is_ignored() {
        let orch = english_orchestrator(MockCompletion::fixed("extra"));
        let outcome = orch
            .handle_capture_event(CaptureEvent::Final("   ".into()))
            .await;
        assert_eq!(outcome, Some(TurnOutcome::Ignored));
        assert!(orch.messages().is_empty());
    }

    #[tokio::test]
    async fn capture_permission_error_disables_speech() {
        let orch = english_orchestrator(MockCompletion::fixed("extra"));
        orch.handle_capture_event(CaptureEvent::Error {
            code: "not-allowed".into(),
        })
        .await;
        assert!(!orch.speech_enabled());
        assert_eq!(orch.take_notices().len(), 1);
    }

    // ── Preferences & session setup ─────────────────────────

    #[tokio::test]
    async fn language_switch_persists_and_seeds_next_session() {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        let orch = Orchestrator::new(
            Arc::new(HealthCatalog::bundled()),
            Arc::new(MockDetector::fixed("en")),
            Arc::new(MockTranslator::tagging()),
            Arc::new(MockCompletion::fixed("extra")),
            Arc::clone(&prefs) as Arc<dyn PreferenceStore>,
        );
        orch.set_working_language("fr");
        assert_eq!(orch.state().working_language, "fr");
        assert_eq!(prefs.get(keys::WORKING_LANGUAGE), Some("fr".into()));

        // A new session over the same store starts in French.
        let next = Orchestrator::new(
            Arc::new(HealthCatalog::bundled()),
            Arc::new(MockDetector::fixed("en")),
            Arc::new(MockTranslator::tagging()),
            Arc::new(MockCompletion::fixed("extra")),
            prefs,
        );
        assert_eq!(next.state().working_language, "fr");
    }

    #[tokio::test]
    async fn greeting_is_localized_to_working_language() {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        prefs.set(keys::WORKING_LANGUAGE, "es");
        let orch = Orchestrator::new(
            Arc::new(HealthCatalog::bundled()),
            Arc::new(MockDetector::fixed("es")),
            Arc::new(MockTranslator::tagging()),
            Arc::new(MockCompletion::fixed("extra")),
            prefs,
        );
        orch.seed_greeting();

        let messages = orch.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Assistant);
        assert!(messages[0].text.starts_with("¡Hola!"));
    }

    #[tokio::test]
    async fn toggles_persist_as_booleans() {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        let orch = Orchestrator::new(
            Arc::new(HealthCatalog::bundled()),
            Arc::new(MockDetector::fixed("en")),
            Arc::new(MockTranslator::tagging()),
            Arc::new(MockCompletion::fixed("extra")),
            Arc::clone(&prefs) as Arc<dyn PreferenceStore>,
        );
        orch.set_auto_translate(false);
        orch.set_symptom_model_enabled(false);
        assert_eq!(prefs.get(keys::AUTO_TRANSLATE), Some("false".into()));
        assert_eq!(prefs.get(keys::SYMPTOM_MODEL_ENABLED), Some("false".into()));
        assert!(!orch.state().auto_translate);
        assert!(!orch.state().symptom_model_enabled);
    }
}
