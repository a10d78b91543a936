//! Mock capability implementations for deterministic tests — no network.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use super::traits::{CompletionProvider, LanguageDetector, Translator};
use super::ProviderError;

/// Detector that always reports one language.
pub struct MockDetector {
    language: Option<String>,
    calls: AtomicUsize,
}

impl MockDetector {
    pub fn fixed(language: &str) -> Self {
        Self {
            language: Some(language.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Simulates an adapter whose backend is down: per the capability
    /// contract it falls back to the caller-supplied default.
    pub fn failing() -> Self {
        Self {
            language: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageDetector for MockDetector {
    async fn detect(&self, _text: &str, default_lang: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.language {
            Some(lang) => lang.clone(),
            None => default_lang.to_string(),
        }
    }
}

/// Translator that tags output with the target language, or simulates an
/// outage by returning the input unchanged.
pub struct MockTranslator {
    fail: bool,
    calls: AtomicUsize,
}

impl MockTranslator {
    /// Successful translation: `"text [target]"`, so tests can observe
    /// which direction ran.
    pub fn tagging() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Outage: input comes back unchanged, as the contract requires.
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target: &str, source: Option<&str>) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if source == Some(target) || self.fail {
            return text.to_string();
        }
        format!("{text} [{target}]")
    }
}

/// Completion provider with a canned response or a simulated outage.
pub struct MockCompletion {
    response: Option<String>,
    calls: AtomicUsize,
}

impl MockCompletion {
    pub fn fixed(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(r) => Ok(r.clone()),
            None => Err(ProviderError::Connection("mock completion outage".into())),
        }
    }
}

/// Completion provider that parks every call until `release()` — for
/// reproducing the slow-turn-overlap race deterministically.
pub struct GatedCompletion {
    response: String,
    gate: Semaphore,
}

impl GatedCompletion {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            gate: Semaphore::new(0),
        }
    }

    /// Let exactly one parked `complete()` call resolve.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl CompletionProvider for GatedCompletion {
    async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, ProviderError> {
        let _permit = self.gate.acquire().await.ok();
        Ok(self.response.clone())
    }
}
