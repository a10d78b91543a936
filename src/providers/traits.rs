use async_trait::async_trait;

use super::ProviderError;

/// Language detection capability.
///
/// Total by contract: an adapter that fails internally returns
/// `default_lang` and logs, it never surfaces the error.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect(&self, text: &str, default_lang: &str) -> String;
}

/// Translation capability.
///
/// Total by contract: identity when `source == Some(target)`, and the
/// input text comes back unchanged when the adapter fails internally.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: &str, source: Option<&str>) -> String;
}

/// Generative completion capability.
///
/// Unlike detection/translation, failure here is typed: the caller decides
/// between degrading to locally-composed text and aborting the turn.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, ProviderError>;
}
