use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::matcher::MatchResult;
use super::messages::{MessageTemplates, SYSTEM_INSTRUCTION};
use crate::config;
use crate::models::Symptom;
use crate::providers::{CompletionProvider, ProviderError};

#[derive(Debug, Error)]
pub enum ComposeError {
    /// The response would have come entirely from the completion provider
    /// and the provider failed — there is no local portion to degrade to.
    #[error("Completion provider unavailable: {0}")]
    CompletionUnavailable(#[source] ProviderError),
}

/// Turns detected symptoms and ranked conditions into one user-facing
/// message body, blending the local assessment with an external
/// generative completion.
///
/// When local inference produced text, a completion failure degrades to
/// the local portion. Only the model-only path can fail.
pub struct ResponseComposer {
    completion: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl ResponseComposer {
    pub fn new(completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            completion,
            timeout: Duration::from_secs(config::EXTERNAL_CALL_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Compose the response body in the pivot language.
    ///
    /// `pivot_text` is the user utterance already translated to the pivot
    /// language; it seeds the completion prompts.
    pub async fn compose(
        &self,
        symptoms: &[&Symptom],
        matches: &[MatchResult<'_>],
        pivot_text: &str,
    ) -> Result<String, ComposeError> {
        if let Some(top) = matches.first() {
            let mut body = MessageTemplates::condition_summary(top.condition);
            let prompt = MessageTemplates::condition_prompt(&top.condition.name, pivot_text);
            self.append_supplement(&mut body, &prompt).await;
            return Ok(body);
        }

        if !symptoms.is_empty() {
            let names: Vec<&str> = symptoms.iter().map(|s| s.name.as_str()).collect();
            let mut body = MessageTemplates::symptoms_only(&names);
            let prompt = MessageTemplates::symptoms_prompt(&names, pivot_text);
            self.append_supplement(&mut body, &prompt).await;
            return Ok(body);
        }

        // Model-only: nothing matched locally, the completion IS the answer.
        let text = self
            .complete_bounded(pivot_text)
            .await
            .map_err(ComposeError::CompletionUnavailable)?;
        if text.trim().is_empty() {
            return Err(ComposeError::CompletionUnavailable(
                ProviderError::ResponseParsing("empty completion".into()),
            ));
        }
        Ok(text)
    }

    /// Append completion output as supplementary context; degrade silently
    /// when the provider fails or the bound elapses.
    async fn append_supplement(&self, body: &mut String, prompt: &str) {
        match self.complete_bounded(prompt).await {
            Ok(extra) if !extra.trim().is_empty() => {
                body.push_str("\n\n");
                body.push_str(extra.trim());
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Completion unavailable, responding with local assessment only: {e}");
            }
        }
    }

    async fn complete_bounded(&self, prompt: &str) -> Result<String, ProviderError> {
        match tokio::time::timeout(
            self.timeout,
            self.completion.complete(prompt, SYSTEM_INSTRUCTION),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout.as_secs())),
        }
    }
}
