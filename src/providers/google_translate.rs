use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::traits::{LanguageDetector, Translator};
use super::ProviderError;
use crate::config;

/// Google Cloud Translation v2 client — detection + translation.
///
/// Both capabilities are total at the trait boundary: any transport or
/// payload failure falls back (default language / input unchanged) and is
/// logged at `warn`, matching the degraded-input error taxonomy.
pub struct GoogleTranslateClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl GoogleTranslateClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Production endpoint with the crate-wide external-call timeout.
    pub fn with_api_key(api_key: &str) -> Self {
        Self::new(
            "https://translation.googleapis.com",
            api_key,
            config::EXTERNAL_CALL_TIMEOUT_SECS,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn detect_inner(&self, text: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/language/translate/v2/detect?key={}",
            self.base_url, self.api_key
        );
        let body = DetectRequest { q: text };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: DetectResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ResponseParsing(e.to_string()))?;

        parsed
            .data
            .detections
            .first()
            .and_then(|row| row.first())
            .map(|d| d.language.clone())
            .ok_or_else(|| ProviderError::ResponseParsing("empty detections array".into()))
    }

    async fn translate_inner(
        &self,
        text: &str,
        target: &str,
        source: Option<&str>,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/language/translate/v2?key={}",
            self.base_url, self.api_key
        );
        let body = TranslateRequest {
            q: text,
            target,
            source,
            format: "text",
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ResponseParsing(e.to_string()))?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| ProviderError::ResponseParsing("empty translations array".into()))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_connect() {
            ProviderError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else {
            ProviderError::HttpClient(e.to_string())
        }
    }
}

#[async_trait]
impl LanguageDetector for GoogleTranslateClient {
    async fn detect(&self, text: &str, default_lang: &str) -> String {
        // Short texts defeat detection; keep the caller's default.
        if text.trim().len() < 10 {
            return default_lang.to_string();
        }
        match self.detect_inner(text).await {
            Ok(lang) => lang,
            Err(e) => {
                tracing::warn!("Language detection failed, using '{default_lang}': {e}");
                default_lang.to_string()
            }
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target: &str, source: Option<&str>) -> String {
        if source == Some(target) || text.trim().is_empty() {
            return text.to_string();
        }
        match self.translate_inner(text, target, source).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!("Translation to '{target}' failed, keeping original: {e}");
                text.to_string()
            }
        }
    }
}

// ── Wire types ──────────────────────────────────────────────

#[derive(Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
}

#[derive(Deserialize)]
struct DetectResponse {
    data: DetectData,
}

#[derive(Deserialize)]
struct DetectData {
    detections: Vec<Vec<Detection>>,
}

#[derive(Deserialize)]
struct Detection {
    language: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_trims_trailing_slash() {
        let client = GoogleTranslateClient::new("https://translation.googleapis.com/", "k", 10);
        assert_eq!(client.base_url(), "https://translation.googleapis.com");
    }

    #[test]
    fn production_constructor_uses_default_timeout() {
        let client = GoogleTranslateClient::with_api_key("k");
        assert_eq!(client.timeout_secs, config::EXTERNAL_CALL_TIMEOUT_SECS);
    }

    #[tokio::test]
    async fn translate_is_identity_for_same_language() {
        // Never hits the network: the identity short-circuit fires first.
        let client = GoogleTranslateClient::new("http://127.0.0.1:9", "k", 1);
        let out = client.translate("hello", "en", Some("en")).await;
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn translate_failure_returns_input_unchanged() {
        // Unroutable endpoint: the connect error must degrade, not surface.
        let client = GoogleTranslateClient::new("http://127.0.0.1:9", "k", 1);
        let out = client.translate("hello there friend", "es", Some("en")).await;
        assert_eq!(out, "hello there friend");
    }

    #[tokio::test]
    async fn detect_failure_returns_default() {
        let client = GoogleTranslateClient::new("http://127.0.0.1:9", "k", 1);
        let lang = client.detect("a sentence long enough to try detection", "fr").await;
        assert_eq!(lang, "fr");
    }

    #[tokio::test]
    async fn detect_short_text_keeps_default_without_network() {
        let client = GoogleTranslateClient::new("http://127.0.0.1:9", "k", 1);
        assert_eq!(client.detect("hola", "en").await, "en");
        assert_eq!(client.detect("   ", "de").await, "de");
    }

    #[test]
    fn detect_response_parses_nested_shape() {
        let json = r#"{"data":{"detections":[[{"language":"es","isReliable":false,"confidence":0.9}]]}}"#;
        let parsed: DetectResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.detections[0][0].language, "es");
    }

    #[test]
    fn translate_response_parses_camel_case() {
        let json = r#"{"data":{"translations":[{"translatedText":"hola"}]}}"#;
        let parsed: TranslateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.translations[0].translated_text, "hola");
    }
}
