use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use recap_domain::{language, split_chunks, DomainError, TranslationPort, TranslationResult};

#[derive(Debug, Clone)]
pub struct TranslateAdapterConfig {
    pub endpoint: String,
    pub chunk_max_chars: usize,
}

/// Translation through the public Google Translate web endpoint. Long
/// texts are split into sentence-aligned chunks below the endpoint's query
/// limit and translated one request at a time.
pub struct GoogleTranslateAdapter {
    client: reqwest::Client,
    config: TranslateAdapterConfig,
}

impl GoogleTranslateAdapter {
    pub fn new(config: TranslateAdapterConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn translate_chunk(
        &self,
        chunk: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, DomainError> {
        let url = request_url(&self.config.endpoint, source_language, target_language, chunk)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| DomainError::translation(format!("translation request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(DomainError::translation(format!(
                "translation endpoint returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| DomainError::translation(format!("unreadable translation body: {err}")))?;
        collect_translated_text(&body)
    }
}

#[async_trait]
impl TranslationPort for GoogleTranslateAdapter {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationResult, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::translation("Text cannot be empty"));
        }
        if !language::is_supported(target_language) {
            return Err(DomainError::translation(format!(
                "Unsupported target language: {target_language}"
            )));
        }

        let chunks = split_chunks(text, self.config.chunk_max_chars);
        tracing::info!(
            source_language,
            target_language,
            chunks = chunks.len(),
            "translating text"
        );

        let mut translated_parts = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            translated_parts.push(
                self.translate_chunk(chunk, source_language, target_language)
                    .await?,
            );
        }
        let translated_text = translated_parts.join(" ");

        Ok(TranslationResult {
            original_text: text.to_string(),
            word_count: translated_text.split_whitespace().count(),
            translated_text,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        })
    }

    fn supported_languages(&self) -> BTreeMap<String, String> {
        language::LANGUAGES
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect()
    }
}

fn request_url(
    endpoint: &str,
    source_language: &str,
    target_language: &str,
    chunk: &str,
) -> Result<reqwest::Url, DomainError> {
    reqwest::Url::parse_with_params(
        endpoint,
        &[
            ("client", "gtx"),
            ("sl", source_language),
            ("tl", target_language),
            ("dt", "t"),
            ("q", chunk),
        ],
    )
    .map_err(|err| DomainError::translation(format!("invalid translation endpoint: {err}")))
}

/// The endpoint answers with a nested array; the first element holds one
/// `[translated, original, ...]` entry per input segment.
fn collect_translated_text(body: &Value) -> Result<String, DomainError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| DomainError::translation("unexpected translation response shape"))?;
    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        return Err(DomainError::translation("translation produced no text"));
    }
    Ok(text)
}
