use std::cmp::Ordering;
use std::sync::Arc;

use crate::{
    DomainError, EmbeddingPort, KeywordSummaryResult, ScoredSentence, Sentence, SummaryResult,
};

use super::{score_against_centroid, split_sentences, DEFAULT_MIN_SENTENCE_CHARS};

/// Per-keyword score boost applied by [`ExtractiveSummarizer::summarize_with_keywords`].
const KEYWORD_BOOST: f64 = 0.1;
/// Floor on the number of selected sentences unless configured otherwise.
const DEFAULT_MIN_SENTENCES: usize = 3;

#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    /// Target fraction of sentences to keep, expected in [0.1, 0.5].
    pub ratio: f64,
    pub max_sentences: Option<usize>,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            ratio: 0.3,
            max_sentences: None,
        }
    }
}

impl SummarizeOptions {
    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            ..Self::default()
        }
    }
}

/// Centroid-based extractive summarizer. Sentences are scored by cosine
/// similarity between their embedding and the document centroid, the top
/// scorers are kept and re-emitted in original document order.
pub struct ExtractiveSummarizer {
    embeddings: Arc<dyn EmbeddingPort>,
    min_sentence_chars: usize,
    min_sentences: usize,
}

impl ExtractiveSummarizer {
    pub fn new(embeddings: Arc<dyn EmbeddingPort>) -> Self {
        Self {
            embeddings,
            min_sentence_chars: DEFAULT_MIN_SENTENCE_CHARS,
            min_sentences: DEFAULT_MIN_SENTENCES,
        }
    }

    pub fn with_min_sentence_chars(mut self, min_sentence_chars: usize) -> Self {
        self.min_sentence_chars = min_sentence_chars;
        self
    }

    /// Inputs with fewer sentences than this are returned verbatim; it is
    /// also the floor on the selection target.
    pub fn with_min_sentences(mut self, min_sentences: usize) -> Self {
        self.min_sentences = min_sentences.max(1);
        self
    }

    pub async fn summarize(
        &self,
        text: &str,
        options: &SummarizeOptions,
    ) -> Result<SummaryResult, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::summarization("Text cannot be empty"));
        }

        let sentences = split_sentences(text, self.min_sentence_chars);
        let original_length = text.chars().count();

        if sentences.len() < self.min_sentences {
            tracing::warn!(
                sentence_count = sentences.len(),
                min_sentences = self.min_sentences,
                "text has fewer sentences than minimum, returning original text"
            );
            return Ok(SummaryResult {
                summary: text.to_string(),
                original_length,
                summary_length: original_length,
                reduction_ratio: 0.0,
                num_sentences: sentences.len(),
                summary_sentences: sentences.len(),
                compression_percentage: 0.0,
            });
        }

        let mut target = self
            .min_sentences
            .max((sentences.len() as f64 * options.ratio).floor() as usize);
        if let Some(max_sentences) = options.max_sentences {
            target = target.min(max_sentences);
        }

        tracing::debug!(
            total = sentences.len(),
            target,
            ratio = options.ratio,
            "selecting summary sentences"
        );

        let scores = self.sentence_scores(&sentences).await?;
        let selected = select_in_order(&sentences, &scores, target);
        let summary = join_sentences(&selected);

        let summary_length = summary.chars().count();
        let reduction_ratio = round2(1.0 - summary_length as f64 / original_length as f64);

        Ok(SummaryResult {
            summary,
            original_length,
            summary_length,
            reduction_ratio,
            num_sentences: sentences.len(),
            summary_sentences: selected.len(),
            compression_percentage: round1(reduction_ratio * 100.0),
        })
    }

    /// Keyword-weighted variant: each keyword present in a sentence
    /// (case-insensitive containment) adds a fixed boost to its score
    /// before selection. Unlike [`Self::summarize`] there is no
    /// below-minimum short-circuit.
    pub async fn summarize_with_keywords(
        &self,
        text: &str,
        keywords: &[String],
        ratio: f64,
    ) -> Result<KeywordSummaryResult, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::summarization("Text cannot be empty"));
        }

        let sentences = split_sentences(text, self.min_sentence_chars);
        if sentences.is_empty() {
            return Err(DomainError::summarization(
                "Text contains no usable sentences",
            ));
        }

        let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        let mut scores = self.sentence_scores(&sentences).await?;
        for (sentence, score) in sentences.iter().zip(scores.iter_mut()) {
            let haystack = sentence.text.to_lowercase();
            let hits = lowered.iter().filter(|k| haystack.contains(*k)).count();
            *score += hits as f64 * KEYWORD_BOOST;
        }

        let target = self
            .min_sentences
            .max((sentences.len() as f64 * ratio).floor() as usize);
        let selected = select_in_order(&sentences, &scores, target);
        let summary = join_sentences(&selected);

        let original_length = text.chars().count();
        let summary_length = summary.chars().count();

        Ok(KeywordSummaryResult {
            summary,
            keywords_used: keywords.to_vec(),
            original_length,
            summary_length,
            reduction_ratio: round2(1.0 - summary_length as f64 / original_length as f64),
        })
    }

    async fn sentence_scores(&self, sentences: &[Sentence]) -> Result<Vec<f64>, DomainError> {
        let mut embeddings = Vec::with_capacity(sentences.len());
        for sentence in sentences {
            embeddings.push(self.embeddings.embed(&sentence.text).await?);
        }
        Ok(score_against_centroid(&embeddings))
    }
}

/// Top-`target` selection. Ties in score go to the earlier sentence; the
/// selection is then restored to ascending document order so the summary
/// reads in source order, never in score order.
fn select_in_order(sentences: &[Sentence], scores: &[f64], target: usize) -> Vec<ScoredSentence> {
    let mut scored: Vec<ScoredSentence> = sentences
        .iter()
        .zip(scores.iter())
        .enumerate()
        .map(|(index, (sentence, &score))| ScoredSentence {
            index,
            sentence: sentence.clone(),
            score,
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    scored.truncate(target);
    scored.sort_by_key(|s| s.index);

    scored
}

fn join_sentences(selected: &[ScoredSentence]) -> String {
    selected
        .iter()
        .map(|s| s.sentence.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
