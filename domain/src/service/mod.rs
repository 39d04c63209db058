mod chunker;
mod scoring;
mod segmenter;
mod summarizer;

pub use chunker::split_chunks;
pub use scoring::{cosine_similarity, mean_embedding, score_against_centroid};
pub use segmenter::{split_sentences, DEFAULT_MIN_SENTENCE_CHARS};
pub use summarizer::{ExtractiveSummarizer, SummarizeOptions};
