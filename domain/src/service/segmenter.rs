use crate::Sentence;

/// Fragments at or below this many characters are treated as noise.
pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 10;

/// Split raw text into candidate sentences. A boundary is any of `.`, `!`,
/// `?` followed by whitespace; the terminator stays with its sentence.
/// Pure function of its input, order preserving.
pub fn split_sentences(text: &str, min_chars: usize) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') && chars.peek().is_some_and(|next| next.is_whitespace()) {
            push_fragment(&mut sentences, &current, min_chars);
            current.clear();
            // swallow the boundary whitespace
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
        }
    }
    push_fragment(&mut sentences, &current, min_chars);

    sentences
}

fn push_fragment(sentences: &mut Vec<Sentence>, fragment: &str, min_chars: usize) {
    let trimmed = fragment.trim();
    if trimmed.chars().count() > min_chars {
        sentences.push(Sentence::new(trimmed));
    }
}
