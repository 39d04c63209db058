/// Split text into chunks no longer than `max_chars`, cutting only at
/// sentence boundaries (`. `, `! `, `? `). Sentences are packed greedily;
/// the accumulator is flushed whenever the next sentence would overflow it.
/// A single sentence longer than `max_chars` becomes its own oversized
/// chunk rather than being cut mid-sentence.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in boundary_split(text) {
        let sentence_len = sentence.chars().count();
        if current_len + sentence_len <= max_chars {
            current.push_str(sentence);
            current.push(' ');
            current_len += sentence_len + 1;
        } else {
            if !current.is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = format!("{sentence} ");
            current_len = sentence_len + 1;
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

/// Sentence-boundary split keeping the terminator with its sentence and
/// consuming the single following space.
fn boundary_split(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();

    for i in 0..bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') && bytes.get(i + 1) == Some(&b' ') {
            parts.push(&text[start..=i]);
            start = i + 2;
        }
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }

    parts
}
