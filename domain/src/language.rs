/// Language codes accepted for transcription hints, with display names used
/// by the translation capability listing.
pub const LANGUAGES: [(&str, &str); 20] = [
    ("en", "english"),
    ("es", "spanish"),
    ("fr", "french"),
    ("de", "german"),
    ("it", "italian"),
    ("pt", "portuguese"),
    ("nl", "dutch"),
    ("ru", "russian"),
    ("zh", "chinese"),
    ("ja", "japanese"),
    ("ko", "korean"),
    ("ar", "arabic"),
    ("hi", "hindi"),
    ("tr", "turkish"),
    ("pl", "polish"),
    ("vi", "vietnamese"),
    ("th", "thai"),
    ("id", "indonesian"),
    ("ro", "romanian"),
    ("uk", "ukrainian"),
];

pub fn supported_codes() -> Vec<&'static str> {
    LANGUAGES.iter().map(|(code, _)| *code).collect()
}

pub fn is_supported(code: &str) -> bool {
    let normalized = code.to_ascii_lowercase();
    LANGUAGES.iter().any(|(known, _)| *known == normalized)
}

pub fn display_name(code: &str) -> Option<&'static str> {
    let normalized = code.to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(known, _)| *known == normalized)
        .map(|(_, name)| *name)
}
