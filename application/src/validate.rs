use recap_domain::language;

use crate::ApplicationError;

const VIDEO_URL_MARKERS: [&str; 3] = ["youtube.com/watch?v=", "youtu.be/", "youtube.com/embed/"];

/// Validate a YouTube URL and extract its video id. Accepts the watch,
/// short-link and embed forms, with or without scheme and `www.` prefix.
pub fn extract_video_id(url: &str) -> Result<String, ApplicationError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ApplicationError::validation("URL is required"));
    }

    for marker in VIDEO_URL_MARKERS {
        if let Some(position) = trimmed.find(marker) {
            let id: String = trimmed[position + marker.len()..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
                .collect();
            if !id.is_empty() {
                return Ok(id);
            }
            return Err(ApplicationError::validation(
                "Could not extract video ID from URL",
            ));
        }
    }

    Err(ApplicationError::validation("Invalid URL format"))
}

pub fn validate_language_code(code: &str) -> Result<(), ApplicationError> {
    if language::is_supported(code) {
        return Ok(());
    }
    Err(ApplicationError::validation(format!(
        "Unsupported language. Supported languages: {}",
        language::supported_codes().join(", ")
    )))
}

pub fn validate_summary_ratio(ratio: f64) -> Result<(), ApplicationError> {
    if (0.1..=0.5).contains(&ratio) {
        return Ok(());
    }
    Err(ApplicationError::validation(
        "Summary ratio must be between 0.1 and 0.5 (10% to 50% of original)",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_all_url_forms() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtu.be/dQw4w9WgXcQ",
            "www.youtube.com/embed/dQw4w9WgXcQ?rel=0",
            "youtube.com/watch?v=dQw4w9WgXcQ&t=42",
        ] {
            assert_eq!(extract_video_id(url).unwrap(), "dQw4w9WgXcQ", "{url}");
        }
    }

    #[test]
    fn rejects_non_video_urls() {
        assert!(extract_video_id("https://example.com/watch").is_err());
        assert!(extract_video_id("").is_err());
        assert!(extract_video_id("https://youtube.com/watch?v=").is_err());
    }

    #[test]
    fn ratio_bounds_are_inclusive() {
        assert!(validate_summary_ratio(0.1).is_ok());
        assert!(validate_summary_ratio(0.5).is_ok());
        assert!(validate_summary_ratio(0.05).is_err());
        assert!(validate_summary_ratio(0.6).is_err());
    }

    #[test]
    fn language_codes_follow_the_supported_set() {
        assert!(validate_language_code("en").is_ok());
        assert!(validate_language_code("ES").is_ok());
        assert!(validate_language_code("xx").is_err());
    }
}
