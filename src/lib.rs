pub mod config;
pub mod output;
pub mod summarize;
pub mod youtube;

use serde::Serialize;

/// A single captioned segment
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Complete transcript for a video
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub video_id: String,
    pub title: String,
    pub language: String,
    pub auto_generated: bool,
    pub segments: Vec<Segment>,
}

/// Extract a video ID from a YouTube URL.
///
/// Total: inputs with no recognized pattern come back unchanged and are left
/// to fail at the retrieval step. Tracking parameters (`&si=...`, `?si=...`)
/// are stripped.
pub fn extract_video_id(input: &str) -> String {
    // The watch form keeps the ID in the query string, so the v= check has
    // to run before tracking parameters are stripped.
    if let Some((_, rest)) = input.split_once("v=") {
        return match rest.split_once('&') {
            Some((id, _)) => id.to_string(),
            None => rest.to_string(),
        };
    }

    let path = input.split('?').next().unwrap_or(input);
    if path.contains("youtu.be") {
        if let Some((_, id)) = path.rsplit_once('/') {
            return id.to_string();
        }
    }

    input.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_watch_url_with_tracking_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123&si=xyz"),
            "abc123"
        );
    }

    #[test]
    fn test_watch_url_with_timestamp() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_short_url_with_tracking_params() {
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=xyz"), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_bare_video_id_passes_through() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_unrecognized_input_unchanged() {
        assert_eq!(extract_video_id("not a youtube link"), "not a youtube link");
        assert_eq!(
            extract_video_id("https://example.com/video/123"),
            "https://example.com/video/123"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_video_id(""), "");
    }
}
