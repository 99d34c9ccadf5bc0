use eyre::Result;

use crate::Transcript;

/// Flatten a transcript into the single string handed to the summarizer:
/// segment texts joined by spaces, order preserved, timing dropped.
pub fn flatten(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render transcript as plain text (one segment per line, no timestamps)
pub fn render_text(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render transcript as pretty-printed JSON
pub fn render_json(transcript: &Transcript) -> Result<String> {
    Ok(serde_json::to_string_pretty(transcript)?)
}
