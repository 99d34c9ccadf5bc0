use eyre::{Result, bail};
use log::debug;

use crate::Transcript;
use crate::output;

/// Model used when neither the CLI nor the config file names one
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const SUMMARY_INSTRUCTIONS: &str = "Summarize this video.\n\
1. **Summary**: 3-5 sentences.\n\
2. **Key Points**: Bullet points.";

/// Summarize a transcript via the Gemini generateContent API.
///
/// The transcript is embedded in the prompt as-is; any length limit is the
/// collaborator's to enforce.
pub async fn summarize(
    client: &reqwest::Client,
    api_key: &str,
    transcript: &Transcript,
    model: &str,
) -> Result<String> {
    let transcript_text = output::flatten(transcript);
    let prompt = build_prompt(&transcript.title, &transcript_text);

    debug!("Summarizing via Gemini API with model {model}");

    let url = format!("{GEMINI_ENDPOINT}/models/{model}:generateContent?key={api_key}");

    let body = serde_json::json!({
        "contents": [
            {
                "parts": [
                    { "text": prompt }
                ]
            }
        ]
    });

    let resp = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("Gemini API returned {status}: {body}");
    }

    let json: serde_json::Value = resp.json().await?;
    extract_gemini_text(&json)
}

fn build_prompt(title: &str, transcript_text: &str) -> String {
    if title.is_empty() {
        format!("{SUMMARY_INSTRUCTIONS}\n\nTRANSCRIPT:\n{transcript_text}")
    } else {
        format!("{SUMMARY_INSTRUCTIONS}\n\nVideo title: \"{title}\"\n\nTRANSCRIPT:\n{transcript_text}")
    }
}

fn extract_gemini_text(json: &serde_json::Value) -> Result<String> {
    if let Some(candidates) = json.get("candidates").and_then(|c| c.as_array()) {
        let text: String = candidates
            .iter()
            .filter_map(|c| c.get("content")?.get("parts")?.as_array())
            .flatten()
            .filter_map(|p| p.get("text")?.as_str())
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }
    bail!("unexpected Gemini API response format");
}
