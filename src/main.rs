use std::io::{self, BufRead};
use std::path::PathBuf;

use eyre::{Result, WrapErr, bail};
use log::{debug, info};

mod cli;

use cli::{Cli, OutputFormat};
use ytsum::youtube::CaptionPolicy;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytsum.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytsum")
        .join("logs")
}

/// Resolve the Gemini API key: --api-key flag first, then GEMINI_API_KEY
fn resolve_api_key(cli: &Cli) -> Result<String> {
    if let Some(ref key) = cli.api_key {
        let key = key.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Ok(key);
        }
    }
    bail!("Gemini API key required: pass --api-key or set GEMINI_API_KEY");
}

/// Merge CLI flags over config values over built-in defaults
fn build_policy(cli: &Cli, config: &ytsum::config::Config) -> CaptionPolicy {
    let defaults = CaptionPolicy::default();

    let preferred_languages = if !cli.lang.is_empty() {
        cli.lang.clone()
    } else if let Some(ref langs) = config.default_langs {
        langs.clone()
    } else {
        defaults.preferred_languages
    };

    let accept_auto_generated = if cli.manual_only {
        false
    } else {
        config.accept_auto_captions.unwrap_or(defaults.accept_auto_generated)
    };

    let fallback_to_first_available = cli.any_language
        || config
            .fallback_any_language
            .unwrap_or(defaults.fallback_to_first_available);

    CaptionPolicy {
        preferred_languages,
        accept_auto_generated,
        fallback_to_first_available,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = <Cli as clap::Parser>::parse();

    // Load config file (non-fatal if missing/invalid)
    let config = ytsum::config::Config::load().unwrap_or_default();

    if cli.verbose {
        let config_path = ytsum::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    let policy = build_policy(&cli, &config);
    let model = cli
        .model
        .clone()
        .or_else(|| config.default_model.clone())
        .unwrap_or_else(|| ytsum::summarize::DEFAULT_MODEL.to_string());

    // Both inputs are validated before any network access. Transcript-only
    // runs never reach the summarizer and need no key.
    let api_key = if cli.transcript {
        None
    } else {
        Some(resolve_api_key(&cli)?)
    };

    let client = reqwest::Client::new();

    // Collect URLs: from arg or stdin
    let urls = if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    if urls.iter().all(|u| u.trim().is_empty()) {
        bail!("no URL provided\n\nUsage: ytsum <URL>\n       echo <URL> | ytsum");
    }

    for url_input in &urls {
        let url_input = url_input.trim();
        if url_input.is_empty() {
            continue;
        }

        let video_id = ytsum::extract_video_id(url_input);
        debug!("Resolved video ID: {video_id}");
        if cli.verbose {
            eprintln!("Video ID: {video_id}");
        }

        // A caption failure is terminal for this request; the summarizer is
        // never reached past this point on error.
        let transcript = ytsum::youtube::fetch_captions(&client, &video_id, &policy)
            .await
            .wrap_err_with(|| format!("could not retrieve captions for {video_id}"))?;

        if cli.verbose {
            eprintln!(
                "Video: {} ({})\nLanguage: {}{}\nSegments: {}",
                transcript.title,
                transcript.video_id,
                transcript.language,
                if transcript.auto_generated { " (auto-generated)" } else { "" },
                transcript.segments.len(),
            );
        }

        let rendered = if cli.transcript {
            match cli.format {
                OutputFormat::Text => ytsum::output::render_text(&transcript),
                OutputFormat::Json => ytsum::output::render_json(&transcript)?,
            }
        } else {
            let Some(ref key) = api_key else {
                bail!("Gemini API key required: pass --api-key or set GEMINI_API_KEY");
            };
            ytsum::summarize::summarize(&client, key, &transcript, &model).await?
        };

        if let Some(ref path) = cli.output {
            std::fs::write(path, &rendered)?;
            if cli.verbose {
                eprintln!("Output written to: {}", path.display());
            }
        } else {
            println!("{rendered}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("ytsum").chain(args.iter().copied()))
    }

    #[test]
    fn test_build_policy_defaults() {
        let cli = parse(&["https://youtu.be/abc"]);
        let policy = build_policy(&cli, &ytsum::config::Config::default());
        assert_eq!(policy.preferred_languages[0], "en");
        assert!(policy.accept_auto_generated);
        assert!(!policy.fallback_to_first_available);
    }

    #[test]
    fn test_build_policy_cli_langs_override_config() {
        let cli = parse(&["--lang", "de,fr", "https://youtu.be/abc"]);
        let config = ytsum::config::Config {
            default_langs: Some(vec!["ja".to_string()]),
            ..Default::default()
        };
        let policy = build_policy(&cli, &config);
        assert_eq!(policy.preferred_languages, vec!["de", "fr"]);
    }

    #[test]
    fn test_build_policy_config_langs_apply_without_cli() {
        let cli = parse(&["https://youtu.be/abc"]);
        let config = ytsum::config::Config {
            default_langs: Some(vec!["ja".to_string()]),
            ..Default::default()
        };
        let policy = build_policy(&cli, &config);
        assert_eq!(policy.preferred_languages, vec!["ja"]);
    }

    #[test]
    fn test_build_policy_manual_only_wins_over_config() {
        let cli = parse(&["--manual-only", "https://youtu.be/abc"]);
        let config = ytsum::config::Config {
            accept_auto_captions: Some(true),
            ..Default::default()
        };
        let policy = build_policy(&cli, &config);
        assert!(!policy.accept_auto_generated);
    }

    #[test]
    fn test_build_policy_any_language_flag() {
        let cli = parse(&["--any-language", "https://youtu.be/abc"]);
        let policy = build_policy(&cli, &ytsum::config::Config::default());
        assert!(policy.fallback_to_first_available);
    }
}
