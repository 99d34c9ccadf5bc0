use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "ytsum", about = "Summarize YouTube videos from their caption tracks", version)]
pub struct Cli {
    /// YouTube video URL or video ID (reads from stdin if omitted)
    pub url: Option<String>,

    /// Gemini API key (falls back to the GEMINI_API_KEY environment variable)
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Preferred caption languages, in priority order
    #[arg(short, long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Only accept manually created caption tracks
    #[arg(long)]
    pub manual_only: bool,

    /// Take the first available caption track when no preferred language matches
    #[arg(long)]
    pub any_language: bool,

    /// Print the transcript instead of summarizing
    #[arg(short, long)]
    pub transcript: bool,

    /// Transcript output format: text (default), json
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Gemini model for summarization
    #[arg(long)]
    pub model: Option<String>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show detected video ID, title, language, and track metadata
    #[arg(short, long)]
    pub verbose: bool,
}
