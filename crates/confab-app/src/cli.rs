use clap::Parser;

/// Confab, a terminal chat client for Google's Gemini models.
#[derive(Parser, Debug)]
#[command(name = "confab", version, about)]
pub struct Args {
    /// Model to chat with.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Maximum tokens per model reply.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
