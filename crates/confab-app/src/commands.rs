//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for session
//! lifecycle and transcript inspection.

use console::style;

/// In-chat controls available at the prompt.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Discard the conversation and start fresh.
    Clear,
    /// Show the numbered transcript so far.
    History,
    /// Exit the chat.
    Quit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    match trimmed.to_lowercase().as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/new" => Some(ChatCommand::Clear),
        "/history" => Some(ChatCommand::History),
        "/quit" | "/exit" | "/q" => Some(ChatCommand::Quit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     {}", style("/help").cyan(), "Show this help message");
    println!("  {}    {}", style("/clear").cyan(), "Discard the conversation and start fresh");
    println!("  {}  {}", style("/history").cyan(), "Show the transcript so far");
    println!("  {}     {}", style("/quit").cyan(), "Exit the chat");
    println!();
    println!("  {}", style("Ctrl+D also exits").dim());
    println!();
}
