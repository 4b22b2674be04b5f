//! Interactive chat loop.
//!
//! Reads utterances line by line, forwards them to the session manager,
//! and renders each outcome. A failed turn never ends the loop: the
//! message stays in the transcript and the user may send again.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline_async::{Readline, ReadlineError, ReadlineEvent};

use confab_ai::{Chat, GeminiClient, Message, Role, TurnOutcome};

use crate::commands::{self, ChatCommand};

/// Run the chat loop until the user quits.
pub async fn run(client: GeminiClient) -> Result<(), ReadlineError> {
    print_banner(client.model());

    let mut chat = Chat::new();
    let prompt = format!("  {} ", style("you >").green().bold());
    let (mut rl, _writer) = Readline::new(prompt)?;

    loop {
        match rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line.clone());

                if let Some(cmd) = commands::parse(&line) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => {
                            chat.reset();
                            println!("  {}", style("Conversation cleared.").dim());
                        }
                        ChatCommand::History => print_history(chat.messages()),
                        ChatCommand::Quit => break,
                        ChatCommand::Unknown(name) => {
                            println!(
                                "  {} unknown command: {}. Type /help for the list.",
                                style("?").yellow().bold(),
                                style(name).dim()
                            );
                        }
                    }
                    continue;
                }

                let spinner = thinking_spinner();
                let outcome = chat.submit(&client, line).await;
                spinner.finish_and_clear();

                match outcome {
                    TurnOutcome::Success(text) => {
                        println!("  {} {}", style("gemini >").cyan().bold(), text.trim());
                        println!();
                    }
                    TurnOutcome::Failure(reason) => {
                        eprintln!("  {} {reason}", style("!").red().bold());
                        eprintln!(
                            "  {}",
                            style("Your message is kept; send again to retry.").dim()
                        );
                    }
                }
            }
            Ok(ReadlineEvent::Eof) => break,
            Ok(ReadlineEvent::Interrupted) => {
                println!("  {}", style("Press Ctrl+D or type /quit to exit.").dim());
            }
            Err(e) => return Err(e),
        }
    }

    println!("  {}", style("Session ended.").dim());
    Ok(())
}

fn print_banner(model: &str) {
    println!();
    println!("  {}", style("Confab").cyan().bold());
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}

fn print_history(messages: &[Message]) {
    if messages.is_empty() {
        println!("  {}", style("No messages yet.").dim());
        return;
    }
    println!();
    for (i, msg) in messages.iter().enumerate() {
        let label = match msg.role {
            Role::User => style("you").green().bold(),
            Role::Assistant => style("gemini").cyan().bold(),
        };
        println!("  {}. {} {}", i + 1, label, msg.content);
    }
    println!();
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
