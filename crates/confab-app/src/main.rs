mod cli;
mod commands;
mod repl;

use console::style;
use tracing_subscriber::EnvFilter;

use confab_ai::{GeminiClient, GeminiConfig};

fn init_tracing(log_level: Option<&str>) {
    let directive = log_level.unwrap_or("warn");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap_or_else(|_| "warn".parse().unwrap())),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env before reading any configuration
    let _ = dotenv::dotenv();

    let args = cli::parse();
    init_tracing(args.log_level.as_deref());

    tracing::info!("Confab v{} starting", env!("CARGO_PKG_VERSION"));

    // Missing credential is fatal; no session is created past this point
    let mut config = match GeminiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", style("error:").red().bold());
            std::process::exit(1);
        }
    };
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    if let Some(max_tokens) = args.max_tokens {
        config = config.with_max_tokens(max_tokens);
    }
    if let Some(temperature) = args.temperature {
        config = config.with_temperature(temperature);
    }

    let client = GeminiClient::new(config);

    if let Err(e) = repl::run(client).await {
        eprintln!("{} {e}", style("error:").red().bold());
        std::process::exit(1);
    }
}
