//! rag-settings
//!
//! Interactive editor for the chunking / embedding / retrieval settings of a
//! RAG front-end. The store lives for the duration of the session; nothing is
//! written back to disk.

mod session;
mod settings;

use clap::Parser;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use session::{Command, Reply};
use settings::{SettingsActions, SettingsConfig, SettingsStore, TracingHook};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::fmt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "rag-settings")]
#[command(about = "Edit chunking, embedding and retrieval settings")]
struct Args {
    /// TOML settings file (overrides RAG_SETTINGS_FILE)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reject out-of-range values and unknown models
    #[arg(long)]
    validate: bool,

    /// Log level written to stderr
    #[arg(long, default_value = "warn")]
    log_level: Level,

    /// History file path
    #[arg(long)]
    history_file: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<SettingsConfig, settings::ConfigError> {
    let mut config = match &args.config {
        Some(path) => {
            dotenvy::dotenv().ok();
            SettingsConfig::load(Some(path), |name| std::env::var(name).ok())?
        }
        None => SettingsConfig::from_env()?,
    };
    if args.validate {
        config.validate = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    fmt()
        .with_max_level(args.log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args)?;
    let store = SettingsStore::from_config(&config)?;
    info!(validate = store.is_validating(), "Settings store initialized");

    let actions = SettingsActions::new(store).with_hook(Arc::new(TracingHook));

    let history_file = args.history_file.clone().unwrap_or_else(|| {
        dirs::home_dir()
            .map(|p| p.join(".rag_settings_history"))
            .unwrap_or_else(|| PathBuf::from(".rag_settings_history"))
    });

    run_session(&actions, &history_file).await
}

async fn run_session(
    actions: &SettingsActions,
    history_file: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rl: Editor<(), FileHistory> = Editor::new()?;

    if history_file.exists()
        && let Err(e) = rl.load_history(history_file)
    {
        warn!(path = %history_file.display(), error = %e, "Failed to load history");
    }

    println!("rag-settings v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands. Ctrl+D to quit.");
    println!();

    loop {
        match rl.readline("settings> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                let quit = matches!(Command::parse(input), Ok(Some(Command::Quit)));

                if let Some(reply) = session::handle_line(actions, input).await {
                    print_reply(&reply);
                }
                if quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                error!(error = %e, "Readline error");
                break;
            }
        }
    }

    if let Err(e) = rl.save_history(history_file) {
        warn!(path = %history_file.display(), error = %e, "Failed to save history");
    }

    Ok(())
}

fn print_reply(reply: &Reply) {
    if reply.is_error {
        println!("[error] {}", reply.content);
    } else {
        println!("{}", reply.content);
    }
}
