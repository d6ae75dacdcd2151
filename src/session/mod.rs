// Session module - line commands against a shared settings store

pub mod command;
pub mod error;

pub use command::{Command, HELP};
pub use error::CommandError;

use crate::settings::{RetrievalConfiguration, SettingKey, SettingsActions};
use tracing::debug;

/// Text returned to the user for one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub is_error: bool,
}

impl Reply {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// Parse and run one input line; `None` for blank lines
pub async fn handle_line(actions: &SettingsActions, line: &str) -> Option<Reply> {
    let reply = match Command::parse(line) {
        Ok(None) => return None,
        Ok(Some(command)) => execute(actions, command).await,
        Err(e) => Err(e),
    };

    Some(match reply {
        Ok(content) => Reply::new(content),
        Err(e) => Reply::error(e.to_string()),
    })
}

/// Run a parsed command
pub async fn execute(actions: &SettingsActions, command: Command) -> Result<String, CommandError> {
    debug!(?command, "executing command");

    match command {
        Command::Show => Ok(render_table(&actions.snapshot().await)),
        Command::Json => Ok(serde_json::to_string_pretty(&actions.snapshot().await)?),
        Command::Models => Ok(render_models(&actions.snapshot().await)),
        Command::Get(key) => Ok(actions.get(key).await.to_string()),
        Command::Set { key, value } => {
            let change = actions.update(key, &value).await?;
            if change.is_noop() {
                Ok(format!("{} unchanged", key))
            } else {
                Ok(change.to_string())
            }
        }
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok("Goodbye!".to_string()),
    }
}

fn render_table(config: &RetrievalConfiguration) -> String {
    SettingKey::ALL
        .iter()
        .map(|key| format!("{:<16} {}", key.as_str(), config.value(*key)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_models(config: &RetrievalConfiguration) -> String {
    config
        .embedding_models
        .iter()
        .map(|m| {
            let marker = if m.label == config.embedding_model {
                " *"
            } else {
                ""
            };
            format!("{:>3}  {}{}", m.value, m.label, marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
