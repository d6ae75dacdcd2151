// Session errors

use thiserror::Error;

use crate::settings::SettingsError;

/// Errors from parsing or running a session command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}. Type 'help' for a list of commands")]
    UnknownCommand(String),

    #[error("Missing argument for '{command}': {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),
}
