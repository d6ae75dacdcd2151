// Command parsing for the interactive session

use crate::settings::SettingKey;

use super::error::CommandError;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print all settings
    Show,
    /// Print the record as JSON
    Json,
    /// Print the embedding model catalog
    Models,
    Get(SettingKey),
    Set { key: SettingKey, value: String },
    Help,
    Quit,
}

impl Command {
    /// Parse a line; `Ok(None)` for blank input
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = split_word(line);
        let command = match name {
            "show" | "ls" => Command::Show,
            "json" => Command::Json,
            "models" => Command::Models,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "get" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "get",
                        argument: "key",
                    });
                }
                Command::Get(rest.parse()?)
            }
            "set" => {
                let (key, value) = split_word(rest);
                if key.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "set",
                        argument: "key",
                    });
                }
                if value.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "set",
                        argument: "value",
                    });
                }
                Command::Set {
                    key: key.parse()?,
                    value: value.to_string(),
                }
            }
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Split off the first word; the remainder keeps its inner spacing
fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

pub const HELP: &str = "\
Commands:
  show                 print all settings
  json                 print settings as JSON
  models               list selectable embedding models
  get <key>            print one setting
  set <key> <value>    change one setting
  help                 show this help
  quit | exit          leave the session

Keys: chunk_size, overlap_size, embedding_model, top_k";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsError;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("show").unwrap(), Some(Command::Show));
        assert_eq!(Command::parse("  json ").unwrap(), Some(Command::Json));
        assert_eq!(Command::parse("models").unwrap(), Some(Command::Models));
        assert_eq!(Command::parse("?").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t").unwrap(), None);
    }

    #[test]
    fn test_parse_get() {
        assert_eq!(
            Command::parse("get topK").unwrap(),
            Some(Command::Get(SettingKey::TopK))
        );
        assert!(matches!(
            Command::parse("get"),
            Err(CommandError::MissingArgument { argument: "key", .. })
        ));
        assert!(matches!(
            Command::parse("get size"),
            Err(CommandError::Settings(SettingsError::UnknownKey(_)))
        ));
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            Command::parse("set embedding_model  BGE M3").unwrap(),
            Some(Command::Set {
                key: SettingKey::EmbeddingModel,
                value: "BGE M3".to_string()
            })
        );
    }

    #[test]
    fn test_parse_set_missing_value() {
        assert!(matches!(
            Command::parse("set chunk_size"),
            Err(CommandError::MissingArgument {
                argument: "value",
                ..
            })
        ));
        assert!(matches!(
            Command::parse("set"),
            Err(CommandError::MissingArgument { argument: "key", .. })
        ));
    }

    #[test]
    fn test_parse_unknown() {
        let err = Command::parse("reset all").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown command: reset. Type 'help' for a list of commands"
        );
    }
}
