//! Crate-level error types.

use std::fmt;
use std::path::PathBuf;

use crate::command::fuzzy::Suggestion;
use crate::command::tokenize::TokenizeError;
use crate::options::OptionError;

/// Errors produced by the gazer crate.
///
/// Every variant is recoverable: the router and the console report them
/// and keep running.
#[derive(Debug)]
pub enum InteractError {
    /// A command line could not be split into tokens.
    Tokenize(TokenizeError),
    /// The first token of a command line names no registered command.
    UnknownCommand {
        /// The name that was looked up.
        name: String,
        /// Closest registered command name, if any command exists.
        suggestion: Option<Suggestion>,
    },
    /// A command handler reported a failure or panicked.
    CommandHandler {
        /// Name of the failing command.
        command: String,
        /// Message produced by the handler.
        message: String,
    },
    /// A bind string could not be parsed.
    BindSyntax(String),
    /// A session log could not be opened, created or written.
    RecorderIo {
        /// Path of the session log.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// Option store failure outside of a command handler.
    Option(OptionError),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl InteractError {
    /// Build a handler failure for `command` from any displayable message.
    pub fn handler(command: &str, message: impl fmt::Display) -> Self {
        Self::CommandHandler {
            command: command.to_owned(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for InteractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tokenize(e) => write!(f, "unable to tokenize command: {e}"),
            Self::UnknownCommand { name, suggestion } => {
                write!(f, "\"{name}\" is not recognized")?;
                if let Some(s) = suggestion {
                    write!(
                        f,
                        ", did you mean \"{}\"? (distance {})",
                        s.name, s.distance
                    )?;
                }
                Ok(())
            }
            Self::CommandHandler { command, message } => {
                write!(f, "command \"{command}\" failed: {message}")
            }
            Self::BindSyntax(msg) => write!(f, "invalid bind: {msg}"),
            Self::RecorderIo { path, source } => {
                write!(f, "session log {}: {source}", path.display())
            }
            Self::Option(e) => write!(f, "option error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for InteractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tokenize(e) => Some(e),
            Self::Option(e) => Some(e),
            Self::RecorderIo { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TokenizeError> for InteractError {
    fn from(e: TokenizeError) -> Self {
        Self::Tokenize(e)
    }
}

impl From<OptionError> for InteractError {
    fn from(e: OptionError) -> Self {
        Self::Option(e)
    }
}

impl From<std::io::Error> for InteractError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
