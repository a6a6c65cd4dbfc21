//! Named commands and text-line dispatch.

use std::panic::{catch_unwind, AssertUnwindSafe};

use indexmap::IndexMap;

use super::fuzzy::closest_match;
use super::tokenize::{strip_comment, tokenize};
use crate::error::InteractError;
use crate::interactor::ViewerState;

/// What a handler returns: optional text to show the user, or a failure.
pub type CommandResult = Result<Option<String>, InteractError>;

/// Handler invoked with the context and the arguments after the name.
pub type CommandHandler =
    Box<dyn FnMut(&mut ViewerState, &[String]) -> CommandResult>;

/// Help text of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandDoc {
    /// One-line description.
    pub summary: String,
    /// `(name, description)` of each argument, in order.
    pub args: Vec<(String, String)>,
    /// Numeric option this command steps up or down, if any.
    pub adjusts: Option<String>,
}

impl CommandDoc {
    /// Doc with a summary and no arguments.
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Append an argument description.
    #[must_use]
    pub fn arg(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.args.push((name.into(), description.into()));
        self
    }

    /// Mark the command as adjusting the numeric option at `path`.
    #[must_use]
    pub fn adjusts(mut self, path: impl Into<String>) -> Self {
        self.adjusts = Some(path.into());
        self
    }
}

struct Command {
    doc: CommandDoc,
    handler: CommandHandler,
}

/// Ordered set of named commands.
#[derive(Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Command>,
}

impl CommandRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`, replacing any command already registered under it.
    pub fn add_command<F>(&mut self, name: &str, doc: CommandDoc, handler: F)
    where
        F: FnMut(&mut ViewerState, &[String]) -> CommandResult + 'static,
    {
        let previous = self.commands.insert(
            name.to_owned(),
            Command {
                doc,
                handler: Box::new(handler),
            },
        );
        if previous.is_some() {
            log::debug!("Command: replaced {name}");
        }
    }

    /// Unregister `name`; no-op if absent.
    pub fn remove_command(&mut self, name: &str) {
        let _ = self.commands.shift_remove(name);
    }

    /// Registered names in registration order.
    #[must_use]
    pub fn command_actions(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Documentation of `name`.
    #[must_use]
    pub fn command_documentation(&self, name: &str) -> Option<&CommandDoc> {
        self.commands.get(name).map(|c| &c.doc)
    }

    /// Run one console line.
    ///
    /// The first token names the command (or an alias from the context);
    /// the rest are its arguments. An empty line is a successful no-op.
    pub fn trigger(
        &mut self,
        state: &mut ViewerState,
        line: &str,
        strip_comments: bool,
    ) -> CommandResult {
        let text = if strip_comments {
            strip_comment(line)
        } else {
            line
        };
        let mut tokens = tokenize(text).map_err(|e| {
            log::error!("Command: unable to tokenize \"{text}\": {e}");
            InteractError::from(e)
        })?;
        if tokens.is_empty() {
            return Ok(None);
        }

        if let Some(expansion) = state.aliases.get(&tokens[0]) {
            let mut expanded = tokenize(expansion)?;
            log::debug!("Command: alias {} -> {expansion}", tokens[0]);
            expanded.extend(tokens.drain(1..));
            tokens = expanded;
            if tokens.is_empty() {
                return Ok(None);
            }
        }

        let name = tokens.remove(0);
        let Some(command) = self.commands.get_mut(&name) else {
            let suggestion =
                closest_match(&name, self.commands.keys().map(String::as_str));
            let err = InteractError::UnknownCommand { name, suggestion };
            log::error!("Command: {err}");
            return Err(err);
        };

        log::debug!("Command: {name} {tokens:?}");
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            (command.handler)(state, &tokens)
        }));
        let result = match outcome {
            Ok(Ok(output)) => return Ok(output),
            Ok(Err(err @ InteractError::CommandHandler { .. })) => err,
            Ok(Err(err)) => InteractError::handler(&name, err),
            Err(payload) => {
                InteractError::handler(&name, panic_message(payload.as_ref()))
            }
        };
        log::error!("Command: {result}");
        Err(result)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_owned())
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}
