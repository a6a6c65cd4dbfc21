//! Console commands: tokenizing, "did you mean" matching, the registry and
//! the built-in command set.

pub mod builtins;
pub mod coloring;
pub mod fuzzy;
pub mod registry;
pub mod tokenize;

pub use builtins::register_builtins;
pub use fuzzy::{closest_match, distance, Suggestion};
pub use registry::{
    CommandDoc, CommandHandler, CommandRegistry, CommandResult,
};
pub use tokenize::{
    quote, quote_if_needed, strip_comment, tokenize, TokenizeError,
};
