//! The narrow interface built-in commands use to reach the configuration.
//!
//! Options are addressed by dotted path (`render.light.intensity`) and
//! exchanged as type-tagged [`OptionValue`]s or as strings.

use std::fmt;

use crate::command::fuzzy::Suggestion;

/// Value type of an option, known even when the option is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// `true` / `false`.
    Bool,
    /// Signed integer.
    Int,
    /// Floating point number.
    Double,
    /// Free-form string.
    Text,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Double => "number",
            Self::Text => "string",
        };
        f.write_str(name)
    }
}

/// Current value of an option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Boolean option.
    Bool(bool),
    /// Integer option.
    Int(i64),
    /// Floating point option.
    Double(f64),
    /// String option.
    Text(String),
    /// Optional option without a value.
    Unset,
}

impl OptionValue {
    /// Numeric view of the value, if it has one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Integer view of the value, if it is an integer.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Boolean view of the value, if it has one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Text(s) => f.write_str(s),
            Self::Unset => f.write_str("Unset"),
        }
    }
}

/// Errors raised by an [`OptionStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum OptionError {
    /// No option exists at this path.
    Inexistent {
        /// Requested path.
        name: String,
        /// Closest existing option path.
        suggestion: Option<Suggestion>,
    },
    /// The option is optional and currently unset.
    NoValue(String),
    /// The string could not be parsed as the option's type.
    Parse {
        /// Option path.
        name: String,
        /// Rejected text.
        value: String,
        /// Type the option expects.
        expected: OptionKind,
    },
    /// The operation does not apply to this option's type.
    Incompatible {
        /// Option path.
        name: String,
        /// Why the operation was rejected.
        reason: String,
    },
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inexistent { name, suggestion } => {
                write!(f, "option \"{name}\" does not exist")?;
                if let Some(s) = suggestion {
                    write!(f, ", did you mean \"{}\"?", s.name)?;
                }
                Ok(())
            }
            Self::NoValue(name) => write!(f, "option \"{name}\" has no value"),
            Self::Parse {
                name,
                value,
                expected,
            } => write!(
                f,
                "\"{value}\" cannot be parsed as a {expected} for option \"{name}\""
            ),
            Self::Incompatible { name, reason } => {
                write!(f, "option \"{name}\": {reason}")
            }
        }
    }
}

impl std::error::Error for OptionError {}

/// Configuration store addressed by dotted option paths.
///
/// The crate ships [`Options`](super::Options) as the default store; hosts
/// with their own configuration system implement this trait instead.
pub trait OptionStore {
    /// Current value of an option.
    fn get(&self, name: &str) -> Result<OptionValue, OptionError>;

    /// Value type of an option, also for unset optional options.
    fn kind(&self, name: &str) -> Result<OptionKind, OptionError>;

    /// Parse `value` according to the option's type and store it.
    fn set_as_string(&mut self, name: &str, value: &str)
        -> Result<(), OptionError>;

    /// Store an already typed value.
    fn set_value(
        &mut self,
        name: &str,
        value: OptionValue,
    ) -> Result<(), OptionError>;

    /// Flip a boolean option; an unset optional boolean becomes `true`.
    fn toggle(&mut self, name: &str) -> Result<(), OptionError>;

    /// Restore the option's default value.
    fn reset(&mut self, name: &str) -> Result<(), OptionError>;

    /// All option paths, sorted.
    fn names(&self) -> Vec<String>;

    /// Current value rendered as text; unset options are an error.
    fn get_as_string(&self, name: &str) -> Result<String, OptionError> {
        match self.get(name)? {
            OptionValue::Unset => Err(OptionError::NoValue(name.to_owned())),
            value => Ok(value.to_string()),
        }
    }
}

/// Parse the boolean spellings accepted on the console.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
