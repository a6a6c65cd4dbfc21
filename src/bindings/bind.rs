use std::fmt;
use std::str::FromStr;

use crate::error::InteractError;

/// Modifier part of a bind.
///
/// Variant order is the bind sort order: `None < Ctrl < Shift < CtrlShift
/// < Any`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum ModifierKeys {
    /// No modifier held.
    #[default]
    None,
    /// Control held.
    Ctrl,
    /// Shift held.
    Shift,
    /// Control and shift held.
    CtrlShift,
    /// Matches whatever is held when no exact bind exists.
    Any,
}

impl ModifierKeys {
    /// Canonical prefix, without the trailing `+`.
    #[must_use]
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Ctrl => Some("Ctrl"),
            Self::Shift => Some("Shift"),
            Self::CtrlShift => Some("Ctrl+Shift"),
            Self::Any => Some("Any"),
        }
    }
}

/// A modifier set paired with a key token.
///
/// Ordered by modifier first, then lexicographically by key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bind {
    /// Required modifier set.
    pub modifiers: ModifierKeys,
    /// Case-sensitive key token (`A`, `Space`, `LeftButton`, `Drop`).
    pub key: String,
}

impl Bind {
    /// Bind with no modifier.
    pub fn key(key: impl Into<String>) -> Self {
        Self::new(ModifierKeys::None, key)
    }

    /// Bind with the given modifier set.
    pub fn new(modifiers: ModifierKeys, key: impl Into<String>) -> Self {
        Self {
            modifiers,
            key: key.into(),
        }
    }

    /// Parse `[Modifier+]Key`. Modifier names are case-insensitive.
    pub fn parse(text: &str) -> Result<Self, InteractError> {
        text.parse()
    }
}

const PREFIXES: [(&str, ModifierKeys); 4] = [
    ("ctrl+shift+", ModifierKeys::CtrlShift),
    ("ctrl+", ModifierKeys::Ctrl),
    ("shift+", ModifierKeys::Shift),
    ("any+", ModifierKeys::Any),
];

impl FromStr for Bind {
    type Err = InteractError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(InteractError::BindSyntax("empty bind".to_owned()));
        }

        let lower = text.to_ascii_lowercase();
        let (modifiers, key) = PREFIXES
            .iter()
            .find(|(prefix, _)| {
                lower.starts_with(prefix) && text.len() > prefix.len()
            })
            .map_or((ModifierKeys::None, text), |(prefix, modifiers)| {
                (*modifiers, &text[prefix.len()..])
            });

        // A remaining `+` means an unknown modifier, except for the `+` key.
        if key != "+" && key.contains('+') {
            return Err(InteractError::BindSyntax(format!(
                "unrecognized modifier in \"{text}\""
            )));
        }
        Ok(Self::new(modifiers, key))
    }
}

impl fmt::Display for Bind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifiers.prefix() {
            Some(prefix) => write!(f, "{prefix}+{}", self.key),
            None => f.write_str(&self.key),
        }
    }
}
