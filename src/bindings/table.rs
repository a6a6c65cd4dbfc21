//! Bind -> command lines, organized into display groups.

use indexmap::IndexMap;

use super::bind::{Bind, ModifierKeys};
use crate::command::{tokenize, CommandRegistry};
use crate::interactor::ViewerState;
use crate::options::{OptionKind, OptionStore, OptionValue};

/// Label and current value shown next to a bind in a cheat sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingDocumentation {
    /// What the bind does.
    pub label: String,
    /// Current value of the affected option, empty if none.
    pub value: String,
}

impl BindingDocumentation {
    /// Documentation with a label and a value.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Computes a bind's documentation from the live context.
pub type DocumentationFn = Box<dyn Fn(&ViewerState) -> BindingDocumentation>;

/// How a cheat sheet should present a bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingType {
    /// Anything else, including unbound.
    Other,
    /// Every command toggles a boolean option.
    Toggle,
    /// Every command steps a numeric option.
    Numerical,
}

struct BindingEntry {
    commands: Vec<String>,
    group: String,
    documentation: Option<DocumentationFn>,
}

/// Bind table in insertion order, with groups in first-seen order.
#[derive(Default)]
pub struct BindingTable {
    binds: IndexMap<Bind, BindingEntry>,
    groups: Vec<String>,
}

/// `ON`/`OFF`/`Unset` rendering of a boolean option value.
#[must_use]
pub fn format_toggle(value: &OptionValue) -> String {
    match value {
        OptionValue::Bool(true) => "ON".to_owned(),
        OptionValue::Bool(false) => "OFF".to_owned(),
        other => other.to_string(),
    }
}

/// Two-decimal rendering of a numeric option value.
#[must_use]
pub fn format_numeric(value: &OptionValue) -> String {
    value
        .as_f64()
        .map_or_else(|| value.to_string(), |v| format!("{v:.2}"))
}

impl BindingTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `commands` to `bind` in `group`. Last write wins.
    pub fn add<I, S>(
        &mut self,
        bind: Bind,
        commands: I,
        group: &str,
        documentation: Option<DocumentationFn>,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = BindingEntry {
            commands: commands.into_iter().map(Into::into).collect(),
            group: group.to_owned(),
            documentation,
        };
        log::debug!("Binding: {bind} -> {:?} ({group})", entry.commands);
        if let Some(previous) = self.binds.insert(bind, entry) {
            self.prune_group(&previous.group);
        }
        if !self.groups.iter().any(|g| g == group) {
            self.groups.push(group.to_owned());
        }
    }

    /// Remove `bind`; no-op if absent.
    pub fn remove(&mut self, bind: &Bind) {
        if let Some(previous) = self.binds.shift_remove(bind) {
            self.prune_group(&previous.group);
        }
    }

    /// Remove every bind and group.
    pub fn clear(&mut self) {
        self.binds.clear();
        self.groups.clear();
    }

    fn prune_group(&mut self, group: &str) {
        if !self.binds.values().any(|e| e.group == group) {
            self.groups.retain(|g| g != group);
        }
    }

    /// Distinct groups in first-seen order.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Binds of `group`, in table order.
    #[must_use]
    pub fn binds_for_group(&self, group: &str) -> Vec<Bind> {
        self.binds
            .iter()
            .filter(|(_, e)| e.group == group)
            .map(|(b, _)| b.clone())
            .collect()
    }

    /// Every bind, in table order.
    #[must_use]
    pub fn binds(&self) -> Vec<Bind> {
        self.binds.keys().cloned().collect()
    }

    /// Every bind, in [`Bind`] order.
    #[must_use]
    pub fn sorted_binds(&self) -> Vec<Bind> {
        let mut binds = self.binds();
        binds.sort();
        binds
    }

    /// Command lines bound to exactly `bind`.
    #[must_use]
    pub fn commands(&self, bind: &Bind) -> Option<&[String]> {
        self.binds.get(bind).map(|e| e.commands.as_slice())
    }

    /// Group of `bind`.
    #[must_use]
    pub fn group(&self, bind: &Bind) -> Option<&str> {
        self.binds.get(bind).map(|e| e.group.as_str())
    }

    /// Number of binds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.binds.len()
    }

    /// Whether the table has no binds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }

    /// Bind that handles `key` under `modifiers`: the exact bind, else the
    /// `Any+key` fallback.
    #[must_use]
    pub fn resolve(
        &self,
        modifiers: ModifierKeys,
        key: &str,
    ) -> Option<(&Bind, &[String])> {
        [Bind::new(modifiers, key), Bind::new(ModifierKeys::Any, key)]
            .iter()
            .find_map(|candidate| self.binds.get_key_value(candidate))
            .map(|(bind, entry)| (bind, entry.commands.as_slice()))
    }

    /// Classify `bind` for display.
    #[must_use]
    pub fn binding_type(
        &self,
        bind: &Bind,
        registry: &CommandRegistry,
        options: &dyn OptionStore,
    ) -> BindingType {
        let Some(commands) = self.commands(bind) else {
            return BindingType::Other;
        };
        if commands.is_empty() {
            return BindingType::Other;
        }
        if commands
            .iter()
            .all(|line| toggled_option(line, options).is_some())
        {
            return BindingType::Toggle;
        }
        if commands
            .iter()
            .all(|line| adjusted_option(line, registry, options).is_some())
        {
            return BindingType::Numerical;
        }
        BindingType::Other
    }

    /// Cheat-sheet documentation of `bind`, evaluated now.
    ///
    /// Uses the bind's own documentation callback if it has one, otherwise
    /// derives it from the first command's registered summary.
    #[must_use]
    pub fn binding_documentation(
        &self,
        bind: &Bind,
        registry: &CommandRegistry,
        state: &ViewerState,
    ) -> Option<BindingDocumentation> {
        let entry = self.binds.get(bind)?;
        if let Some(doc) = &entry.documentation {
            return Some(doc(state));
        }

        let first = entry.commands.first()?;
        let options = state.options.as_ref();
        let name = tokenize(first).ok()?.into_iter().next()?;
        let label = registry
            .command_documentation(&name)
            .map_or_else(|| first.clone(), |d| d.summary.clone());

        let value = if let Some(path) = toggled_option(first, options) {
            options.get(&path).map(|v| format_toggle(&v)).unwrap_or_default()
        } else if let Some(path) = adjusted_option(first, registry, options) {
            options.get(&path).map(|v| format_numeric(&v)).unwrap_or_default()
        } else {
            String::new()
        };
        Some(BindingDocumentation { label, value })
    }
}

/// Path of the boolean option `line` toggles, if it is `toggle <path>`.
fn toggled_option(line: &str, options: &dyn OptionStore) -> Option<String> {
    let tokens = tokenize(line).ok()?;
    match tokens.as_slice() {
        [command, path] if command == "toggle" => {
            (options.kind(path).ok()? == OptionKind::Bool).then(|| path.clone())
        }
        _ => None,
    }
}

/// Path of the numeric option the command of `line` is documented to step.
fn adjusted_option(
    line: &str,
    registry: &CommandRegistry,
    options: &dyn OptionStore,
) -> Option<String> {
    let tokens = tokenize(line).ok()?;
    let path = registry
        .command_documentation(tokens.first()?)?
        .adjusts
        .clone()?;
    matches!(options.kind(&path).ok()?, OptionKind::Int | OptionKind::Double)
        .then_some(path)
}

impl std::fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (bind, entry) in &self.binds {
            let _ = map.entry(&bind.to_string(), &entry.commands);
        }
        map.finish()
    }
}
