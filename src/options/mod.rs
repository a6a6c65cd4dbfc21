//! Viewer options with TOML preset support.
//!
//! Options form a tree of sections (`render`, `ui`, `scene`, `model`,
//! `interactor`). Console commands reach individual leaves by dotted path
//! through the [`OptionStore`] trait, e.g. `render.light.intensity`.

mod interactor;
mod model;
mod render;
mod scene;
mod store;
mod ui;

use std::path::Path;

pub use interactor::InteractorOptions;
pub use model::{
    ModelColorOptions, ModelOptions, PointSpritesOptions, ScivisOptions,
    VolumeOptions,
};
pub use render::{
    ArmatureOptions, BackgroundOptions, EffectOptions, GridOptions,
    HdriOptions, LightOptions, RenderOptions,
};
pub use scene::{AnimationOptions, SceneCameraOptions, SceneOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
pub(crate) use store::parse_bool;
pub use store::{OptionError, OptionKind, OptionStore, OptionValue};
pub use ui::UiOptions;

use crate::command::fuzzy::closest_match;
use crate::error::InteractError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[render.light]`) work.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Rendering and effects.
    pub render: RenderOptions,
    /// Overlay widgets.
    pub ui: UiOptions,
    /// Scene-wide settings.
    pub scene: SceneOptions,
    /// Model shading.
    pub model: ModelOptions,
    /// Camera manipulation.
    pub interactor: InteractorOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, InteractError> {
        let content =
            std::fs::read_to_string(path).map_err(InteractError::Io)?;
        toml::from_str(&content)
            .map_err(|e| InteractError::OptionsParse(e.to_string()))
    }

    /// Write options to a TOML preset, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), InteractError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| InteractError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(InteractError::Io)?;
        }
        std::fs::write(path, content).map_err(InteractError::Io)
    }

    /// Copy the values of `store` into a fresh set of options.
    ///
    /// Paths the store does not know, or holds with another type, keep
    /// their defaults.
    #[must_use]
    pub fn from_store(store: &dyn OptionStore) -> Self {
        let mut options = Self::default();
        for name in options.names() {
            let Ok(value) = store.get(&name) else {
                continue;
            };
            if let Err(e) = options.set_value(&name, value) {
                log::warn!("Options: keeping default of {name}: {e}");
            }
        }
        options
    }

    // ── Dotted-path access ──

    fn tree(&self) -> Result<Value, OptionError> {
        serde_json::to_value(self).map_err(|e| OptionError::Incompatible {
            name: String::new(),
            reason: e.to_string(),
        })
    }

    /// Rebuild `self` from an edited tree, rejecting values of the wrong
    /// type for `name`.
    fn commit(&mut self, name: &str, tree: Value) -> Result<(), OptionError> {
        *self = serde_json::from_value(tree).map_err(|e| {
            OptionError::Incompatible {
                name: name.to_owned(),
                reason: e.to_string(),
            }
        })?;
        Ok(())
    }

    fn inexistent(&self, name: &str) -> OptionError {
        let names = self.names();
        OptionError::Inexistent {
            name: name.to_owned(),
            suggestion: closest_match(name, names.iter().map(String::as_str)),
        }
    }

    fn kind_in(
        &self,
        tree: &Value,
        name: &str,
    ) -> Result<OptionKind, OptionError> {
        let value = leaf(tree, name).ok_or_else(|| self.inexistent(name))?;
        match value {
            Value::Bool(_) => Ok(OptionKind::Bool),
            Value::Number(n) if n.is_f64() => Ok(OptionKind::Double),
            Value::Number(_) => Ok(OptionKind::Int),
            Value::String(_) => Ok(OptionKind::Text),
            _ => infer_kind(tree, name).ok_or_else(|| {
                OptionError::Incompatible {
                    name: name.to_owned(),
                    reason: "unsupported option type".to_owned(),
                }
            }),
        }
    }
}

/// Leaf value at a dotted path; sections are not leaves.
fn leaf<'a>(tree: &'a Value, name: &str) -> Option<&'a Value> {
    let value = name
        .split('.')
        .try_fold(tree, |node, key| node.as_object()?.get(key))?;
    (!value.is_object()).then_some(value)
}

fn leaf_mut<'a>(tree: &'a mut Value, name: &str) -> Option<&'a mut Value> {
    let value = name
        .split('.')
        .try_fold(tree, |node, key| node.as_object_mut()?.get_mut(key))?;
    (!value.is_object()).then_some(value)
}

/// Type of an unset optional leaf, found by asking serde which sample
/// value it accepts.
fn infer_kind(tree: &Value, name: &str) -> Option<OptionKind> {
    let samples = [
        (OptionKind::Bool, Value::Bool(true)),
        (OptionKind::Double, Value::from(0.5)),
        (OptionKind::Int, Value::from(1)),
        (OptionKind::Text, Value::from("x")),
    ];
    samples.into_iter().find_map(|(kind, sample)| {
        let mut trial = tree.clone();
        *leaf_mut(&mut trial, name)? = sample;
        serde_json::from_value::<Options>(trial).ok().map(|_| kind)
    })
}

fn collect_names(prefix: &str, node: &Value, out: &mut Vec<String>) {
    if let Value::Object(map) = node {
        for (key, child) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            if child.is_object() {
                collect_names(&path, child, out);
            } else {
                out.push(path);
            }
        }
    }
}

fn parse_as(
    name: &str,
    kind: OptionKind,
    text: &str,
) -> Result<Value, OptionError> {
    let parse_error = || OptionError::Parse {
        name: name.to_owned(),
        value: text.to_owned(),
        expected: kind,
    };
    match kind {
        OptionKind::Bool => {
            parse_bool(text).map(Value::Bool).ok_or_else(parse_error)
        }
        OptionKind::Int => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| parse_error()),
        OptionKind::Double => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite())
            .map(Value::from)
            .ok_or_else(parse_error),
        OptionKind::Text => Ok(Value::from(text)),
    }
}

fn to_json(value: OptionValue) -> Value {
    match value {
        OptionValue::Bool(b) => Value::Bool(b),
        OptionValue::Int(i) => Value::from(i),
        OptionValue::Double(d) => Value::from(d),
        OptionValue::Text(s) => Value::String(s),
        OptionValue::Unset => Value::Null,
    }
}

impl OptionStore for Options {
    fn get(&self, name: &str) -> Result<OptionValue, OptionError> {
        let tree = self.tree()?;
        let value = leaf(&tree, name).ok_or_else(|| self.inexistent(name))?;
        Ok(match value {
            Value::Bool(b) => OptionValue::Bool(*b),
            Value::Number(n) if n.is_f64() => {
                OptionValue::Double(n.as_f64().unwrap_or_default())
            }
            Value::Number(n) => {
                n.as_i64().map_or(OptionValue::Unset, OptionValue::Int)
            }
            Value::String(s) => OptionValue::Text(s.clone()),
            _ => OptionValue::Unset,
        })
    }

    fn kind(&self, name: &str) -> Result<OptionKind, OptionError> {
        let tree = self.tree()?;
        self.kind_in(&tree, name)
    }

    fn set_as_string(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(), OptionError> {
        let mut tree = self.tree()?;
        let kind = self.kind_in(&tree, name)?;
        let parsed = parse_as(name, kind, value)?;
        if let Some(slot) = leaf_mut(&mut tree, name) {
            *slot = parsed;
        }
        self.commit(name, tree)
    }

    fn set_value(
        &mut self,
        name: &str,
        value: OptionValue,
    ) -> Result<(), OptionError> {
        let mut tree = self.tree()?;
        let slot = leaf_mut(&mut tree, name)
            .ok_or_else(|| self.inexistent(name))?;
        *slot = to_json(value);
        self.commit(name, tree)
    }

    fn toggle(&mut self, name: &str) -> Result<(), OptionError> {
        let mut tree = self.tree()?;
        if self.kind_in(&tree, name)? != OptionKind::Bool {
            return Err(OptionError::Incompatible {
                name: name.to_owned(),
                reason: "only boolean options can be toggled".to_owned(),
            });
        }
        if let Some(slot) = leaf_mut(&mut tree, name) {
            let flipped = !slot.as_bool().unwrap_or(false);
            *slot = Value::Bool(flipped);
        }
        self.commit(name, tree)
    }

    fn reset(&mut self, name: &str) -> Result<(), OptionError> {
        let defaults = Self::default().tree()?;
        let default =
            leaf(&defaults, name).ok_or_else(|| self.inexistent(name))?;
        let mut tree = self.tree()?;
        if let Some(slot) = leaf_mut(&mut tree, name) {
            *slot = default.clone();
        }
        self.commit(name, tree)
    }

    fn names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(tree) = self.tree() {
            collect_names("", &tree, &mut names);
        }
        names.sort();
        names
    }
}
