use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Overlay widgets. Everything is hidden by default.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "UI", inline)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct UiOptions {
    /// Orientation axes widget.
    #[schemars(title = "Axis")]
    pub axis: bool,
    /// Frame rate counter.
    #[schemars(title = "FPS")]
    pub fps: bool,
    /// Name of the loaded file.
    #[schemars(title = "Filename")]
    pub filename: bool,
    /// Mesh metadata panel.
    #[schemars(title = "Metadata")]
    pub metadata: bool,
    /// Binding cheat sheet.
    #[schemars(title = "Cheat Sheet")]
    pub cheatsheet: bool,
    /// Full command console.
    #[schemars(title = "Console")]
    pub console: bool,
    /// Single-line command console.
    #[schemars(title = "Minimal Console")]
    pub minimal_console: bool,
    /// Scalar color bar.
    #[schemars(title = "Scalar Bar")]
    pub scalar_bar: bool,
}
