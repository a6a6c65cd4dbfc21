use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Camera manipulation style.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Interactor", inline)]
#[serde(default)]
pub struct InteractorOptions {
    /// Trackball rotation instead of turntable.
    #[schemars(title = "Trackball")]
    pub trackball: bool,
    /// Invert the zoom direction of the mouse wheel.
    #[schemars(title = "Invert Zoom")]
    pub invert_zoom: bool,
}
