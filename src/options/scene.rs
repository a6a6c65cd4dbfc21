use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scene-wide settings.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
pub struct SceneOptions {
    /// Animation playback.
    pub animation: AnimationOptions,
    /// Camera projection.
    pub camera: SceneCameraOptions,
}

/// Animation playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
pub struct AnimationOptions {
    /// Start playing as soon as a source is attached.
    #[schemars(title = "Autoplay")]
    pub autoplay: bool,
    /// Multiplier from wall-clock time to animation time.
    #[schemars(title = "Speed Factor", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub speed_factor: f64,
    /// Index of the animation to play.
    #[schemars(skip)]
    pub index: i64,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            autoplay: false,
            speed_factor: 1.0,
            index: 0,
        }
    }
}

/// Camera settings owned by the scene.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
pub struct SceneCameraOptions {
    /// Orthographic projection. Unset lets the file decide.
    #[schemars(title = "Orthographic")]
    pub orthographic: Option<bool>,
}
