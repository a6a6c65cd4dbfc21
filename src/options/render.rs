use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the scene is drawn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Render", inline)]
#[serde(default)]
pub struct RenderOptions {
    /// Draw cell edges. Unset leaves the choice to the file format.
    #[schemars(title = "Show Edges")]
    pub show_edges: Option<bool>,
    /// Width of lines and edges, in pixels.
    #[schemars(title = "Line Width", range(min = 0.0, max = 10.0), extend("step" = 0.5))]
    pub line_width: f64,
    /// Size of points and point sprites, in pixels.
    #[schemars(title = "Point Size", range(min = 0.0, max = 50.0), extend("step" = 1.0))]
    pub point_size: f64,
    /// Scene light.
    pub light: LightOptions,
    /// Post-processing effects.
    pub effect: EffectOptions,
    /// Ground grid.
    pub grid: GridOptions,
    /// Background treatment.
    pub background: BackgroundOptions,
    /// Image based lighting.
    pub hdri: HdriOptions,
    /// Armature display.
    pub armature: ArmatureOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_edges: None,
            line_width: 1.0,
            point_size: 10.0,
            light: LightOptions::default(),
            effect: EffectOptions::default(),
            grid: GridOptions::default(),
            background: BackgroundOptions::default(),
            hdri: HdriOptions::default(),
            armature: ArmatureOptions::default(),
        }
    }
}

/// Light intensity, adjusted in steps from the keyboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Light", inline)]
#[serde(default)]
pub struct LightOptions {
    /// Multiplier applied to every light in the scene.
    #[schemars(title = "Intensity", range(min = 0.0), extend("step" = 0.01))]
    pub intensity: f64,
}

impl Default for LightOptions {
    fn default() -> Self {
        Self { intensity: 1.0 }
    }
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Effects", inline)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
/// Screen-space effects.
pub struct EffectOptions {
    /// Fast approximate anti-aliasing.
    #[schemars(title = "Anti-Aliasing")]
    pub anti_aliasing: bool,
    /// Screen-space ambient occlusion.
    #[schemars(title = "Ambient Occlusion")]
    pub ambient_occlusion: bool,
    /// Filmic tone mapping.
    #[schemars(title = "Tone Mapping")]
    pub tone_mapping: bool,
    /// Depth peeling for translucent surfaces.
    #[schemars(title = "Translucency Support")]
    pub translucency_support: bool,
}

/// Ground grid.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Grid", inline)]
#[serde(default)]
pub struct GridOptions {
    /// Show the grid.
    #[schemars(title = "Enable")]
    pub enable: bool,
}

/// Background treatment.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Background", inline)]
#[serde(default)]
pub struct BackgroundOptions {
    /// Blur the background.
    #[schemars(title = "Blur")]
    pub blur: bool,
    /// Show the HDRI as a skybox.
    #[schemars(title = "Skybox")]
    pub skybox: bool,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "HDRI", inline)]
#[serde(default)]
/// Image based lighting.
pub struct HdriOptions {
    /// Use the HDRI for ambient lighting.
    #[schemars(title = "Ambient")]
    pub ambient: bool,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Armature", inline)]
#[serde(default)]
/// Skeleton display.
pub struct ArmatureOptions {
    /// Draw the armature.
    pub enable: bool,
}
