use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the loaded model is shaded.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Model", inline)]
#[serde(default)]
pub struct ModelOptions {
    /// Surface color.
    pub color: ModelColorOptions,
    /// Volume rendering.
    pub volume: VolumeOptions,
    /// Point sprites.
    pub point_sprites: PointSpritesOptions,
    /// Scalar coloring.
    pub scivis: ScivisOptions,
}

/// Surface color.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Color", inline)]
#[serde(default)]
pub struct ModelColorOptions {
    /// Surface opacity in `[0, 1]`. Unset uses the material's own.
    #[schemars(title = "Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub opacity: Option<f64>,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Volume", inline)]
#[serde(default)]
/// Volume rendering.
pub struct VolumeOptions {
    /// Render as a volume instead of a surface.
    pub enable: bool,
    /// Invert the opacity transfer function.
    pub inverse: bool,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Point Sprites", inline)]
#[serde(default)]
/// Point sprite rendering.
pub struct PointSpritesOptions {
    /// Render points as sprites.
    pub enable: bool,
}

/// Scalar coloring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scivis", inline)]
#[serde(default)]
pub struct ScivisOptions {
    /// Color by a data array.
    #[schemars(title = "Enable")]
    pub enable: bool,
    /// Use cell data instead of point data.
    #[schemars(title = "Cells")]
    pub cells: bool,
    /// Array to color by. Unset picks the first one.
    #[schemars(skip)]
    pub array_name: Option<String>,
    /// Component to color by: `-2` direct scalars, `-1` magnitude, then
    /// component indices.
    #[schemars(title = "Component", range(min = -2))]
    pub component: i64,
}

impl Default for ScivisOptions {
    fn default() -> Self {
        Self {
            enable: false,
            cells: false,
            array_name: None,
            component: -1,
        }
    }
}
