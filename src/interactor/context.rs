//! The explicit context every command handler receives.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::animation::{
    AnimationController, AnimationDirection, AnimationSource,
};
use crate::options::{OptionStore, OptionValue, Options};

/// Path of the animation speed multiplier option.
pub const SPEED_FACTOR_OPTION: &str = "scene.animation.speed_factor";
/// Path of the selected animation index; negative plays every animation.
pub const ANIMATION_INDEX_OPTION: &str = "scene.animation.index";
/// Path of the autoplay option.
pub const AUTOPLAY_OPTION: &str = "scene.animation.autoplay";

/// The host's render target, seen from the command layer.
///
/// Only [`render`](Self::render) is required; camera and file operations
/// default to an "unsupported" failure so headless hosts can ignore them.
pub trait RenderSurface {
    /// Draw one frame.
    fn render(&mut self);

    /// Save the current frame to `path`.
    fn screenshot(&mut self, path: &Path) -> Result<(), String> {
        Err(format!(
            "cannot save {}: screenshots are not supported by this surface",
            path.display()
        ))
    }

    /// Restore the initial camera.
    fn reset_camera(&mut self) -> Result<(), String> {
        Err(unsupported("reset_camera"))
    }

    /// Move the camera to a named view (`front`, `top`, `isometric`...).
    fn set_camera_view(&mut self, view: &str) -> Result<(), String> {
        Err(unsupported(&format!("set_camera {view}")))
    }

    /// Roll the camera by `degrees`.
    fn roll_camera(&mut self, degrees: f64) -> Result<(), String> {
        Err(unsupported(&format!("roll_camera {degrees}")))
    }

    /// Load additional files into the scene.
    fn add_files(&mut self, paths: &[String]) -> Result<(), String> {
        Err(unsupported(&format!("add_files ({} files)", paths.len())))
    }

    /// Data arrays the scene can be colored with, from point data or from
    /// cell data. Empty when the scene has none.
    fn coloring_arrays(&self, cells: bool) -> Vec<ColoringArray> {
        let _ = cells;
        Vec::new()
    }

    /// Human-readable description of the camera and scene bounds.
    fn scene_description(&self) -> Result<String, String> {
        Err(unsupported("print_scene_info"))
    }

    /// Human-readable description of the loaded meshes.
    fn mesh_description(&self) -> Result<String, String> {
        Err(unsupported("print_mesh_info"))
    }

    /// Forward a reader option to the file loaders.
    fn set_reader_option(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(), String> {
        Err(unsupported(&format!("set_reader_option {name} {value}")))
    }

    /// Empty the on-screen console, if the surface draws one.
    fn clear_console(&mut self) {}
}

/// A data array available for scalar coloring.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColoringArray {
    /// Array name.
    pub name: String,
    /// Number of components per tuple.
    pub components: usize,
    /// Component names; missing or empty entries get a generated name.
    pub component_names: Vec<String>,
}

impl ColoringArray {
    /// Array without named components.
    pub fn new(name: impl Into<String>, components: usize) -> Self {
        Self {
            name: name.into(),
            components,
            component_names: Vec::new(),
        }
    }
}

fn unsupported(what: &str) -> String {
    format!("{what} is not supported by this surface")
}

/// Surface that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn render(&mut self) {}
}

/// Everything a command handler may touch.
pub struct ViewerState {
    /// Configuration store.
    pub options: Box<dyn OptionStore>,
    /// Scene animation playback.
    pub animation: AnimationController,
    /// Render target.
    pub surface: Box<dyn RenderSurface>,
    /// Console aliases: alias name to replacement command text.
    pub aliases: FxHashMap<String, String>,
    render_requested: bool,
    stop_requested: bool,
}

impl ViewerState {
    /// Context over the given store and surface.
    #[must_use]
    pub fn new(
        options: Box<dyn OptionStore>,
        surface: Box<dyn RenderSurface>,
    ) -> Self {
        Self {
            options,
            animation: AnimationController::new(),
            surface,
            aliases: FxHashMap::default(),
            render_requested: false,
            stop_requested: false,
        }
    }

    /// Default [`Options`] and a [`NullSurface`].
    #[must_use]
    pub fn headless() -> Self {
        Self::new(Box::new(Options::default()), Box::new(NullSurface))
    }

    /// Ask for a frame at the next event-loop tick.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Whether a render is pending.
    #[must_use]
    pub const fn render_requested(&self) -> bool {
        self.render_requested
    }

    /// Consume the pending render request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    /// Ask the interactor to stop.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Whether a stop was requested.
    #[must_use]
    pub const fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Attach a new animation source, honoring the autoplay option.
    pub fn set_animation_source(&mut self, source: Box<dyn AnimationSource>) {
        self.animation.set_source(source);
        let autoplay = self
            .options
            .get(AUTOPLAY_OPTION)
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if autoplay {
            self.animation.start(AnimationDirection::Forward);
        }
        self.request_render();
    }

    /// Animation speed multiplier, `1.0` when the store lacks it.
    #[must_use]
    pub fn speed_factor(&self) -> f64 {
        match self.options.get(SPEED_FACTOR_OPTION) {
            Ok(value) => value.as_f64().unwrap_or(1.0),
            Err(_) => 1.0,
        }
    }

    /// Advance the animation by `dt` seconds of wall time.
    pub fn tick_animation(&mut self, dt: f64) {
        let speed = self.speed_factor();
        if self.animation.tick(dt, speed) {
            self.request_render();
        }
    }

    /// Render with the current option value of `name` for logging.
    pub(crate) fn describe_option(&self, name: &str) -> String {
        match self.options.get(name) {
            Ok(OptionValue::Unset) => format!("{name} is unset"),
            Ok(value) => format!("{name}: {value}"),
            Err(e) => e.to_string(),
        }
    }
}

impl std::fmt::Debug for ViewerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerState")
            .field("animation", &self.animation)
            .field("aliases", &self.aliases)
            .field("render_requested", &self.render_requested)
            .field("stop_requested", &self.stop_requested)
            .finish_non_exhaustive()
    }
}
