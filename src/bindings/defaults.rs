//! The bind set every new interactor starts with.

use super::bind::{Bind, ModifierKeys};
use super::table::{
    format_numeric, format_toggle, BindingDocumentation, BindingTable,
    DocumentationFn,
};
use crate::command::coloring::{component_label, Coloring, ColoringCycle};
use crate::interactor::{ViewerState, ANIMATION_INDEX_OPTION};

/// Group of binds that change how the scene is drawn.
pub const SCENE_GROUP: &str = "Scene";
/// Group of camera binds.
pub const CAMERA_GROUP: &str = "Camera";
/// Everything else.
pub const OTHERS_GROUP: &str = "Others";

/// Fixed label, no value.
#[must_use]
pub fn doc_label(label: &'static str) -> DocumentationFn {
    Box::new(move |_: &ViewerState| BindingDocumentation::new(label, ""))
}

/// Label plus the `ON`/`OFF`/`Unset` state of a boolean option.
#[must_use]
pub fn doc_toggle(
    label: &'static str,
    option: &'static str,
) -> DocumentationFn {
    Box::new(move |state: &ViewerState| {
        let value = state
            .options
            .get(option)
            .map(|v| format_toggle(&v))
            .unwrap_or_default();
        BindingDocumentation::new(label, value)
    })
}

/// Label plus the two-decimal value of a numeric option.
#[must_use]
pub fn doc_numeric(
    label: &'static str,
    option: &'static str,
) -> DocumentationFn {
    Box::new(move |state: &ViewerState| {
        let value = state
            .options
            .get(option)
            .map(|v| format_numeric(&v))
            .unwrap_or_default();
        BindingDocumentation::new(label, value)
    })
}

/// `toggle <option>` binds with their key and label.
const SCENE_TOGGLES: [(&str, &str, &str); 17] = [
    ("B", "ui.scalar_bar", "Toggle the scalar bar display"),
    (
        "P",
        "render.effect.translucency_support",
        "Toggle translucency",
    ),
    (
        "Q",
        "render.effect.ambient_occlusion",
        "Toggle ambient occlusion",
    ),
    ("A", "render.effect.anti_aliasing", "Toggle anti-aliasing"),
    ("T", "render.effect.tone_mapping", "Toggle tone mapping"),
    ("E", "render.show_edges", "Toggle edges display"),
    ("X", "ui.axis", "Toggle axes display"),
    ("G", "render.grid.enable", "Toggle grid display"),
    ("N", "ui.filename", "Toggle filename display"),
    ("M", "ui.metadata", "Toggle metadata display"),
    ("Z", "ui.fps", "Toggle FPS counter display"),
    ("I", "model.volume.inverse", "Toggle inverse volume opacity"),
    (
        "O",
        "model.point_sprites.enable",
        "Toggle point sprites rendering",
    ),
    ("U", "render.background.blur", "Toggle blur background"),
    ("K", "interactor.trackball", "Toggle trackball interaction"),
    ("F", "render.hdri.ambient", "Toggle HDRI ambient lighting"),
    ("J", "render.background.skybox", "Toggle HDRI skybox"),
];

/// `name` cut to `max` characters with a trailing ellipsis.
fn short_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_owned()
    } else {
        let kept: String = name.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// `Cycle animation` plus the name of the selected animation.
#[must_use]
pub fn doc_animation() -> DocumentationFn {
    Box::new(|state: &ViewerState| {
        let index = state
            .options
            .get(ANIMATION_INDEX_OPTION)
            .ok()
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        BindingDocumentation::new(
            "Cycle animation",
            state.animation.animation_name(index),
        )
    })
}

/// Documentation of the three `cycle_coloring` binds.
#[must_use]
pub fn doc_coloring(cycle: ColoringCycle) -> DocumentationFn {
    Box::new(move |state: &ViewerState| {
        let Ok(coloring) = Coloring::read(state.options.as_ref()) else {
            return BindingDocumentation::new("Cycle coloring", "");
        };
        match cycle {
            ColoringCycle::Field => BindingDocumentation::new(
                "Cycle point/cell data coloring",
                if coloring.cells { "CELL" } else { "POINT" },
            ),
            ColoringCycle::Array => {
                let value = match &coloring.array_name {
                    Some(name) if coloring.enable => short_name(name, 15),
                    Some(name) => format!("{} (forced)", short_name(name, 15)),
                    None => "OFF".to_owned(),
                };
                BindingDocumentation::new("Cycle array to color with", value)
            }
            ColoringCycle::Component => {
                let arrays = state.surface.coloring_arrays(coloring.cells);
                let array =
                    coloring.current(&arrays).and_then(|i| arrays.get(i));
                BindingDocumentation::new(
                    "Cycle component to color with",
                    component_label(coloring.component, array),
                )
            }
        }
    })
}

impl BindingTable {
    /// Table holding the default binds.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.init_defaults();
        table
    }

    /// Clear the table and install the default binds.
    pub fn init_defaults(&mut self) {
        self.clear();
        self.add_scene_defaults();
        self.add_camera_defaults();
        self.add_other_defaults();
    }

    fn add_scene_defaults(&mut self) {
        use ModifierKeys::{Ctrl, Shift};

        for (key, option, label) in SCENE_TOGGLES {
            self.add(
                Bind::key(key),
                [format!("toggle {option}")],
                SCENE_GROUP,
                Some(doc_toggle(label, option)),
            );
        }
        self.add(
            Bind::key("W"),
            ["cycle_animation"],
            SCENE_GROUP,
            Some(doc_animation()),
        );
        let cycles = [
            ("C", "cycle_coloring field", ColoringCycle::Field),
            ("S", "cycle_coloring array", ColoringCycle::Array),
            ("Y", "cycle_coloring component", ColoringCycle::Component),
        ];
        for (key, command, cycle) in cycles {
            self.add(
                Bind::key(key),
                [command],
                SCENE_GROUP,
                Some(doc_coloring(cycle)),
            );
        }
        self.add(
            Bind::key("V"),
            ["toggle_volume_rendering"],
            SCENE_GROUP,
            Some(doc_toggle(
                "Toggle volume rendering",
                "model.volume.enable",
            )),
        );
        self.add(
            Bind::new(Shift, "A"),
            ["toggle render.armature.enable"],
            SCENE_GROUP,
            Some(doc_toggle("Toggle armature", "render.armature.enable")),
        );
        self.add(
            Bind::key("L"),
            ["increase_light_intensity"],
            SCENE_GROUP,
            Some(doc_numeric(
                "Increase lights intensity",
                "render.light.intensity",
            )),
        );
        self.add(
            Bind::new(Shift, "L"),
            ["decrease_light_intensity"],
            SCENE_GROUP,
            Some(doc_numeric(
                "Decrease lights intensity",
                "render.light.intensity",
            )),
        );
        self.add(
            Bind::new(Ctrl, "P"),
            ["increase_opacity"],
            SCENE_GROUP,
            Some(doc_numeric("Increase opacity", "model.color.opacity")),
        );
        self.add(
            Bind::new(Shift, "P"),
            ["decrease_opacity"],
            SCENE_GROUP,
            Some(doc_numeric("Decrease opacity", "model.color.opacity")),
        );
    }

    fn add_camera_defaults(&mut self) {
        let views = [
            ("1", "set_camera front", "Front View camera"),
            ("3", "set_camera right", "Right View camera"),
            ("4", "roll_camera -90", "Rotate camera right"),
            ("6", "roll_camera 90", "Rotate camera left"),
            ("7", "set_camera top", "Top View camera"),
            ("9", "set_camera isometric", "Isometric View camera"),
        ];
        for (key, command, label) in views {
            self.add(
                Bind::new(ModifierKeys::Any, key),
                [command],
                CAMERA_GROUP,
                Some(doc_label(label)),
            );
        }
        self.add(
            Bind::new(ModifierKeys::Any, "5"),
            ["toggle scene.camera.orthographic"],
            CAMERA_GROUP,
            Some(doc_toggle(
                "Toggle Orthographic Projection",
                "scene.camera.orthographic",
            )),
        );
    }

    fn add_other_defaults(&mut self) {
        use ModifierKeys::{Ctrl, Shift};

        self.add(
            Bind::new(Shift, "M"),
            ["toggle ui.minimal_console"],
            OTHERS_GROUP,
            Some(doc_toggle(
                "Toggle minimal console mode",
                "ui.minimal_console",
            )),
        );

        let others = [
            (
                Bind::key("H"),
                "toggle ui.cheatsheet",
                "Toggle cheatsheet display",
            ),
            (
                Bind::key("Escape"),
                "toggle ui.console",
                "Toggle console display",
            ),
            (Bind::new(Ctrl, "Q"), "stop_interactor", "Stop the interactor"),
            (
                Bind::key("Return"),
                "reset_camera",
                "Reset camera to initial parameters",
            ),
            (
                Bind::key("Space"),
                "toggle_animation",
                "Play/Pause animation if any",
            ),
            (
                Bind::new(Shift, "Space"),
                "toggle_animation backward",
                "Play/Pause animation backward",
            ),
            (Bind::key("F12"), "take_screenshot", "Take a screenshot"),
            (Bind::key("Drop"), "add_files", "Add files to the scene"),
        ];
        for (bind, command, label) in others {
            self.add(bind, [command], OTHERS_GROUP, Some(doc_label(label)));
        }
    }
}
