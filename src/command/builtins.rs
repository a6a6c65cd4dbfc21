//! Commands installed on every new interactor.
//!
//! Each built-in reaches the viewer only through [`ViewerState`]: the option
//! store, the animation controller and the render surface. Hosts may remove
//! or replace any of them.

use std::path::Path;

use super::coloring::{cycle_coloring, ColoringCycle, ColoringDescription};
use super::registry::{CommandDoc, CommandRegistry, CommandResult};
use super::tokenize::quote_if_needed;
use crate::animation::AnimationDirection;
use crate::error::InteractError;
use crate::interactor::{ViewerState, ANIMATION_INDEX_OPTION};
use crate::options::{OptionKind, OptionValue};

/// Option stepped by the light intensity commands.
pub const LIGHT_INTENSITY_OPTION: &str = "render.light.intensity";
/// Option stepped by the opacity commands.
pub const OPACITY_OPTION: &str = "model.color.opacity";
/// Option flipped by `toggle_volume_rendering`.
pub const VOLUME_OPTION: &str = "model.volume.enable";

const DEFAULT_SCREENSHOT: &str = "gazer_screenshot.png";
const OPACITY_STEP: f64 = 0.05;

fn expect_args(
    name: &str,
    args: &[String],
    count: usize,
) -> Result<(), InteractError> {
    if args.len() == count {
        Ok(())
    } else {
        Err(InteractError::handler(
            name,
            format!(
                "{name} is expecting {count} arguments, got {}",
                args.len()
            ),
        ))
    }
}

/// Next light intensity one keyboard step up or down.
///
/// Steps are in percentage points and grow with the intensity: 1 below
/// 0.5, 2 below 1, 5 below 5, 10 below 10, then 25. Going down uses the
/// step of the range below a boundary, so up and down retrace the same
/// values. Never negative.
#[must_use]
pub fn light_intensity_step(intensity: f64, negative: bool) -> f64 {
    let reference = if negative { intensity - 1e-6 } else { intensity };
    let offset_pp: i64 = if reference < 0.5 {
        1
    } else if reference < 1.0 {
        2
    } else if reference < 5.0 {
        5
    } else if reference < 10.0 {
        10
    } else {
        25
    };
    let current_pct = (intensity * 100.0).round() as i64;
    let next_pct = if negative {
        current_pct - offset_pp
    } else {
        current_pct + offset_pp
    };
    next_pct.max(0) as f64 / 100.0
}

/// Next opacity one keyboard step up or down. Unset counts as fully
/// opaque; values inside `[0, 1]` stay inside it.
#[must_use]
pub fn opacity_step(current: Option<f64>, negative: bool) -> f64 {
    let current = current.unwrap_or(1.0);
    let next = if negative {
        current - OPACITY_STEP
    } else {
        current + OPACITY_STEP
    };
    if (0.0..=1.0).contains(&current) {
        next.clamp(0.0, 1.0)
    } else {
        next
    }
}

fn step_light_intensity(
    state: &mut ViewerState,
    negative: bool,
) -> CommandResult {
    let current = state
        .options
        .get(LIGHT_INTENSITY_OPTION)?
        .as_f64()
        .unwrap_or(1.0);
    let next = light_intensity_step(current, negative);
    state
        .options
        .set_value(LIGHT_INTENSITY_OPTION, OptionValue::Double(next))?;
    state.request_render();
    Ok(None)
}

fn step_opacity(state: &mut ViewerState, negative: bool) -> CommandResult {
    let current = state.options.get(OPACITY_OPTION)?.as_f64();
    let next = opacity_step(current, negative);
    state
        .options
        .set_value(OPACITY_OPTION, OptionValue::Double(next))?;
    state.request_render();
    Ok(None)
}

fn parse_direction(
    name: &str,
    args: &[String],
) -> Result<AnimationDirection, InteractError> {
    match args {
        [] => Ok(AnimationDirection::Forward),
        [arg] => match arg.as_str() {
            "forward" => Ok(AnimationDirection::Forward),
            "backward" => Ok(AnimationDirection::Backward),
            other => Err(InteractError::handler(
                name,
                format!("direction \"{other}\" is not recognized"),
            )),
        },
        _ => Err(InteractError::handler(
            name,
            format!("{name} is expecting at most 1 argument"),
        )),
    }
}

/// Join alias arguments back into one command line, re-quoting arguments
/// that would not survive tokenizing as-is.
fn join_command(args: &[String]) -> String {
    args.iter()
        .map(|arg| quote_if_needed(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Register every built-in command on `registry`.
pub fn register_builtins(registry: &mut CommandRegistry) {
    register_option_commands(registry);
    register_animation_commands(registry);
    register_view_commands(registry);
    register_info_commands(registry);

    registry.add_command(
        "clear",
        CommandDoc::new("Clear the console"),
        |state, args| {
            expect_args("clear", args, 0)?;
            state.surface.clear_console();
            Ok(None)
        },
    );

    registry.add_command(
        "alias",
        CommandDoc::new("Define a console alias")
            .arg("name", "alias name")
            .arg("command", "command line the alias expands to"),
        |state, args| {
            if args.len() < 2 {
                return Err(InteractError::handler(
                    "alias",
                    "alias is expecting at least 2 arguments",
                ));
            }
            let command = join_command(&args[1..]);
            let output =
                format!("Alias {} added with command {command}", args[0]);
            let _ = state.aliases.insert(args[0].clone(), command);
            Ok(Some(output))
        },
    );

    registry.add_command(
        "stop_interactor",
        CommandDoc::new("Stop the interactor"),
        |state, _| {
            state.request_stop();
            Ok(None)
        },
    );
}

fn register_option_commands(registry: &mut CommandRegistry) {
    registry.add_command(
        "set",
        CommandDoc::new("Set an option from its string form")
            .arg("option", "dotted option path")
            .arg("value", "new value"),
        |state, args| {
            expect_args("set", args, 2)?;
            state.options.set_as_string(&args[0], &args[1])?;
            state.request_render();
            Ok(None)
        },
    );

    registry.add_command(
        "toggle",
        CommandDoc::new("Toggle a boolean option")
            .arg("option", "dotted option path"),
        |state, args| {
            expect_args("toggle", args, 1)?;
            state.options.toggle(&args[0])?;
            log::debug!("Command: {}", state.describe_option(&args[0]));
            state.request_render();
            Ok(None)
        },
    );

    registry.add_command(
        "reset",
        CommandDoc::new("Reset an option to its default")
            .arg("option", "dotted option path"),
        |state, args| {
            expect_args("reset", args, 1)?;
            state.options.reset(&args[0])?;
            state.request_render();
            Ok(None)
        },
    );

    registry.add_command(
        "print",
        CommandDoc::new("Print the value of an option")
            .arg("option", "dotted option path"),
        |state, args| {
            expect_args("print", args, 1)?;
            Ok(Some(state.options.get_as_string(&args[0])?))
        },
    );

    registry.add_command(
        "print_options_info",
        CommandDoc::new("Print every option and its value"),
        |state, _| {
            let lines: Vec<String> = state
                .options
                .names()
                .into_iter()
                .map(|name| match state.options.get(&name) {
                    Ok(value) => format!("{name}: {value}"),
                    Err(e) => format!("{name}: {e}"),
                })
                .collect();
            Ok(Some(lines.join("\n")))
        },
    );

    registry.add_command(
        "increase_light_intensity",
        CommandDoc::new("Increase lights intensity")
            .adjusts(LIGHT_INTENSITY_OPTION),
        |state, _| step_light_intensity(state, false),
    );
    registry.add_command(
        "decrease_light_intensity",
        CommandDoc::new("Decrease lights intensity")
            .adjusts(LIGHT_INTENSITY_OPTION),
        |state, _| step_light_intensity(state, true),
    );
    registry.add_command(
        "increase_opacity",
        CommandDoc::new("Increase opacity").adjusts(OPACITY_OPTION),
        |state, _| step_opacity(state, false),
    );
    registry.add_command(
        "decrease_opacity",
        CommandDoc::new("Decrease opacity").adjusts(OPACITY_OPTION),
        |state, _| step_opacity(state, true),
    );

    registry.add_command(
        "toggle_volume_rendering",
        CommandDoc::new("Toggle volume rendering"),
        |state, _| {
            if state.options.kind(VOLUME_OPTION)? != OptionKind::Bool {
                return Err(InteractError::handler(
                    "toggle_volume_rendering",
                    format!("{VOLUME_OPTION} is not a boolean option"),
                ));
            }
            state.options.toggle(VOLUME_OPTION)?;
            state.request_render();
            Ok(None)
        },
    );
}

fn register_animation_commands(registry: &mut CommandRegistry) {
    registry.add_command(
        "toggle_animation",
        CommandDoc::new("Play/Pause animation if any")
            .arg("direction", "forward (default) or backward"),
        |state, args| {
            let direction = parse_direction("toggle_animation", args)?;
            state.animation.toggle(direction);
            state.request_render();
            Ok(None)
        },
    );

    registry.add_command(
        "start_animation",
        CommandDoc::new("Start playing the animation")
            .arg("direction", "forward (default) or backward"),
        |state, args| {
            let direction = parse_direction("start_animation", args)?;
            state.animation.start(direction);
            state.request_render();
            Ok(None)
        },
    );

    registry.add_command(
        "stop_animation",
        CommandDoc::new("Stop playing the animation"),
        |state, _| {
            state.animation.stop();
            Ok(None)
        },
    );

    registry.add_command(
        "cycle_animation",
        CommandDoc::new("Cycle animation"),
        |state, _| {
            let index = state
                .options
                .get(ANIMATION_INDEX_OPTION)?
                .as_i64()
                .unwrap_or(0);
            let Some(next) = state.animation.cycle_animation(index) else {
                log::debug!("Command: no animation to cycle");
                return Ok(None);
            };
            state
                .options
                .set_value(ANIMATION_INDEX_OPTION, OptionValue::Int(next))?;
            state.request_render();
            Ok(None)
        },
    );
}

fn register_view_commands(registry: &mut CommandRegistry) {
    registry.add_command(
        "take_screenshot",
        CommandDoc::new("Save the current frame to an image")
            .arg("path", "output file, defaults to gazer_screenshot.png"),
        |state, args| {
            let path = match args {
                [] => DEFAULT_SCREENSHOT,
                [path] => path.as_str(),
                _ => {
                    return Err(InteractError::handler(
                        "take_screenshot",
                        "take_screenshot is expecting at most 1 argument",
                    ))
                }
            };
            state
                .surface
                .screenshot(Path::new(path))
                .map_err(|e| InteractError::handler("take_screenshot", e))?;
            Ok(Some(format!("Screenshot saved to {path}")))
        },
    );

    registry.add_command(
        "reset_camera",
        CommandDoc::new("Reset camera to initial parameters"),
        |state, _| {
            state
                .surface
                .reset_camera()
                .map_err(|e| InteractError::handler("reset_camera", e))?;
            state.request_render();
            Ok(None)
        },
    );

    registry.add_command(
        "set_camera",
        CommandDoc::new("Move the camera to a predefined view")
            .arg("view", "front, right, top or isometric"),
        |state, args| {
            expect_args("set_camera", args, 1)?;
            let view = args[0].as_str();
            if !matches!(view, "front" | "right" | "top" | "isometric") {
                return Err(InteractError::handler(
                    "set_camera",
                    format!("view \"{view}\" is not recognized"),
                ));
            }
            state
                .surface
                .set_camera_view(view)
                .map_err(|e| InteractError::handler("set_camera", e))?;
            state.request_render();
            Ok(None)
        },
    );

    registry.add_command(
        "roll_camera",
        CommandDoc::new("Roll the camera").arg("degrees", "signed angle"),
        |state, args| {
            expect_args("roll_camera", args, 1)?;
            let degrees: f64 = args[0].parse().map_err(|_| {
                InteractError::handler(
                    "roll_camera",
                    format!("\"{}\" is not an angle", args[0]),
                )
            })?;
            state
                .surface
                .roll_camera(degrees)
                .map_err(|e| InteractError::handler("roll_camera", e))?;
            state.request_render();
            Ok(None)
        },
    );

    registry.add_command(
        "cycle_coloring",
        CommandDoc::new("Cycle the scalar coloring")
            .arg("target", "field, array or component"),
        |state, args| {
            expect_args("cycle_coloring", args, 1)?;
            let cycle: ColoringCycle = args[0]
                .parse()
                .map_err(|e| InteractError::handler("cycle_coloring", e))?;
            cycle_coloring(state, cycle)?;
            state.request_render();
            Ok(None)
        },
    );

    registry.add_command(
        "set_reader_option",
        CommandDoc::new("Set an option of the file readers")
            .arg("option", "reader option name")
            .arg("value", "new value"),
        |state, args| {
            expect_args("set_reader_option", args, 2)?;
            state
                .surface
                .set_reader_option(&args[0], &args[1])
                .map_err(|e| InteractError::handler("set_reader_option", e))?;
            Ok(None)
        },
    );

    registry.add_command(
        "add_files",
        CommandDoc::new("Add files to the scene").arg("files", "paths to load"),
        |state, args| {
            state.animation.stop();
            state
                .surface
                .add_files(args)
                .map_err(|e| InteractError::handler("add_files", e))?;
            state.request_render();
            Ok(None)
        },
    );
}

fn register_info_commands(registry: &mut CommandRegistry) {
    registry.add_command(
        "print_scene_info",
        CommandDoc::new("Print information about the scene"),
        |state, _| {
            let text = state
                .surface
                .scene_description()
                .map_err(|e| InteractError::handler("print_scene_info", e))?;
            Ok(Some(text))
        },
    );

    registry.add_command(
        "print_coloring_info",
        CommandDoc::new("Print information about the coloring"),
        |state, _| Ok(Some(ColoringDescription::of(state)?.to_string())),
    );

    registry.add_command(
        "print_mesh_info",
        CommandDoc::new("Print information about the meshes"),
        |state, _| {
            let text = state
                .surface
                .mesh_description()
                .map_err(|e| InteractError::handler("print_mesh_info", e))?;
            Ok(Some(text))
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationSource;
    use crate::interactor::{ColoringArray, RenderSurface};

    fn setup() -> (CommandRegistry, ViewerState) {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        (registry, ViewerState::headless())
    }

    fn run(
        registry: &mut CommandRegistry,
        state: &mut ViewerState,
        line: &str,
    ) -> CommandResult {
        registry.trigger(state, line, true)
    }

    #[test]
    fn light_steps_follow_ranges() {
        assert_eq!(light_intensity_step(1.0, false), 1.05);
        assert_eq!(light_intensity_step(1.0, true), 0.98);
        assert_eq!(light_intensity_step(0.3, false), 0.31);
        assert_eq!(light_intensity_step(5.0, false), 5.1);
        assert_eq!(light_intensity_step(5.0, true), 4.95);
        assert_eq!(light_intensity_step(12.0, false), 12.25);
        assert_eq!(light_intensity_step(0.0, true), 0.0);
    }

    #[test]
    fn light_steps_retrace() {
        let mut value = 1.0;
        for _ in 0..20 {
            value = light_intensity_step(value, false);
        }
        for _ in 0..20 {
            value = light_intensity_step(value, true);
        }
        assert!((value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn opacity_steps_clamp_inside_unit_range() {
        assert_eq!(opacity_step(None, false), 1.0);
        assert!((opacity_step(None, true) - 0.95).abs() < 1e-9);
        assert_eq!(opacity_step(Some(0.02), true), 0.0);
        assert!((opacity_step(Some(1.5), false) - 1.55).abs() < 1e-9);
    }

    #[test]
    fn set_print_toggle_reset() {
        let (mut registry, mut state) = setup();
        let line = "set render.line_width 3.5";
        let _ = run(&mut registry, &mut state, line).unwrap();
        assert_eq!(
            run(&mut registry, &mut state, "print render.line_width")
                .unwrap()
                .as_deref(),
            Some("3.5")
        );
        let _ = run(&mut registry, &mut state, "toggle ui.axis").unwrap();
        assert_eq!(
            state.options.get("ui.axis").unwrap(),
            OptionValue::Bool(true)
        );
        let _ = run(&mut registry, &mut state, "reset ui.axis").unwrap();
        assert_eq!(
            state.options.get("ui.axis").unwrap(),
            OptionValue::Bool(false)
        );
        assert!(state.take_render_request());
    }

    #[test]
    fn wrong_argument_count_fails() {
        let (mut registry, mut state) = setup();
        let err = run(&mut registry, &mut state, "set ui.axis").unwrap_err();
        assert!(err.to_string().contains("expecting 2 arguments"));
        assert!(run(&mut registry, &mut state, "toggle").is_err());
    }

    #[test]
    fn option_errors_become_handler_errors() {
        let (mut registry, mut state) = setup();
        let err =
            run(&mut registry, &mut state, "toggle ui.axes").unwrap_err();
        let InteractError::CommandHandler { command, message } = err else {
            panic!("expected CommandHandler, got {err:?}");
        };
        assert_eq!(command, "toggle");
        assert!(message.contains("ui.axis"), "{message}");
    }

    #[test]
    fn light_and_opacity_commands_update_options() {
        let (mut registry, mut state) = setup();
        let _ =
            run(&mut registry, &mut state, "increase_light_intensity").unwrap();
        assert_eq!(
            state.options.get(LIGHT_INTENSITY_OPTION).unwrap(),
            OptionValue::Double(1.05)
        );
        let _ = run(&mut registry, &mut state, "decrease_opacity").unwrap();
        let opacity = state.options.get(OPACITY_OPTION).unwrap();
        assert!((opacity.as_f64().unwrap() - 0.95).abs() < 1e-9);
        assert_eq!(
            registry
                .command_documentation("increase_opacity")
                .unwrap()
                .adjusts
                .as_deref(),
            Some(OPACITY_OPTION)
        );
    }

    #[test]
    fn animation_commands_drive_controller() {
        let (mut registry, mut state) = setup();
        let _ = run(&mut registry, &mut state, "toggle_animation").unwrap();
        assert_eq!(
            state.animation.direction(),
            Some(AnimationDirection::Forward)
        );
        let _ = run(&mut registry, &mut state, "toggle_animation backward")
            .unwrap();
        assert_eq!(
            state.animation.direction(),
            Some(AnimationDirection::Backward)
        );
        let _ = run(&mut registry, &mut state, "stop_animation").unwrap();
        assert!(!state.animation.is_playing());
        assert!(run(&mut registry, &mut state, "start_animation sideways")
            .is_err());
    }

    #[test]
    fn alias_defines_and_expands() {
        let (mut registry, mut state) = setup();
        let out = run(&mut registry, &mut state, "alias axes toggle ui.axis")
            .unwrap();
        assert_eq!(
            out.as_deref(),
            Some("Alias axes added with command toggle ui.axis")
        );
        let _ = run(&mut registry, &mut state, "axes").unwrap();
        assert_eq!(
            state.options.get("ui.axis").unwrap(),
            OptionValue::Bool(true)
        );

        assert!(run(&mut registry, &mut state, "alias lonely").is_err());
    }

    #[test]
    fn alias_requotes_arguments_with_spaces() {
        assert_eq!(
            join_command(&["add_files".into(), "/tmp/a b.obj".into()]),
            "add_files \"/tmp/a b.obj\""
        );
    }

    #[test]
    fn stop_and_screenshot() {
        let (mut registry, mut state) = setup();
        assert!(run(&mut registry, &mut state, "take_screenshot").is_err());
        let _ = run(&mut registry, &mut state, "stop_interactor").unwrap();
        assert!(state.stop_requested());
    }

    #[test]
    fn print_options_info_lists_everything() {
        let (mut registry, mut state) = setup();
        let out = run(&mut registry, &mut state, "print_options_info")
            .unwrap()
            .unwrap();
        assert!(out.contains("render.light.intensity: 1"));
        assert!(out.contains("model.color.opacity: Unset"));
    }

    struct Loaded {
        reader_options: Vec<(String, String)>,
    }

    impl RenderSurface for Loaded {
        fn render(&mut self) {}

        fn coloring_arrays(&self, cells: bool) -> Vec<ColoringArray> {
            if cells {
                Vec::new()
            } else {
                vec![ColoringArray::new("Normals", 3)]
            }
        }

        fn scene_description(&self) -> Result<String, String> {
            Ok("Scene bounds: [0, 1]".to_owned())
        }

        fn mesh_description(&self) -> Result<String, String> {
            Ok("Number of points: 8".to_owned())
        }

        fn set_reader_option(
            &mut self,
            name: &str,
            value: &str,
        ) -> Result<(), String> {
            self.reader_options.push((name.to_owned(), value.to_owned()));
            Ok(())
        }
    }

    fn loaded_setup() -> (CommandRegistry, ViewerState) {
        let (registry, mut state) = setup();
        state.surface = Box::new(Loaded {
            reader_options: Vec::new(),
        });
        (registry, state)
    }

    #[test]
    fn cycle_coloring_updates_scivis_options() {
        let (mut registry, mut state) = loaded_setup();
        let _ = run(&mut registry, &mut state, "cycle_coloring array").unwrap();
        assert_eq!(
            state.options.get("model.scivis.array_name").unwrap(),
            OptionValue::Text("Normals".to_owned())
        );
        let _ =
            run(&mut registry, &mut state, "cycle_coloring component").unwrap();
        assert_eq!(
            run(&mut registry, &mut state, "print_coloring_info")
                .unwrap()
                .as_deref(),
            Some("Coloring using point array named Normals, Component #0")
        );

        let _ = run(&mut registry, &mut state, "cycle_coloring field").unwrap();
        assert_eq!(
            state.options.get("model.scivis.enable").unwrap(),
            OptionValue::Bool(false)
        );
        assert!(state.take_render_request());

        let err = run(&mut registry, &mut state, "cycle_coloring hue")
            .unwrap_err();
        assert!(err.to_string().contains("\"hue\" is not recognized"));
        assert!(run(&mut registry, &mut state, "cycle_coloring").is_err());
    }

    #[test]
    fn alias_to_cycle_coloring() {
        let (mut registry, mut state) = loaded_setup();
        let _ = run(&mut registry, &mut state, "alias gc cycle_coloring")
            .unwrap();
        let _ = run(&mut registry, &mut state, "gc array").unwrap();
        assert_eq!(
            state.options.get("model.scivis.enable").unwrap(),
            OptionValue::Bool(true)
        );
    }

    struct Takes;

    impl AnimationSource for Takes {
        fn time_range(&self) -> Option<(f64, f64)> {
            Some((0.0, 1.0))
        }

        fn load_at_time(&mut self, _time: f64) -> bool {
            true
        }

        fn animation_count(&self) -> usize {
            2
        }

        fn select_animation(&mut self, _index: i64) -> bool {
            true
        }
    }

    #[test]
    fn cycle_animation_writes_the_index_option() {
        let (mut registry, mut state) = setup();
        let _ = run(&mut registry, &mut state, "cycle_animation").unwrap();
        assert_eq!(
            state.options.get(ANIMATION_INDEX_OPTION).unwrap(),
            OptionValue::Int(0)
        );

        state.set_animation_source(Box::new(Takes));
        let mut seen = Vec::new();
        for _ in 0..3 {
            let _ = run(&mut registry, &mut state, "cycle_animation").unwrap();
            seen.push(state.options.get(ANIMATION_INDEX_OPTION).unwrap());
        }
        assert_eq!(
            seen,
            [OptionValue::Int(1), OptionValue::Int(-1), OptionValue::Int(0)]
        );
    }

    #[test]
    fn info_commands_come_from_the_surface() {
        let (mut registry, mut state) = setup();
        assert!(run(&mut registry, &mut state, "print_scene_info").is_err());
        assert_eq!(
            run(&mut registry, &mut state, "print_coloring_info")
                .unwrap()
                .as_deref(),
            Some("Not coloring")
        );

        let (mut registry, mut state) = loaded_setup();
        assert_eq!(
            run(&mut registry, &mut state, "print_scene_info")
                .unwrap()
                .as_deref(),
            Some("Scene bounds: [0, 1]")
        );
        assert_eq!(
            run(&mut registry, &mut state, "print_mesh_info")
                .unwrap()
                .as_deref(),
            Some("Number of points: 8")
        );
    }

    #[test]
    fn reader_options_and_clear() {
        let (mut registry, mut state) = setup();
        assert!(run(&mut registry, &mut state, "set_reader_option a b")
            .is_err());

        let (mut registry, mut state) = loaded_setup();
        let _ = run(
            &mut registry,
            &mut state,
            "set_reader_option QuakeMDL.skin_index 1",
        )
        .unwrap();
        assert!(run(&mut registry, &mut state, "set_reader_option x")
            .is_err());
        let _ = run(&mut registry, &mut state, "clear").unwrap();
        assert!(run(&mut registry, &mut state, "clear now").is_err());
    }
}
