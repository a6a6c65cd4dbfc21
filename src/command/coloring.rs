//! Scalar coloring selection stepped by `cycle_coloring`.
//!
//! The coloring state lives in the `model.scivis` options; the arrays it
//! can point at come from the [`RenderSurface`]. Cycling edits the options
//! only, so a headless store follows the same rules as a real renderer.

use std::fmt;
use std::str::FromStr;

use super::builtins::VOLUME_OPTION;
use crate::error::InteractError;
use crate::interactor::{ColoringArray, RenderSurface, ViewerState};
use crate::options::{OptionError, OptionStore, OptionValue};

/// Scalar coloring on/off.
pub const SCIVIS_ENABLE_OPTION: &str = "model.scivis.enable";
/// Cell data instead of point data.
pub const SCIVIS_CELLS_OPTION: &str = "model.scivis.cells";
/// Name of the array colored with.
pub const SCIVIS_ARRAY_OPTION: &str = "model.scivis.array_name";
/// Component colored with.
pub const SCIVIS_COMPONENT_OPTION: &str = "model.scivis.component";

/// What one `cycle_coloring` step changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColoringCycle {
    /// Switch between point and cell data.
    Field,
    /// Next array of the current field.
    Array,
    /// Next component of the current array.
    Component,
}

impl FromStr for ColoringCycle {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "field" => Ok(Self::Field),
            "array" => Ok(Self::Array),
            "component" => Ok(Self::Component),
            other => Err(format!("\"{other}\" is not recognized")),
        }
    }
}

/// The `model.scivis` options as one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coloring {
    /// Coloring is on.
    pub enable: bool,
    /// Cell data is used.
    pub cells: bool,
    /// Array colored with; unset means the first one.
    pub array_name: Option<String>,
    /// `-2` direct scalars, `-1` magnitude, then component indices.
    pub component: i64,
}

impl Coloring {
    /// Read the coloring options from `options`.
    pub fn read(options: &dyn OptionStore) -> Result<Self, OptionError> {
        let flag = |name: &str| -> Result<bool, OptionError> {
            Ok(options.get(name)?.as_bool().unwrap_or(false))
        };
        let array_name = match options.get(SCIVIS_ARRAY_OPTION)? {
            OptionValue::Text(name) => Some(name),
            _ => None,
        };
        Ok(Self {
            enable: flag(SCIVIS_ENABLE_OPTION)?,
            cells: flag(SCIVIS_CELLS_OPTION)?,
            array_name,
            component: options
                .get(SCIVIS_COMPONENT_OPTION)?
                .as_i64()
                .unwrap_or(-1),
        })
    }

    /// Write the coloring options back to `options`.
    pub fn write(
        &self,
        options: &mut dyn OptionStore,
    ) -> Result<(), OptionError> {
        options
            .set_value(SCIVIS_ENABLE_OPTION, OptionValue::Bool(self.enable))?;
        options
            .set_value(SCIVIS_CELLS_OPTION, OptionValue::Bool(self.cells))?;
        let array = self
            .array_name
            .clone()
            .map_or(OptionValue::Unset, OptionValue::Text);
        options.set_value(SCIVIS_ARRAY_OPTION, array)?;
        options.set_value(
            SCIVIS_COMPONENT_OPTION,
            OptionValue::Int(self.component),
        )
    }

    /// Position of the array colored with among `arrays`, `None` when not
    /// coloring or when the array is not there.
    #[must_use]
    pub fn current(&self, arrays: &[ColoringArray]) -> Option<usize> {
        if !self.enable {
            return None;
        }
        match &self.array_name {
            None => (!arrays.is_empty()).then_some(0),
            Some(name) => arrays.iter().position(|a| &a.name == name),
        }
    }

    /// Switch field, then move to a valid array of the new field if the
    /// current one does not exist there.
    pub fn cycle_field(&mut self, surface: &dyn RenderSurface, volume: bool) {
        self.cells = !self.cells;
        let arrays = surface.coloring_arrays(self.cells);
        if self.current(&arrays).is_none() {
            self.cycle_array(&arrays, volume);
        }
    }

    /// Next array. Past the last one coloring turns off, except in volume
    /// rendering where it wraps to the first array.
    pub fn cycle_array(&mut self, arrays: &[ColoringArray], volume: bool) {
        let next = match self.current(arrays) {
            None => (!arrays.is_empty()).then_some(0),
            Some(i) if i + 1 < arrays.len() => Some(i + 1),
            Some(_) => volume.then_some(0),
        };
        match next.and_then(|i| arrays.get(i)) {
            Some(array) => {
                self.enable = true;
                self.array_name = Some(array.name.clone());
                if self.component >= component_count(array) {
                    self.cycle_component(arrays);
                }
            }
            None => {
                self.enable = false;
                self.array_name = None;
            }
        }
    }

    /// Next component: direct scalars, magnitude, then each component.
    pub fn cycle_component(&mut self, arrays: &[ColoringArray]) {
        let Some(array) = self.current(arrays).and_then(|i| arrays.get(i))
        else {
            return;
        };
        let span = component_count(array) + 2;
        self.component = (self.component + 3).rem_euclid(span) - 2;
    }
}

fn component_count(array: &ColoringArray) -> i64 {
    i64::try_from(array.components).unwrap_or(i64::MAX - 2)
}

/// Display name of `component` for `array`.
#[must_use]
pub fn component_label(
    component: i64,
    array: Option<&ColoringArray>,
) -> String {
    match component {
        -2 => return "Direct Scalars".to_owned(),
        -1 => return "Magnitude".to_owned(),
        _ => {}
    }
    let Some(array) = array else {
        return String::new();
    };
    let Ok(index) = usize::try_from(component) else {
        return String::new();
    };
    if index >= array.components {
        return String::new();
    }
    match array.component_names.get(index) {
        Some(name) if !name.is_empty() => name.clone(),
        _ => format!("Component #{index}"),
    }
}

/// Description of what the scene is colored with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoringDescription {
    coloring: Coloring,
    array: Option<ColoringArray>,
}

impl ColoringDescription {
    /// Current coloring of `state`.
    pub fn of(state: &ViewerState) -> Result<Self, OptionError> {
        let coloring = Coloring::read(state.options.as_ref())?;
        let arrays = state.surface.coloring_arrays(coloring.cells);
        let array = coloring
            .current(&arrays)
            .and_then(|i| arrays.get(i))
            .cloned();
        Ok(Self { coloring, array })
    }
}

impl fmt::Display for ColoringDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = if self.coloring.cells { "cell" } else { "point" };
        match (&self.array, &self.coloring.array_name) {
            (Some(array), _) => write!(
                f,
                "Coloring using {field} array named {}, {}",
                array.name,
                component_label(self.coloring.component, Some(array))
            ),
            (None, Some(name)) if self.coloring.enable => write!(
                f,
                "Coloring using {field} array named {name}, not found"
            ),
            _ => f.write_str("Not coloring"),
        }
    }
}

/// Apply one `cycle_coloring` step to `state`.
pub fn cycle_coloring(
    state: &mut ViewerState,
    cycle: ColoringCycle,
) -> Result<(), InteractError> {
    let mut coloring = Coloring::read(state.options.as_ref())?;
    let volume = state
        .options
        .get(VOLUME_OPTION)?
        .as_bool()
        .unwrap_or(false);
    match cycle {
        ColoringCycle::Field => {
            coloring.cycle_field(state.surface.as_ref(), volume);
        }
        ColoringCycle::Array => {
            let arrays = state.surface.coloring_arrays(coloring.cells);
            coloring.cycle_array(&arrays, volume);
        }
        ColoringCycle::Component => {
            let arrays = state.surface.coloring_arrays(coloring.cells);
            coloring.cycle_component(&arrays);
        }
    }
    coloring.write(state.options.as_mut())?;
    if let Ok(description) = ColoringDescription::of(state) {
        log::debug!("Command: {description}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Arrays;

    impl RenderSurface for Arrays {
        fn render(&mut self) {}

        fn coloring_arrays(&self, cells: bool) -> Vec<ColoringArray> {
            if cells {
                vec![ColoringArray::new("Material", 1)]
            } else {
                vec![
                    ColoringArray {
                        name: "Velocity".to_owned(),
                        components: 3,
                        component_names: vec!["Vx".to_owned()],
                    },
                    ColoringArray::new("Pressure", 1),
                ]
            }
        }
    }

    fn state() -> ViewerState {
        let mut state = ViewerState::headless();
        state.surface = Box::new(Arrays);
        state
    }

    fn read(state: &ViewerState) -> Coloring {
        Coloring::read(state.options.as_ref()).unwrap()
    }

    #[test]
    fn array_cycle_walks_arrays_then_turns_off() {
        let mut state = state();
        let mut names = Vec::new();
        for _ in 0..3 {
            cycle_coloring(&mut state, ColoringCycle::Array).unwrap();
            names.push(read(&state).array_name);
        }
        assert_eq!(
            names,
            [Some("Velocity".to_owned()), Some("Pressure".to_owned()), None]
        );
        assert!(!read(&state).enable);
    }

    #[test]
    fn array_cycle_wraps_in_volume_rendering() {
        let mut state = state();
        state.options.set_as_string(VOLUME_OPTION, "true").unwrap();
        for _ in 0..3 {
            cycle_coloring(&mut state, ColoringCycle::Array).unwrap();
        }
        assert_eq!(read(&state).array_name.as_deref(), Some("Velocity"));
        assert!(read(&state).enable);
    }

    #[test]
    fn component_cycle_covers_direct_magnitude_and_components() {
        let mut state = state();
        cycle_coloring(&mut state, ColoringCycle::Array).unwrap();
        let mut seen = vec![read(&state).component];
        for _ in 0..5 {
            cycle_coloring(&mut state, ColoringCycle::Component).unwrap();
            seen.push(read(&state).component);
        }
        assert_eq!(seen, [-1, 0, 1, 2, -2, -1]);
    }

    #[test]
    fn field_cycle_picks_an_array_of_the_new_field() {
        let mut state = state();
        cycle_coloring(&mut state, ColoringCycle::Array).unwrap();
        state
            .options
            .set_value(SCIVIS_COMPONENT_OPTION, OptionValue::Int(2))
            .unwrap();

        cycle_coloring(&mut state, ColoringCycle::Field).unwrap();
        let coloring = read(&state);
        assert!(coloring.cells);
        assert_eq!(coloring.array_name.as_deref(), Some("Material"));
        // Component 2 does not exist on a one-component array.
        assert_eq!(coloring.component, 0);
    }

    #[test]
    fn without_arrays_nothing_is_colored() {
        let mut state = ViewerState::headless();
        cycle_coloring(&mut state, ColoringCycle::Field).unwrap();
        let coloring = read(&state);
        assert!(coloring.cells);
        assert!(!coloring.enable);
        assert_eq!(
            ColoringDescription::of(&state).unwrap().to_string(),
            "Not coloring"
        );
    }

    #[test]
    fn labels_and_description() {
        let arrays = Arrays.coloring_arrays(false);
        let velocity = &arrays[0];
        assert_eq!(component_label(-2, None), "Direct Scalars");
        assert_eq!(component_label(-1, None), "Magnitude");
        assert_eq!(component_label(0, Some(velocity)), "Vx");
        assert_eq!(component_label(1, Some(velocity)), "Component #1");
        assert_eq!(component_label(3, Some(velocity)), "");

        let mut state = state();
        cycle_coloring(&mut state, ColoringCycle::Array).unwrap();
        assert_eq!(
            ColoringDescription::of(&state).unwrap().to_string(),
            "Coloring using point array named Velocity, Magnitude"
        );
    }

    #[test]
    fn unknown_cycle_target_is_rejected() {
        assert_eq!("array".parse(), Ok(ColoringCycle::Array));
        assert!("colour".parse::<ColoringCycle>().is_err());
    }
}
