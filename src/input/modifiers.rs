use crate::bindings::ModifierKeys;

/// Last reported modifier key state. Most recent update wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierTracker {
    ctrl: bool,
    shift: bool,
    alt: bool,
}

impl ModifierTracker {
    /// Record the control/shift state and return the resulting set.
    pub fn update(&mut self, ctrl: bool, shift: bool) -> ModifierKeys {
        self.ctrl = ctrl;
        self.shift = shift;
        self.current()
    }

    /// Record the alt state.
    pub fn set_alt(&mut self, alt: bool) {
        self.alt = alt;
    }

    /// Modifier set derived from the last update.
    #[must_use]
    pub const fn current(&self) -> ModifierKeys {
        match (self.ctrl, self.shift) {
            (false, false) => ModifierKeys::None,
            (true, false) => ModifierKeys::Ctrl,
            (false, true) => ModifierKeys::Shift,
            (true, true) => ModifierKeys::CtrlShift,
        }
    }

    /// Whether control is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.ctrl
    }

    /// Whether shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.shift
    }

    /// Whether alt is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.alt
    }
}
