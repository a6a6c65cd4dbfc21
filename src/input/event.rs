/// Platform-agnostic input events.
///
/// These are fed into an [`Interactor`](crate::interactor::Interactor),
/// which resolves the active bind and dispatches its commands.
///
/// # Example
///
/// ```ignore
/// let report = interactor.handle_event(InputEvent::KeyboardKey {
///     action: InputAction::Press,
///     key: "space".into(),
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether a control key is held.
        ctrl: bool,
        /// Whether a shift key is held.
        shift: bool,
        /// Whether an alt key is held. Recorded, never part of a bind.
        alt: bool,
    },
    /// Cursor moved to an absolute position. Never dispatches.
    MousePosition {
        /// Horizontal position in pixels.
        x: i32,
        /// Vertical position in pixels.
        y: i32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Press or release.
        action: InputAction,
        /// Which button changed.
        button: MouseButton,
    },
    /// One wheel notch.
    MouseWheel {
        /// Direction of the notch.
        direction: WheelDirection,
    },
    /// Keyboard key pressed or released.
    KeyboardKey {
        /// Press or release.
        action: InputAction,
        /// Key symbol as reported by the platform (`a`, `space`, `F12`).
        key: String,
    },
    /// Text input, routed to the text sink only.
    TextCharacter {
        /// Unicode code point.
        codepoint: u32,
    },
    /// Files dropped onto the view.
    DropFiles {
        /// Dropped file paths.
        paths: Vec<String>,
    },
}

/// Press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Button or key went down.
    Press,
    /// Button or key went up.
    Release,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Bind key token for this button.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Left => "LeftButton",
            Self::Right => "RightButton",
            Self::Middle => "MiddleButton",
        }
    }
}

/// Direction of a wheel notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    /// Away from the user.
    Forward,
    /// Toward the user.
    Backward,
    /// Horizontal tilt left.
    Left,
    /// Horizontal tilt right.
    Right,
}

impl WheelDirection {
    /// Bind key token for this direction.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Forward => "WheelForward",
            Self::Backward => "WheelBackward",
            Self::Left => "WheelLeft",
            Self::Right => "WheelRight",
        }
    }
}

/// Bind key token for a keyboard symbol: the first character is
/// uppercased, so `space` and `Space` name the same bind.
#[must_use]
pub fn key_token(key: &str) -> String {
    let mut chars = key.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::ElementState> for InputAction {
    fn from(state: winit::event::ElementState) -> Self {
        match state {
            winit::event::ElementState::Pressed => Self::Press,
            winit::event::ElementState::Released => Self::Release,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::keyboard::ModifiersState> for InputEvent {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        Self::ModifiersChanged {
            ctrl: state.control_key(),
            shift: state.shift_key(),
            alt: state.alt_key(),
        }
    }
}
