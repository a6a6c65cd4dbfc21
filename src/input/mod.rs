//! Input handling: platform-agnostic event types and the modifier state
//! the router consults when resolving binds.

/// Platform-agnostic input events.
pub mod event;
/// Control/shift/alt pressed-state.
pub mod modifiers;

pub use event::{
    key_token, InputAction, InputEvent, MouseButton, WheelDirection,
};
pub use modifiers::ModifierTracker;
