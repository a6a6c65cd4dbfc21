//! Key bindings: bind syntax, the binding table and the default bind set.
//!
//! A [`Bind`] pairs a [`ModifierKeys`] set with a key token. The
//! [`BindingTable`] maps binds to ordered lists of console command lines,
//! organized into named groups for cheat-sheet display.

mod bind;
/// Default binds and documentation helpers.
pub mod defaults;
mod table;

pub use bind::{Bind, ModifierKeys};
pub use defaults::{CAMERA_GROUP, OTHERS_GROUP, SCENE_GROUP};
pub use table::{
    format_numeric, format_toggle, BindingDocumentation, BindingTable,
    BindingType, DocumentationFn,
};
