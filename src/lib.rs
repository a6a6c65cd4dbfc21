// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Input-to-action layer for interactive 3D viewers.
//!
//! gazer turns raw mouse, keyboard and drop events into named console
//! commands. Commands are registered with documentation and a handler,
//! invoked from text lines such as `set render.line_width 2` or from key
//! binds such as `Ctrl+Shift+P`, and every routed event can be recorded to
//! a text log and replayed later.
//!
//! # Key entry points
//!
//! - [`interactor::Interactor`] - routes events, owns the registry, the
//!   bind table and the viewer context
//! - [`command::CommandRegistry`] - named commands and line dispatch
//! - [`bindings::BindingTable`] - bind to command-line mapping, grouped for
//!   cheat sheets
//! - [`options::Options`] - the dotted-path option store commands operate on
//! - [`recorder`] - session log format, recording and playback
//!
//! # Architecture
//!
//! Everything runs on the host's thread. Handlers receive an explicit
//! [`interactor::ViewerState`] rather than reaching for globals; the host
//! plugs its renderer in through [`interactor::RenderSurface`] and its
//! animated scene through [`animation::AnimationSource`].

pub mod animation;
pub mod bindings;
pub mod command;
pub mod error;
pub mod input;
pub mod interactor;
pub mod options;
pub mod recorder;
