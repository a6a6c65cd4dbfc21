//! Session recording and playback.
//!
//! While recording, every routed input event is appended to a text log,
//! one line per event, flushed as it is written. Playback reads the log back
//! and feeds each event through the router again. See [`format`] for the
//! line layout and its two versions.

pub mod format;
mod session;

pub use format::{
    decode_current, decode_legacy, encode, parse_line, DecodeError,
    EventRecord, LogLine, RecordedEventKind, StreamVersion,
};
pub use session::{LogReader, PlaybackSummary, RecorderState, SessionRecorder};
