//! Line layout of session logs.
//!
//! ```text
//! # StreamVersion 1.1
//! MouseMoveEvent 120 48 0 0 0 0 0 0
//! KeyPressEvent 120 48 2 113 0 q 0 0
//! DropFilesEvent 0 0 0 0 0 0 1 "/tmp/my model.obj" 0
//! ```
//!
//! Fields: event name, x, y, modifiers, key code, repeat count, key symbol
//! (`0` when absent), trailing string count, the strings, and a terminating
//! `0`. From version 1.1 the modifiers are one bitmask (shift 1, ctrl 2,
//! alt 4); older logs carry two integers, ctrl then shift, and no alt.

use std::fmt;
use std::str::FromStr;

use crate::command::{quote_if_needed, tokenize};
use crate::input::{
    InputAction, InputEvent, ModifierTracker, MouseButton, WheelDirection,
};

const HEADER_PREFIX: &str = "# StreamVersion ";

const SHIFT_BIT: u32 = 1;
const CTRL_BIT: u32 = 2;
const ALT_BIT: u32 = 4;

/// Version of the log layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl StreamVersion {
    /// Layout written by default: modifier bitmask.
    pub const CURRENT: Self = Self { major: 1, minor: 1 };
    /// Layout assumed when a log has no header: ctrl and shift integers.
    pub const LEGACY: Self = Self { major: 0, minor: 0 };

    /// Whether this layout stores modifiers as one bitmask.
    #[must_use]
    pub fn has_modifier_mask(self) -> bool {
        self >= Self::CURRENT
    }

    /// Header line announcing this version.
    #[must_use]
    pub fn header(self) -> String {
        format!("{HEADER_PREFIX}{self}")
    }
}

impl fmt::Display for StreamVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for StreamVersion {
    type Err = DecodeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || DecodeError::MalformedHeader(text.to_owned());
        let text = text.trim();
        let (major, minor) = text.split_once('.').unwrap_or((text, "0"));
        Ok(Self {
            major: major.parse().map_err(|_| malformed())?,
            minor: minor.parse().map_err(|_| malformed())?,
        })
    }
}

/// Why a log line was not turned into an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// `# StreamVersion` followed by something that is not a version.
    MalformedHeader(String),
    /// First field is not a known event name.
    UnknownEvent(String),
    /// Missing or non-numeric fields.
    Malformed(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHeader(v) => {
                write!(f, "malformed stream version \"{v}\"")
            }
            Self::UnknownEvent(name) => write!(f, "unknown event \"{name}\""),
            Self::Malformed(why) => write!(f, "malformed event line: {why}"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Event names that can appear in a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordedEventKind {
    /// Cursor moved.
    MouseMove,
    /// Mouse button went down.
    ButtonPress(MouseButton),
    /// Mouse button went up.
    ButtonRelease(MouseButton),
    /// Wheel notch.
    Wheel(WheelDirection),
    /// Key went down.
    KeyPress,
    /// Key went up.
    KeyRelease,
    /// Text input.
    Char,
    /// Files dropped.
    DropFiles,
}

const BUTTONS: [MouseButton; 3] =
    [MouseButton::Left, MouseButton::Right, MouseButton::Middle];
const WHEELS: [WheelDirection; 4] = [
    WheelDirection::Forward,
    WheelDirection::Backward,
    WheelDirection::Left,
    WheelDirection::Right,
];

impl RecordedEventKind {
    /// Name written in the log.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::MouseMove => "MouseMoveEvent".to_owned(),
            Self::ButtonPress(b) => format!("{}PressEvent", b.token()),
            Self::ButtonRelease(b) => format!("{}ReleaseEvent", b.token()),
            Self::Wheel(d) => format!("Mouse{}Event", d.token()),
            Self::KeyPress => "KeyPressEvent".to_owned(),
            Self::KeyRelease => "KeyReleaseEvent".to_owned(),
            Self::Char => "CharEvent".to_owned(),
            Self::DropFiles => "DropFilesEvent".to_owned(),
        }
    }

    /// Kind for a log name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MouseMoveEvent" => return Some(Self::MouseMove),
            "KeyPressEvent" => return Some(Self::KeyPress),
            "KeyReleaseEvent" => return Some(Self::KeyRelease),
            "CharEvent" => return Some(Self::Char),
            "DropFilesEvent" => return Some(Self::DropFiles),
            _ => {}
        }
        let event = name.strip_suffix("Event")?;
        if let Some(wheel) = event.strip_prefix("Mouse") {
            return WHEELS
                .into_iter()
                .find(|d| d.token() == wheel)
                .map(Self::Wheel);
        }
        BUTTONS.into_iter().find_map(|b| {
            let action = event.strip_prefix(b.token())?;
            match action {
                "Press" => Some(Self::ButtonPress(b)),
                "Release" => Some(Self::ButtonRelease(b)),
                _ => None,
            }
        })
    }

    /// Whether the key symbol field is meaningful for this kind.
    #[must_use]
    pub const fn is_key(self) -> bool {
        matches!(self, Self::KeyPress | Self::KeyRelease)
    }
}

/// One event line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Event name.
    pub kind: RecordedEventKind,
    /// Cursor x when the event happened.
    pub x: i32,
    /// Cursor y when the event happened.
    pub y: i32,
    /// Control held.
    pub ctrl: bool,
    /// Shift held.
    pub shift: bool,
    /// Alt held. Always `false` in legacy logs.
    pub alt: bool,
    /// Character code of the key, or the code point of a text event.
    pub key_code: u32,
    /// Auto-repeat count.
    pub repeat_count: u32,
    /// Key symbol; empty for events without one.
    pub key_sym: String,
    /// Trailing strings (dropped file paths).
    pub strings: Vec<String>,
}

impl EventRecord {
    /// Record of `kind` at `(x, y)` with no modifiers or key data.
    #[must_use]
    pub const fn new(kind: RecordedEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            ctrl: false,
            shift: false,
            alt: false,
            key_code: 0,
            repeat_count: 0,
            key_sym: String::new(),
            strings: Vec::new(),
        }
    }

    /// Record of `event` as routed at cursor `position` with `modifiers`
    /// held. Modifier changes are folded into every record rather than
    /// logged on their own, so they yield `None`. So do keys without a
    /// symbol: the log writes a missing symbol as `0`, which would read
    /// back as the `0` key.
    #[must_use]
    pub fn from_input(
        event: &InputEvent,
        position: (i32, i32),
        modifiers: &ModifierTracker,
    ) -> Option<Self> {
        let kind = match event {
            InputEvent::ModifiersChanged { .. } => return None,
            InputEvent::KeyboardKey { key, .. } if key.is_empty() => {
                return None
            }
            InputEvent::MousePosition { .. } => RecordedEventKind::MouseMove,
            InputEvent::MouseButton {
                action: InputAction::Press,
                button,
            } => RecordedEventKind::ButtonPress(*button),
            InputEvent::MouseButton {
                action: InputAction::Release,
                button,
            } => RecordedEventKind::ButtonRelease(*button),
            InputEvent::MouseWheel { direction } => {
                RecordedEventKind::Wheel(*direction)
            }
            InputEvent::KeyboardKey {
                action: InputAction::Press,
                ..
            } => RecordedEventKind::KeyPress,
            InputEvent::KeyboardKey {
                action: InputAction::Release,
                ..
            } => RecordedEventKind::KeyRelease,
            InputEvent::TextCharacter { .. } => RecordedEventKind::Char,
            InputEvent::DropFiles { .. } => RecordedEventKind::DropFiles,
        };
        let (x, y) = match event {
            InputEvent::MousePosition { x, y } => (*x, *y),
            _ => position,
        };

        let mut record = Self::new(kind, x, y);
        record.ctrl = modifiers.ctrl();
        record.shift = modifiers.shift();
        record.alt = modifiers.alt();
        match event {
            InputEvent::KeyboardKey { key, .. } => {
                let mut chars = key.chars();
                if let (Some(c), None) = (chars.next(), chars.next()) {
                    record.key_code = u32::from(c);
                }
                record.key_sym.clone_from(key);
            }
            InputEvent::TextCharacter { codepoint } => {
                record.key_code = *codepoint;
            }
            InputEvent::DropFiles { paths } => {
                record.strings.clone_from(paths);
            }
            _ => {}
        }
        Some(record)
    }

    /// Input event this record replays. Modifier state and cursor position
    /// are carried separately in the record.
    #[must_use]
    pub fn to_input_event(&self) -> InputEvent {
        match self.kind {
            RecordedEventKind::MouseMove => InputEvent::MousePosition {
                x: self.x,
                y: self.y,
            },
            RecordedEventKind::ButtonPress(button) => InputEvent::MouseButton {
                action: InputAction::Press,
                button,
            },
            RecordedEventKind::ButtonRelease(button) => {
                InputEvent::MouseButton {
                    action: InputAction::Release,
                    button,
                }
            }
            RecordedEventKind::Wheel(direction) => {
                InputEvent::MouseWheel { direction }
            }
            RecordedEventKind::KeyPress => InputEvent::KeyboardKey {
                action: InputAction::Press,
                key: self.key_sym.clone(),
            },
            RecordedEventKind::KeyRelease => InputEvent::KeyboardKey {
                action: InputAction::Release,
                key: self.key_sym.clone(),
            },
            RecordedEventKind::Char => InputEvent::TextCharacter {
                codepoint: self.key_code,
            },
            RecordedEventKind::DropFiles => InputEvent::DropFiles {
                paths: self.strings.clone(),
            },
        }
    }
}

/// Render `record` as one line (no newline) in the layout of `version`.
#[must_use]
pub fn encode(record: &EventRecord, version: StreamVersion) -> String {
    let modifiers = if version.has_modifier_mask() {
        let mut mask = 0;
        if record.shift {
            mask |= SHIFT_BIT;
        }
        if record.ctrl {
            mask |= CTRL_BIT;
        }
        if record.alt {
            mask |= ALT_BIT;
        }
        mask.to_string()
    } else {
        format!("{} {}", u8::from(record.ctrl), u8::from(record.shift))
    };
    let key_sym = if record.key_sym.is_empty() {
        "0".to_owned()
    } else {
        quote_if_needed(&record.key_sym)
    };

    let mut line = format!(
        "{} {} {} {modifiers} {} {} {key_sym} {}",
        record.kind.name(),
        record.x,
        record.y,
        record.key_code,
        record.repeat_count,
        record.strings.len(),
    );
    for s in &record.strings {
        line.push(' ');
        line.push_str(&quote_if_needed(s));
    }
    line.push_str(" 0");
    line
}

/// One classified log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    /// `# StreamVersion x.y`.
    Header(StreamVersion),
    /// Empty line or any other comment.
    Comment,
    /// An event.
    Event(EventRecord),
}

/// Classify and decode `line`, reading events in the layout of `version`.
pub fn parse_line(
    line: &str,
    version: StreamVersion,
) -> Result<LogLine, DecodeError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(LogLine::Comment);
    }
    if trimmed.starts_with('#') {
        return match trimmed.strip_prefix(HEADER_PREFIX) {
            Some(v) => v.parse().map(LogLine::Header),
            None => Ok(LogLine::Comment),
        };
    }
    let record = if version.has_modifier_mask() {
        decode_current(trimmed)?
    } else {
        decode_legacy(trimmed)?
    };
    Ok(LogLine::Event(record))
}

/// Decode an event line written with a modifier bitmask.
pub fn decode_current(line: &str) -> Result<EventRecord, DecodeError> {
    let mut fields = Fields::new(line)?;
    let (kind, x, y) = fields.head()?;
    let mask: u32 = fields.number("modifiers")?;
    let mut record = EventRecord::new(kind, x, y);
    record.shift = mask & SHIFT_BIT != 0;
    record.ctrl = mask & CTRL_BIT != 0;
    record.alt = mask & ALT_BIT != 0;
    fields.tail(record)
}

/// Decode an event line written with separate ctrl and shift integers.
pub fn decode_legacy(line: &str) -> Result<EventRecord, DecodeError> {
    let mut fields = Fields::new(line)?;
    let (kind, x, y) = fields.head()?;
    let ctrl: i32 = fields.number("ctrl")?;
    let shift: i32 = fields.number("shift")?;
    let mut record = EventRecord::new(kind, x, y);
    record.ctrl = ctrl != 0;
    record.shift = shift != 0;
    fields.tail(record)
}

/// Cursor over the tokens of one event line.
struct Fields {
    tokens: std::vec::IntoIter<String>,
}

impl Fields {
    fn new(line: &str) -> Result<Self, DecodeError> {
        let tokens =
            tokenize(line).map_err(|e| DecodeError::Malformed(e.to_string()))?;
        Ok(Self {
            tokens: tokens.into_iter(),
        })
    }

    fn token(&mut self, field: &str) -> Result<String, DecodeError> {
        self.tokens
            .next()
            .ok_or_else(|| DecodeError::Malformed(format!("missing {field}")))
    }

    fn number<T: FromStr>(&mut self, field: &str) -> Result<T, DecodeError> {
        let token = self.token(field)?;
        token.parse().map_err(|_| {
            DecodeError::Malformed(format!(
                "{field} \"{token}\" is not a number"
            ))
        })
    }

    fn head(&mut self) -> Result<(RecordedEventKind, i32, i32), DecodeError> {
        let name = self.token("event name")?;
        let kind = RecordedEventKind::from_name(&name)
            .ok_or(DecodeError::UnknownEvent(name))?;
        Ok((kind, self.number("x")?, self.number("y")?))
    }

    fn tail(
        mut self,
        mut record: EventRecord,
    ) -> Result<EventRecord, DecodeError> {
        record.key_code = self.number("key code")?;
        record.repeat_count = self.number("repeat count")?;
        let key_sym = self.token("key symbol")?;
        if record.kind.is_key() || key_sym != "0" {
            record.key_sym = key_sym;
        }
        let count: usize = self.number("string count")?;
        for i in 0..count {
            record.strings.push(self.token(&format!("string {i}"))?);
        }
        // The terminating `0` is optional; anything else is not.
        match self.tokens.next().as_deref() {
            None | Some("0") => {}
            Some(extra) => {
                return Err(DecodeError::Malformed(format!(
                    "unexpected trailing \"{extra}\""
                )))
            }
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_press(sym: &str) -> EventRecord {
        let mut record = EventRecord::new(RecordedEventKind::KeyPress, 10, 20);
        record.key_sym = sym.to_owned();
        record.key_code = sym.chars().next().map_or(0, u32::from);
        record
    }

    #[test]
    fn event_names_round_trip() {
        let mut kinds = vec![
            RecordedEventKind::MouseMove,
            RecordedEventKind::KeyPress,
            RecordedEventKind::KeyRelease,
            RecordedEventKind::Char,
            RecordedEventKind::DropFiles,
        ];
        for b in BUTTONS {
            kinds.push(RecordedEventKind::ButtonPress(b));
            kinds.push(RecordedEventKind::ButtonRelease(b));
        }
        kinds.extend(WHEELS.map(RecordedEventKind::Wheel));
        for kind in kinds {
            assert_eq!(RecordedEventKind::from_name(&kind.name()), Some(kind));
        }
        assert_eq!(
            RecordedEventKind::ButtonPress(MouseButton::Left).name(),
            "LeftButtonPressEvent"
        );
        assert_eq!(
            RecordedEventKind::Wheel(WheelDirection::Forward).name(),
            "MouseWheelForwardEvent"
        );
        assert_eq!(RecordedEventKind::from_name("TimerEvent"), None);
    }

    #[test]
    fn current_layout_uses_bitmask() {
        let mut record = key_press("q");
        record.ctrl = true;
        record.alt = true;
        let line = encode(&record, StreamVersion::CURRENT);
        assert_eq!(line, "KeyPressEvent 10 20 6 113 0 q 0 0");
        assert_eq!(decode_current(&line).unwrap(), record);
    }

    #[test]
    fn legacy_layout_uses_ctrl_then_shift() {
        let mut record = key_press("L");
        record.shift = true;
        let line = encode(&record, StreamVersion::LEGACY);
        assert_eq!(line, "KeyPressEvent 10 20 0 1 76 0 L 0 0");
        assert_eq!(decode_legacy(&line).unwrap(), record);
    }

    #[test]
    fn legacy_layout_drops_alt() {
        let mut record = key_press("a");
        record.alt = true;
        let decoded =
            decode_legacy(&encode(&record, StreamVersion::LEGACY)).unwrap();
        assert!(!decoded.alt);
    }

    #[test]
    fn trailing_zero_is_optional() {
        let with = "MouseMoveEvent 5 6 0 0 0 0 0 0";
        let without = "MouseMoveEvent 5 6 0 0 0 0 0";
        assert_eq!(decode_current(with), decode_current(without));
        assert!(decode_current("MouseMoveEvent 5 6 0 0 0 0 0 7").is_err());
    }

    #[test]
    fn dropped_paths_survive_spaces() {
        let mut record = EventRecord::new(RecordedEventKind::DropFiles, 0, 0);
        record.strings =
            vec!["/tmp/my model.obj".to_owned(), "plain.stl".to_owned()];
        let line = encode(&record, StreamVersion::CURRENT);
        assert!(line.contains("\"/tmp/my model.obj\""));
        assert_eq!(decode_current(&line).unwrap(), record);
    }

    #[test]
    fn key_zero_is_kept_for_key_events_only() {
        let record = key_press("0");
        let line = encode(&record, StreamVersion::CURRENT);
        assert_eq!(decode_current(&line).unwrap().key_sym, "0");

        let moved = EventRecord::new(RecordedEventKind::MouseMove, 1, 2);
        let line = encode(&moved, StreamVersion::CURRENT);
        assert_eq!(decode_current(&line).unwrap(), moved);
    }

    #[test]
    fn parse_line_classifies() {
        let v = StreamVersion::CURRENT;
        assert_eq!(
            parse_line("# StreamVersion 1.1", v).unwrap(),
            LogLine::Header(StreamVersion::CURRENT)
        );
        assert_eq!(
            parse_line("# StreamVersion 1", v).unwrap(),
            LogLine::Header(StreamVersion { major: 1, minor: 0 })
        );
        assert_eq!(parse_line("# a comment", v).unwrap(), LogLine::Comment);
        assert_eq!(parse_line("   ", v).unwrap(), LogLine::Comment);
        assert!(matches!(
            parse_line("# StreamVersion one", v),
            Err(DecodeError::MalformedHeader(_))
        ));
        assert!(matches!(
            parse_line("BogusEvent 1 2 0 0 0 0 0", v),
            Err(DecodeError::UnknownEvent(_))
        ));
        assert!(matches!(
            parse_line("MouseMoveEvent 1", v),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn input_events_become_records() {
        let mut modifiers = ModifierTracker::default();
        let _ = modifiers.update(true, false);
        let press = InputEvent::KeyboardKey {
            action: InputAction::Press,
            key: "q".to_owned(),
        };
        let record =
            EventRecord::from_input(&press, (3, 4), &modifiers).unwrap();
        assert_eq!(record.kind, RecordedEventKind::KeyPress);
        assert_eq!((record.x, record.y, record.ctrl), (3, 4, true));
        assert_eq!((record.key_code, record.key_sym.as_str()), (113, "q"));
        assert_eq!(record.to_input_event(), press);

        let moved = InputEvent::MousePosition { x: 9, y: 8 };
        let record =
            EventRecord::from_input(&moved, (3, 4), &modifiers).unwrap();
        assert_eq!((record.x, record.y), (9, 8));

        let changed = InputEvent::ModifiersChanged {
            ctrl: false,
            shift: true,
            alt: false,
        };
        let record = EventRecord::from_input(&changed, (0, 0), &modifiers);
        assert!(record.is_none());

        let blank = InputEvent::KeyboardKey {
            action: InputAction::Press,
            key: String::new(),
        };
        let record = EventRecord::from_input(&blank, (0, 0), &modifiers);
        assert!(record.is_none());

        let zero = InputEvent::KeyboardKey {
            action: InputAction::Press,
            key: "0".to_owned(),
        };
        let record = EventRecord::from_input(&zero, (0, 0), &modifiers)
            .unwrap();
        let line = encode(&record, StreamVersion::CURRENT);
        let LogLine::Event(decoded) =
            parse_line(&line, StreamVersion::CURRENT).unwrap()
        else {
            panic!("expected an event line");
        };
        assert_eq!(decoded.to_input_event(), zero);
    }

    #[test]
    fn version_order_selects_layout() {
        assert!(StreamVersion::CURRENT.has_modifier_mask());
        assert!(!StreamVersion::LEGACY.has_modifier_mask());
        assert!(!StreamVersion { major: 1, minor: 0 }.has_modifier_mask());
        assert!(StreamVersion { major: 2, minor: 0 }.has_modifier_mask());
        assert_eq!(StreamVersion::CURRENT.header(), "# StreamVersion 1.1");
    }
}
