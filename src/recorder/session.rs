//! Session log files: the writer used while recording and the line reader
//! used for playback.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::format::{encode, parse_line, EventRecord, LogLine, StreamVersion};
use crate::error::InteractError;

/// What the recorder is doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RecorderState {
    /// Neither recording nor playing.
    #[default]
    Idle,
    /// Appending routed events to a log.
    Recording,
    /// Replaying a log.
    Playing,
}

/// Open log being written.
#[derive(Debug)]
struct LogWriter {
    path: PathBuf,
    version: StreamVersion,
    out: BufWriter<File>,
}

impl LogWriter {
    fn io_error(&self, source: io::Error) -> InteractError {
        InteractError::RecorderIo {
            path: self.path.clone(),
            source,
        }
    }
}

/// Recording/playback state plus the log being written, if any.
#[derive(Debug, Default)]
pub struct SessionRecorder {
    state: RecorderState,
    writer: Option<LogWriter>,
}

impl SessionRecorder {
    /// Idle recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> RecorderState {
        self.state
    }

    /// Whether routed events are being appended.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Whether a log is being replayed.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == RecorderState::Playing
    }

    /// Path of the log being written.
    #[must_use]
    pub fn recording_path(&self) -> Option<&Path> {
        self.writer.as_ref().map(|w| w.path.as_path())
    }

    /// Create (or truncate) `path` and start recording in the layout of
    /// `version`. Missing parent directories are created. A log already
    /// being written is closed first.
    pub fn start_recording(
        &mut self,
        path: &Path,
        version: StreamVersion,
    ) -> Result<(), InteractError> {
        self.stop()?;
        let io_error = |source| InteractError::RecorderIo {
            path: path.to_path_buf(),
            source,
        };

        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let mut out = BufWriter::new(File::create(path).map_err(io_error)?);
        if version > StreamVersion::LEGACY {
            writeln!(out, "{}", version.header()).map_err(io_error)?;
        }
        out.flush().map_err(io_error)?;

        log::info!("Recorder: recording to {} (v{version})", path.display());
        self.writer = Some(LogWriter {
            path: path.to_path_buf(),
            version,
            out,
        });
        self.state = RecorderState::Recording;
        Ok(())
    }

    /// Append `record` and flush. No-op unless recording.
    pub fn write(&mut self, record: &EventRecord) -> Result<(), InteractError> {
        if self.state != RecorderState::Recording {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        let line = encode(record, writer.version);
        writeln!(writer.out, "{line}")
            .and_then(|()| writer.out.flush())
            .map_err(|e| writer.io_error(e))
    }

    /// Flush and close the log being written, returning to idle.
    pub fn stop(&mut self) -> Result<(), InteractError> {
        if self.state == RecorderState::Recording {
            self.state = RecorderState::Idle;
        }
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        log::info!("Recorder: closing {}", writer.path.display());
        writer.out.flush().map_err(|e| writer.io_error(e))
    }

    /// Enter the playing state, closing any log being written.
    pub fn begin_playback(&mut self) -> Result<(), InteractError> {
        self.stop()?;
        self.state = RecorderState::Playing;
        Ok(())
    }

    /// Leave the playing state.
    pub fn end_playback(&mut self) {
        if self.state == RecorderState::Playing {
            self.state = RecorderState::Idle;
        }
    }
}

/// Outcome of replaying a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Events routed.
    pub events: usize,
    /// Lines skipped because they could not be decoded.
    pub skipped: usize,
    /// Layout the last event was read with.
    pub version: StreamVersion,
}

/// Iterator over the events of a log.
///
/// Header lines switch the layout for the lines that follow. Lines that do
/// not decode are logged and skipped.
#[derive(Debug)]
pub struct LogReader<R> {
    reader: R,
    buf: Vec<u8>,
    version: StreamVersion,
    header_seen: bool,
    warned_no_header: bool,
    line_number: usize,
    skipped: usize,
}

impl LogReader<BufReader<File>> {
    /// Open the log at `path`.
    pub fn open(path: &Path) -> Result<Self, InteractError> {
        let file = File::open(path).map_err(|source| InteractError::RecorderIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LogReader<R> {
    /// Reader over any buffered source, starting in the legacy layout.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            version: StreamVersion::LEGACY,
            header_seen: false,
            warned_no_header: false,
            line_number: 0,
            skipped: 0,
        }
    }

    /// Layout in effect.
    #[must_use]
    pub const fn version(&self) -> StreamVersion {
        self.version
    }

    /// Lines skipped so far.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for LogReader<R> {
    type Item = EventRecord;

    fn next(&mut self) -> Option<EventRecord> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Recorder: stopped reading log: {e}");
                    return None;
                }
            }
            self.line_number += 1;

            let bytes = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf);
            let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
            let line = match std::str::from_utf8(bytes) {
                Ok(line) => line,
                Err(e) => {
                    log::warn!(
                        "Recorder: skipping line {}: {e}",
                        self.line_number
                    );
                    self.skipped += 1;
                    continue;
                }
            };

            match parse_line(line, self.version) {
                Ok(LogLine::Header(version)) => {
                    log::debug!("Recorder: stream version {version}");
                    self.version = version;
                    self.header_seen = true;
                }
                Ok(LogLine::Comment) => {}
                Ok(LogLine::Event(record)) => {
                    if !self.header_seen && !self.warned_no_header {
                        log::warn!(
                            "Recorder: StreamVersion has not been read, \
                             parsing may be incorrect"
                        );
                        self.warned_no_header = true;
                    }
                    return Some(record);
                }
                Err(e) => {
                    log::warn!(
                        "Recorder: skipping line {}: {e}",
                        self.line_number
                    );
                    self.skipped += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecordedEventKind;
    use std::io::Cursor;

    fn moved(x: i32) -> EventRecord {
        EventRecord::new(RecordedEventKind::MouseMove, x, 0)
    }

    #[test]
    fn writes_header_and_flushes_each_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/session.log");
        let mut recorder = SessionRecorder::new();
        recorder
            .start_recording(&path, StreamVersion::CURRENT)
            .unwrap();
        assert!(recorder.is_recording());
        assert_eq!(recorder.recording_path(), Some(path.as_path()));

        recorder.write(&moved(7)).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "# StreamVersion 1.1\nMouseMoveEvent 7 0 0 0 0 0 0 0\n"
        );

        recorder.stop().unwrap();
        assert_eq!(recorder.state(), RecorderState::Idle);
        recorder.write(&moved(8)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn legacy_logs_have_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.log");
        let mut recorder = SessionRecorder::new();
        recorder.start_recording(&path, StreamVersion::LEGACY).unwrap();
        recorder.write(&moved(1)).unwrap();
        recorder.stop().unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "MouseMoveEvent 1 0 0 0 0 0 0 0 0\n"
        );
    }

    #[test]
    fn missing_log_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LogReader::open(&dir.path().join("absent.log")).unwrap_err();
        assert!(matches!(err, InteractError::RecorderIo { .. }));
    }

    #[test]
    fn reader_skips_bad_lines_and_follows_headers() {
        let log = "\
# StreamVersion 1.1
MouseMoveEvent 1 0 0 0 0 0 0 0
NotAnEvent 1 2 3
# StreamVersion nope
KeyPressEvent 0 0 2 113 0 q 0 0
MouseMoveEvent 2
";
        let mut reader = LogReader::new(Cursor::new(log));
        let events: Vec<EventRecord> = reader.by_ref().collect();
        assert_eq!(events.len(), 2);
        assert!(events[1].ctrl);
        assert_eq!(reader.skipped(), 3);
        assert_eq!(reader.version(), StreamVersion::CURRENT);
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let mut log = b"# StreamVersion 1.1\r\n".to_vec();
        log.extend_from_slice(b"MouseMoveEvent 1 0 0 0 0 0 0 0\n");
        log.extend_from_slice(b"MouseMoveEvent \xff 0 0 0 0 0 0 0\n");
        log.extend_from_slice(b"MouseMoveEvent 2 0 0 0 0 0 0 0\r\n");
        log.extend_from_slice(b"MouseMoveEvent 3 0 0 0 0 0 0 0");
        let mut reader = LogReader::new(Cursor::new(log));
        let xs: Vec<i32> = reader.by_ref().map(|r| r.x).collect();
        assert_eq!(xs, [1, 2, 3]);
        assert_eq!(reader.skipped(), 1);
        assert_eq!(reader.version(), StreamVersion::CURRENT);
    }

    #[test]
    fn headerless_logs_read_as_legacy() {
        let log = "KeyPressEvent 0 0 1 0 113 0 q 0 0\n";
        let mut reader = LogReader::new(Cursor::new(log));
        let record = reader.next().unwrap();
        assert!(record.ctrl);
        assert!(!record.shift);
        assert_eq!(reader.version(), StreamVersion::LEGACY);
        assert!(reader.next().is_none());
    }

    #[test]
    fn playback_closes_active_recording() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = SessionRecorder::new();
        recorder
            .start_recording(&dir.path().join("s.log"), StreamVersion::CURRENT)
            .unwrap();
        recorder.begin_playback().unwrap();
        assert!(recorder.is_playing());
        assert!(recorder.recording_path().is_none());
        recorder.end_playback();
        assert_eq!(recorder.state(), RecorderState::Idle);
    }
}
