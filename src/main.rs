//! `gazer` console driver.
//!
//! Runs console lines read from stdin against a headless interactor, one
//! line per event-loop tick. A line starting with `:` presses a bind
//! instead of running a command, e.g. `:Ctrl+P` or `:Space`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use gazer::bindings::{Bind, ModifierKeys};
use gazer::error::InteractError;
use gazer::input::{InputAction, InputEvent};
use gazer::interactor::{Interactor, NullSurface, ViewerState};
use gazer::options::Options;
use gazer::recorder::StreamVersion;
use web_time::Duration;

const USAGE: &str = "usage: gazer [--options FILE] [--save-options FILE] \
                     [--play FILE] [--record FILE [--legacy]] [--fps N] \
                     [--schema]";

#[derive(Debug)]
struct Args {
    options: Option<PathBuf>,
    save_options: Option<PathBuf>,
    play: Option<PathBuf>,
    record: Option<PathBuf>,
    legacy: bool,
    fps: f64,
    schema: bool,
}

fn parse_args() -> Result<Option<Args>, String> {
    let mut args = Args {
        options: None,
        save_options: None,
        play: None,
        record: None,
        legacy: false,
        fps: 30.0,
        schema: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next().ok_or_else(|| format!("{name} expects a value"))
        };
        match flag.as_str() {
            "--options" => args.options = Some(value("--options")?.into()),
            "--save-options" => {
                args.save_options = Some(value("--save-options")?.into());
            }
            "--play" => args.play = Some(value("--play")?.into()),
            "--record" => args.record = Some(value("--record")?.into()),
            "--legacy" => args.legacy = true,
            "--schema" => args.schema = true,
            "--fps" => {
                let text = value("--fps")?;
                args.fps = text
                    .parse::<f64>()
                    .ok()
                    .filter(|fps| *fps > 0.0 && fps.is_finite())
                    .ok_or_else(|| format!("invalid frame rate \"{text}\""))?;
            }
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unknown argument \"{other}\"")),
        }
    }
    Ok(Some(args))
}

fn print(text: &str) {
    let _ = writeln!(io::stdout().lock(), "{text}");
}

fn modifier_event(modifiers: ModifierKeys) -> InputEvent {
    let (ctrl, shift) = match modifiers {
        ModifierKeys::Ctrl => (true, false),
        ModifierKeys::Shift => (false, true),
        ModifierKeys::CtrlShift => (true, true),
        ModifierKeys::None | ModifierKeys::Any => (false, false),
    };
    InputEvent::ModifiersChanged {
        ctrl,
        shift,
        alt: false,
    }
}

/// Simulate pressing and releasing `text` as a bind.
fn press_bind(interactor: &mut Interactor, text: &str) {
    let bind = match Bind::parse(text) {
        Ok(bind) => bind,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    let key = |action| InputEvent::KeyboardKey {
        action,
        key: bind.key.clone(),
    };

    let _ = interactor.handle_event(modifier_event(bind.modifiers));
    let report = interactor.handle_event(key(InputAction::Press));
    let _ = interactor.handle_event(key(InputAction::Release));
    let _ = interactor.handle_event(modifier_event(ModifierKeys::None));

    match report {
        Some(report) => log::debug!(
            "{} ran {} commands, {} failed",
            report.bind,
            report.commands_run,
            report.failures.len()
        ),
        None => log::warn!("{bind} is not bound"),
    }
}

fn run_line(interactor: &mut Interactor, line: &str) {
    if let Some(bind) = line.trim().strip_prefix(':') {
        press_bind(interactor, bind.trim());
        return;
    }
    // Failures are logged by the registry.
    if let Ok(Some(output)) = interactor.trigger_command(line, true) {
        print(&output);
    }
}

fn run(args: &Args) -> Result<(), InteractError> {
    if args.schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| InteractError::OptionsParse(e.to_string()))?;
        print(&schema);
        return Ok(());
    }

    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let state = ViewerState::new(Box::new(options), Box::new(NullSurface));
    let mut interactor = Interactor::new(state);

    if let Some(path) = &args.play {
        let summary = interactor.play(path, args.fps)?;
        print(&format!(
            "replayed {} events, skipped {} lines",
            summary.events, summary.skipped
        ));
    }
    if let Some(path) = &args.record {
        let version = if args.legacy {
            StreamVersion::LEGACY
        } else {
            StreamVersion::CURRENT
        };
        interactor.record_with_version(path, version)?;
    }

    let mut lines = io::stdin().lock().lines();
    let interval = Duration::from_secs_f64(args.fps.recip());
    interactor.start_with_callback(interval, |interactor| {
        match lines.next() {
            Some(Ok(line)) => run_line(interactor, &line),
            Some(Err(e)) => {
                log::error!("stdin: {e}");
                interactor.request_stop();
            }
            None => interactor.request_stop(),
        }
    });
    interactor.stop_recording()?;

    if let Some(path) = &args.save_options {
        Options::from_store(interactor.state().options.as_ref()).save(path)?;
        log::info!("options saved to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print(USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            log::error!("{e}");
            log::error!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
