//! Tokenizing, fuzzy matching and bind dispatch throughput.

// criterion_group! expands to an undocumented pub fn.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gazer::command::{closest_match, tokenize, CommandRegistry};
use gazer::input::{InputAction, InputEvent};
use gazer::interactor::{Interactor, ViewerState};

fn tokenize_benchmark(c: &mut Criterion) {
    let line = r#"set model.scivis.array_name "Velocity \"magnitude\"" # note"#;
    let _ = c.bench_function("tokenize_quoted_line", |b| {
        b.iter(|| black_box(tokenize(black_box(line))))
    });
}

fn suggestion_benchmark(c: &mut Criterion) {
    let mut registry = CommandRegistry::new();
    gazer::command::register_builtins(&mut registry);
    let names = registry.command_actions();
    let _ = c.bench_function("closest_match_builtins", |b| {
        b.iter(|| {
            black_box(closest_match(
                black_box("toggle_animaton"),
                names.iter().map(String::as_str),
            ))
        })
    });
}

fn dispatch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let mut interactor = Interactor::new(ViewerState::headless());
    let _ = group.bench_function("key_press_toggle", |b| {
        b.iter(|| {
            black_box(interactor.handle_event(InputEvent::KeyboardKey {
                action: InputAction::Press,
                key: "x".to_owned(),
            }))
        })
    });

    let mut interactor = Interactor::new(ViewerState::headless());
    let _ = group.bench_function("console_set", |b| {
        b.iter(|| {
            black_box(
                interactor
                    .trigger_command("set render.line_width 2.5", false),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    tokenize_benchmark,
    suggestion_benchmark,
    dispatch_benchmark
);
criterion_main!(benches);
