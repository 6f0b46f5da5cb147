#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Maze Chase in a terminal.
//!
//! The engine ticks on its own thread. Standard input is read line by line on
//! a second thread and forwarded to the engine, while the main thread prints a
//! text frame whenever the engine requests a redraw.

mod frame;
mod input;
mod settings;

use std::{
    env,
    io::{self, BufRead, Write},
    thread,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{select, Receiver, Sender};
use maze_chase_engine::{Engine, EngineHandle};
use maze_chase_world::query;
use tracing::{info, warn};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::input::Input;

enum Signal {
    Redraw,
    Quit,
    InputClosed,
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(
            &env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default(),
        ))
        .init();

    let session = settings::Args::parse().session()?;

    let (redraw_sender, redraws) = crossbeam_channel::bounded(1);
    let engine = Engine::start_with(session.options, move || {
        let _ = redraw_sender.try_send(());
    });
    let handle = engine.handle();

    let _ = thread::Builder::new()
        .name("engine".into())
        .spawn(move || engine.run_loop())
        .context("failed to spawn engine thread")?;

    let (quit_sender, quit) = crossbeam_channel::bounded(1);
    let reader = handle.clone();
    let _ = thread::Builder::new()
        .name("stdin".into())
        .spawn(move || read_input(&reader, &quit_sender))
        .context("failed to spawn input thread")?;

    present(&handle, &redraws, quit, session.max_frames, session.frame_every)
}

/// Builds the log filter from `RUST_LOG`-style directives, logging at `info` when none are given.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Prints frames until the player quits or the frame limit is reached.
fn present(
    handle: &EngineHandle,
    redraws: &Receiver<()>,
    mut quit: Receiver<()>,
    max_frames: Option<u64>,
    frame_every: u64,
) -> Result<()> {
    let stdout = io::stdout();
    let mut ticks = 0_u64;
    let mut frames = 0_u64;

    loop {
        let signal = select! {
            recv(redraws) -> _ => Signal::Redraw,
            recv(quit) -> message => match message {
                Ok(()) => Signal::Quit,
                Err(_) => Signal::InputClosed,
            },
        };

        match signal {
            Signal::Redraw => {
                ticks += 1;
                if ticks % frame_every != 0 {
                    continue;
                }

                let text = handle.with_snapshot(frame::render);
                let mut out = stdout.lock();
                out.write_all(text.as_bytes())
                    .and_then(|()| out.write_all(b"\n"))
                    .and_then(|()| out.flush())
                    .context("failed to write frame")?;

                frames += 1;
                if max_frames.is_some_and(|limit| frames >= limit) {
                    info!(frames, "frame limit reached");
                    return Ok(());
                }
            }
            Signal::Quit => return Ok(()),
            Signal::InputClosed if max_frames.is_none() => return Ok(()),
            Signal::InputClosed => quit = crossbeam_channel::never(),
        }
    }
}

/// Forwards parsed lines to the engine until `quit` or end of input.
fn read_input(handle: &EngineHandle, quit: &Sender<()>) {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!(%error, "failed to read standard input");
                return;
            }
        };

        match input::parse(&line) {
            Ok(Some(Input::Quit)) => {
                let _ = quit.send(());
                return;
            }
            Ok(Some(input)) => {
                if let Err(error) = forward(handle, input) {
                    warn!(error = %format!("{error:#}"), "input rejected");
                }
            }
            Ok(None) => {}
            Err(error) => warn!(error = %format!("{error:#}"), "could not parse input"),
        }
    }
}

fn forward(handle: &EngineHandle, input: Input) -> Result<()> {
    match input {
        Input::Key(direction) => handle.submit_key(direction)?,
        Input::Click { x, y } => handle.submit_click(x, y, true, false)?,
        Input::Cancel => handle.submit_click(0, 0, false, true)?,
        Input::NewGame(request) => {
            let current = handle.with_snapshot(query::config).unwrap_or_default();
            handle.submit_new_game(request.resolve(current)?)?;
        }
        Input::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn log_filter_honours_a_global_level() {
        assert_eq!(log_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            log_filter("maze_chase_engine=trace").max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
