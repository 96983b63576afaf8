//! Bouncing glenz vector (default binary).
//!
//! Spins a tetrakis hexahedron over a checkerboard floor, drawn with braille
//! dots through a custom framebuffer renderer. Any key quits.

mod signals;

use std::io;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{debug, error, info};

use icosa::config::{parse_args, Command, RunConfig, USAGE};
use icosa::term::{query_geometry, FramePipeline, TerminalGuard, TerminalRenderer};

/// Why the frame loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitReason {
    Input,
    Signal,
    FrameLimit,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
        .format_timestamp_micros()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args) {
        Ok(Command::Help) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run) => {}
        Err(e) => {
            eprintln!("icosa: {e}");
            return ExitCode::FAILURE;
        }
    }

    let config = RunConfig::from_env();
    debug!("config: {:?}", config);

    match run(&config) {
        Ok((reason, frames)) => {
            info!("exit: {:?} after {} frames", reason, frames);
            ExitCode::SUCCESS
        }
        Err(e) => {
            // The terminal has been restored by now.
            error!("{e:#}");
            eprintln!("icosa: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &RunConfig) -> Result<(ExitReason, u64)> {
    signals::install()?;

    let geometry = query_geometry()?;
    info!(
        "terminal {}x{}, horizon row {}",
        geometry.cols(),
        geometry.rows(),
        geometry.horizon_row()
    );

    // Allocate everything before touching the terminal.
    let mut pipeline = FramePipeline::new(geometry)?;
    let renderer = TerminalRenderer::new(geometry)?;

    let mut term = TerminalGuard::enter(renderer)?;
    let result = frame_loop(&mut term, &mut pipeline, config);
    term.finish_with(result)
}

fn frame_loop(
    term: &mut TerminalGuard,
    pipeline: &mut FramePipeline,
    config: &RunConfig,
) -> Result<(ExitReason, u64)> {
    let mut frames: u64 = 0;

    loop {
        let frame_start = Instant::now();

        pipeline.advance();
        term.draw(pipeline.dots(), pipeline.floor())?;
        frames += 1;

        if config.max_frames.is_some_and(|max| frames >= max) {
            return Ok((ExitReason::FrameLimit, frames));
        }

        if wait_for_input(frame_start + config.frame_interval)? {
            return Ok((ExitReason::Input, frames));
        }
        if signals::terminate_requested() {
            return Ok((ExitReason::Signal, frames));
        }
    }
}

/// Sleep until `deadline` while watching for input. Returns `true` on a key.
fn wait_for_input(deadline: Instant) -> Result<bool> {
    loop {
        let timeout = deadline
            .checked_duration_since(Instant::now())
            .unwrap_or(Duration::ZERO);

        match event::poll(timeout) {
            Ok(true) => match event::read().context("read terminal input")? {
                Event::Key(_) | Event::Paste(_) => return Ok(true),
                // Resize and focus changes are not input.
                _ => {}
            },
            Ok(false) => return Ok(false),
            // A signal landed; let the caller check the flag.
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(false),
            Err(e) => return Err(e).context("poll terminal input"),
        }

        if signals::terminate_requested() || Instant::now() >= deadline {
            return Ok(false);
        }
    }
}
