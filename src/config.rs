//! Command-line and environment configuration.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::types::FRAME_MS;

pub const USAGE: &str = "\
icosa - bouncing glenz vector over a checkerboard floor

Renders a spinning tetrakis hexahedron as a braille-dot wireframe,
with physics-based bouncing and squash-and-stretch deformation.

Usage: icosa [OPTIONS]

Options:
  -h, --help    Show this help message

Controls:
  Any key       Quit

Environment:
  ICOSA_FRAME_MS    Frame interval in milliseconds (default 33)
  ICOSA_MAX_FRAMES  Stop after this many frames (default: run until a key)
  RUST_LOG          Log filter; logs go to stderr (default: off)

Runs well under timeout(1):
  timeout 5 icosa
";

/// What the command line asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run,
    Help,
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Command> {
    match args.first().map(String::as_str) {
        None => Ok(Command::Run),
        Some("-h") | Some("--help") => Ok(Command::Help),
        Some(other) => Err(anyhow!("unknown option '{}'", other)),
    }
}

/// Frame pacing and run length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub frame_interval: Duration,
    /// Stop after this many frames; `None` runs until input or a signal.
    pub max_frames: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(FRAME_MS),
            max_frames: None,
        }
    }
}

impl RunConfig {
    /// Create from environment variables. Unparseable values fall back to
    /// the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("ICOSA_FRAME_MS").ok().as_deref(),
            env::var("ICOSA_MAX_FRAMES").ok().as_deref(),
        )
    }

    pub fn from_vars(frame_ms: Option<&str>, max_frames: Option<&str>) -> Self {
        let frame_ms = frame_ms
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|ms| ms.clamp(1, 1000))
            .unwrap_or(FRAME_MS);

        let max_frames = max_frames
            .and_then(|s| s.trim().parse::<u64>().ok())
            .and_then(|n| if n == 0 { None } else { Some(n) });

        Self {
            frame_interval: Duration::from_millis(frame_ms),
            max_frames,
        }
    }
}
