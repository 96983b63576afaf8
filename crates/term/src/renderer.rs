//! TerminalRenderer: composites dots over the floor and flushes frames.
//!
//! Frames are encoded into a reused byte buffer as crossterm commands and
//! written with a single `write_all` + `flush`, so a frame never reaches the
//! terminal half-built.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use anyhow::{Context, Result};
use log::{debug, warn};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{braille, DotBuffer};
use crate::floor::{FloorField, Tile};
use crate::types::{Geometry, SetupError};

const DARK_TILE: Color = Color::AnsiValue(236);
const LIGHT_TILE: Color = Color::AnsiValue(252);
const DOT_COLOR: Color = Color::Cyan;

/// Worst-case encoded bytes per cell (style change plus a 3-byte glyph).
const BYTES_PER_CELL: usize = 20;
/// Per-row overhead: trailing reset and line break.
const BYTES_PER_ROW: usize = 16;

/// How one cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    Sky,
    DarkTile,
    LightTile,
    Dots,
}

impl From<Tile> for CellStyle {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Sky => CellStyle::Sky,
            Tile::Dark => CellStyle::DarkTile,
            Tile::Light => CellStyle::LightTile,
        }
    }
}

#[inline]
fn cell_style(mask: u8, tile: Tile) -> CellStyle {
    if mask != 0 {
        CellStyle::Dots
    } else {
        tile.into()
    }
}

/// Query the terminal size and validate it.
pub fn query_geometry() -> Result<Geometry, SetupError> {
    let (cols, rows) =
        terminal::size().map_err(|e| SetupError::GeometryUnavailable(e.to_string()))?;
    Geometry::new(cols, rows)
}

/// Upper bound of one encoded frame for `geometry`.
pub fn frame_capacity(geometry: Geometry) -> usize {
    geometry.rows() as usize * (geometry.cols() as usize * BYTES_PER_CELL + BYTES_PER_ROW) + 64
}

/// Visit every style run, row by row.
///
/// `f(row, start_col, len, style)` is called once per maximal run of equally
/// styled cells. Runs never continue across rows.
pub fn for_each_style_run(
    dots: &DotBuffer,
    floor: &FloorField,
    mut f: impl FnMut(u16, u16, u16, CellStyle) -> Result<()>,
) -> Result<()> {
    let w = dots.cols().min(floor.cols()) as usize;
    let h = dots.rows().min(floor.rows());

    for y in 0..h {
        let masks = &dots.cells()[y as usize * dots.cols() as usize..][..w];
        let tiles = floor.row(y);

        let mut start = 0;
        let mut current = cell_style(masks[0], tiles[0]);
        for x in 1..w {
            let style = cell_style(masks[x], tiles[x]);
            if style != current {
                f(y, start as u16, (x - start) as u16, current)?;
                start = x;
                current = style;
            }
        }
        f(y, start as u16, (w - start) as u16, current)?;
    }

    Ok(())
}

/// Encode one frame into `out`.
///
/// Cursor home, then each row's cells with a style command emitted only when
/// the style changes from the previous cell in that row, a reset closing the
/// row and `\r\n` between rows.
pub fn encode_frame_into(dots: &DotBuffer, floor: &FloorField, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;

    let w = dots.cols().min(floor.cols());
    let last_row = dots.rows().min(floor.rows()).saturating_sub(1);
    let stride = dots.cols() as usize;
    for_each_style_run(dots, floor, |y, x, len, style| {
        apply_style_into(out, style)?;

        match style {
            CellStyle::Dots => {
                let start = y as usize * stride + x as usize;
                for &mask in &dots.cells()[start..start + len as usize] {
                    out.queue(Print(braille(mask)))?;
                }
            }
            _ => {
                for _ in 0..len {
                    out.queue(Print(' '))?;
                }
            }
        }

        if x + len == w {
            out.queue(ResetColor)?;
            if y < last_row {
                out.queue(Print("\r\n"))?;
            }
        }
        Ok(())
    })
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    match style {
        CellStyle::Sky => {
            out.queue(ResetColor)?;
        }
        CellStyle::DarkTile => {
            out.queue(SetBackgroundColor(DARK_TILE))?;
        }
        CellStyle::LightTile => {
            out.queue(SetBackgroundColor(LIGHT_TILE))?;
        }
        CellStyle::Dots => {
            out.queue(ResetColor)?;
            out.queue(SetForegroundColor(DOT_COLOR))?;
        }
    }
    Ok(())
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    /// Create a renderer whose frame buffer is sized for `geometry` up front.
    pub fn new(geometry: Geometry) -> Result<Self, SetupError> {
        let capacity = frame_capacity(geometry);
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| SetupError::OutOfMemory {
                what: "render buffer",
                bytes: capacity,
            })?;
        Ok(Self {
            stdout: io::stdout(),
            buf,
        })
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Composite and emit one frame.
    pub fn draw(&mut self, dots: &DotBuffer, floor: &FloorField) -> Result<()> {
        self.buf.clear();
        encode_frame_into(dots, floor, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.buf)
            .context("write frame to stdout")?;
        self.stdout.flush().context("flush stdout")?;
        Ok(())
    }
}

/// Holds the terminal in full-screen mode and restores it exactly once.
///
/// Restoration runs from [`TerminalGuard::finish`] or, failing that, from
/// `Drop`, which covers early returns and unwinding panics.
pub struct TerminalGuard {
    renderer: TerminalRenderer,
    active: bool,
}

impl TerminalGuard {
    /// Switch the terminal into full-screen mode.
    ///
    /// If entering fails halfway, whatever was already switched is restored
    /// before the error is returned.
    pub fn enter(renderer: TerminalRenderer) -> Result<Self> {
        let mut guard = Self {
            renderer,
            active: true,
        };
        guard.renderer.enter()?;
        debug!("terminal: entered alternate screen");
        Ok(guard)
    }

    /// Restore the terminal and report any failure.
    pub fn finish(mut self) -> Result<()> {
        self.restore()
    }

    /// Restore the terminal, then hand back `result`.
    ///
    /// An error already in `result` wins over a restore failure, which is
    /// only logged in that case.
    pub fn finish_with<T>(self, result: Result<T>) -> Result<T> {
        keep_first_error(result, self.finish())
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        debug!("terminal: restoring");
        self.renderer.exit()
    }
}

/// Combine a run result with the teardown that followed it.
pub fn keep_first_error<T>(result: Result<T>, teardown: Result<()>) -> Result<T> {
    match (result, teardown) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(teardown)) => {
            warn!("terminal restore failed: {teardown:#}");
            Err(e)
        }
    }
}

impl Deref for TerminalGuard {
    type Target = TerminalRenderer;

    fn deref(&self) -> &Self::Target {
        &self.renderer
    }
}

impl DerefMut for TerminalGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.renderer
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("terminal restore failed: {e:#}");
        }
    }
}
