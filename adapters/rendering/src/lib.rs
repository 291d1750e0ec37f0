#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Glyph frames built from what a single actor can see.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use tallgrass_core::{ActorId, Glyph, Grid, Point};
use tallgrass_world::Board;

/// Grid of glyphs twice as wide as the board it was captured from.
///
/// Each board cell occupies two columns: its glyph sits in the first and the
/// second stays blank. Cells the point-of-view actor cannot see are blank.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    glyphs: Grid<Glyph>,
}

impl Frame {
    /// Captures the board as seen by `pov`.
    ///
    /// # Panics
    ///
    /// Panics when `pov` is not on the board.
    #[must_use]
    pub fn capture(board: &Board, pov: ActorId) -> Self {
        let size = board.size();
        let mut glyphs = Grid::new(Point::new(2 * size.x, size.y), Glyph::EMPTY);
        let vision = board.vision(pov);

        for point in board.points() {
            if board.can_see_in(&vision, point) {
                let _ = glyphs.set(column_of(point), board.tile(point).glyph());
            }
        }
        for actor in board.actors() {
            if board.can_see_in(&vision, actor.pos()) {
                let _ = glyphs.set(column_of(actor.pos()), actor.glyph());
            }
        }

        Self { glyphs }
    }

    /// Dimensions in terminal columns and rows.
    #[must_use]
    pub const fn size(&self) -> Point {
        self.glyphs.size()
    }

    /// Glyph at a frame position; blank outside the frame.
    #[must_use]
    pub fn glyph(&self, point: Point) -> Glyph {
        *self.glyphs.get(point)
    }

    /// Glyph drawn for a board cell.
    #[must_use]
    pub fn cell(&self, point: Point) -> Glyph {
        self.glyph(column_of(point))
    }

    /// Renders the frame as plain text, one line per row.
    ///
    /// Trailing blanks are trimmed; glyphs without an ASCII form print as `?`.
    #[must_use]
    pub fn to_text(&self) -> String {
        let Point {
            x: width,
            y: height,
        } = self.size();
        let mut lines = Vec::new();
        for y in 0..height {
            let line: String = (0..width)
                .map(|x| self.glyph(Point::new(x, y)).ascii().unwrap_or('?'))
                .collect();
            lines.push(line.trim_end().to_owned());
        }
        lines.join("\n")
    }
}

fn column_of(point: Point) -> Point {
    Point::new(2 * point.x, point.y)
}

/// Destination that frames are presented to.
pub trait FrameSink {
    /// Presents a single frame.
    fn present(&mut self, frame: &Frame) -> AnyResult<()>;
}

/// Writes frames as plain text separated by blank lines.
#[derive(Debug)]
pub struct TextSink<W> {
    out: W,
    frames: usize,
}

impl<W: Write> TextSink<W> {
    /// Wraps a writer.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Number of frames written so far.
    #[must_use]
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// Returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TextSink<W> {
    fn present(&mut self, frame: &Frame) -> AnyResult<()> {
        if self.frames > 0 {
            writeln!(self.out).context("failed to separate frames")?;
        }
        writeln!(self.out, "{}", frame.to_text()).context("failed to write frame")?;
        self.out.flush().context("failed to flush frame")?;
        self.frames += 1;
        Ok(())
    }
}
