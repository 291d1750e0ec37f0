//! Plain-text terrain layouts.

use tallgrass_core::Point;
use thiserror::Error;

use crate::{tiles, Board, BoardConfig};

/// Marks a grass cell where an actor should be placed.
pub const SPAWN_MARKER: char = '@';

/// Board parsed from a text layout plus the spawn markers it contained.
#[derive(Debug)]
pub struct Layout {
    /// Board populated with the layout's terrain.
    pub board: Board,
    /// Cells marked with [`SPAWN_MARKER`], in reading order.
    pub spawns: Vec<Point>,
}

/// Errors raised while parsing a text layout.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The text contained no non-blank rows.
    #[error("layout contains no rows")]
    Empty,
    /// A row's width differs from the first row's.
    #[error("layout row {row} has {found} columns; expected {expected}")]
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character is neither a known tile nor the spawn marker.
    #[error("unknown tile '{symbol}' at ({x}, {y})")]
    UnknownTile {
        /// Offending character.
        symbol: char,
        /// Column of the character.
        x: i32,
        /// Row of the character.
        y: i32,
    },
    /// The layout does not fit into `i32` coordinates.
    #[error("layout of {columns}x{rows} is too large")]
    TooLarge {
        /// Number of columns.
        columns: usize,
        /// Number of rows.
        rows: usize,
    },
}

pub(crate) fn parse(text: &str, config: BoardConfig) -> Result<Layout, LayoutError> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().collect())
        .collect();

    let Some(first) = rows.first() else {
        return Err(LayoutError::Empty);
    };
    let expected = first.len();
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != expected {
            return Err(LayoutError::Ragged {
                row,
                expected,
                found: cells.len(),
            });
        }
    }

    let too_large = || LayoutError::TooLarge {
        columns: expected,
        rows: rows.len(),
    };
    let width = i32::try_from(expected).map_err(|_| too_large())?;
    let height = i32::try_from(rows.len()).map_err(|_| too_large())?;

    let mut board = Board::new(Point::new(width, height), config);
    let mut spawns = Vec::new();
    for (point, symbol) in board
        .points()
        .zip(rows.iter().flat_map(|cells| cells.iter().copied()))
        .collect::<Vec<_>>()
    {
        if symbol == SPAWN_MARKER {
            spawns.push(point);
            continue;
        }
        let tile = tiles::tile_type(symbol).ok_or(LayoutError::UnknownTile {
            symbol,
            x: point.x,
            y: point.y,
        })?;
        board.set_tile(point, tile);
    }

    Ok(Layout { board, spawns })
}
