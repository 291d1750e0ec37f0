//! Interned terrain types.

use tallgrass_core::{Color, Glyph, TileFlags};

/// Terrain type shared by every cell that uses it.
///
/// Tiles are interned: the board stores `&'static Tile` per cell, so two cells
/// hold the same terrain exactly when they point at the same table entry.
#[derive(Debug, PartialEq, Eq)]
pub struct Tile {
    symbol: char,
    glyph: Glyph,
    flags: TileFlags,
    description: &'static str,
}

impl Tile {
    const fn new(symbol: char, glyph: Glyph, flags: TileFlags, description: &'static str) -> Self {
        Self {
            symbol,
            glyph,
            flags,
            description,
        }
    }

    /// Character the tile is interned under.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Glyph drawn for the tile.
    #[must_use]
    pub const fn glyph(&self) -> Glyph {
        self.glyph
    }

    /// Movement and sight properties.
    #[must_use]
    pub const fn flags(&self) -> TileFlags {
        self.flags
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Reports whether the tile stops movement and sight.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.flags.contains(TileFlags::BLOCKED)
    }

    /// Reports whether the tile attenuates sight.
    #[must_use]
    pub const fn is_obscure(&self) -> bool {
        self.flags.contains(TileFlags::OBSCURE)
    }
}

/// Short grass; open terrain.
pub static GRASS: Tile = Tile::new('.', Glyph::wide('.'), TileFlags::NONE, "grass");
/// Tall grass; walkable but limits how far one can see.
pub static TALL_GRASS: Tile = Tile::new(
    '"',
    Glyph::wide_fg('"', Color::rgb(0x231)),
    TileFlags::OBSCURE,
    "tall grass",
);
/// A tree; blocks movement and sight.
pub static TREE: Tile = Tile::new(
    '#',
    Glyph::wide_fg('#', Color::rgb(0x010)),
    TileFlags::BLOCKED,
    "a tree",
);

/// Looks up the interned tile for a type character.
#[must_use]
pub fn tile_type(symbol: char) -> Option<&'static Tile> {
    [&GRASS, &TALL_GRASS, &TREE]
        .into_iter()
        .find(|tile| tile.symbol == symbol)
}
