#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tallgrass engine.
//!
//! This crate holds the pure geometry the rest of the engine is built on
//! (points, grids, sightlines and the field-of-vision trie) together with the
//! small value types that cross crate boundaries. The world owns terrain and
//! actors, systems decide which [`Action`] each actor attempts, and the turn
//! engine reports what happened through [`Event`] values.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

mod fov;
mod geometry;
mod los;

pub use fov::Fov;
pub use geometry::{Grid, Point};
pub use los::los;

/// Terminal color expressed as an index into the 256-color palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(u8);

impl Color {
    /// Sentinel meaning "keep the terminal's default color".
    pub const NONE: Color = Color(255);
    /// Palette black.
    pub const BLACK: Color = Color(0);
    /// Mid-gray from the grayscale ramp.
    pub const GRAY: Color = Color(16 + 216 + 5);

    /// Creates a color from a raw palette index.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        Self(index)
    }

    /// Builds a color from a hex-digit triple on the 6x6x6 color cube.
    ///
    /// `Color::rgb(0x420)` has red intensity 4/5, green 2/5 and blue 0/5.
    #[must_use]
    pub const fn rgb(code: u16) -> Self {
        let r = (code >> 8) & 0xf;
        let g = (code >> 4) & 0xf;
        let b = code & 0xf;
        Self((16 + b + 6 * g + 36 * r) as u8)
    }

    /// Raw palette index.
    #[must_use]
    pub const fn index(&self) -> u8 {
        self.0
    }
}

/// Display symbol with foreground and background colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Glyph {
    ch: u16,
    fg: Color,
    bg: Color,
}

const WIDE_OFFSET: u16 = 0xff00 - 0x20;

impl Glyph {
    /// Blank full-width cell.
    pub const EMPTY: Glyph = Glyph::wide(' ');

    /// Creates a glyph from a raw code unit and colors.
    #[must_use]
    pub const fn new(ch: u16, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }

    /// Maps a printable ASCII character into the full-width block.
    #[must_use]
    pub const fn wide(ch: char) -> Self {
        Self::wide_fg(ch, Color::NONE)
    }

    /// Full-width glyph with a foreground color.
    #[must_use]
    pub const fn wide_fg(ch: char, fg: Color) -> Self {
        Self {
            ch: ch as u16 + WIDE_OFFSET,
            fg,
            bg: Color::NONE,
        }
    }

    /// Raw code unit.
    #[must_use]
    pub const fn ch(&self) -> u16 {
        self.ch
    }

    /// Foreground color.
    #[must_use]
    pub const fn fg(&self) -> Color {
        self.fg
    }

    /// Background color.
    #[must_use]
    pub const fn bg(&self) -> Color {
        self.bg
    }

    /// Reports whether the glyph occupies two terminal columns.
    #[must_use]
    pub const fn is_wide(&self) -> bool {
        self.ch > 0xff00
    }

    /// ASCII character the glyph was built from, if any.
    #[must_use]
    pub fn ascii(&self) -> Option<char> {
        let code = if self.ch >= 0xff00 {
            self.ch - WIDE_OFFSET
        } else {
            self.ch
        };
        u8::try_from(code).ok().map(char::from)
    }
}

/// Bitset of terrain properties that matter to movement and sight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileFlags(u8);

impl TileFlags {
    /// No special properties.
    pub const NONE: TileFlags = TileFlags(0x0);
    /// Impassable and opaque.
    pub const BLOCKED: TileFlags = TileFlags(0x1);
    /// Passable but attenuates sight.
    pub const OBSCURE: TileFlags = TileFlags(0x2);

    /// Reports whether every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: TileFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for TileFlags {
    type Output = TileFlags;

    fn bitor(self, other: TileFlags) -> TileFlags {
        TileFlags(self.0 | other.0)
    }
}

/// Occupancy of a single cell as seen by movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Open terrain with nobody standing on it.
    Free,
    /// Terrain that cannot be entered.
    Blocked,
    /// Open terrain already holding an actor.
    Occupied,
}

/// Stable handle for an actor owned by the board.
///
/// Identifiers are allocated monotonically and never reused, so a stale
/// handle can never alias a newer actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// The eight compass directions a single step may take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards decreasing rows.
    North,
    /// Up and to the right.
    NorthEast,
    /// Towards increasing columns.
    East,
    /// Down and to the right.
    SouthEast,
    /// Towards increasing rows.
    South,
    /// Down and to the left.
    SouthWest,
    /// Towards decreasing columns.
    West,
    /// Up and to the left.
    NorthWest,
}

impl Direction {
    /// Every direction, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit offset travelled by a step in this direction.
    #[must_use]
    pub const fn offset(self) -> Point {
        match self {
            Self::North => Point::new(0, -1),
            Self::NorthEast => Point::new(1, -1),
            Self::East => Point::new(1, 0),
            Self::SouthEast => Point::new(1, 1),
            Self::South => Point::new(0, 1),
            Self::SouthWest => Point::new(-1, 1),
            Self::West => Point::new(-1, 0),
            Self::NorthWest => Point::new(-1, -1),
        }
    }

    /// Reports whether the step changes both coordinates.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        let offset = self.offset();
        offset.x != 0 && offset.y != 0
    }
}

/// Intent an actor submits for its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Spend the turn standing still.
    Idle,
    /// Step by the provided offset.
    Move {
        /// Offset from the actor's current cell.
        step: Point,
    },
    /// Placeholder for a player who has no queued input yet.
    WaitForInput,
}

impl Action {
    /// Convenience constructor for a single step in a compass direction.
    #[must_use]
    pub const fn step(direction: Direction) -> Self {
        Self::Move {
            step: direction.offset(),
        }
    }
}

/// Discrete input event delivered by an input adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    /// Escape key.
    Esc,
    /// Tab key.
    Tab,
    /// Enter key.
    Enter,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Right arrow.
    Right,
    /// Left arrow.
    Left,
    /// Shift+Tab.
    ShiftTab,
    /// Shift+Up arrow.
    ShiftUp,
    /// Shift+Down arrow.
    ShiftDown,
    /// Shift+Right arrow.
    ShiftRight,
    /// Shift+Left arrow.
    ShiftLeft,
    /// Printable character.
    Char(char),
}

/// Events reported by the turn engine while it advances the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// An actor attempted an action.
    ActorActed {
        /// Actor that took the turn.
        actor: ActorId,
        /// Action that was attempted.
        action: Action,
        /// Whether the action succeeded.
        success: bool,
    },
    /// An actor that was not ready had its timers charged and was skipped.
    ActorCharged {
        /// Actor whose timers were reduced.
        actor: ActorId,
        /// Amount subtracted from each positive timer.
        charge: i32,
    },
    /// The player is ready but no input is queued; the tick loop stopped.
    AwaitingInput {
        /// Player actor waiting for input.
        actor: ActorId,
    },
}

#[cfg(test)]
mod tests {
    use super::{Action, ActorId, Color, Direction, Glyph, Point, TileFlags};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn move_action_round_trips_through_bincode() {
        assert_round_trip(&Action::Move {
            step: Point::new(-1, 1),
        });
        assert_round_trip(&ActorId::new(42));
    }

    #[test]
    fn rgb_codes_map_onto_color_cube() {
        assert_eq!(Color::rgb(0x000).index(), 16);
        assert_eq!(Color::rgb(0x420).index(), 16 + 6 * 2 + 36 * 4);
        assert_eq!(Color::rgb(0x555).index(), 231);
    }

    #[test]
    fn wide_glyphs_recover_their_ascii_symbol() {
        let glyph = Glyph::wide_fg('#', Color::rgb(0x010));
        assert!(glyph.is_wide());
        assert_eq!(glyph.ascii(), Some('#'));
        assert_eq!(glyph.fg(), Color::rgb(0x010));
        assert_eq!(Glyph::EMPTY.ascii(), Some(' '));
        assert!(!Glyph::EMPTY.is_wide());
    }

    #[test]
    fn tile_flags_combine() {
        let both = TileFlags::BLOCKED | TileFlags::OBSCURE;
        assert!(both.contains(TileFlags::BLOCKED));
        assert!(both.contains(TileFlags::OBSCURE));
        assert!(!TileFlags::OBSCURE.contains(TileFlags::BLOCKED));
        assert!(TileFlags::NONE.contains(TileFlags::NONE));
    }

    #[test]
    fn directions_are_distinct_unit_steps() {
        for (index, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.offset().len_walking(), 1);
            assert_eq!(direction.is_diagonal(), index % 2 == 1);
            for other in &Direction::ALL[index + 1..] {
                assert_ne!(direction.offset(), other.offset());
            }
        }
    }
}
