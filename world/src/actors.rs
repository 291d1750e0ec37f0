//! Actors that inhabit the board.

use tallgrass_core::{ActorId, Glyph, Point};

/// Content-specific payload distinguishing the kinds of actor.
#[derive(Clone, Debug, PartialEq)]
pub enum ActorKind {
    /// A human trainer; exactly one may be flagged as the player.
    Trainer {
        /// Trainer's display name.
        name: String,
        /// Whether input events drive this trainer.
        player: bool,
    },
    /// A Pokemon, wild or owned by a trainer.
    Pokemon {
        /// Species name.
        species: String,
    },
}

/// Everything required to place a new actor onto the board.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorSeed {
    /// Starting cell.
    pub pos: Point,
    /// Display glyph.
    pub glyph: Glyph,
    /// Maximum (and starting) health.
    pub hp: i32,
    /// Speed multiplier; 1.0 acts once per round, 2.0 twice.
    pub speed: f64,
    /// Kind-specific payload.
    pub kind: ActorKind,
}

impl ActorSeed {
    /// Seed for a trainer drawn as `@`.
    #[must_use]
    pub fn trainer(name: impl Into<String>, pos: Point, player: bool, hp: i32, speed: f64) -> Self {
        Self {
            pos,
            glyph: Glyph::wide('@'),
            hp,
            speed,
            kind: ActorKind::Trainer {
                name: name.into(),
                player,
            },
        }
    }

    /// Seed for a Pokemon of the given species.
    #[must_use]
    pub fn pokemon(species: impl Into<String>, pos: Point, glyph: Glyph, hp: i32, speed: f64) -> Self {
        Self {
            pos,
            glyph,
            hp,
            speed,
            kind: ActorKind::Pokemon {
                species: species.into(),
            },
        }
    }
}

/// Actor owned by the board.
///
/// Position is only mutated through the board so the position index and the
/// vision cache stay coherent; timers are public-mutable through the board's
/// `actor_mut` for the turn engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    id: ActorId,
    pos: Point,
    glyph: Glyph,
    move_timer: i32,
    turn_timer: i32,
    speed: f64,
    max_hp: i32,
    cur_hp: i32,
    removed: bool,
    kind: ActorKind,
}

impl Actor {
    pub(crate) fn from_seed(id: ActorId, seed: ActorSeed) -> Self {
        Self {
            id,
            pos: seed.pos,
            glyph: seed.glyph,
            move_timer: 0,
            turn_timer: 0,
            speed: seed.speed,
            max_hp: seed.hp,
            cur_hp: seed.hp,
            removed: false,
            kind: seed.kind,
        }
    }

    /// Board-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Current cell.
    #[must_use]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    /// Display glyph.
    #[must_use]
    pub const fn glyph(&self) -> Glyph {
        self.glyph
    }

    /// Energy owed before the actor may move again; ready at or below zero.
    #[must_use]
    pub const fn move_timer(&self) -> i32 {
        self.move_timer
    }

    /// Energy owed before the actor may act again; ready at or below zero.
    #[must_use]
    pub const fn turn_timer(&self) -> i32 {
        self.turn_timer
    }

    /// Speed multiplier applied when charging timers.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Maximum health.
    #[must_use]
    pub const fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Current health.
    #[must_use]
    pub const fn cur_hp(&self) -> i32 {
        self.cur_hp
    }

    /// Whether the actor has been taken off the board.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.removed
    }

    /// Kind-specific payload.
    #[must_use]
    pub const fn kind(&self) -> &ActorKind {
        &self.kind
    }

    /// Reports whether input events drive this actor.
    #[must_use]
    pub fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Trainer { player: true, .. })
    }

    /// Reduces each positive timer by `amount`.
    pub fn charge(&mut self, amount: i32) {
        if self.move_timer > 0 {
            self.move_timer -= amount;
        }
        if self.turn_timer > 0 {
            self.turn_timer -= amount;
        }
    }

    /// Adds the cost of a completed action to the timers.
    pub fn drain(&mut self, moves: i32, turns: i32) {
        self.move_timer = self.move_timer.saturating_add(moves);
        self.turn_timer = self.turn_timer.saturating_add(turns);
    }

    /// Sets current health, clamped to `0..=max_hp`.
    pub fn set_cur_hp(&mut self, hp: i32) {
        self.cur_hp = hp.clamp(0, self.max_hp.max(0));
    }

    pub(crate) fn set_pos(&mut self, pos: Point) {
        self.pos = pos;
    }

    pub(crate) fn mark_removed(&mut self) {
        self.removed = true;
    }
}
