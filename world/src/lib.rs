#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state for the Tallgrass engine.
//!
//! The [`Board`] owns the terrain grid, every actor, the round-robin turn
//! order and the per-actor vision cache. Vision is recomputed lazily: moving
//! an actor or changing terrain only marks cache entries dirty, and the next
//! query rebuilds them from the shared field-of-vision trie.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tallgrass_core::{ActorId, Fov, Grid, Point, Status};
use tracing::trace;

mod actors;
mod layout;
mod tiles;
mod vision;

pub use actors::{Actor, ActorKind, ActorSeed};
pub use layout::{Layout, LayoutError, SPAWN_MARKER};
pub use tiles::{tile_type, Tile, GRASS, TALL_GRASS, TREE};
pub use vision::{initial_visibility, Vision, DIAGONAL_LOSS, NOT_VISIBLE, OBSCURE_LOSS};

const DEFAULT_FOV_RADIUS: i32 = 15;
const DEFAULT_VISION_RADIUS: i32 = 3;

/// Sight parameters shared by every actor on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Radius of the field-of-vision trie; nothing further is ever visible.
    pub fov_radius: i32,
    /// Distance one can see through obscuring terrain.
    pub vision_radius: i32,
}

impl BoardConfig {
    /// Vision radius clamped to at least one cell.
    #[must_use]
    pub fn vision_radius(&self) -> i32 {
        self.vision_radius.max(1)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            fov_radius: DEFAULT_FOV_RADIUS,
            vision_radius: DEFAULT_VISION_RADIUS,
        }
    }
}

/// Terrain, actors and cached vision for a single map.
#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    fov: Arc<Fov>,
    map: Grid<&'static Tile>,
    actors: Vec<Actor>,
    active: usize,
    actor_index: HashMap<ActorId, usize>,
    actor_at_pos: HashMap<Point, ActorId>,
    trainers: HashMap<ActorId, ActorId>,
    vision: RefCell<HashMap<ActorId, Rc<Vision>>>,
    recomputations: Cell<u64>,
    next_actor_id: u32,
}

impl Board {
    /// Creates a board covered in grass; reads beyond its edges see trees.
    #[must_use]
    pub fn new(size: Point, config: BoardConfig) -> Self {
        Self::with_fov(size, config, Arc::new(Fov::new(config.fov_radius)))
    }

    /// Creates a board that reuses an already built trie.
    ///
    /// # Panics
    ///
    /// Panics when the trie's radius differs from `config.fov_radius`.
    #[must_use]
    pub fn with_fov(size: Point, config: BoardConfig, fov: Arc<Fov>) -> Self {
        assert_eq!(
            fov.radius(),
            config.fov_radius.max(0),
            "shared trie radius does not match the board configuration"
        );
        let mut map = Grid::new(size, &TREE);
        map.fill(&GRASS);
        Self {
            config,
            fov,
            map,
            actors: Vec::new(),
            active: 0,
            actor_index: HashMap::new(),
            actor_at_pos: HashMap::new(),
            trainers: HashMap::new(),
            vision: RefCell::new(HashMap::new()),
            recomputations: Cell::new(0),
            next_actor_id: 0,
        }
    }

    /// Parses a board from rows of tile characters.
    ///
    /// Cells holding [`SPAWN_MARKER`] become grass and are reported in the
    /// returned layout.
    pub fn from_ascii(text: &str, config: BoardConfig) -> Result<Layout, LayoutError> {
        layout::parse(text, config)
    }

    /// Sight parameters in effect.
    #[must_use]
    pub const fn config(&self) -> BoardConfig {
        self.config
    }

    /// Trie shared by every actor's vision.
    #[must_use]
    pub fn fov(&self) -> &Arc<Fov> {
        &self.fov
    }

    /// Dimensions of the terrain grid.
    #[must_use]
    pub const fn size(&self) -> Point {
        self.map.size()
    }

    /// Reports whether the point lies on the board.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.map.contains(point)
    }

    /// Iterates over every cell in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        self.map.points()
    }

    /// Occupancy of the cell as seen by movement.
    #[must_use]
    pub fn status(&self, point: Point) -> Status {
        if self.tile(point).is_blocked() {
            Status::Blocked
        } else if self.actor_at_pos.contains_key(&point) {
            Status::Occupied
        } else {
            Status::Free
        }
    }

    /// Terrain at the point; trees beyond the edges.
    #[must_use]
    pub fn tile(&self, point: Point) -> &'static Tile {
        *self.map.get(point)
    }

    /// Replaces the terrain at `point`. Out-of-bounds writes are ignored.
    ///
    /// When the new tile's flags differ from the old one's, every clean vision
    /// entry whose current scores show the cell is marked dirty.
    pub fn set_tile(&mut self, point: Point, tile: &'static Tile) {
        if !self.map.contains(point) {
            return;
        }
        let previous = self.tile(point);
        let _ = self.map.set(point, tile);
        if previous.flags() == tile.flags() {
            return;
        }
        for (actor, vision) in self.vision.get_mut() {
            if !vision.is_dirty() && vision.can_see(point) {
                Rc::make_mut(vision).mark_dirty();
                trace!(
                    actor = actor.get(),
                    x = point.x,
                    y = point.y,
                    "terrain change dirtied vision"
                );
            }
        }
    }

    /// Resets every cell to grass and invalidates all cached vision.
    pub fn clear_all_tiles(&mut self) {
        self.map.fill(&GRASS);
        for vision in self.vision.get_mut().values_mut() {
            Rc::make_mut(vision).mark_dirty();
        }
    }

    /// Places a new actor and returns its identifier.
    ///
    /// # Panics
    ///
    /// Panics when another actor already stands on the seed's cell.
    pub fn add_actor(&mut self, seed: ActorSeed) -> ActorId {
        let pos = seed.pos;
        if let Some(existing) = self.actor_at(pos) {
            panic!("cannot add actor at {pos:?}: occupied by {existing:?}");
        }
        let id = ActorId::new(self.next_actor_id);
        self.next_actor_id += 1;
        let _ = self.actor_at_pos.insert(pos, id);
        let _ = self.actor_index.insert(id, self.actors.len());
        self.actors.push(Actor::from_seed(id, seed));
        id
    }

    /// Moves an actor to `to` and invalidates its own vision.
    ///
    /// Terrain is not checked; callers consult [`Board::status`] first.
    ///
    /// # Panics
    ///
    /// Panics when the actor is unknown or another actor occupies `to`.
    pub fn move_actor(&mut self, id: ActorId, to: Point) {
        if let Some(existing) = self.actor_at(to) {
            panic!("cannot move {id:?} to {to:?}: occupied by {existing:?}");
        }
        let actor = self.actor_slot_mut(id);
        let from = actor.pos();
        actor.set_pos(to);
        let _ = self.actor_at_pos.remove(&from);
        let _ = self.actor_at_pos.insert(to, id);
        if let Some(vision) = self.vision.get_mut().get_mut(&id) {
            Rc::make_mut(vision).mark_dirty();
        }
    }

    /// Takes an actor off the board and returns it flagged as removed.
    ///
    /// The actor's vision entry and trainer links are dropped. If the removed
    /// actor was active, the actor that followed it becomes active.
    ///
    /// # Panics
    ///
    /// Panics when the actor is unknown.
    pub fn remove_actor(&mut self, id: ActorId) -> Actor {
        let index = self.index_of(id);
        let mut actor = self.actors.remove(index);
        let _ = self.actor_index.remove(&id);
        for (slot, later) in self.actors.iter().enumerate().skip(index) {
            let _ = self.actor_index.insert(later.id(), slot);
        }
        if index < self.active {
            self.active -= 1;
        }
        if self.active >= self.actors.len() {
            self.active = 0;
        }
        let _ = self.actor_at_pos.remove(&actor.pos());
        let _ = self.vision.get_mut().remove(&id);
        let _ = self.trainers.remove(&id);
        self.trainers.retain(|_, trainer| *trainer != id);
        actor.mark_removed();
        actor
    }

    /// Charges the active actor and hands the turn to the next one.
    ///
    /// Each positive timer of the active actor drops by
    /// `round(turn_timer * speed)`. Returns the charged actor and the amount,
    /// or `None` when the board holds no actors.
    pub fn advance_actor(&mut self, turn_timer: i32) -> Option<(ActorId, i32)> {
        let count = self.actors.len();
        let actor = self.actors.get_mut(self.active)?;
        let charge = (f64::from(turn_timer) * actor.speed()).round() as i32;
        actor.charge(charge);
        let id = actor.id();
        self.active = (self.active + 1) % count;
        Some((id, charge))
    }

    /// Actor whose turn it is, if any.
    #[must_use]
    pub fn active_actor(&self) -> Option<ActorId> {
        self.actors.get(self.active).map(Actor::id)
    }

    /// Looks up an actor.
    ///
    /// # Panics
    ///
    /// Panics when the actor is unknown.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[self.index_of(id)]
    }

    /// Looks up an actor that may have been removed.
    #[must_use]
    pub fn get_actor(&self, id: ActorId) -> Option<&Actor> {
        self.actor_index.get(&id).map(|&index| &self.actors[index])
    }

    /// Mutable access to an actor's timers and health.
    ///
    /// # Panics
    ///
    /// Panics when the actor is unknown.
    pub fn actor_mut(&mut self, id: ActorId) -> &mut Actor {
        self.actor_slot_mut(id)
    }

    /// Actor standing on the cell, if any.
    #[must_use]
    pub fn actor_at(&self, point: Point) -> Option<ActorId> {
        self.actor_at_pos.get(&point).copied()
    }

    /// Every actor in round-robin order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    /// Number of actors on the board.
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Records that `pokemon` belongs to `trainer`.
    ///
    /// # Panics
    ///
    /// Panics when either actor is unknown.
    pub fn set_trainer(&mut self, pokemon: ActorId, trainer: ActorId) {
        let _ = self.index_of(pokemon);
        let _ = self.index_of(trainer);
        let _ = self.trainers.insert(pokemon, trainer);
    }

    /// Trainer that owns `pokemon`, if any.
    #[must_use]
    pub fn trainer_of(&self, pokemon: ActorId) -> Option<ActorId> {
        self.trainers.get(&pokemon).copied()
    }

    /// Vision of an actor, recomputed first if stale.
    ///
    /// The returned handle is a snapshot: later board changes never alter
    /// it, and holding it does not block queries for other actors.
    ///
    /// # Panics
    ///
    /// Panics when the actor is unknown.
    pub fn vision(&self, id: ActorId) -> Rc<Vision> {
        let pos = self.actor(id).pos();
        let mut cache = self.vision.borrow_mut();
        let vision = cache
            .entry(id)
            .or_insert_with(|| Rc::new(Vision::new(self.fov.radius())));
        if vision.is_dirty() {
            Rc::make_mut(vision).recompute(
                &self.fov,
                pos,
                self.config.vision_radius(),
                |point| self.tile(point),
            );
            self.recomputations.set(self.recomputations.get() + 1);
            trace!(actor = id.get(), x = pos.x, y = pos.y, "recomputed vision");
        }
        Rc::clone(vision)
    }

    /// Reports whether the actor can currently see the point.
    ///
    /// Cells off the board are never visible.
    #[must_use]
    pub fn can_see(&self, id: ActorId, point: Point) -> bool {
        self.can_see_in(&self.vision(id), point)
    }

    /// Remaining sight budget of the actor at the point, or [`NOT_VISIBLE`].
    #[must_use]
    pub fn visibility_at(&self, id: ActorId, point: Point) -> i32 {
        self.visibility_in(&self.vision(id), point)
    }

    /// Reports whether an already fetched vision shows the point.
    #[must_use]
    pub fn can_see_in(&self, vision: &Vision, point: Point) -> bool {
        self.contains(point) && vision.can_see(point)
    }

    /// Sight budget at the point according to an already fetched vision.
    #[must_use]
    pub fn visibility_in(&self, vision: &Vision, point: Point) -> i32 {
        if self.contains(point) {
            vision.visibility_at(point)
        } else {
            NOT_VISIBLE
        }
    }

    /// Reports whether the actor's cached vision is stale or missing.
    #[must_use]
    pub fn is_vision_dirty(&self, id: ActorId) -> bool {
        self.vision
            .borrow()
            .get(&id)
            .map_or(true, |v| v.is_dirty())
    }

    /// Number of vision recomputations performed so far.
    #[must_use]
    pub fn vision_recomputations(&self) -> u64 {
        self.recomputations.get()
    }

    fn index_of(&self, id: ActorId) -> usize {
        match self.actor_index.get(&id) {
            Some(&index) => index,
            None => panic!("unknown actor {id:?}"),
        }
    }

    fn actor_slot_mut(&mut self, id: ActorId) -> &mut Actor {
        let index = self.index_of(id);
        &mut self.actors[index]
    }
}
