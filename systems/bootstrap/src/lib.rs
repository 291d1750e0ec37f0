#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! World generation: cave-like terrain from cellular automata, the player
//! trainer at the centre and a handful of wild Pokemon.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tallgrass_core::{ActorId, Glyph, Grid, Point, Status};
use tallgrass_world::{ActorSeed, Board, BoardConfig, TALL_GRASS, TREE};
use thiserror::Error;
use tracing::debug;

const MIN_SIZE: i32 = 3;
const MAX_ATTEMPTS: u32 = 1000;

const PLAYER_NAME: &str = "Red";
const PLAYER_HP: i32 = 20;
const PLAYER_SPEED: f64 = 1.0;

struct Species {
    name: &'static str,
    symbol: char,
    hp: i32,
    speed: f64,
}

static ROSTER: [Species; 4] = [
    Species {
        name: "Pidgey",
        symbol: 'P',
        hp: 12,
        speed: 1.0,
    },
    Species {
        name: "Rattata",
        symbol: 'R',
        hp: 8,
        speed: 1.5,
    },
    Species {
        name: "Caterpie",
        symbol: 'C',
        hp: 14,
        speed: 0.5,
    },
    Species {
        name: "Oddish",
        symbol: 'O',
        hp: 12,
        speed: 0.75,
    },
];

/// Parameters of the generated world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Side length of the square board.
    pub size: i32,
    /// Seed for every random choice made while generating.
    pub seed: u64,
    /// Percentage of cells seeded as trees before smoothing.
    pub wall_density: u32,
    /// Percentage of cells seeded as tall grass before smoothing.
    pub grass_density: u32,
    /// Smoothing rounds applied to each automaton layer.
    pub automata_rounds: u32,
    /// Number of wild Pokemon to place.
    pub pokemon: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 31,
            seed: 0,
            wall_density: 45,
            grass_density: 45,
            automata_rounds: 3,
            pokemon: 3,
        }
    }
}

/// Errors raised while generating a world.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BootstrapError {
    /// The board is too small to hold an interior.
    #[error("board size {size} is below the minimum of 3")]
    TooSmall {
        /// Requested side length.
        size: i32,
    },
    /// No generated layout left the starting cell open.
    #[error("no layout with a free starting cell after {attempts} attempts")]
    NoFreeStart {
        /// Layouts tried.
        attempts: u32,
    },
}

/// Generated board together with the actors placed on it.
#[derive(Debug)]
pub struct Generated {
    /// Populated board.
    pub board: Board,
    /// Player trainer at the centre of the board.
    pub player: ActorId,
    /// Wild Pokemon in placement order.
    pub wild: Vec<ActorId>,
}

/// Builds new worlds from a [`Config`].
#[derive(Debug, Default)]
pub struct Bootstrap {
    config: Config,
}

impl Bootstrap {
    /// Creates a generator for the provided parameters.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Parameters used by [`Bootstrap::generate`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Generates terrain until the centre cell is free, then places the
    /// player there and scatters wild Pokemon over the remaining free cells.
    pub fn generate(&self, board_config: BoardConfig) -> Result<Generated, BootstrapError> {
        let config = &self.config;
        if config.size < MIN_SIZE {
            return Err(BootstrapError::TooSmall { size: config.size });
        }

        let size = Point::new(config.size, config.size);
        let start = Point::new(size.x / 2, size.y / 2);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut board = Board::new(size, board_config);

        let mut attempts = 0;
        loop {
            attempts += 1;
            board.clear_all_tiles();
            let trees = automata(size, config.wall_density, config.automata_rounds, &mut rng);
            let grass = automata(size, config.grass_density, config.automata_rounds, &mut rng);
            for point in board.points().collect::<Vec<_>>() {
                if *trees.get(point) {
                    board.set_tile(point, &TREE);
                } else if *grass.get(point) {
                    board.set_tile(point, &TALL_GRASS);
                }
            }
            if board.status(start) == Status::Free {
                break;
            }
            if attempts >= MAX_ATTEMPTS {
                return Err(BootstrapError::NoFreeStart { attempts });
            }
        }

        let player = board.add_actor(ActorSeed::trainer(
            PLAYER_NAME,
            start,
            true,
            PLAYER_HP,
            PLAYER_SPEED,
        ));
        let wild = scatter_wild(&mut board, config.pokemon, &mut rng);
        debug!(attempts, wild = wild.len(), "generated board");

        Ok(Generated {
            board,
            player,
            wild,
        })
    }
}

/// Runs one cave-generating cellular automaton.
///
/// The border starts solid and every other cell is seeded solid with
/// `density` percent probability. Each round, an interior cell becomes solid
/// when at least five of its eight neighbours are solid or, during the first
/// two rounds, when almost nothing within two steps is.
pub fn automata<R: Rng>(size: Point, density: u32, rounds: u32, rng: &mut R) -> Grid<bool> {
    let mut result = Grid::new(size, false);
    for point in result.points().collect::<Vec<_>>() {
        let border = point.x == 0 || point.y == 0 || point.x == size.x - 1 || point.y == size.y - 1;
        if border || rng.gen_range(0..100) < density {
            let _ = result.set(point, true);
        }
    }

    for round in 0..rounds {
        let mut next = result.clone();
        for y in 1..size.y - 1 {
            for x in 1..size.x - 1 {
                let (mut adj1, mut adj2) = (0, 0);
                for dy in -2_i32..=2 {
                    for dx in -2_i32..=2 {
                        if (dx == 0 && dy == 0) || dx.abs().min(dy.abs()) == 2 {
                            continue;
                        }
                        if !*result.get(Point::new(x + dx, y + dy)) {
                            continue;
                        }
                        if dx.abs().max(dy.abs()) <= 1 {
                            adj1 += 1;
                        }
                        adj2 += 1;
                    }
                }
                let solid = adj1 >= 5 || (round < 2 && adj2 <= 1);
                let _ = next.set(Point::new(x, y), solid);
            }
        }
        result = next;
    }
    result
}

fn scatter_wild<R: Rng>(board: &mut Board, count: usize, rng: &mut R) -> Vec<ActorId> {
    let free: Vec<Point> = board
        .points()
        .filter(|point| board.status(*point) == Status::Free)
        .collect();
    let chosen: Vec<Point> = free.choose_multiple(rng, count).copied().collect();

    let mut wild = Vec::with_capacity(chosen.len());
    for pos in chosen {
        let Some(species) = ROSTER.choose(rng) else {
            break;
        };
        wild.push(board.add_actor(ActorSeed::pokemon(
            species.name,
            pos,
            Glyph::wide(species.symbol),
            species.hp,
            species.speed,
        )));
    }
    wild
}
