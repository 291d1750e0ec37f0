#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round-robin energy scheduler that decides which actor acts next.
//!
//! Every actor carries a `move_timer` and a `turn_timer`. An actor whose turn
//! timer is positive is charged by `round(turn_timer * speed)` and skipped;
//! a ready actor plans and performs one action, after which its timers are
//! drained by the action's cost. Faster actors therefore act proportionally
//! more often.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tallgrass_core::{Action, ActorId, Event, Input, Point, Status};
use tallgrass_system_movement::{next_player_action, Movement};
use tallgrass_world::{Actor, Board};
use tracing::debug;

const DEFAULT_MOVE_TIMER: i32 = 120;
const DEFAULT_TURN_TIMER: i32 = 120;
const DEFAULT_MAX_STEPS: usize = 4096;

/// Energy units charged per action and the loop's step budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    /// Energy drained from `move_timer` per unit of movement.
    pub move_timer: i32,
    /// Energy drained from `turn_timer` per turn, and the base charge.
    pub turn_timer: i32,
    /// Scheduler iterations a single tick may run before returning.
    pub max_steps: usize,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            move_timer: DEFAULT_MOVE_TIMER,
            turn_timer: DEFAULT_TURN_TIMER,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Result of attempting an action, with its cost in timer units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionOutcome {
    /// Whether the action took effect.
    pub success: bool,
    /// Movement cost in units of [`TurnConfig::move_timer`].
    pub moves: f64,
    /// Turn cost in units of [`TurnConfig::turn_timer`].
    pub turns: f64,
}

impl ActionOutcome {
    /// Failed action; still costs a turn.
    #[must_use]
    pub const fn failure() -> Self {
        Self {
            success: false,
            moves: 0.0,
            turns: 1.0,
        }
    }

    /// Successful action costing one turn.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            success: true,
            moves: 0.0,
            turns: 1.0,
        }
    }

    /// Successful action costing one turn and `moves` units of movement.
    #[must_use]
    pub const fn success_moves(moves: f64) -> Self {
        Self {
            success: true,
            moves,
            turns: 1.0,
        }
    }
}

/// Why a tick returned control to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The player is ready and no queued input maps to an action.
    AwaitingInput,
    /// The player's action failed; nothing was charged for it.
    PlayerActionFailed,
    /// The board holds no actors.
    NoActors,
    /// The step budget ran out before the player needed input.
    StepBudgetExhausted,
}

/// Turn engine driving every actor on a board.
#[derive(Debug)]
pub struct Turns {
    config: TurnConfig,
    movement: Movement,
    inputs: VecDeque<Input>,
    pending: Option<Action>,
}

impl Turns {
    /// Creates a scheduler whose random walks are seeded by `seed`.
    #[must_use]
    pub fn new(config: TurnConfig, seed: u64) -> Self {
        Self {
            config,
            movement: Movement::new(seed),
            inputs: VecDeque::new(),
            pending: None,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> TurnConfig {
        self.config
    }

    /// Queues an input for the player.
    pub fn push_input(&mut self, input: Input) {
        self.inputs.push_back(input);
    }

    /// Inputs not yet consumed by the player.
    #[must_use]
    pub fn pending_inputs(&self) -> &VecDeque<Input> {
        &self.inputs
    }

    /// Runs the scheduler until the player needs input or the step budget
    /// is spent, reporting what happened into `out`.
    ///
    /// A tick first takes queued inputs until one maps onto a player action;
    /// the player performs at most that one action during the tick.
    pub fn tick(&mut self, board: &mut Board, out: &mut Vec<Event>) -> TickOutcome {
        if self.pending.is_none() {
            self.pending = next_player_action(&mut self.inputs);
        }

        for _ in 0..self.config.max_steps {
            let Some(id) = board.active_actor() else {
                return TickOutcome::NoActors;
            };
            let actor = board.actor(id);
            if !turn_ready(actor) {
                if let Some((actor, charge)) = board.advance_actor(self.config.turn_timer) {
                    out.push(Event::ActorCharged { actor, charge });
                }
                continue;
            }

            let player = actor.is_player();
            let action = self.movement.plan(actor, &mut self.pending);
            if action == Action::WaitForInput {
                debug!(actor = id.get(), "waiting for player input");
                out.push(Event::AwaitingInput { actor: id });
                return TickOutcome::AwaitingInput;
            }

            let outcome = act(board, id, action);
            out.push(Event::ActorActed {
                actor: id,
                action,
                success: outcome.success,
            });
            if player && !outcome.success {
                debug!(actor = id.get(), ?action, "player action failed");
                return TickOutcome::PlayerActionFailed;
            }
            drain(board.actor_mut(id), &outcome, &self.config);
        }

        debug!(
            max_steps = self.config.max_steps,
            "turn loop exhausted its step budget"
        );
        TickOutcome::StepBudgetExhausted
    }
}

/// Reports whether the actor may move.
#[must_use]
pub const fn move_ready(actor: &Actor) -> bool {
    actor.move_timer() <= 0
}

/// Reports whether the actor may take its turn.
#[must_use]
pub const fn turn_ready(actor: &Actor) -> bool {
    actor.turn_timer() <= 0
}

/// Attempts `action` for the actor and reports the outcome.
///
/// Moves succeed only for single, non-zero steps onto free cells.
pub fn act(board: &mut Board, id: ActorId, action: Action) -> ActionOutcome {
    match action {
        Action::Idle => ActionOutcome::success(),
        Action::WaitForInput => ActionOutcome::failure(),
        Action::Move { step } => {
            if step == Point::ORIGIN || step.len_walking() > 1 {
                return ActionOutcome::failure();
            }
            let target = board.actor(id).pos() + step;
            if board.status(target) != Status::Free {
                return ActionOutcome::failure();
            }
            board.move_actor(id, target);
            ActionOutcome::success_moves(1.0)
        }
    }
}

/// Adds the outcome's cost to the actor's timers.
pub fn drain(actor: &mut Actor, outcome: &ActionOutcome, config: &TurnConfig) {
    let moves = (f64::from(config.move_timer) * outcome.moves).round() as i32;
    let turns = (f64::from(config.turn_timer) * outcome.turns).round() as i32;
    actor.drain(moves, turns);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallgrass_core::Glyph;
    use tallgrass_world::{ActorSeed, BoardConfig, TREE};

    fn board() -> Board {
        Board::new(
            Point::new(6, 6),
            BoardConfig {
                fov_radius: 4,
                vision_radius: 3,
            },
        )
    }

    fn rattata(pos: Point) -> ActorSeed {
        ActorSeed::pokemon("Rattata", pos, Glyph::wide('R'), 8, 1.0)
    }

    #[test]
    fn idle_always_succeeds_and_waiting_fails() {
        let mut board = board();
        let id = board.add_actor(rattata(Point::new(2, 2)));
        assert_eq!(act(&mut board, id, Action::Idle), ActionOutcome::success());
        assert_eq!(
            act(&mut board, id, Action::WaitForInput),
            ActionOutcome::failure()
        );
    }

    #[test]
    fn moves_need_a_free_single_step() {
        let mut board = board();
        let id = board.add_actor(rattata(Point::new(2, 2)));
        board.set_tile(Point::new(3, 2), &TREE);

        let blocked = act(&mut board, id, Action::Move { step: Point::new(1, 0) });
        let zero = act(&mut board, id, Action::Move { step: Point::ORIGIN });
        let leap = act(&mut board, id, Action::Move { step: Point::new(0, 2) });
        for outcome in [blocked, zero, leap] {
            assert_eq!(outcome, ActionOutcome::failure());
        }
        assert_eq!(board.actor(id).pos(), Point::new(2, 2));

        let outcome = act(&mut board, id, Action::Move { step: Point::new(0, 1) });
        assert_eq!(outcome, ActionOutcome::success_moves(1.0));
        assert_eq!(board.actor(id).pos(), Point::new(2, 3));
    }

    #[test]
    fn draining_scales_costs_by_the_timer_units() {
        let mut board = board();
        let id = board.add_actor(rattata(Point::new(2, 2)));
        let config = TurnConfig {
            move_timer: 100,
            turn_timer: 150,
            max_steps: 1,
        };
        drain(board.actor_mut(id), &ActionOutcome::success_moves(0.5), &config);
        assert_eq!(board.actor(id).move_timer(), 50);
        assert_eq!(board.actor(id).turn_timer(), 150);
        assert!(!move_ready(board.actor(id)));
        assert!(!turn_ready(board.actor(id)));
    }

    #[test]
    fn empty_boards_report_no_actors() {
        let mut board = board();
        let mut turns = Turns::new(TurnConfig::default(), 3);
        let mut events = Vec::new();
        assert_eq!(turns.tick(&mut board, &mut events), TickOutcome::NoActors);
        assert!(events.is_empty());
    }
}
