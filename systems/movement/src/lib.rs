#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Action selection for actors: random walks for wild actors and key
//! bindings for the player.

use std::collections::VecDeque;

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tallgrass_core::{Action, Direction, Input};
use tallgrass_world::Actor;

/// Chooses the action each actor attempts on its turn.
#[derive(Debug)]
pub struct Movement {
    rng: ChaCha8Rng,
}

impl Movement {
    /// Creates a planner whose random walks replay identically for a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Plans the next action for `actor`.
    ///
    /// The player takes the action queued in `pending`, or yields
    /// [`Action::WaitForInput`] when there is none. Every other actor steps in
    /// a uniformly random compass direction.
    pub fn plan(&mut self, actor: &Actor, pending: &mut Option<Action>) -> Action {
        if actor.is_player() {
            return pending.take().unwrap_or(Action::WaitForInput);
        }
        self.wander()
    }

    /// Picks one of the eight compass steps uniformly at random.
    pub fn wander(&mut self) -> Action {
        Direction::ALL
            .choose(&mut self.rng)
            .map_or(Action::Idle, |direction| Action::step(*direction))
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Pops queued inputs until one maps onto a player action.
///
/// Inputs without a binding are discarded; inputs after the mapped one stay
/// queued.
pub fn next_player_action(inputs: &mut VecDeque<Input>) -> Option<Action> {
    while let Some(input) = inputs.pop_front() {
        if let Some(action) = player_action(input) {
            return Some(action);
        }
    }
    None
}

/// Maps a key press onto the player action it requests.
///
/// `h j k l y u b n` and the arrow keys step in the eight directions and `.`
/// waits in place.
#[must_use]
pub fn player_action(input: Input) -> Option<Action> {
    let direction = match input {
        Input::Char('.') => return Some(Action::Idle),
        Input::Char('h') | Input::Left => Direction::West,
        Input::Char('j') | Input::Down => Direction::South,
        Input::Char('k') | Input::Up => Direction::North,
        Input::Char('l') | Input::Right => Direction::East,
        Input::Char('y') => Direction::NorthWest,
        Input::Char('u') => Direction::NorthEast,
        Input::Char('b') => Direction::SouthWest,
        Input::Char('n') => Direction::SouthEast,
        _ => return None,
    };
    Some(Action::step(direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallgrass_core::Point;

    #[test]
    fn vi_keys_and_arrows_agree() {
        let pairs = [
            ('h', Input::Left),
            ('j', Input::Down),
            ('k', Input::Up),
            ('l', Input::Right),
        ];
        for (key, arrow) in pairs {
            assert_eq!(player_action(Input::Char(key)), player_action(arrow));
            assert!(player_action(arrow).is_some());
        }
    }

    #[test]
    fn diagonal_keys_step_diagonally() {
        assert_eq!(
            player_action(Input::Char('y')),
            Some(Action::Move {
                step: Point::new(-1, -1)
            })
        );
        assert_eq!(
            player_action(Input::Char('n')),
            Some(Action::Move {
                step: Point::new(1, 1)
            })
        );
    }

    #[test]
    fn period_waits_and_other_keys_are_ignored() {
        assert_eq!(player_action(Input::Char('.')), Some(Action::Idle));
        assert_eq!(player_action(Input::Char('q')), None);
        assert_eq!(player_action(Input::Tab), None);
        assert_eq!(player_action(Input::ShiftUp), None);
    }

    #[test]
    fn wandering_only_takes_single_steps() {
        let mut movement = Movement::new(7);
        for _ in 0..64 {
            match movement.wander() {
                Action::Move { step } => assert_eq!(step.len_walking(), 1),
                other => panic!("unexpected action {other:?}"),
            }
        }
    }
}
