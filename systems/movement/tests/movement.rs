use std::collections::{HashSet, VecDeque};

use tallgrass_core::{Action, ActorId, Glyph, Input, Point};
use tallgrass_system_movement::{next_player_action, Movement};
use tallgrass_world::{ActorSeed, Board, BoardConfig};

fn board_with_actors() -> (Board, ActorId, ActorId) {
    let mut board = Board::new(Point::new(8, 8), BoardConfig::default());
    let player = board.add_actor(ActorSeed::trainer("Red", Point::new(3, 3), true, 20, 1.0));
    let wild = board.add_actor(ActorSeed::pokemon(
        "Rattata",
        Point::new(5, 5),
        Glyph::wide('R'),
        8,
        1.0,
    ));
    (board, player, wild)
}

#[test]
fn unmapped_inputs_are_skipped_and_the_rest_stay_queued() {
    let mut inputs = VecDeque::from([Input::Tab, Input::Char('l'), Input::Char('h')]);

    assert_eq!(
        next_player_action(&mut inputs),
        Some(Action::Move {
            step: Point::new(1, 0)
        })
    );
    assert_eq!(inputs, VecDeque::from([Input::Char('h')]));
}

#[test]
fn queues_without_bindings_are_drained() {
    let mut inputs = VecDeque::from([Input::Esc, Input::Char('q')]);
    assert_eq!(next_player_action(&mut inputs), None);
    assert!(inputs.is_empty());
}

#[test]
fn player_takes_the_pending_action_once() {
    let (board, player, _) = board_with_actors();
    let mut movement = Movement::new(1);
    let mut pending = Some(Action::Idle);

    assert_eq!(movement.plan(board.actor(player), &mut pending), Action::Idle);
    assert_eq!(pending, None);
    assert_eq!(
        movement.plan(board.actor(player), &mut pending),
        Action::WaitForInput
    );
}

#[test]
fn wild_actors_leave_the_pending_action_alone() {
    let (board, _, wild) = board_with_actors();
    let mut movement = Movement::new(99);
    let mut pending = Some(Action::Idle);
    let mut steps = HashSet::new();

    for _ in 0..200 {
        if let Action::Move { step } = movement.plan(board.actor(wild), &mut pending) {
            let _ = steps.insert(step);
        }
    }

    assert_eq!(steps.len(), 8);
    assert_eq!(pending, Some(Action::Idle));
}

#[test]
fn equal_seeds_wander_identically() {
    let mut first = Movement::new(42);
    let mut second = Movement::new(42);
    let a: Vec<Action> = (0..32).map(|_| first.wander()).collect();
    let b: Vec<Action> = (0..32).map(|_| second.wander()).collect();
    assert_eq!(a, b);
}
