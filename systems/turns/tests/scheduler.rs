use tallgrass_core::{Action, ActorId, Event, Glyph, Input, Point};
use tallgrass_system_turns::{act, drain, ActionOutcome, TickOutcome, TurnConfig, Turns};
use tallgrass_world::{ActorSeed, Board, BoardConfig};

fn open_board(size: Point) -> Board {
    Board::new(
        size,
        BoardConfig {
            fov_radius: 5,
            vision_radius: 3,
        },
    )
}

fn wild(pos: Point, speed: f64) -> ActorSeed {
    ActorSeed::pokemon("Rattata", pos, Glyph::wide('R'), 8, speed)
}

fn acted_by(events: &[Event], id: ActorId) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::ActorActed { actor, .. } if *actor == id))
        .count()
}

#[test]
fn double_speed_actors_act_twice_as_often() {
    let mut board = open_board(Point::new(20, 20));
    let fast = board.add_actor(wild(Point::new(3, 3), 2.0));
    let slow = board.add_actor(wild(Point::new(15, 15), 1.0));
    let mut turns = Turns::new(
        TurnConfig {
            max_steps: 5000,
            ..TurnConfig::default()
        },
        11,
    );
    let mut events = Vec::new();

    assert_eq!(
        turns.tick(&mut board, &mut events),
        TickOutcome::StepBudgetExhausted
    );

    let fast_actions = acted_by(&events, fast);
    let slow_actions = acted_by(&events, slow);
    assert!(slow_actions > 900, "slow actor acted {slow_actions} times");
    assert!(
        fast_actions * 10 >= slow_actions * 19 && fast_actions * 10 <= slow_actions * 21,
        "expected roughly 2:1, got {fast_actions}:{slow_actions}"
    );
}

#[test]
fn failed_wild_moves_still_cost_a_turn() {
    let mut board = open_board(Point::new(1, 1));
    let boxed_in = board.add_actor(wild(Point::ORIGIN, 1.0));
    let mut turns = Turns::new(
        TurnConfig {
            max_steps: 1,
            ..TurnConfig::default()
        },
        5,
    );
    let mut events = Vec::new();

    assert_eq!(
        turns.tick(&mut board, &mut events),
        TickOutcome::StepBudgetExhausted
    );

    assert!(matches!(
        events.as_slice(),
        [Event::ActorActed { actor, success: false, .. }] if *actor == boxed_in
    ));
    let actor = board.actor(boxed_in);
    assert_eq!(actor.pos(), Point::ORIGIN);
    assert_eq!(actor.turn_timer(), 120);
    assert_eq!(actor.move_timer(), 0);
}

#[test]
fn moving_onto_an_occupied_cell_fails_and_costs_a_turn() {
    let mut board = open_board(Point::new(4, 4));
    let mover = board.add_actor(wild(Point::new(1, 1), 1.0));
    let _blocker = board.add_actor(wild(Point::new(2, 1), 1.0));
    let config = TurnConfig::default();

    let outcome = act(
        &mut board,
        mover,
        Action::Move {
            step: Point::new(1, 0),
        },
    );
    assert_eq!(outcome, ActionOutcome::failure());
    assert_eq!(board.actor(mover).pos(), Point::new(1, 1));

    drain(board.actor_mut(mover), &outcome, &config);
    assert_eq!(board.actor(mover).turn_timer(), config.turn_timer);
    assert_eq!(board.actor(mover).move_timer(), 0);
}

#[test]
fn player_moves_then_waits_for_more_input() {
    let mut board = open_board(Point::new(6, 6));
    let player = board.add_actor(ActorSeed::trainer("Red", Point::new(2, 2), true, 20, 1.0));
    let mut turns = Turns::new(TurnConfig::default(), 1);
    let mut events = Vec::new();
    turns.push_input(Input::Char('l'));

    assert_eq!(
        turns.tick(&mut board, &mut events),
        TickOutcome::AwaitingInput
    );

    assert_eq!(
        events,
        vec![
            Event::ActorActed {
                actor: player,
                action: Action::Move {
                    step: Point::new(1, 0)
                },
                success: true,
            },
            Event::ActorCharged {
                actor: player,
                charge: 120,
            },
            Event::AwaitingInput { actor: player },
        ]
    );
    assert_eq!(board.actor(player).pos(), Point::new(3, 2));
    assert!(turns.pending_inputs().is_empty());
}

#[test]
fn failed_player_actions_halt_without_charging() {
    let mut board = open_board(Point::new(1, 1));
    let player = board.add_actor(ActorSeed::trainer("Red", Point::ORIGIN, true, 20, 1.0));
    let mut turns = Turns::new(TurnConfig::default(), 1);
    let mut events = Vec::new();
    turns.push_input(Input::Char('h'));
    turns.push_input(Input::Char('.'));

    assert_eq!(
        turns.tick(&mut board, &mut events),
        TickOutcome::PlayerActionFailed
    );
    assert_eq!(board.actor(player).turn_timer(), 0);
    assert_eq!(board.actor(player).move_timer(), 0);
    assert_eq!(turns.pending_inputs().len(), 1);

    events.clear();
    assert_eq!(
        turns.tick(&mut board, &mut events),
        TickOutcome::AwaitingInput
    );
    assert_eq!(acted_by(&events, player), 1);
    assert!(turns.pending_inputs().is_empty());
}

#[test]
fn ready_player_blocks_everyone_behind_it() {
    let mut board = open_board(Point::new(6, 6));
    let player = board.add_actor(ActorSeed::trainer("Red", Point::new(1, 1), true, 20, 1.0));
    let other = board.add_actor(wild(Point::new(4, 4), 1.0));
    let mut turns = Turns::new(TurnConfig::default(), 9);
    let mut events = Vec::new();

    assert_eq!(
        turns.tick(&mut board, &mut events),
        TickOutcome::AwaitingInput
    );
    assert_eq!(events, vec![Event::AwaitingInput { actor: player }]);
    assert_eq!(board.actor(other).turn_timer(), 0);
}
