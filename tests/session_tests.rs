//! Session lifecycle, placement engine and puzzle replay through the facade

use puyo_sim::core::{RandomSource, Session, SimpleRng};
use puyo_sim::engine::{apply_place, replay_solution, PlaceError, PuzzleSequence, SolutionStep};
use puyo_sim::types::{Color, ColorPair, Coord, GameAction, Orientation};

#[test]
fn test_session_lifecycle() {
    let mut session = Session::new(12345);
    assert!(!session.started());
    assert!(!session.apply_action(GameAction::Drop));

    session.start().unwrap();
    assert!(session.started());
    assert!(session.active().is_some());
    assert!(!session.is_dead());

    let next = session.next_pairs();
    assert!(session.apply_action(GameAction::Drop));
    assert_eq!(session.active().unwrap().pair(), next[0]);
}

#[test]
fn test_random_play_keeps_invariants() {
    for seed in 1..20 {
        let mut session = Session::new(seed);
        session.start().unwrap();
        let mut rng = SimpleRng::new(seed + 1000);
        let mut last_score = 0;

        for _ in 0..300 {
            if session.is_dead() {
                break;
            }
            let x = rng.next_below(6) as i8;
            let rot = [
                Orientation::Top,
                Orientation::Right,
                Orientation::Bottom,
                Orientation::Left,
            ][rng.next_below(4) as usize];

            match apply_place(&mut session, x, rot) {
                Ok(outcome) => {
                    assert_eq!(outcome.report.total_score, session.score());
                    for chain in &outcome.report.chains {
                        assert!(chain.group_sizes.iter().all(|&s| s >= 4));
                    }
                }
                Err(PlaceError::XOutOfBounds) | Err(PlaceError::ColumnFull) => {}
                Err(e) => panic!("unexpected error {e:?}"),
            }

            assert!(session.score() >= last_score);
            last_score = session.score();

            let piece = session.active().unwrap();
            let (a, c) = piece.columns();
            assert!((0..6).contains(&a) && (0..6).contains(&c));
        }
    }
}

#[test]
fn test_dead_session_refuses_placement() {
    let mut session = Session::new(1);
    session.reset_queue([ColorPair::new(Color::Red, Color::Blue); 3]);

    let mut field = "0".repeat(78);
    // (2, 11) is index 11 * 6 + 2
    field.replace_range(68..69, "9");
    session.load_field(&field).unwrap();

    assert!(session.is_dead());
    assert_eq!(
        apply_place(&mut session, 0, Orientation::Top),
        Err(PlaceError::NotPlayable)
    );
}

#[test]
fn test_restore_after_chain() {
    let mut session = Session::new(1);
    session.reset_queue([
        ColorPair::new(Color::Green, Color::Green),
        ColorPair::new(Color::Green, Color::Green),
        ColorPair::new(Color::Red, Color::Red),
    ]);

    let first = session.snapshot();
    apply_place(&mut session, 0, Orientation::Right).unwrap();
    let second = session.snapshot();
    let outcome = apply_place(&mut session, 0, Orientation::Right).unwrap();
    assert_eq!(outcome.report.chain_count(), 1);
    assert_eq!(session.score(), 40);

    session.restore(&second.field, second.score).unwrap();
    assert_eq!(session.snapshot(), second);

    session.restore(&first.field, first.score).unwrap();
    assert_eq!(session.snapshot(), first);
}

#[test]
fn test_puzzle_to_replay() {
    let puzzle = PuzzleSequence::parse("11112200000000000000").unwrap();
    puzzle.validate().unwrap();
    let pairs = puzzle.pairs();
    assert_eq!(pairs.len(), 3);

    let positions = [(0, Orientation::Right), (0, Orientation::Right), (4, Orientation::Top)];
    let steps: Vec<SolutionStep> = pairs
        .iter()
        .zip(positions)
        .map(|(pair, (axis_x, position))| SolutionStep {
            axis_color: pair.axis,
            child_color: pair.child,
            position,
            axis_x,
        })
        .collect();

    let mut session = Session::new(1);
    let outcomes = replay_solution(&mut session, &steps).unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[1].report.chain_count(), 1);
    assert_eq!(session.score(), 40);
    assert_eq!(
        session.field().grid().get(Coord::new(4, 0)),
        Some(Color::Red)
    );
    assert_eq!(session.next_pairs(), [ColorPair::EMPTY; 2]);
}

#[test]
fn test_solution_from_solver_json() {
    let json = r#"[
        {"axisColor":"3","childColor":"3","axisX":"2","position":"BOTTOM"},
        {"axisColor":"3","childColor":"3","axisX":"3","position":"BOTTOM"}
    ]"#;
    let steps: Vec<SolutionStep> = serde_json::from_str(json).unwrap();

    let mut session = Session::new(1);
    let outcomes = replay_solution(&mut session, &steps).unwrap();
    assert_eq!(outcomes[1].report.chains[0].group_sizes, vec![4]);
    assert_eq!(session.score(), 40);
}
