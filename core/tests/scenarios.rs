use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use sapper_core::*;

fn open_cells(board: &Board) -> BTreeSet<Coord2> {
    board
        .iter()
        .filter(|(_, cell)| cell.is_open)
        .map(|(coords, _)| coords)
        .collect()
}

/// Empty component reachable from `start` plus its numbered border.
fn expected_region(board: &Board, start: Coord2) -> BTreeSet<Coord2> {
    let mut region = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(coords) = queue.pop_front() {
        if !board[coords].value.is_empty() {
            continue;
        }
        for pos in board.iter_neighbors(coords) {
            if region.insert(pos) {
                queue.push_back(pos);
            }
        }
    }
    region
}

#[test]
fn empty_click_opens_component_and_border() {
    for seed in 0..20 {
        let config = Level::Medium.config();
        let (board, bombs) = RandomBoardGenerator::new(seed).generate(config).unwrap();
        let Some((start, _)) = board.iter().find(|(_, cell)| cell.value.is_empty()) else {
            continue;
        };
        let expected = expected_region(&board, start);

        let mut store = CellStore::new(board);
        let summary = RevealEngine::reveal(&mut store, &bombs, [start]);

        assert!(!summary.detonated);
        assert_eq!(open_cells(store.snapshot()), expected, "seed {seed}");
        assert!(expected.iter().all(|&coords| !bombs.contains(coords)));
    }
}

#[test]
fn ten_by_ten_safe_region_opens_in_one_reveal() {
    let bombs: Vec<Coord2> = (0..5).flat_map(|x| [(x, 0), (x, 1)]).collect();
    let config = GameConfig::new((10, 10), 10).unwrap();
    let wins = Rc::new(RefCell::new(Vec::new()));
    let observer = {
        let wins = wins.clone();
        Callbacks::new(move |secs| wins.borrow_mut().push(secs), |_| {})
    };
    let clock = ManualClock::new();
    let mut session = SessionController::with_parts(
        SessionConfig::new(config).with_observer(observer),
        clock.clone(),
        FixedBoardGenerator::new(bombs.clone()),
    )
    .unwrap();

    session.open((9, 9));
    while session.is_revealing() {
        clock.advance(session.timings().open_delay_ms);
        session.poll();
    }

    let board = session.snapshot();
    assert_eq!(board.open_count(), 90);
    assert!(bombs.iter().all(|&coords| !board[coords].is_open));
    assert_eq!(session.outcome(), GameOutcome::Won);
    assert_eq!(board.flag_count(), 10);

    clock.advance(session.timings().settle_ms);
    session.poll();
    assert_eq!(*wins.borrow(), vec![0]);
}

#[test]
fn two_cell_board_wins_on_first_click() {
    let config = GameConfig::new((2, 1), 1).unwrap();
    let clock = ManualClock::new();
    let mut session = SessionController::with_parts(
        SessionConfig::new(config),
        clock,
        FixedBoardGenerator::new([(0, 0)]),
    )
    .unwrap();

    session.handle_pointer((1, 0), PointerEvent::MouseDown);
    session.handle_pointer((1, 0), PointerEvent::MouseUp);

    assert_eq!(session.outcome(), GameOutcome::Won);
    assert_eq!(
        session.snapshot()[(0, 0)].display_value(),
        DisplayValue::Flag
    );
}

#[test]
fn restart_regenerates_configured_board() {
    let config = Level::Easy.config();
    let clock = ManualClock::new();
    let mut session = SessionController::with_parts(
        SessionConfig::new(config),
        clock.clone(),
        RandomBoardGenerator::new(11),
    )
    .unwrap();

    let first = session.bombs().clone();
    session.toggle_flag((0, 0));
    let safe = session
        .snapshot()
        .iter()
        .find(|(_, cell)| !cell.value.is_bomb() && !cell.is_flagged)
        .map(|(coords, _)| coords)
        .unwrap();
    session.open(safe);

    clock.advance(2_500);
    session.restart().unwrap();

    let board = session.snapshot();
    assert_eq!(board.size(), (10, 10));
    assert_eq!(session.bombs().len(), 10);
    assert!(board.iter().all(|(_, cell)| !cell.is_open && !cell.is_flagged));
    assert_ne!(session.bombs(), &first);
    assert_eq!(session.start_time(), 2_500);
    assert_eq!(session.outcome(), GameOutcome::Playing);
}

#[test]
fn fatal_click_reports_elapsed_time() {
    let config = GameConfig::new((3, 3), 2).unwrap();
    let losses = Rc::new(RefCell::new(Vec::new()));
    let observer = {
        let losses = losses.clone();
        Callbacks::new(|_| {}, move |secs| losses.borrow_mut().push(secs))
    };
    let clock = ManualClock::new();
    let mut session = SessionController::with_parts(
        SessionConfig::new(config).with_observer(observer),
        clock.clone(),
        FixedBoardGenerator::new([(0, 0), (2, 2)]),
    )
    .unwrap();

    clock.advance(7_250);
    session.open((2, 2));
    let board = session.snapshot();
    assert!(board[(0, 0)].is_open && board[(2, 2)].is_open);

    clock.advance(10_000);
    session.poll();
    assert_eq!(*losses.borrow(), vec![7]);
}

#[test]
fn board_snapshot_serializes() {
    let config = GameConfig::new((2, 1), 1).unwrap();
    let (board, _) = FixedBoardGenerator::new([(0, 0)]).generate(config).unwrap();
    let json = serde_json::to_string(&board).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, board);
}
