use std::collections::BTreeSet;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces a fresh board and bomb placement for a session.
pub trait BoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<(Board, BombSet)>;
}

impl<G: BoardGenerator + ?Sized> BoardGenerator for Box<G> {
    fn generate(&mut self, config: GameConfig) -> Result<(Board, BombSet)> {
        (**self).generate(config)
    }
}

/// Computes every cell value from a finished bomb placement.
pub(crate) fn build_board(size: Coord2, bombs: BTreeSet<Coord2>) -> (Board, BombSet) {
    let bombs = BombSet::from_set(bombs);
    let board = Board::from_fn(size, |coords| {
        if bombs.contains(coords) {
            Cell::closed(CellValue::Bomb)
        } else {
            Cell::closed(CellValue::from_adjacent(bombs.adjacent_count(coords, size)))
        }
    });
    (board, bombs)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Checks the generation invariants against an independent count.
    pub(crate) fn assert_consistent(config: GameConfig, board: &Board, bombs: &BombSet) {
        assert_eq!(board.size(), config.size);
        assert_eq!(bombs.len(), usize::from(config.bombs));

        for (coords, cell) in board.iter() {
            assert!(!cell.is_open && !cell.is_flagged);
            if bombs.contains(coords) {
                assert_eq!(cell.value, CellValue::Bomb);
                continue;
            }
            let expected = bombs
                .iter()
                .filter(|&(bx, by)| {
                    (i16::from(bx) - i16::from(coords.0)).abs() <= 1
                        && (i16::from(by) - i16::from(coords.1)).abs() <= 1
                })
                .count() as u8;
            assert!(expected <= 8);
            assert_eq!(cell.value, CellValue::from_adjacent(expected), "at {coords:?}");
        }
    }

    #[test]
    fn build_board_counts_neighbors() {
        let bombs = BTreeSet::from([(0, 0), (2, 0)]);
        let (board, set) = build_board((3, 2), bombs);

        assert_eq!(board[(1, 0)].value, CellValue::Number(2));
        assert_eq!(board[(1, 1)].value, CellValue::Number(2));
        assert_eq!(board[(0, 1)].value, CellValue::Number(1));
        assert_eq!(board[(2, 0)].value, CellValue::Bomb);
        assert_eq!(set.len(), 2);
    }
}
