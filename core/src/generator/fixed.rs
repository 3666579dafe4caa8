use super::*;

/// Replays a known bomb layout on every generation.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    bombs: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(bombs: impl Into<Vec<Coord2>>) -> Self {
        Self {
            bombs: bombs.into(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<(Board, BombSet)> {
        config.validate()?;

        let mut bombs = BTreeSet::new();
        for &coords in &self.bombs {
            if !in_bounds(coords, config.size) {
                return Err(GameError::InvalidCoords);
            }
            bombs.insert(coords);
        }

        if bombs.len() != usize::from(config.bombs) {
            return Err(GameError::BombCountMismatch {
                expected: config.bombs,
                actual: bombs.len() as CellCount,
            });
        }

        Ok(build_board(config.size, bombs))
    }
}
