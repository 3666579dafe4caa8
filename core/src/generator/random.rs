use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Draws allowed per requested bomb before switching to exact sampling.
const DRAWS_PER_BOMB: u32 = 4;

/// Uniform placement: rejection sampling while it is cheap, then an exact-count
/// sample over the remaining free cells so generation always terminates.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    fn place_bombs(&mut self, config: GameConfig) -> BTreeSet<Coord2> {
        let (width, height) = config.size;
        let wanted = usize::from(config.bombs);
        let max_draws = u32::from(config.bombs) * DRAWS_PER_BOMB;

        let mut bombs = BTreeSet::new();
        let mut draws = 0;
        while bombs.len() < wanted && draws < max_draws {
            draws += 1;
            let coords = (
                self.rng.random_range(0..width),
                self.rng.random_range(0..height),
            );
            bombs.insert(coords);
        }

        let missing = wanted - bombs.len();
        if missing > 0 {
            log::debug!(
                "Rejection sampling stopped after {} draws, sampling {} remaining bombs",
                draws,
                missing
            );
            let free: Vec<Coord2> = (0..height)
                .flat_map(|y| (0..width).map(move |x| (x, y)))
                .filter(|coords| !bombs.contains(coords))
                .collect();
            for i in index::sample(&mut self.rng, free.len(), missing) {
                bombs.insert(free[i]);
            }
        }

        bombs
    }
}

impl Default for RandomBoardGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<(Board, BombSet)> {
        config.validate()?;
        let bombs = self.place_bombs(config);

        // double check bomb count
        if bombs.len() != usize::from(config.bombs) {
            log::warn!(
                "Generated bomb count mismatch, actual: {}, requested: {}",
                bombs.len(),
                config.bombs
            );
        }

        log::debug!(
            "Generated {}x{} board with {} bombs",
            config.size.0,
            config.size.1,
            bombs.len()
        );
        Ok(build_board(config.size, bombs))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::assert_consistent;
    use super::*;

    #[test]
    fn generates_exact_bomb_count_for_presets() {
        for level in Level::ALL {
            let config = level.config();
            for seed in 0..8 {
                let (board, bombs) = RandomBoardGenerator::new(seed).generate(config).unwrap();
                assert_consistent(config, &board, &bombs);
            }
        }
    }

    #[test]
    fn nearly_full_board_terminates() {
        let config = GameConfig::new((10, 10), 99).unwrap();
        let (board, bombs) = RandomBoardGenerator::new(7).generate(config).unwrap();
        assert_consistent(config, &board, &bombs);
        assert_eq!(board.iter().filter(|(_, cell)| !cell.value.is_bomb()).count(), 1);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let config = Level::Medium.config();
        let a = RandomBoardGenerator::new(42).generate(config).unwrap();
        let b = RandomBoardGenerator::new(42).generate(config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn consecutive_generations_resample() {
        let config = Level::Hard.config();
        let mut generator = RandomBoardGenerator::new(3);
        let (_, first) = generator.generate(config).unwrap();
        let (_, second) = generator.generate(config).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::new_unchecked((2, 2), 4);
        assert_eq!(
            RandomBoardGenerator::new(0).generate(config),
            Err(GameError::TooManyBombs { bombs: 4, cells: 4 })
        );
        let config = GameConfig::new_unchecked((2, 2), 0);
        assert_eq!(
            RandomBoardGenerator::new(0).generate(config),
            Err(GameError::NoBombs)
        );
    }
}
