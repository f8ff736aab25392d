use super::*;

/// Purely random placement outside the first click's forbidden zone, reproducible from `seed`.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, board: &Board, mines: CellCount, first: Coord2) -> Result<Board> {
        use rand::prelude::*;

        log::debug!("Generating minefield with seed {}", self.seed);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        board.place_mines(mines, first, &mut rng)
    }
}
