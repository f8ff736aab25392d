use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Playing
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Game ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// One game from the first click to a win or loss, restartable in place.
///
/// The board is replaced as a whole after every gesture. The flag counter is recounted from the board each time rather
/// than tracked incrementally, which costs a full scan per interaction.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    status: GameStatus,
    flag_count: CellCount,
    time_elapsed: u32,
    is_first_click: bool,
    rng: SmallRng,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = config.validate()?;
        log::debug!(
            "New session {}x{} with {} mines, seed {}",
            config.width,
            config.height,
            config.mines,
            seed
        );
        Ok(Self {
            config,
            board: Board::new(config.size()),
            status: Default::default(),
            flag_count: 0,
            time_elapsed: 0,
            is_first_click: true,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn time_elapsed(&self) -> u32 {
        self.time_elapsed
    }

    pub fn is_first_click(&self) -> bool {
        self.is_first_click
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn remaining_mines(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flag_count)
    }

    pub fn is_timer_running(&self) -> bool {
        self.status.is_playing() && !self.is_first_click
    }

    /// Advances the clock by one second if the game is running, returns whether it did.
    pub fn tick(&mut self) -> bool {
        if self.is_timer_running() {
            self.time_elapsed = self.time_elapsed.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Drops the current board and starts over with a fresh first-click gate.
    pub fn restart(&mut self) {
        log::debug!("Restarting after {:?} at {}s", self.status, self.time_elapsed);
        self.board = Board::new(self.config.size());
        self.status = GameStatus::Playing;
        self.flag_count = 0;
        self.time_elapsed = 0;
        self.is_first_click = true;
    }

    /// Reveals a cell, placing the mines first if this is the opening move.
    ///
    /// Finished games, out-of-bounds coordinates, flagged and already revealed cells are no-ops.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        if self.status.is_finished() {
            return Ok(NoChange);
        }
        match self.board.get(coords) {
            Some(cell) if !cell.is_revealed && !cell.is_flagged => {}
            _ => return Ok(NoChange),
        }

        if self.is_first_click {
            let generator = RandomMineGenerator::new(self.rng.random());
            self.board = generator.generate(&self.board, self.config.mines, coords)?;
            self.is_first_click = false;
        }

        self.board = self.board.reveal_cell(coords);
        let outcome = if self.board[coords].is_mine {
            self.board = self.board.reveal_all_mines();
            self.end_game(GameStatus::Lost);
            HitMine
        } else if self.board.check_win_condition() {
            self.end_game(GameStatus::Won);
            Won
        } else {
            Revealed
        };
        self.flag_count = self.board.count_flags();

        Ok(outcome)
    }

    /// Flags or unflags a hidden cell; a no-op once the game is over.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.status.is_finished() {
            return MarkOutcome::NoChange;
        }
        match self.board.get(coords) {
            Some(cell) if !cell.is_revealed => {}
            _ => return MarkOutcome::NoChange,
        }

        self.board = self.board.toggle_flag(coords);
        self.flag_count = self.board.count_flags();
        MarkOutcome::Changed
    }

    fn end_game(&mut self, status: GameStatus) {
        log::debug!("Game ended: {:?} after {}s", status, self.time_elapsed);
        self.status = status;
    }
}
