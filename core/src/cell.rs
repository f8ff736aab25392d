use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// One grid position.
///
/// `is_mine` and `neighbor_mines` are fixed once mines are placed, `is_revealed` only ever goes from `false` to `true`,
/// and `is_flagged` can only change while the cell is still hidden.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighbor_mines: u8,
    pub x: Coord,
    pub y: Coord,
}

impl Cell {
    pub const fn new((x, y): Coord2) -> Self {
        Self {
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            neighbor_mines: 0,
            x,
            y,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }

    /// Safe, revealed and without adjacent mines, the cells a cascade spreads through.
    pub const fn is_open_zero(&self) -> bool {
        self.is_revealed && !self.is_mine && self.neighbor_mines == 0
    }
}
