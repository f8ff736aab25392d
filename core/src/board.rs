use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Snapshot of the whole grid, `height` rows of `width` cells.
///
/// Every operation that changes cells takes `&self` and hands back a new board, so a snapshot that was given out is
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardCells")]
pub struct Board {
    cells: Array2<Cell>,
}

/// Serialized form of a [`Board`], checked before it is accepted.
#[derive(Deserialize)]
struct BoardCells {
    cells: Array2<Cell>,
}

impl TryFrom<BoardCells> for Board {
    type Error = GameError;

    fn try_from(BoardCells { cells }: BoardCells) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if Coord::try_from(rows).is_err() || Coord::try_from(cols).is_err() {
            log::warn!("Rejected {}x{} board, sides are limited to {}", cols, rows, Coord::MAX);
            return Err(GameError::InvalidBoardShape);
        }

        let misplaced = cells
            .indexed_iter()
            .find(|&((y, x), cell)| usize::from(cell.x) != x || usize::from(cell.y) != y);
        if let Some(((y, x), cell)) = misplaced {
            log::warn!("Rejected board, cell at ({}, {}) claims {:?}", x, y, cell.coords());
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self { cells })
    }
}

/// Bookkeeping from a single reveal.
#[derive(Copy, Clone, Debug, Default)]
struct Flood {
    revealed: CellCount,
    peak_worklist: usize,
}

impl Board {
    /// Empty board of `(width, height)`, no mines placed yet.
    pub fn new((width, height): Coord2) -> Self {
        let cells = Array2::from_shape_fn([usize::from(height), usize::from(width)], |(y, x)| {
            Cell::new((x as Coord, y as Coord))
        });
        Self { cells }
    }

    /// Board with mines at exactly `mine_coords` and neighbor counts already computed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size);

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            board.cells[coords.to_nd_index()].is_mine = true;
        }

        board.fill_neighbor_counts();
        Ok(board)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        if self.contains(coords) {
            Some(&self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// One iterator per row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = &Cell>> {
        self.cells.rows().into_iter().map(|row| row.into_iter())
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn count_flags(&self) -> CellCount {
        self.count_where(|cell| cell.is_flagged)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_revealed)
    }

    /// Every safe cell is revealed. Flags play no part in this.
    pub fn check_win_condition(&self) -> bool {
        self.iter().all(|cell| cell.is_mine || cell.is_revealed)
    }

    /// Scatters `mines` mines uniformly at random, never inside the 3x3 block around `first`.
    ///
    /// Positions are drawn with rejection sampling, so the quota is checked against the free cells up front and an
    /// unsatisfiable request fails with [`GameError::TooManyMines`] instead of looping.
    pub fn place_mines<R: Rng + ?Sized>(
        &self,
        mines: CellCount,
        first: Coord2,
        rng: &mut R,
    ) -> Result<Self> {
        if !self.contains(first) {
            return Err(GameError::InvalidCoords);
        }

        let size = self.size();
        let zone = forbidden_zone(first, size).count() as CellCount;
        let outside_mines = self.count_where(|cell| cell.is_mine && !is_forbidden(cell.coords(), first));
        let capacity = self.total_cells() - zone - outside_mines;
        if mines > capacity {
            log::warn!(
                "Cannot place {} mines around first click {:?}, only {} cells are free",
                mines,
                first,
                capacity
            );
            return Err(GameError::TooManyMines { mines, capacity });
        }

        let mut board = self.clone();
        let (width, height) = size;
        let mut mines_placed = 0;
        while mines_placed < mines {
            let coords = (rng.random_range(0..width), rng.random_range(0..height));
            let cell = &mut board.cells[coords.to_nd_index()];
            if !cell.is_mine && !is_forbidden(coords, first) {
                cell.is_mine = true;
                mines_placed += 1;
            }
        }
        log::debug!(
            "Placed {} mines on {}x{} board, first click at {:?}",
            mines_placed,
            width,
            height,
            first
        );

        board.fill_neighbor_counts();
        Ok(board)
    }

    pub fn compute_neighbor_counts(&self) -> Self {
        let mut board = self.clone();
        board.fill_neighbor_counts();
        board
    }

    /// Reveals `coords`, cascading through connected zero-count cells.
    ///
    /// Out-of-bounds, flagged and already revealed cells leave the board unchanged. A mine is revealed on its own.
    pub fn reveal_cell(&self, coords: Coord2) -> Self {
        let mut board = self.clone();
        board.reveal_in_place(coords);
        board
    }

    /// Flips the flag on a hidden cell; revealed and out-of-bounds cells leave the board unchanged.
    pub fn toggle_flag(&self, coords: Coord2) -> Self {
        let mut board = self.clone();
        if let Some(cell) = board.get_mut(coords) {
            if !cell.is_revealed {
                cell.is_flagged = !cell.is_flagged;
                log::trace!("Flag at {:?} set to {}", coords, cell.is_flagged);
            }
        }
        board
    }

    /// Reveals every mine, leaving safe cells as they were.
    pub fn reveal_all_mines(&self) -> Self {
        let mut board = self.clone();
        for cell in board.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_revealed = true;
        }
        board
    }

    fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        if self.contains(coords) {
            Some(&mut self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    fn count_where(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        self.iter().filter(|&cell| pred(cell)).fold(0, |acc, _| acc + 1)
    }

    fn fill_neighbor_counts(&mut self) {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                let coords = (x, y);
                let count = if self.cells[coords.to_nd_index()].is_mine {
                    0
                } else {
                    self.neighbors(coords)
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_mine)
                        .fold(0, |acc, _| acc + 1)
                };
                self.cells[coords.to_nd_index()].neighbor_mines = count;
            }
        }
    }

    /// Reveals in place and reports how far the flood went.
    fn reveal_in_place(&mut self, coords: Coord2) -> Flood {
        let Some(cell) = self.get_mut(coords) else {
            return Flood::default();
        };
        if cell.is_revealed || cell.is_flagged {
            return Flood::default();
        }

        cell.is_revealed = true;
        let cascades = !cell.is_mine && cell.neighbor_mines == 0;
        log::trace!(
            "Reveal cell at {:?}, mine: {}, count: {}",
            coords,
            cell.is_mine,
            cell.neighbor_mines
        );

        let mut flood = Flood {
            revealed: 1,
            peak_worklist: 0,
        };
        if !cascades {
            return flood;
        }

        // only revealed zero cells are queued, and a cell is revealed when it is queued
        let mut to_visit: Vec<Coord2> = Vec::from([coords]);
        flood.peak_worklist = 1;
        while let Some(visit_coords) = to_visit.pop() {
            for pos in self.neighbors(visit_coords) {
                let next = &mut self.cells[pos.to_nd_index()];
                if next.is_revealed || next.is_flagged || next.is_mine {
                    continue;
                }

                next.is_revealed = true;
                flood.revealed += 1;
                if next.neighbor_mines == 0 {
                    to_visit.push(pos);
                }
            }
            flood.peak_worklist = flood.peak_worklist.max(to_visit.len());
        }
        log::trace!("Flood from {:?} revealed {} cells", coords, flood.revealed);

        flood
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn empty_board_sets_coordinates_row_major() {
        let board = Board::new((4, 2));

        assert_eq!(board.size(), (4, 2));
        assert_eq!(board.total_cells(), 8);
        assert_eq!(board.mine_count(), 0);
        for (y, row) in board.rows().enumerate() {
            for (x, cell) in row.enumerate() {
                assert_eq!(cell.coords(), (x as Coord, y as Coord));
                assert_eq!(*cell, Cell::new((x as Coord, y as Coord)));
            }
        }
    }

    #[test]
    fn from_mine_coords_rejects_out_of_bounds() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn neighbor_counts_match_layout() {
        // * . .
        // . . .
        // . . *
        let board = board((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(board[(1, 1)].neighbor_mines, 2);
        assert_eq!(board[(1, 0)].neighbor_mines, 1);
        assert_eq!(board[(2, 0)].neighbor_mines, 0);
        assert_eq!(board[(0, 0)].neighbor_mines, 0);
    }

    #[test]
    fn compute_neighbor_counts_leaves_input_untouched() {
        let mut raw = Board::new((2, 1));
        raw.cells[[0, 0]].is_mine = true;

        let counted = raw.compute_neighbor_counts();

        assert_eq!(raw[(1, 0)].neighbor_mines, 0);
        assert_eq!(counted[(1, 0)].neighbor_mines, 1);
    }

    #[test]
    fn place_mines_keeps_first_click_clear() {
        let mut rng = SmallRng::seed_from_u64(7);
        let empty = Board::new((9, 9));

        let board = empty.place_mines(10, (4, 4), &mut rng).unwrap();

        assert_eq!(board.mine_count(), 10);
        assert_eq!(empty.mine_count(), 0);
        for y in 3..=5 {
            for x in 3..=5 {
                assert!(!board[(x, y)].is_mine);
            }
        }
    }

    #[test]
    fn place_mines_fills_every_free_cell_in_corner() {
        let mut rng = SmallRng::seed_from_u64(1);

        // corner zone clips to 4 cells
        let board = Board::new((3, 3)).place_mines(5, (0, 0), &mut rng).unwrap();

        assert_eq!(board.mine_count(), 5);
        assert!(!board[(0, 0)].is_mine);
        assert!(!board[(1, 1)].is_mine);
        assert!(board[(2, 2)].is_mine);
    }

    #[test]
    fn place_mines_rejects_unsatisfiable_quota() {
        let mut rng = SmallRng::seed_from_u64(1);

        let result = Board::new((3, 3)).place_mines(1, (1, 1), &mut rng);

        assert_eq!(
            result,
            Err(GameError::TooManyMines {
                mines: 1,
                capacity: 0
            })
        );
    }

    #[test]
    fn place_mines_rejects_first_click_outside() {
        let mut rng = SmallRng::seed_from_u64(1);

        let result = Board::new((3, 3)).place_mines(0, (3, 0), &mut rng);

        assert_eq!(result, Err(GameError::InvalidCoords));
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let board = board((3, 3), &[(2, 2)]).reveal_cell((0, 0));

        assert!(board[(0, 0)].is_revealed);
        assert!(board[(1, 1)].is_revealed);
        assert_eq!(board[(1, 1)].neighbor_mines, 1);
        assert!(!board[(2, 2)].is_revealed);
        assert!(board.check_win_condition());
    }

    #[test]
    fn reveal_stops_at_numbered_border() {
        // . . . . .
        // . . . . .
        // * * * * *
        // . . . . .
        let mines = [(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)];
        let board = board((5, 4), &mines).reveal_cell((0, 0));

        for x in 0..5 {
            assert!(board[(x, 0)].is_revealed);
            assert!(board[(x, 1)].is_revealed);
            assert!(!board[(x, 2)].is_revealed);
            assert!(!board[(x, 3)].is_revealed);
        }
        assert_eq!(board.revealed_count(), 10);
    }

    #[test]
    fn reveal_does_not_cross_flags() {
        let flagged = board((3, 1), &[]).toggle_flag((1, 0));

        let board = flagged.reveal_cell((0, 0));

        assert!(board[(0, 0)].is_revealed);
        assert!(!board[(1, 0)].is_revealed);
        assert!(!board[(2, 0)].is_revealed);
        assert!(board[(1, 0)].is_flagged);
    }

    #[test]
    fn reveal_mine_does_not_cascade() {
        let board = board((3, 3), &[(1, 1)]).reveal_cell((1, 1));

        assert!(board[(1, 1)].is_revealed);
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn reveal_is_noop_for_flagged_revealed_and_outside() {
        let start = board((3, 3), &[(2, 2)]);
        let flagged = start.toggle_flag((0, 0));

        assert_eq!(flagged.reveal_cell((0, 0)), flagged);
        assert_eq!(start.reveal_cell((3, 3)), start);

        let revealed = start.reveal_cell((1, 1));
        assert_eq!(revealed.reveal_cell((1, 1)), revealed);
    }

    #[test]
    fn toggle_flag_ignores_revealed_cells() {
        let revealed = board((2, 2), &[(0, 0)]).reveal_cell((1, 1));

        assert_eq!(revealed.toggle_flag((1, 1)), revealed);
        assert_eq!(revealed.toggle_flag((5, 5)), revealed);
    }

    #[test]
    fn toggle_flag_twice_restores_board() {
        let start = board((2, 2), &[(0, 0)]);

        let once = start.toggle_flag((0, 0));
        assert_eq!(once.count_flags(), 1);
        assert_eq!(once.toggle_flag((0, 0)), start);
    }

    #[test]
    fn win_ignores_flags() {
        let board = board((2, 1), &[(0, 0)]);
        assert!(!board.check_win_condition());

        let flagged = board.toggle_flag((0, 0));
        assert!(!flagged.check_win_condition());
        assert!(flagged.reveal_cell((1, 0)).check_win_condition());
    }

    #[test]
    fn reveal_all_mines_only_touches_mines() {
        let board = board((3, 1), &[(0, 0), (2, 0)]);

        let shown = board.reveal_all_mines();

        assert!(shown[(0, 0)].is_revealed);
        assert!(shown[(2, 0)].is_revealed);
        assert!(!shown[(1, 0)].is_revealed);
        assert!(!board[(0, 0)].is_revealed);
    }

    #[test]
    fn large_board_cascade_does_not_recurse() {
        let board = Board::new((Coord::MAX, Coord::MAX)).reveal_cell((0, 0));

        assert!(board.check_win_condition());
        assert_eq!(board.revealed_count(), board.total_cells());
    }

    #[test]
    fn flood_worklist_never_outgrows_the_board() {
        for start in [(0, 0), (127, 127), (254, 0)] {
            let mut board = Board::new((Coord::MAX, Coord::MAX));

            let flood = board.reveal_in_place(start);

            assert_eq!(flood.revealed, board.total_cells());
            assert!(flood.peak_worklist <= usize::from(board.total_cells()));
        }

        // a single row queues each zero cell once at most
        let mut row = Board::new((200, 1));
        let flood = row.reveal_in_place((100, 0));
        assert_eq!(flood.revealed, 200);
        assert!(flood.peak_worklist <= 2);
    }

    #[test]
    fn place_mines_counts_existing_mines_against_capacity() {
        let mut rng = SmallRng::seed_from_u64(1);
        // 4x3 board, zone around (0, 1) covers 6 cells, one mine already sits outside it
        let seeded = board((4, 3), &[(3, 0)]);

        assert_eq!(
            seeded.place_mines(6, (0, 1), &mut rng),
            Err(GameError::TooManyMines {
                mines: 6,
                capacity: 5
            })
        );
        assert!(seeded.place_mines(5, (0, 1), &mut rng).is_ok());
    }

    #[test]
    fn deserialization_rejects_misplaced_cells() {
        let board = board((3, 2), &[(2, 1)]);
        let mut json = serde_json::to_value(&board).unwrap();
        assert_eq!(serde_json::from_value::<Board>(json.clone()).unwrap(), board);

        json["cells"]["data"][0]["x"] = 2.into();
        let err = serde_json::from_value::<Board>(json).unwrap_err();

        assert!(err.to_string().contains("Board shape does not match its cells"));
    }

    #[test]
    fn deserialization_rejects_oversized_sides() {
        let wide = Array2::from_shape_fn([1, 256], |(_, x)| Cell::new((x as Coord, 0)));
        let json = serde_json::json!({ "cells": wide });

        assert!(serde_json::from_value::<Board>(json).is_err());
    }
}
