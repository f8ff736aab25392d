use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Maps `(x, y)` coordinates onto a row-major `[row, column]` array index.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` falls inside a board of `size` (`(width, height)`).
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let size = (
            cols.try_into().unwrap_or(Coord::MAX),
            rows.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(coords, size)
    }
}

/// Iterates the up to eight in-bounds neighbors of a cell, never the cell itself.
///
/// Walks the 3x3 window around `center` in row-major order, `slot` 4 being the center.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    slot: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            slot: 0,
        }
    }
}

/// `pos - 1 + step` when that stays within `0..limit`.
fn shifted(pos: Coord, step: u8, limit: Coord) -> Option<Coord> {
    let moved = (u16::from(pos) + u16::from(step)).checked_sub(1)?;
    Coord::try_from(moved).ok().filter(|&moved| moved < limit)
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.slot < 9 {
            let slot = self.slot;
            self.slot += 1;
            if slot == 4 {
                continue;
            }

            let x = shifted(self.center.0, slot % 3, self.bounds.0);
            let y = shifted(self.center.1, slot / 3, self.bounds.1);
            if let (Some(x), Some(y)) = (x, y) {
                return Some((x, y));
            }
        }
        None
    }
}
