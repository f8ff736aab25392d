use crate::*;
pub use random::*;

mod random;

/// Strategy for turning an empty board into a mined one once the first click is known.
pub trait MineGenerator {
    fn generate(self, board: &Board, mines: CellCount, first: Coord2) -> Result<Board>;
}

/// Whether `coords` lies in the 3x3 block centred on the first click.
pub const fn is_forbidden(coords: Coord2, first: Coord2) -> bool {
    coords.0.abs_diff(first.0) <= 1 && coords.1.abs_diff(first.1) <= 1
}

/// The first click and its in-bounds neighbors, which never receive a mine.
pub fn forbidden_zone(first: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    let center = in_bounds(first, size).then_some(first);
    center
        .into_iter()
        .chain(center.into_iter().flat_map(move |first| NeighborIter::new(first, size)))
}
