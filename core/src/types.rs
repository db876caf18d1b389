use ndarray::Array2;

/// Single coordinate axis, used for row/column positions and board dimensions.
pub type Coord = u8;

/// Count type for cells, mines and items.
pub type CellCount = u16;

/// Points accumulated during a session.
pub type Score = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Board size of an array, as `(rows, cols)`.
///
/// Only called on arrays allocated from a `Coord2` size or checked by
/// `ContentLayout::from_contents`, so the dimensions always fit.
pub(crate) fn board_size<T>(array: &Array2<T>) -> Coord2 {
    let (rows, cols) = array.dim();
    (rows as Coord, cols as Coord)
}

/// Linear (row-major) index of `coords` on a board of `size`.
pub(crate) const fn linear_index((row, col): Coord2, (_, cols): Coord2) -> usize {
    row as usize * cols as usize + col as usize
}

/// Inverse of [`linear_index`].
pub(crate) const fn from_linear_index(index: usize, (_, cols): Coord2) -> Coord2 {
    let cols = cols as usize;
    ((index / cols) as Coord, (index % cols) as Coord)
}

pub const fn in_bounds((row, col): Coord2, (rows, cols): Coord2) -> bool {
    row < rows && col < cols
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        neighbors(center, board_size(self))
    }
}

/// Row/col offsets of the 8 cells around a center.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Every cell at Chebyshev distance 1 from `center`, clipped to `bounds`.
pub fn neighbors(center: Coord2, bounds: Coord2) -> NeighborIter {
    NeighborIter {
        center,
        bounds,
        next: 0,
    }
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next: usize,
}

impl NeighborIter {
    fn offset(&self, (d_row, d_col): (i8, i8)) -> Option<Coord2> {
        let row = self.center.0.checked_add_signed(d_row)?;
        let col = self.center.1.checked_add_signed(d_col)?;
        in_bounds((row, col), self.bounds).then_some((row, col))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = OFFSETS.get(self.next) {
            self.next += 1;
            if let Some(coords) = self.offset(delta) {
                return Some(coords);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(OFFSETS.len() - self.next))
    }
}
