use core::fmt;
use core::ops::Index;
use std::collections::BTreeSet;
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::*;

/// Bomb coordinates of one session. Immutable once generated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombSet {
    coords: BTreeSet<Coord2>,
}

impl BombSet {
    pub(crate) fn from_set(coords: BTreeSet<Coord2>) -> Self {
        Self { coords }
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.coords.contains(&coords)
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.coords.iter().copied()
    }

    pub fn adjacent_count(&self, coords: Coord2, size: Coord2) -> u8 {
        let count = NeighborIter::new(coords, size)
            .filter(|&pos| self.contains(pos))
            .count();
        // at most 8 neighbors
        count as u8
    }
}

/// Row-major grid of cells; also the read-only snapshot handed to renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub(crate) fn from_fn(size: Coord2, mut f: impl FnMut(Coord2) -> Cell) -> Self {
        let (width, height) = size;
        let cells = Array2::from_shape_fn(
            (usize::from(height), usize::from(width)),
            |(y, x)| f((x as Coord, y as Coord)),
        );
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.contains(coords)
            .then(|| &self.cells[coords.to_nd_index()])
    }

    pub(crate) fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        if self.contains(coords) {
            Some(&mut self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((y, x), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn open_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_open).count() as CellCount
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for cell in row.iter() {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                write!(f, "{}", cell.display_value().symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
