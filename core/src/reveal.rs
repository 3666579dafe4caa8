use std::collections::{BTreeSet, VecDeque};

use crate::*;

/// Result of opening one cascade layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layer {
    /// Cells that changed from closed to open, in opening order.
    pub opened: Vec<Coord2>,
    /// Coordinates queued for the following layer.
    pub next: BTreeSet<Coord2>,
    /// Whether a bomb was opened in this layer.
    pub detonated: bool,
}

impl Layer {
    pub fn has_update(&self) -> bool {
        !self.opened.is_empty()
    }

    /// The cascade is over once nothing remains to expand.
    pub fn is_last(&self) -> bool {
        self.next.is_empty()
    }
}

/// Summary of a cascade run to completion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealSummary {
    pub opened: usize,
    pub layers: usize,
    pub detonated: bool,
}

/// Layered flood fill over a [`CellStore`].
///
/// Every step re-checks the cell state before mutating, so overlapping
/// cascades and repeated coordinates never reopen a cell.
#[derive(Copy, Clone, Debug, Default)]
pub struct RevealEngine;

impl RevealEngine {
    pub fn reveal_layer(
        store: &mut CellStore,
        bombs: &BombSet,
        layer: impl IntoIterator<Item = Coord2>,
    ) -> Layer {
        let size = store.size();
        let mut result = Layer::default();
        let mut pending: VecDeque<Coord2> = layer.into_iter().collect();

        while let Some(coords) = pending.pop_front() {
            let Some(cell) = store.open(coords) else {
                continue;
            };
            result.opened.push(coords);

            match cell.value {
                CellValue::Number(_) => {}
                CellValue::Bomb => {
                    // the remaining bombs go off in the same layer
                    if !result.detonated {
                        log::trace!("Bomb opened at {:?}, revealing all bombs", coords);
                        result.detonated = true;
                        pending.extend(bombs.iter());
                    }
                }
                CellValue::Empty => {
                    result.next.extend(NeighborIter::new(coords, size).filter(|&pos| {
                        store
                            .get(pos)
                            .is_some_and(|cell| !cell.is_open && !cell.is_flagged)
                    }));
                }
            }
        }

        log::trace!(
            "Layer opened {} cells, {} queued",
            result.opened.len(),
            result.next.len()
        );
        result
    }

    /// Runs all layers back to back, without pacing.
    pub fn reveal(
        store: &mut CellStore,
        bombs: &BombSet,
        coords: impl IntoIterator<Item = Coord2>,
    ) -> RevealSummary {
        let mut summary = RevealSummary::default();
        let mut layer = Self::reveal_layer(store, bombs, coords);
        loop {
            summary.layers += 1;
            summary.opened += layer.opened.len();
            summary.detonated |= layer.detonated;
            if layer.is_last() {
                return summary;
            }
            layer = Self::reveal_layer(store, bombs, layer.next);
        }
    }
}
