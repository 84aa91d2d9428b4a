use std::collections::HashSet;

use tracing::debug;

use crate::rule_set::RuleSet;
use crate::rule_set::B3S23;
use crate::vec2::CellPos;

/// An ordered set of live cells. Membership is answered by `members`, while `order` remembers
/// the first-seen position of every cell ever inserted so that output is reproducible.
#[derive(Clone, Debug, Default)]
struct CellSet {
    order: Vec<CellPos>,
    members: HashSet<CellPos>,
}

impl CellSet {
    fn from_cells(cells: &[CellPos]) -> Self {
        let mut set = Self {
            order: Vec::with_capacity(cells.len()),
            members: HashSet::with_capacity(cells.len()),
        };

        for &cell in cells {
            set.set_alive(cell);
        }

        set
    }

    fn contains(&self, cell: CellPos) -> bool {
        self.members.contains(&cell)
    }

    fn set_alive(&mut self, cell: CellPos) {
        if self.members.insert(cell) {
            self.order.push(cell);
        }
    }

    fn set_dead(&mut self, cell: CellPos) {
        self.members.remove(&cell);
    }

    fn live_neighbors(&self, cell: CellPos) -> u8 {
        cell.neighbors().filter(|&n| self.contains(n)).count() as u8
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn iter(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.order.iter().copied()
    }

    /// Consumes the set, yielding each live cell once in insertion order.
    fn into_cells(mut self) -> Vec<CellPos> {
        let mut cells = Vec::with_capacity(self.members.len());

        for cell in self.order {
            // removing guards against a cell that died and was born again showing up twice
            if self.members.remove(&cell) {
                cells.push(cell);
            }
        }

        cells
    }
}

/// Advance `alive` by one generation of Conway's Game of Life.
pub fn step(alive: &[CellPos]) -> Vec<CellPos> {
    step_with(&B3S23, alive)
}

/// Advance `alive` by one generation of `rule`.
///
/// The input is treated as a set. Survivors keep their first-seen order and births follow in the
/// order they were discovered. Every neighbour count is read from the previous generation, so
/// deltas applied to the next generation never feed back into the same step.
///
/// Only live cells and their neighbours are ever looked at, so the plane has no bounds and empty
/// regions cost nothing.
pub fn step_with(rule: &RuleSet, alive: &[CellPos]) -> Vec<CellPos> {
    let previous = CellSet::from_cells(alive);
    let mut next = previous.clone();

    // dead cells whose fate has already been decided this step
    let mut examined = HashSet::new();

    let (mut births, mut deaths) = (0usize, 0usize);

    for cell in previous.iter() {
        if !rule.survives(previous.live_neighbors(cell)) {
            next.set_dead(cell);
            deaths += 1;
        }

        for neighbor in cell.neighbors() {
            if previous.contains(neighbor) || !examined.insert(neighbor) {
                continue;
            }

            if rule.is_born(previous.live_neighbors(neighbor)) {
                next.set_alive(neighbor);
                births += 1;
            }
        }
    }

    debug!(
        population = next.len(),
        births, deaths, "stepped {} live cells", previous.len()
    );

    next.into_cells()
}
