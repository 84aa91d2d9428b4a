use std::collections::HashSet;

use crate::life;
use crate::rule_set::RuleSet;
use crate::vec2::CellPos;

/// Axis-aligned bounding box of a set of cells, both corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: CellPos,
    pub max: CellPos,
}

impl Bounds {
    /// Create the bounds of `cells`, or `None` if there aren't any.
    pub fn from_cells(cells: &[CellPos]) -> Option<Self> {
        let (&first, rest) = cells.split_first()?;
        let mut b = Bounds {
            min: first,
            max: first,
        };

        for &c in rest {
            b.add(c);
        }

        Some(b)
    }

    /// Grow the bounding box to contain `c`.
    pub fn add(&mut self, c: CellPos) {
        self.min.x = self.min.x.min(c.x);
        self.min.y = self.min.y.min(c.y);
        self.max.x = self.max.x.max(c.x);
        self.max.y = self.max.y.max(c.y);
    }

    /// Number of cells along each side
    pub fn size(&self) -> CellPos {
        self.max - self.min + CellPos::ONE
    }
}

pub struct World {
    /// Life rules
    rule: RuleSet,

    /// Live cells, without duplicates, in the order the engine produced them
    cells: Vec<CellPos>,

    /// Membership index over `cells`
    alive: HashSet<CellPos>,

    /// Number of steps taken since the world was last seeded
    generation: u64,
}

impl World {
    /// Create an empty new world
    pub fn new(rule: RuleSet) -> Self {
        Self {
            rule,
            cells: Vec::new(),
            alive: HashSet::new(),
            generation: 0,
        }
    }

    /// Create a world seeded with `cells`. Duplicates are dropped.
    pub fn with_cells(rule: RuleSet, cells: impl IntoIterator<Item = CellPos>) -> Self {
        let mut world = Self::new(rule);
        world.reseed(cells);

        world
    }

    pub fn rule(&self) -> RuleSet {
        self.rule
    }

    pub fn cells(&self) -> &[CellPos] {
        &self.cells
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }

    pub fn is_alive(&self, c: CellPos) -> bool {
        self.alive.contains(&c)
    }

    /// Bring the cell at `c` to life.
    pub fn set(&mut self, c: CellPos) {
        if self.alive.insert(c) {
            self.cells.push(c);
        }
    }

    /// Kill the cell at `c`.
    pub fn unset(&mut self, c: CellPos) {
        if self.alive.remove(&c) {
            self.cells.retain(|&x| x != c);
        }
    }

    /// Flip the cell at `c`, returning whether it is now alive.
    pub fn toggle(&mut self, c: CellPos) -> bool {
        if self.is_alive(c) {
            self.unset(c);
            false
        } else {
            self.set(c);
            true
        }
    }

    /// Replace every live cell and restart the generation counter.
    pub fn reseed(&mut self, cells: impl IntoIterator<Item = CellPos>) {
        self.cells.clear();
        self.alive.clear();
        self.generation = 0;

        for c in cells {
            self.set(c);
        }
    }

    pub fn clear(&mut self) {
        self.reseed([]);
    }

    /// Advance the world state by one generation
    pub fn next(&mut self) {
        self.cells = life::step_with(&self.rule, &self.cells);
        self.alive = self.cells.iter().copied().collect();
        self.generation += 1;
    }

    /// Advance the world state by `n` generations
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            self.next();
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_cells(&self.cells)
    }
}
