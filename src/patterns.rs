use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::WorldOffset;
use crate::vec2::CellPos;
use crate::world::Bounds;

/// Plaintext rows of the built-in patterns. `O` is alive, `.` is dead, and `y` grows downward.
const PRESETS: &[(&str, &str)] = &[
    ("blinker", "OOO"),
    ("glider", ".O.\n..O\nOOO"),
    ("toad", ".OOO\nOOO."),
    ("beacon", "OO..\nO...\n...O\n..OO"),
    ("r-pentomino", ".OO\nOO.\n.O."),
    ("acorn", ".O.....\n...O...\nOO..OOO"),
    ("lwss", ".O..O\nO....\nO...O\nOOOO."),
];

/// Number of cells in a soup is drawn from this range, before duplicates are dropped
const SOUP_CELLS: std::ops::RangeInclusive<usize> = 251..=500;

/// Soup coordinates are drawn from `[-SOUP_RADIUS, SOUP_RADIUS)` on both axes
const SOUP_RADIUS: WorldOffset = 25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Unknown pattern \"{name}\"")]
    UnknownPattern { name: String },

    #[error("Invalid cell '{got}' at line {line}, column {column}")]
    InvalidCell {
        line: usize,
        column: usize,
        got: char,
    },
}

/// Represents a pattern that can be placed in a world
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    pub cells: Vec<CellPos>,
}

impl Pattern {
    /// Parse a pattern from plaintext rows. Lines starting with `!` are comments.
    pub fn parse(name: &str, text: &str) -> Result<Self, PatternError> {
        let mut cells = Vec::new();
        let rows = text
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, l)| !l.starts_with('!'));

        for (y, (line, row)) in rows.enumerate() {
            for (x, c) in row.chars().enumerate() {
                match c {
                    'O' | 'o' | '#' | '*' => {
                        cells.push(CellPos::new(x as WorldOffset, y as WorldOffset))
                    }
                    '.' => {}
                    got => {
                        return Err(PatternError::InvalidCell {
                            line: line + 1,
                            column: x + 1,
                            got,
                        });
                    }
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            cells,
        })
    }

    /// Shift every cell by `d`
    pub fn translated(mut self, d: CellPos) -> Self {
        for c in &mut self.cells {
            *c = *c + d;
        }

        self
    }

    /// The same pattern with the middle of its bounding box on the origin
    pub fn centered(self) -> Self {
        let Some(b) = Bounds::from_cells(&self.cells) else {
            return self;
        };

        let center = b.min + b.size().divide(2);
        self.translated(-center)
    }
}

/// Names of the built-in patterns
pub fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(name, _)| *name)
}

/// Look up a built-in pattern
pub fn by_name(name: &str) -> Result<Pattern, PatternError> {
    let name = name.to_ascii_lowercase();

    let Some((name, rows)) = PRESETS.iter().find(|(n, _)| *n == name) else {
        return Err(PatternError::UnknownPattern { name });
    };

    Pattern::parse(name, rows)
}

/// A random population like the one the viewer starts with. May contain duplicates.
pub fn soup<R: Rng>(rng: &mut R) -> Vec<CellPos> {
    let n = rng.random_range(SOUP_CELLS);

    (0..n)
        .map(|_| {
            let x = rng.random_range(-SOUP_RADIUS..SOUP_RADIUS);
            let y = rng.random_range(-SOUP_RADIUS..SOUP_RADIUS);

            CellPos::new(x, y)
        })
        .collect()
}

/// Where the initial population comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    /// Random soup, reproducible when a seed is given
    Soup { seed: Option<u64> },

    /// A built-in pattern, centred on the origin
    Preset { name: String },
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Soup { seed: None }
    }
}

impl Seed {
    pub fn cells(&self) -> Result<Vec<CellPos>, PatternError> {
        match self {
            Seed::Soup { seed: Some(seed) } => Ok(soup(&mut StdRng::seed_from_u64(*seed))),
            Seed::Soup { seed: None } => Ok(soup(&mut rand::rng())),
            Seed::Preset { name } => by_name(name).map(|p| p.centered().cells),
        }
    }
}

/// Draw the bounding box of `cells` with `O` for live cells and `.` for dead ones.
pub fn to_ascii(cells: &[CellPos]) -> String {
    let Some(b) = Bounds::from_cells(cells) else {
        return String::new();
    };

    let size = b.size();
    let (w, h) = (size.x as usize, size.y as usize);
    let mut grid = vec![vec!['.'; w]; h];

    for &c in cells {
        let d = c - b.min;
        grid[d.y as usize][d.x as usize] = 'O';
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
