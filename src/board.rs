use std::fmt::{self, Write as _};
use std::str::FromStr;

use rand::Rng;
use tracing::debug;

use crate::cell::Cell;
use crate::error::Error;

/// The three preset board shapes. Board size is not configurable beyond
/// these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    /// (width, height, mines) for the preset.
    pub fn dimensions(self) -> (usize, usize, usize) {
        match self {
            Difficulty::Beginner => (9, 9, 10),
            Difficulty::Intermediate => (16, 16, 40),
            Difficulty::Expert => (30, 16, 99),
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(Error::InvalidDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Expert => "expert",
        })
    }
}

/// Result of `Board::reveal_at`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The target is flagged; nothing changed.
    Blocked,
    /// The target was a mine. It is revealed and the game is lost.
    Detonated,
    /// Number of cells newly opened, counting the cascade. 0 when the
    /// target was already revealed.
    Revealed(usize),
}

pub struct Board {
    width: usize,
    height: usize,
    mine_count: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, &mut rand::rng())
    }

    /// Same as `new` with a caller-supplied RNG, for deterministic boards.
    pub fn with_rng<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let (width, height, mine_count) = difficulty.dimensions();
        Self::generate(width, height, mine_count, rng)
    }

    /// Requires 0 < mine_count < width * height, which every preset
    /// satisfies and which makes the rejection loop terminate.
    pub(crate) fn generate<R: Rng>(
        width: usize,
        height: usize,
        mine_count: usize,
        rng: &mut R,
    ) -> Self {
        debug_assert!(mine_count > 0 && mine_count < width * height);
        let mut cells = vec![Cell::default(); width * height];

        // Rejection-sample distinct mine positions, re-drawing duplicates.
        let mut placed = 0;
        while placed < mine_count {
            let x = rng.random_range(0..width);
            let y = rng.random_range(0..height);
            let cell = &mut cells[idx(width, x, y)];
            if !cell.is_mine() {
                cell.set_mine();
                placed += 1;
            }
        }

        let mut board = Self { width, height, mine_count, cells };
        board.compute_adjacency();
        debug!(width, height, mine_count, "generated board");
        board
    }

    fn compute_adjacency(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let i = idx(self.width, x, y);
                if self.cells[i].is_mine() {
                    continue;
                }
                let mut count = 0u8;
                for (nx, ny) in neighbors(self.width, self.height, x, y) {
                    if self.cells[idx(self.width, nx, ny)].is_mine() {
                        count += 1;
                    }
                }
                self.cells[i].set_adjacent(count);
            }
        }
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), Error> {
        if x < self.width && y < self.height {
            Ok(())
        } else {
            Err(Error::OutOfBounds { x, y })
        }
    }

    /// Copy of the cell at (x, y). The grid itself is never handed out.
    pub fn get(&self, x: usize, y: usize) -> Result<Cell, Error> {
        self.check_bounds(x, y)?;
        Ok(self.cells[idx(self.width, x, y)])
    }

    /// Reveal the cell at (x, y). Flagged cells are protected and report
    /// `Blocked`; mines report `Detonated`; everything else opens, with a
    /// cascade through zero-count cells.
    pub fn reveal_at(&mut self, x: usize, y: usize) -> Result<RevealOutcome, Error> {
        self.check_bounds(x, y)?;
        let i = idx(self.width, x, y);
        if self.cells[i].is_flagged() {
            return Ok(RevealOutcome::Blocked);
        }
        if self.cells[i].is_mine() {
            self.cells[i].reveal();
            return Ok(RevealOutcome::Detonated);
        }
        Ok(RevealOutcome::Revealed(self.flood_reveal(x, y)))
    }

    /// Opens (x, y) and, through zero-count cells, its whole zero
    /// component. Visibility doubles as the visited marker, so each cell
    /// is handled at most once. Returns the number of cells opened.
    fn flood_reveal(&mut self, x: usize, y: usize) -> usize {
        let mut opened = 0;
        let mut stack = vec![(x, y)];
        while let Some((cx, cy)) = stack.pop() {
            let i = idx(self.width, cx, cy);
            if self.cells[i].is_revealed() || self.cells[i].is_flagged() || self.cells[i].is_mine()
            {
                continue;
            }
            self.cells[i].reveal();
            opened += 1;
            if self.cells[i].adjacent() == 0 {
                for (nx, ny) in neighbors(self.width, self.height, cx, cy) {
                    let n = idx(self.width, nx, ny);
                    if !self.cells[n].is_revealed() && !self.cells[n].is_mine() {
                        stack.push((nx, ny));
                    }
                }
            }
        }
        opened
    }

    pub fn toggle_flag_at(&mut self, x: usize, y: usize) -> Result<i8, Error> {
        self.check_bounds(x, y)?;
        Ok(self.cells[idx(self.width, x, y)].toggle_flag())
    }

    /// The board is won once every non-mine cell is revealed. A flag left
    /// on a safe cell keeps this false until the player corrects it.
    pub fn check_win(&self) -> bool {
        self.cells.iter().all(|c| c.is_mine() || c.is_revealed())
    }

    /// Game-over disclosure: open everything the player has not flagged,
    /// mines included. Flags stay where they are.
    pub(crate) fn reveal_all_unflagged(&mut self) {
        for cell in &mut self.cells {
            if !cell.is_flagged() {
                cell.reveal();
            }
        }
    }

    pub fn render(&self, show_mines: bool, one_based: bool) -> String {
        let mut s = String::new();
        // Column header
        s.push_str("    ");
        for x in 0..self.width {
            let label = if one_based { x + 1 } else { x };
            let _ = write!(s, "{:>2} ", label);
        }
        s.push('\n');
        s.push_str("   ");
        s.push_str(&"-".repeat(self.width * 3 + 1));
        s.push('\n');

        for y in 0..self.height {
            let row_label = if one_based { y + 1 } else { y };
            let _ = write!(s, "{:>2} | ", row_label);
            for x in 0..self.width {
                let c = &self.cells[idx(self.width, x, y)];
                let ch = if show_mines && c.is_mine() {
                    '*'
                } else if c.is_revealed() {
                    if c.is_mine() {
                        '*'
                    } else if c.adjacent() == 0 {
                        ' '
                    } else {
                        char::from_digit(c.adjacent() as u32, 10).unwrap_or('?')
                    }
                } else if c.is_flagged() {
                    'F'
                } else {
                    '.'
                };
                let _ = write!(s, "{}  ", ch);
            }
            s.push('\n');
        }
        s
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false, true))
    }
}

// Public getters for encapsulation
impl Board {
    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn mine_count(&self) -> usize { self.mine_count }
}

fn idx(w: usize, x: usize, y: usize) -> usize {
    y * w + x
}

fn neighbors(w: usize, h: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    let x = x as isize;
    let y = y as isize;
    let w = w as isize;
    let h = h as isize;
    let mut out = Vec::with_capacity(8);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = x + dx;
            let ny = y + dy;
            if nx >= 0 && ny >= 0 && nx < w && ny < h {
                out.push((nx as usize, ny as usize));
            }
        }
    }
    out.into_iter()
}

#[cfg(test)]
impl Board {
    /// Board with mines at fixed positions, for crafted layouts in tests.
    pub(crate) fn with_mines(width: usize, height: usize, mines: &[(usize, usize)]) -> Self {
        let mut cells = vec![Cell::default(); width * height];
        for &(x, y) in mines {
            cells[idx(width, x, y)].set_mine();
        }
        let mut board = Self { width, height, mine_count: mines.len(), cells };
        board.compute_adjacency();
        board
    }
}
