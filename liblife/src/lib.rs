use grid::{CellState, Grid};
use pos::Position;
use rule::Rule;

pub mod grid;
pub mod pos;
pub mod rule;
pub mod sim;

/// A grid paired with the rule that evolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Life {
    pub grid: Grid,
    pub rule: Rule,
}

impl Life {
    pub fn new(grid: Grid, rule: Rule) -> Self {
        Self { grid, rule }
    }

    /// Computes the next generation without touching the current one. Every
    /// cell is evaluated against the same pre-step snapshot, so no cell ever
    /// sees an already-updated neighbor.
    pub fn next_generation(&self) -> Grid {
        let cells = self
            .grid
            .enumerate_cells()
            .map(|(pos, cell)| self.next_cell(pos, *cell))
            .collect();

        Grid::with_cells(self.grid.size(), cells)
    }

    pub fn advance(&mut self) {
        self.grid = self.next_generation();
    }

    fn next_cell(&self, pos: Position, cell: CellState) -> CellState {
        let alive_neighbors = self.grid.alive_neighbors(pos);

        let alive = match cell {
            CellState::Alive => self.rule.survives(alive_neighbors),
            CellState::Dead => self.rule.born(alive_neighbors),
        };

        if alive { CellState::Alive } else { CellState::Dead }
    }
}
