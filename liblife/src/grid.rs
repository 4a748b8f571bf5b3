use anyhow::ensure;
use itertools::Itertools;

use super::pos::Position;

/// A fixed-size square field of cells. The dimensions are set at construction
/// and never change; every access is bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(size: usize) -> anyhow::Result<Self> {
        ensure!(size > 0, "grid size must be positive");

        Ok(Self {
            size,
            cells: vec![CellState::default(); size * size],
        })
    }

    pub(crate) fn with_cells(size: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// A grid of the same size where each cell was drawn alive or dead by an
    /// independent coin flip.
    pub fn randomized(&self) -> Self {
        let cells = (0..self.cells.len())
            .map(|_| {
                if rand::random_bool(0.5) {
                    CellState::Alive
                } else {
                    CellState::Dead
                }
            })
            .collect();

        Self::with_cells(self.size, cells)
    }

    pub fn cell<P>(&self, pos: P) -> Option<&CellState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells.get(index)
    }

    /// Flips the cell and returns its new state, or `None` without touching
    /// anything when the position is out of bounds.
    pub fn toggle<P>(&mut self, pos: P) -> Option<CellState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        let cell = self.cells.get_mut(index)?;

        *cell = cell.flipped();
        Some(*cell)
    }

    /// Alive cells among the up-to-8 Moore neighbors. Positions past the edge
    /// are not wrapped; they simply contribute nothing.
    pub fn alive_neighbors<P>(&self, pos: P) -> usize
    where
        P: Into<Position>,
    {
        let Position { row, column } = pos.into();

        (-1isize..=1)
            .cartesian_product(-1isize..=1)
            .filter(|&offsets| offsets != (0, 0))
            .filter_map(|(row_offset, column_offset)| {
                let neighbor = Position {
                    row: row.checked_add_signed(row_offset)?,
                    column: column.checked_add_signed(column_offset)?,
                };

                self.cell(neighbor)
            })
            .filter(|cell| cell.is_alive())
            .count()
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Position, &CellState)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.index_to_pos(index), cell))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { row, column } = pos.into();

        if row >= self.size {
            return None;
        }

        if column >= self.size {
            return None;
        }

        Some(column + (row * self.size))
    }

    fn index_to_pos(&self, index: usize) -> Position {
        Position {
            row: index / self.size,
            column: index % self.size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn flipped(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn grid_with_alive(size: usize, alive: &[[usize; 2]]) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        for &pos in alive {
            grid.toggle(pos).unwrap();
        }
        grid
    }

    #[test]
    fn new_grid_is_fully_dead() {
        let grid = Grid::new(75).unwrap();

        assert_eq!(grid.size(), 75);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.enumerate_cells().count(), 75 * 75);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(Grid::new(0).is_err());
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut grid = Grid::new(4).unwrap();
        let before = grid.clone();

        assert_eq!(grid.toggle([1, 2]), Some(CellState::Alive));
        assert_eq!(grid.toggle([1, 2]), Some(CellState::Dead));
        assert_eq!(grid, before);
    }

    #[test]
    fn toggle_out_of_bounds_changes_nothing() {
        let mut grid = Grid::new(4).unwrap();

        assert_eq!(grid.toggle([4, 0]), None);
        assert_eq!(grid.toggle([0, 4]), None);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn cell_lookup_is_bounds_checked() {
        let grid = grid_with_alive(3, &[[2, 2]]);

        assert_eq!(grid.cell([2, 2]), Some(&CellState::Alive));
        assert_eq!(grid.cell([0, 0]), Some(&CellState::Dead));
        assert_eq!(grid.cell([3, 0]), None);
        assert_eq!(grid.cell([0, 3]), None);
    }

    #[test]
    fn corner_counts_only_in_bounds_neighbors() {
        let grid = grid_with_alive(75, &[[0, 1], [1, 0], [1, 1]]);

        assert_eq!(grid.alive_neighbors([0, 0]), 3);
    }

    #[test]
    fn edge_neighbor_counts_cap_below_eight() {
        let all = (0..75)
            .cartesian_product(0..75)
            .map(|(row, column)| [row, column])
            .collect_vec();
        let grid = grid_with_alive(75, &all);

        assert_eq!(grid.alive_neighbors([0, 0]), 3);
        assert_eq!(grid.alive_neighbors([74, 74]), 3);
        assert_eq!(grid.alive_neighbors([0, 37]), 5);
        assert_eq!(grid.alive_neighbors([37, 37]), 8);
    }

    #[test]
    fn neighbor_count_excludes_the_cell_itself() {
        let grid = grid_with_alive(5, &[[2, 2]]);

        assert_eq!(grid.alive_neighbors([2, 2]), 0);
    }

    #[test]
    fn randomized_preserves_dimensions() {
        let grid = Grid::new(75).unwrap().randomized();

        assert_eq!(grid.size(), 75);
        assert_eq!(grid.enumerate_cells().count(), 75 * 75);
    }

    #[test]
    fn randomized_is_roughly_half_alive() {
        let population = Grid::new(75).unwrap().randomized().population();

        // 5625 fair per-cell draws; this band is dozens of standard
        // deviations wide.
        assert!(
            population > 2200 && population < 3400,
            "population was {population}"
        );
    }
}
