use crate::models::Grid;

/// Cursor over the grid. Indices always point inside the grid, or at 0 when
/// the grid has no rows.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GridView {
    pub(crate) row: usize,
    pub(crate) col: usize,
}

impl GridView {
    pub(crate) fn move_row(&mut self, offset: isize, grid: &Grid) {
        self.row = step(self.row, offset, grid.row_count());
    }

    pub(crate) fn move_col(&mut self, offset: isize, grid: &Grid) {
        self.col = step(self.col, offset, grid.width());
    }

    pub(crate) fn first_row(&mut self) {
        self.row = 0;
    }

    pub(crate) fn last_row(&mut self, grid: &Grid) {
        self.row = grid.row_count().saturating_sub(1);
    }

    /// Pull the cursor back inside the grid after it was rebuilt or shrunk.
    pub(crate) fn clamp(&mut self, grid: &Grid) {
        self.row = self.row.min(grid.row_count().saturating_sub(1));
        self.col = self.col.min(grid.width().saturating_sub(1));
    }

    /// Cell under the cursor, if the grid has one there.
    pub(crate) fn current_cell(&self, grid: &Grid) -> Option<(usize, usize)> {
        grid.cell(self.row, self.col).map(|_| (self.row, self.col))
    }
}

fn step(current: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as isize + offset;
    next.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize) -> Grid {
        let header = vec!["id".to_string(), "name".to_string()];
        Grid::new(header, vec![vec![String::new(), String::new()]; rows]).unwrap()
    }

    #[test]
    fn moves_stay_inside_the_grid() {
        let grid = grid(3);
        let mut view = GridView::default();
        view.move_row(-1, &grid);
        assert_eq!(view.row, 0);
        view.move_row(10, &grid);
        assert_eq!(view.row, 2);
        view.move_col(5, &grid);
        assert_eq!(view.col, 1);
    }

    #[test]
    fn clamp_after_rebuild() {
        let mut view = GridView { row: 5, col: 1 };
        view.clamp(&grid(2));
        assert_eq!(view, GridView { row: 1, col: 1 });
        view.clamp(&grid(0));
        assert_eq!(view.row, 0);
        assert_eq!(view.current_cell(&grid(0)), None);
    }
}
