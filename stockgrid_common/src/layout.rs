//! Grid layout engine: splits the terminal among a variable number of panels.
//!
//! The grid never has more than [`MAX_COLUMNS`] columns; rows grow with the panel
//! count. Every cell gets the same size, obtained by integer division of the usable
//! area, so the grid always fits inside the terminal. Cell sizes are not floored here;
//! see [`GridLayout::with_min_cell`] for callers that prefer overflowing to tiny cells.

/// Fixed column cap of the panel grid.
pub const MAX_COLUMNS: usize = 2;

/// Column/row split of the usable area and the size of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of panel columns, 1 or 2.
    pub columns: usize,
    /// Number of panel rows.
    pub rows: usize,
    /// Width of one cell in characters.
    pub cell_width: usize,
    /// Height of one cell in characters.
    pub cell_height: usize,
}

impl GridLayout {
    /// Computes the grid for `panel_count` panels on a `terminal_width` x
    /// `terminal_height` terminal, with `reserved_rows` kept free for chrome.
    ///
    /// With no panels the single cell spans the whole usable area; the caller is
    /// expected not to render anything into it.
    pub fn compute(
        panel_count: usize,
        terminal_width: usize,
        terminal_height: usize,
        reserved_rows: usize,
    ) -> Self {
        let usable_height = terminal_height.saturating_sub(reserved_rows);

        if panel_count == 0 {
            return GridLayout {
                columns: 1,
                rows: 1,
                cell_width: terminal_width,
                cell_height: usable_height,
            };
        }

        let columns = panel_count.min(MAX_COLUMNS);
        let rows = panel_count.div_ceil(columns);

        GridLayout {
            columns,
            rows,
            cell_width: terminal_width / columns,
            cell_height: usable_height / rows,
        }
    }

    /// Raises the cell size to at least `min_width` x `min_height`.
    ///
    /// The result may no longer fit the terminal; the terminal adapter clips whatever
    /// falls outside.
    pub fn with_min_cell(self, min_width: usize, min_height: usize) -> Self {
        GridLayout {
            cell_width: self.cell_width.max(min_width),
            cell_height: self.cell_height.max(min_height),
            ..self
        }
    }

    /// Number of cells in the grid.
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Top-left corner `(x, y)` of the cell that holds panel `index`.
    pub fn cell_origin(&self, index: usize) -> (usize, usize) {
        let columns = self.columns.max(1);
        (
            (index % columns) * self.cell_width,
            (index / columns) * self.cell_height,
        )
    }
}

/// Free-function form of [`GridLayout::compute`].
pub fn layout(
    panel_count: usize,
    terminal_width: usize,
    terminal_height: usize,
    reserved_rows: usize,
) -> GridLayout {
    GridLayout::compute(panel_count, terminal_width, terminal_height, reserved_rows)
}
