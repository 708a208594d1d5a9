//! ASCII line-chart rasterizer.
//!
//! `rasterize` turns a chronological price series into a `Canvas` of `height` rows and
//! `width` columns, row 0 at the top:
//!
//! - every sample is normalized against the series range onto a vertical level in
//!   `0..height`, higher prices nearer the top;
//! - sample `i` of `n` lands in column `min(i * width / (n - 1), width - 1)`;
//! - consecutive samples are joined with `*` segments, or with a `|` run when both
//!   fall into the same column because the series is denser than the canvas.
//!
//! The rasterizer is pure: the same `(series, width, height)` always yields the same
//! canvas, and nothing is ever written outside the grid. Series must be finite.
use std::fmt;

/// Glyph used for interpolated segments.
pub const LINE_GLYPH: char = '*';
/// Glyph used when two consecutive samples share a column.
pub const VERTICAL_GLYPH: char = '|';
/// Background glyph.
pub const BLANK_GLYPH: char = ' ';

/// Character grid produced by [`rasterize`]. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    rows: Vec<String>,
}

impl Canvas {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Rows top to bottom, each exactly `width` characters long.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Consumes the canvas and returns its rows.
    pub fn into_rows(self) -> Vec<String> {
        self.rows
    }

    /// Character at column `x` of row `y`, if inside the grid.
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y).and_then(|row| row.chars().nth(x))
    }

    /// Row indices that contain at least one non-blank glyph.
    pub fn used_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.chars().any(|c| c != BLANK_GLYPH))
            .map(|(y, _)| y)
            .collect()
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

/// Mutable grid used while a single rasterization is in progress.
struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
}

impl Grid {
    fn blank(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![vec![BLANK_GLYPH; width]; height],
        }
    }

    /// Writes `glyph` at `(x, row)`; anything outside the grid is dropped.
    fn plot(&mut self, x: i64, row: i64, glyph: char) {
        if x < 0 || row < 0 {
            return;
        }
        let (x, row) = (x as usize, row as usize);
        if x < self.width && row < self.height {
            self.cells[row][x] = glyph;
        }
    }

    fn freeze(self) -> Canvas {
        Canvas {
            width: self.width,
            rows: self
                .cells
                .into_iter()
                .map(|row| row.into_iter().collect())
                .collect(),
        }
    }
}

/// Rasterizes `series` into a `height` x `width` line chart.
///
/// Zero dimensions are treated as 1. An empty series yields a blank canvas, a single
/// sample marks column 0 only, and a flat series is drawn on the middle row.
pub fn rasterize(series: &[f64], width: usize, height: usize) -> Canvas {
    let width = width.max(1);
    let height = height.max(1);
    let mut grid = Grid::blank(width, height);

    if series.is_empty() {
        return grid.freeze();
    }

    let rows: Vec<i64> = levels(series, height)
        .into_iter()
        .map(|level| (height - 1 - level) as i64)
        .collect();

    if rows.len() == 1 {
        grid.plot(0, rows[0], LINE_GLYPH);
        return grid.freeze();
    }

    let columns: Vec<i64> = (0..rows.len())
        .map(|i| column_for(i, rows.len(), width) as i64)
        .collect();

    for i in 0..rows.len() - 1 {
        let (x1, row1) = (columns[i], rows[i]);
        let (x2, row2) = (columns[i + 1], rows[i + 1]);

        if x1 == x2 {
            for row in row1.min(row2)..=row1.max(row2) {
                grid.plot(x1, row, VERTICAL_GLYPH);
            }
        } else {
            let slope = (row2 - row1) as f64 / (x2 - x1) as f64;
            for x in x1..=x2 {
                let row = (row1 as f64 + slope * (x - x1) as f64).round_ties_even() as i64;
                grid.plot(x, row, LINE_GLYPH);
            }
        }
    }

    grid.freeze()
}

/// Normalized vertical level of every sample, each in `0..height`.
///
/// A series without range has no meaningful scale; every sample then sits on the
/// middle level.
fn levels(series: &[f64], height: usize) -> Vec<usize> {
    let (min, max) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
    let top = height - 1;

    if max == min {
        return vec![top / 2; series.len()];
    }

    let scale = max - min;
    series
        .iter()
        .map(|&p| {
            let level = ((p - min) / scale * top as f64).floor();
            (level.max(0.0) as usize).min(top)
        })
        .collect()
}

/// Column of sample `index` among `count` samples spread over `width` columns.
fn column_for(index: usize, count: usize, width: usize) -> usize {
    (index * width / (count - 1)).min(width - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(canvas: &Canvas) -> Vec<&str> {
        canvas.rows().iter().map(String::as_str).collect()
    }

    #[test]
    fn empty_series_gives_blank_canvas() {
        let canvas = rasterize(&[], 10, 4);
        assert_eq!(canvas.height(), 4);
        assert_eq!(canvas.width(), 10);
        assert!(canvas.rows().iter().all(|r| r == &" ".repeat(10)));
    }

    #[test]
    fn peak_and_troughs_land_on_expected_cells() {
        let canvas = rasterize(&[1.0, 2.0, 3.0, 2.0, 1.0], 5, 3);
        assert_eq!(rows(&canvas), vec!["  *  ", " * * ", "*   *"]);
        assert_eq!(canvas.glyph(2, 0), Some('*'));
        assert_eq!(canvas.glyph(0, 2), Some('*'));
        assert_eq!(canvas.glyph(4, 2), Some('*'));
    }

    #[test]
    fn flat_series_uses_one_centered_row() {
        let canvas = rasterize(&[7.0, 7.0, 7.0, 7.0], 8, 5);
        assert_eq!(canvas.used_rows(), vec![2]);
        assert_eq!(canvas.rows()[2], "********");
    }

    #[test]
    fn single_sample_marks_first_column_only() {
        let canvas = rasterize(&[42.0], 6, 3);
        assert_eq!(canvas.used_rows(), vec![1]);
        assert_eq!(canvas.rows()[1], "*     ");
    }

    #[test]
    fn dense_series_draws_vertical_runs() {
        // Five samples over two columns: samples 0 and 1 share column 0, 2..=4 share column 1.
        let canvas = rasterize(&[0.0, 4.0, 0.0, 4.0, 0.0], 2, 5);
        assert_eq!(rows(&canvas), vec!["*|", "||", "||", "||", "||"]);
    }

    #[test]
    fn rising_series_ends_top_right() {
        let canvas = rasterize(&[1.0, 2.0, 3.0, 4.0], 10, 4);
        assert_eq!(canvas.glyph(0, 3), Some('*'));
        assert_eq!(canvas.glyph(9, 0), Some('*'));
    }

    #[test]
    fn halfway_rows_round_to_even() {
        // Row falls from 2 to 0 over five columns: x=1 gives 1.5 -> 2, x=3 gives 0.5 -> 0.
        let canvas = rasterize(&[0.0, 2.0], 5, 3);
        assert_eq!(rows(&canvas), vec!["   **", "  *  ", "**   "]);
    }

    #[test]
    fn zero_dimensions_are_clamped() {
        let canvas = rasterize(&[1.0, 2.0], 0, 0);
        assert_eq!(rows(&canvas), vec!["|"]);
    }

    #[test]
    fn never_writes_outside_grid() {
        let series: Vec<f64> = (0..97).map(|i| ((i * 37) % 23) as f64 - 11.5).collect();
        for width in 1..24 {
            for height in 2..9 {
                let canvas = rasterize(&series, width, height);
                assert_eq!(canvas.height(), height);
                assert!(canvas.rows().iter().all(|r| r.chars().count() == width));
            }
        }
    }

    #[test]
    fn identical_inputs_give_identical_canvases() {
        let series = [3.5, 1.25, 9.0, 9.0, 4.75, 6.0];
        assert_eq!(rasterize(&series, 17, 6), rasterize(&series, 17, 6));
    }

    #[test]
    fn display_joins_rows() {
        let canvas = rasterize(&[1.0, 2.0], 2, 2);
        assert_eq!(canvas.to_string(), " *\n* ");
    }
}
