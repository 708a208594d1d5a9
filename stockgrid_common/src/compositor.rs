//! Panel compositor: places one labeled chart per instrument into the grid.
//!
//! For panel `i` the cell origin comes from [`GridLayout::cell_origin`]. Inside the
//! cell the first row holds the label, the second the price line, and the chart fills
//! the rest minus one padding row. The result is a flat list of positioned
//! [`Fragment`]s in panel order, top to bottom within a panel; each fragment carries
//! its absolute position, so consumers may apply them in any order.
use crate::chart::rasterize;
use crate::layout::GridLayout;
use crate::price::Price;

/// Rows of a cell not available to the chart: label, price line, padding.
pub const CELL_CHROME_ROWS: usize = 3;
/// Columns of a cell not available to the chart.
pub const CELL_GUTTER_COLUMNS: usize = 2;

/// Everything the compositor needs to know about one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    /// Instrument symbol.
    pub symbol: String,
    /// Heading shown on the first row of the panel.
    pub label: String,
    /// Current price or the sentinel.
    pub price: Price,
    /// Chronological, finite price history.
    pub series: Vec<f64>,
}

impl PanelSpec {
    /// Creates a panel description.
    pub fn new(symbol: &str, label: &str, price: Price, series: Vec<f64>) -> Self {
        PanelSpec {
            symbol: symbol.to_string(),
            label: label.to_string(),
            price,
            series,
        }
    }

    /// Text of the price line.
    pub fn price_line(&self) -> String {
        format!("Price: {}", self.price)
    }
}

/// What a fragment shows; lets the terminal adapter pick a style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FragmentRole {
    /// Panel heading.
    Label,
    /// Price line, with the price it was formatted from.
    Price(Price),
    /// One row of a chart canvas.
    Chart,
    /// Commands line of the status area.
    Commands,
    /// Transient status message.
    Status,
    /// Last refresh timestamp.
    Timestamp,
}

/// Text to be written at an absolute terminal position.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Column, 0-based.
    pub x: usize,
    /// Row, 0-based.
    pub y: usize,
    /// Text to write, without escape sequences.
    pub text: String,
    /// What the text represents.
    pub role: FragmentRole,
}

impl Fragment {
    /// Creates a fragment.
    pub fn new(x: usize, y: usize, text: impl Into<String>, role: FragmentRole) -> Self {
        Fragment {
            x,
            y,
            text: text.into(),
            role,
        }
    }
}

/// Chart `(width, height)` inside a cell, each at least 1.
pub fn chart_dimensions(layout: &GridLayout) -> (usize, usize) {
    let width = layout.cell_width.saturating_sub(CELL_GUTTER_COLUMNS).max(1);
    let height = layout.cell_height.saturating_sub(CELL_CHROME_ROWS).max(1);
    (width, height)
}

/// Composes all panels with the grid anchored at the terminal origin.
pub fn compose_panels(layout: &GridLayout, panels: &[PanelSpec]) -> Vec<Fragment> {
    compose_panels_at(layout, panels, (0, 0))
}

/// Composes all panels with the grid's top-left corner at `origin`.
pub fn compose_panels_at(
    layout: &GridLayout,
    panels: &[PanelSpec],
    origin: (usize, usize),
) -> Vec<Fragment> {
    let (chart_width, chart_height) = chart_dimensions(layout);
    let mut fragments = Vec::with_capacity(panels.len() * (chart_height + 2));

    for (index, panel) in panels.iter().enumerate() {
        let (cell_x, cell_y) = layout.cell_origin(index);
        let x = origin.0 + cell_x;
        let y = origin.1 + cell_y;

        fragments.push(Fragment::new(x, y, panel.label.as_str(), FragmentRole::Label));
        fragments.push(Fragment::new(
            x,
            y + 1,
            panel.price_line(),
            FragmentRole::Price(panel.price),
        ));

        let canvas = rasterize(&panel.series, chart_width, chart_height);
        for (row, line) in canvas.into_rows().into_iter().enumerate() {
            fragments.push(Fragment::new(x, y + 2 + row, line, FragmentRole::Chart));
        }
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;

    fn panel(symbol: &str, price: Price, series: &[f64]) -> PanelSpec {
        PanelSpec::new(symbol, symbol, price, series.to_vec())
    }

    #[test]
    fn fourth_panel_sits_in_second_row_second_column() {
        let grid = layout(4, 100, 42, 2);
        let panels: Vec<PanelSpec> = ["A", "B", "C", "D"]
            .iter()
            .map(|s| panel(s, Price::Available(1.0), &[1.0, 2.0]))
            .collect();
        let fragments = compose_panels(&grid, &panels);
        let label = fragments
            .iter()
            .find(|f| f.role == FragmentRole::Label && f.text == "D")
            .unwrap();
        assert_eq!((label.x, label.y), (grid.cell_width, grid.cell_height));
        assert_eq!((label.x, label.y), (50, 20));
    }

    #[test]
    fn emits_label_price_and_chart_rows_in_order() {
        let grid = layout(1, 12, 8, 0);
        let fragments = compose_panels(&grid, &[panel("SPY", Price::Available(412.5), &[1.0, 3.0])]);

        // 8 rows - 3 chrome rows = 5 chart rows, plus label and price.
        assert_eq!(fragments.len(), 7);
        assert_eq!(fragments[0], Fragment::new(0, 0, "SPY", FragmentRole::Label));
        assert_eq!(fragments[1].text, "Price: 412.50");
        assert_eq!((fragments[1].x, fragments[1].y), (0, 1));
        for (row, fragment) in fragments[2..].iter().enumerate() {
            assert_eq!(fragment.role, FragmentRole::Chart);
            assert_eq!((fragment.x, fragment.y), (0, 2 + row));
            assert_eq!(fragment.text.chars().count(), 10);
        }
    }

    #[test]
    fn sentinel_price_is_rendered_as_na() {
        let grid = layout(1, 20, 10, 0);
        let fragments = compose_panels(&grid, &[panel("GLD", Price::NotAvailable, &[])]);
        assert_eq!(fragments[1].text, "Price: N/A");
        assert_eq!(fragments[1].role, FragmentRole::Price(Price::NotAvailable));
        assert!(fragments[2..].iter().all(|f| f.text.trim().is_empty()));
    }

    #[test]
    fn tiny_cells_fall_back_to_one_chart_row() {
        let grid = layout(2, 4, 2, 0);
        assert_eq!(chart_dimensions(&grid), (1, 1));
        let fragments = compose_panels(
            &grid,
            &[
                panel("A", Price::Available(1.0), &[1.0, 2.0, 3.0]),
                panel("B", Price::Available(1.0), &[3.0, 2.0]),
            ],
        );
        assert_eq!(fragments.len(), 6);
        assert_eq!(fragments[5].y, 2);
        assert_eq!(fragments[3].x, 2);
    }

    #[test]
    fn origin_shifts_every_fragment() {
        let grid = layout(3, 60, 30, 0);
        let panels = vec![
            panel("A", Price::Available(1.0), &[1.0]),
            panel("B", Price::Available(2.0), &[2.0]),
            panel("C", Price::Available(3.0), &[3.0]),
        ];
        let anchored = compose_panels(&grid, &panels);
        let shifted = compose_panels_at(&grid, &panels, (0, 1));
        assert_eq!(anchored.len(), shifted.len());
        for (a, s) in anchored.iter().zip(&shifted) {
            assert_eq!((a.x, a.y + 1), (s.x, s.y));
            assert_eq!(a.text, s.text);
        }
    }

    #[test]
    fn no_panels_no_fragments() {
        let grid = layout(0, 80, 24, 4);
        assert!(compose_panels(&grid, &[]).is_empty());
    }
}
