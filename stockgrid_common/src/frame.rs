//! Whole-screen composition: panel grid plus the status area.
//!
//! `compose_frame` is the single entry point a render pass needs. It lays the panels
//! out below the top margin, applies the configured minimum cell size, and appends the
//! status lines at `height - bottom_margin`. `flatten` turns fragments back into plain
//! screen rows for consumers without cursor addressing.
use crate::command::COMMANDS_HELP;
use crate::compositor::{Fragment, FragmentRole, PanelSpec, compose_panels_at};
use crate::config::ViewerConfig;
use crate::layout::GridLayout;

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
}

impl TermSize {
    /// Creates a size.
    pub fn new(width: usize, height: usize) -> Self {
        TermSize { width, height }
    }
}

/// Grid used for `panel_count` panels under `config` on a terminal of `size`.
pub fn frame_layout(config: &ViewerConfig, panel_count: usize, size: TermSize) -> GridLayout {
    GridLayout::compute(
        panel_count,
        size.width,
        size.height,
        config.reserved_rows(),
    )
    .with_min_cell(config.min_cell_width, config.min_cell_height)
}

/// Commands line, status message, and timestamp, starting at `height - bottom_margin`.
pub fn compose_status(
    config: &ViewerConfig,
    size: TermSize,
    status: &str,
    updated_at: &str,
) -> Vec<Fragment> {
    let bottom_y = size.height.saturating_sub(config.bottom_margin);
    vec![
        Fragment::new(0, bottom_y, COMMANDS_HELP, FragmentRole::Commands),
        Fragment::new(0, bottom_y + 1, status, FragmentRole::Status),
        Fragment::new(
            0,
            bottom_y + 2,
            format!("Last updated: {}", updated_at),
            FragmentRole::Timestamp,
        ),
    ]
}

/// Every fragment of one screen: panels first, then the status area.
pub fn compose_frame(
    config: &ViewerConfig,
    panels: &[PanelSpec],
    size: TermSize,
    status: &str,
    updated_at: &str,
) -> Vec<Fragment> {
    let grid = frame_layout(config, panels.len(), size);
    let mut fragments = compose_panels_at(&grid, panels, (0, config.top_margin));
    fragments.extend(compose_status(config, size, status, updated_at));
    fragments
}

/// Paints `fragments` onto a blank `size` screen, clipping whatever falls outside,
/// and returns the rows with trailing blanks trimmed.
pub fn flatten(fragments: &[Fragment], size: TermSize) -> Vec<String> {
    let mut screen = vec![vec![' '; size.width]; size.height];
    for fragment in fragments {
        let Some(row) = screen.get_mut(fragment.y) else {
            continue;
        };
        for (offset, ch) in fragment.text.chars().enumerate() {
            match row.get_mut(fragment.x + offset) {
                Some(cell) => *cell = ch,
                None => break,
            }
        }
    }
    screen
        .into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}
