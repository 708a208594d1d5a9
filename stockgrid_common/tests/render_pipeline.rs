use std::io::Write;

use stockgrid_common::frame::{TermSize, compose_frame, flatten};
use stockgrid_common::instrument::InstrumentParser;
use stockgrid_common::{FragmentRole, Instrument, Snapshot, ViewerConfig, Watchlist};

const SNAPSHOT: &str = r#"{
    "SPY": { "price": 512.0, "series": [500.0, 505.0, 510.0, 505.0, 500.0] },
    "GLD": { "price": "N/A", "series": [] },
    "USO": { "price": -37.63, "series": [10.0, 10.0, 10.0] }
}"#;

fn compact_config() -> ViewerConfig {
    ViewerConfig {
        min_cell_width: 0,
        min_cell_height: 0,
        ..ViewerConfig::default()
    }
}

#[test]
fn instrument_file_to_screen() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "SPY,S&P 500\ngld,Gold\nUSO").unwrap();
    let reader = std::io::BufReader::new(std::fs::File::open(file.path()).unwrap());
    let watchlist = Watchlist::new(Instrument::parse_from_file(reader).unwrap());

    let snapshot = Snapshot::from_reader(SNAPSHOT.as_bytes()).unwrap();
    let panels = snapshot.panels(watchlist.instruments(), 25);
    let size = TermSize::new(40, 25);
    let fragments = compose_frame(&compact_config(), &panels, size, "Updating...", "2026-10-15 16:00:00");
    let screen = flatten(&fragments, size);

    // 25 rows - 5 reserved = 20 usable; 3 panels -> 2x2 grid of 20x10 cells.
    assert_eq!(screen[0], "");
    assert_eq!(screen[1], "S&P 500 (SPY)       Gold (GLD)");
    assert_eq!(screen[2], "Price: 512.00       Price: N/A");
    assert_eq!(screen[11], "USO");
    assert_eq!(screen[12], "Price: -37.63");
    assert_eq!(screen[21], "Commands: (a)dd stock, (r)emove stock, (");
    assert_eq!(screen[22], "Updating...");
    assert_eq!(screen[23], "Last updated: 2026-10-15 16:00:00");

    // SPY chart: 18x7 at rows 3..10, peak on the top row, ends on the bottom row.
    assert_eq!(screen[3].trim(), "*");
    assert!(screen[9].starts_with('*'));
    assert!(screen[9].chars().nth(17) == Some('*'));

    // Flat USO series occupies exactly one row of its chart.
    let uso_rows: Vec<&String> = screen[13..20].iter().filter(|r| !r.is_empty()).collect();
    assert_eq!(uso_rows.len(), 1);
    assert_eq!(uso_rows[0].as_str(), "*".repeat(18));
}

#[test]
fn price_fragments_carry_tone_source() {
    let snapshot = Snapshot::from_reader(SNAPSHOT.as_bytes()).unwrap();
    let watchlist = Watchlist::new(Instrument::defaults());
    let panels = snapshot.panels(watchlist.instruments(), 25);
    let fragments = compose_frame(&ViewerConfig::default(), &panels, TermSize::new(120, 50), "", "");

    let prices: Vec<String> = fragments
        .iter()
        .filter_map(|f| match f.role {
            FragmentRole::Price(price) => Some(price.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(prices, ["512.00", "N/A", "N/A", "N/A", "N/A", "-37.63"]);
}

#[test]
fn empty_watchlist_renders_only_status() {
    let size = TermSize::new(80, 24);
    let fragments = compose_frame(&ViewerConfig::default(), &[], size, "Removed SPY", "t");
    assert_eq!(fragments.len(), 3);
    assert!(fragments.iter().all(|f| f.y >= 20));
}
