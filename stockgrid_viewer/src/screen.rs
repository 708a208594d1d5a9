//! Terminal adapter: turns positioned fragments into cursor moves and colors.
//!
//! The rendering core only knows about `(x, y, text)`; everything device-specific
//! lives here. Styles are chosen from the fragment role and, for the price line, from
//! the sign/availability of the price. Fragments are clipped to the terminal, since a
//! minimum cell size may push panels past the right or bottom edge.
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, ContentStyle, PrintStyledContent, Stylize};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use log::{debug, error};
use std::io::{self, Stdout, Write};

use stockgrid_common::price::PriceTone;
use stockgrid_common::{Fragment, FragmentRole, TermSize};

/// Style for a fragment of the given role.
pub fn style_for(role: FragmentRole) -> ContentStyle {
    let style = ContentStyle::new();
    match role {
        FragmentRole::Label => style.bold(),
        FragmentRole::Price(price) => match price.tone() {
            PriceTone::Up => style.with(Color::Green),
            PriceTone::Down => style.with(Color::Red),
            PriceTone::Unavailable => style.with(Color::Yellow),
        },
        FragmentRole::Chart => style.with(Color::Cyan),
        FragmentRole::Status => style.with(Color::Yellow),
        FragmentRole::Commands | FragmentRole::Timestamp => style.with(Color::White),
    }
}

/// Part of `text` that fits between column `x` and the right edge.
fn clip(text: &str, x: usize, width: usize) -> Option<String> {
    if x >= width {
        return None;
    }
    Some(text.chars().take(width - x).collect())
}

/// Writes frames to any `Write` sink using crossterm commands.
pub struct Screen<W: Write> {
    out: W,
}

impl<W: Write> Screen<W> {
    /// Wraps an output sink.
    pub fn new(out: W) -> Self {
        Screen { out }
    }

    /// Clears the screen and writes every fragment that is at least partly visible.
    pub fn draw(&mut self, fragments: &[Fragment], size: TermSize) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        let mut clipped = 0usize;
        for fragment in fragments {
            if fragment.y >= size.height {
                clipped += 1;
                continue;
            }
            let Some(text) = clip(&fragment.text, fragment.x, size.width) else {
                clipped += 1;
                continue;
            };
            queue!(
                self.out,
                MoveTo(to_u16(fragment.x), to_u16(fragment.y)),
                PrintStyledContent(style_for(fragment.role).apply(text))
            )?;
        }
        if clipped > 0 {
            debug!("{} fragments outside the {}x{} screen", clipped, size.width, size.height);
        }
        self.out.flush()
    }

    /// Shows `text` on the last terminal row, replacing whatever was there.
    pub fn prompt(&mut self, text: &str, size: TermSize) -> io::Result<()> {
        let y = size.height.saturating_sub(1);
        let visible = clip(text, 0, size.width).unwrap_or_default();
        queue!(
            self.out,
            MoveTo(0, to_u16(y)),
            Clear(ClearType::CurrentLine),
            PrintStyledContent(ContentStyle::new().with(Color::White).apply(visible))
        )?;
        self.out.flush()
    }

    /// Underlying sink.
    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Current terminal size.
pub fn terminal_size() -> io::Result<TermSize> {
    let (width, height) = terminal::size()?;
    Ok(TermSize::new(width as usize, height as usize))
}

/// Puts the terminal into full-screen raw mode and restores it on drop.
pub struct TerminalGuard {
    screen: Screen<Stdout>,
}

impl TerminalGuard {
    /// Enters the alternate screen with raw mode and a hidden cursor.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(TerminalGuard {
            screen: Screen::new(stdout),
        })
    }

    /// Screen writing to the terminal.
    pub fn screen(&mut self) -> &mut Screen<Stdout> {
        &mut self.screen
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.screen.out, Show, LeaveAlternateScreen) {
            error!("Failed to restore screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            error!("Failed to leave raw mode: {}", e);
        }
    }
}
