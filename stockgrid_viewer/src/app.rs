//! Interactive viewer: keyboard handling and the refresh loop.
//!
//! `App` holds everything that survives between frames: the watchlist, the last
//! snapshot, the status message, and the prompt being typed. Each frame is composed
//! from scratch from that state and the current terminal size.
//!
//! Keys:
//! - `a` — prompt for a symbol and add it;
//! - `r` — prompt for a symbol and remove it;
//! - `u` — refresh now;
//! - `q` / `Ctrl+C` — quit.
//!
//! While prompting, `Enter` confirms, `Esc` cancels and `Backspace` edits.
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use std::time::{Duration, Instant};

use stockgrid_common::command::KEY_HELP;
use stockgrid_common::frame::compose_frame;
use stockgrid_common::{
    Command, Fragment, Result, Snapshot, TermSize, ViewerConfig, Watchlist,
};

use crate::fetcher::{FetchOutcome, Fetcher};
use crate::screen::{TerminalGuard, terminal_size};

/// Timestamp format of the status area.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// How long to wait for a key before checking for finished fetches.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// What the loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing changed.
    None,
    /// Screen state changed; draw again.
    Redraw,
    /// Fetch quotes now, then draw.
    Refresh,
    /// Leave the viewer.
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputMode {
    Normal,
    Prompt { command: Command, buffer: String },
}

/// Viewer state.
pub struct App {
    config: ViewerConfig,
    watchlist: Watchlist,
    snapshot: Snapshot,
    status: String,
    // Status is about fetching ("Updating...", "Update failed") and gives way to the
    // next successful outcome.
    fetch_status: bool,
    updated_at: String,
    input: InputMode,
}

impl App {
    /// Creates the viewer state; nothing is fetched yet.
    pub fn new(config: ViewerConfig, watchlist: Watchlist) -> Self {
        App {
            config,
            watchlist,
            snapshot: Snapshot::new(),
            status: String::new(),
            fetch_status: false,
            updated_at: String::from("never"),
            input: InputMode::Normal,
        }
    }

    /// Current watchlist.
    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    /// Current status message.
    #[cfg(test)]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Prompt line being typed, if any.
    pub fn prompt_line(&self) -> Option<String> {
        match &self.input {
            InputMode::Normal => None,
            InputMode::Prompt { command, buffer } => {
                Some(format!("{}{}", command.prompt().unwrap_or_default(), buffer))
            }
        }
    }

    /// Stores a finished fetch.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        self.snapshot = outcome.snapshot;
        self.updated_at = outcome.fetched_at.format(TIMESTAMP_FORMAT).to_string();
        match outcome.error {
            Some(e) => self.set_fetch_status(format!("Update failed: {}", e)),
            None if self.fetch_status => self.set_status(String::new()),
            None => {}
        }
    }

    fn set_status(&mut self, text: String) {
        self.status = text;
        self.fetch_status = false;
    }

    fn set_fetch_status(&mut self, text: String) {
        self.status = text;
        self.fetch_status = true;
    }

    /// All fragments of the screen for a terminal of `size`.
    pub fn frame(&self, size: TermSize) -> Vec<Fragment> {
        let panels = self
            .snapshot
            .panels(self.watchlist.instruments(), self.config.history_len);
        compose_frame(&self.config, &panels, size, &self.status, &self.updated_at)
    }

    /// Interprets one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match std::mem::replace(&mut self.input, InputMode::Normal) {
            InputMode::Normal => self.handle_command_key(key),
            InputMode::Prompt { command, buffer } => self.handle_prompt_key(command, buffer, key),
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) -> Action {
        let KeyCode::Char(c) = key.code else {
            self.set_status(String::from(KEY_HELP));
            return Action::Redraw;
        };
        match Command::from_key(c) {
            Ok(Command::Quit) => Action::Quit,
            Ok(Command::Update) => {
                self.set_fetch_status(String::from("Updating..."));
                Action::Refresh
            }
            Ok(command) => {
                self.input = InputMode::Prompt {
                    command,
                    buffer: String::new(),
                };
                Action::Redraw
            }
            Err(e) => {
                debug!("{}", e);
                self.set_status(String::from(KEY_HELP));
                Action::Redraw
            }
        }
    }

    fn handle_prompt_key(&mut self, command: Command, mut buffer: String, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter => self.run_list_command(command, &buffer),
            KeyCode::Esc => {
                self.set_status(String::from("Cancelled"));
                Action::Redraw
            }
            KeyCode::Backspace => {
                buffer.pop();
                self.input = InputMode::Prompt { command, buffer };
                Action::Redraw
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                self.input = InputMode::Prompt { command, buffer };
                Action::Redraw
            }
            _ => {
                self.input = InputMode::Prompt { command, buffer };
                Action::None
            }
        }
    }

    fn run_list_command(&mut self, command: Command, symbol: &str) -> Action {
        let result = match command {
            Command::Add => self.watchlist.add(symbol),
            Command::Remove => self.watchlist.remove(symbol),
            Command::Update | Command::Quit => return Action::Redraw,
        };
        match result {
            Ok(message) => {
                self.set_status(message);
                Action::Refresh
            }
            Err(e) => {
                self.set_status(e.to_string());
                Action::Redraw
            }
        }
    }

    /// Runs the interactive loop until the user quits.
    pub fn run(mut self, fetcher: &Fetcher) -> Result<()> {
        let mut terminal = TerminalGuard::enter()?;
        let mut next_refresh = Instant::now();
        let mut dirty = true;

        loop {
            if Instant::now() >= next_refresh {
                fetcher.request(self.watchlist.instruments())?;
                next_refresh = Instant::now() + self.config.refresh_interval;
            }
            while let Some(outcome) = fetcher.try_outcome()? {
                self.apply_outcome(outcome);
                dirty = true;
            }

            if dirty {
                let size = terminal_size()?;
                let screen = terminal.screen();
                screen.draw(&self.frame(size), size)?;
                if let Some(prompt) = self.prompt_line() {
                    screen.prompt(&prompt, size)?;
                }
                dirty = false;
            }

            if !event::poll(INPUT_POLL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match self.handle_key(key) {
                    Action::Quit => break,
                    Action::Refresh => {
                        next_refresh = Instant::now();
                        dirty = true;
                    }
                    Action::Redraw => dirty = true,
                    Action::None => {}
                },
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }

        info!("Viewer stopping...");
        Ok(())
    }
}
