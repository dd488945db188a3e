//! Full-screen crossterm frontend for the drivers

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

use super::draw::draw;
use super::keymap::Keymap;
use super::theme::Theme;
use crate::inventory::driver::Frontend;
use crate::inventory::input::{Action, InputEvent};
use crate::inventory::selector::Selector;

/// Owns the terminal in raw mode on the alternate screen until dropped or
/// restored
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
    keymap: Keymap,
    restored: bool,
}

impl TerminalFrontend {
    pub fn new(theme: Theme, keymap: Keymap) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        tracing::debug!("Terminal ready");
        Ok(Self {
            terminal,
            theme,
            keymap,
            restored: false,
        })
    }

    /// Leave the alternate screen and raw mode
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
}

impl Frontend for TerminalFrontend {
    fn size(&mut self) -> Result<(u16, u16)> {
        Ok(crossterm::terminal::size()?)
    }

    fn draw(&mut self, selector: &Selector) -> Result<()> {
        self.terminal.draw(|f| draw(f, selector, &self.theme))?;
        Ok(())
    }

    fn next_event(&mut self) -> Result<InputEvent> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(input) = self.keymap.translate(&key) {
                        return Ok(input);
                    }
                }
                Event::Resize(width, height) => {
                    tracing::debug!("Terminal resized to {}x{}", width, height);
                    return Ok(InputEvent::action(Action::Resize));
                }
                _ => {}
            }
        }
    }
}
