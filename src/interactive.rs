//! Keyboard-driven window/zoom adjustment
//!
//! Up/Down move the window center, Right/Left widen or narrow the window,
//! `+`/`-` zoom, `r` resets, `q` or Esc quits. Only the viewport changes; the
//! encoded frame is reused for every redraw.

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};
use std::io::Write;
use tracing::debug;

use crate::display::print_frame;
use crate::display_metadata::viewport_summary;
use crate::frame::ImageFrame;

/// Increment applied per key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    pub center: f64,
    pub width: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Center(f64),
    Width(f64),
    Zoom(f64),
    Reset,
    Quit,
}

#[must_use]
pub fn action_for_key(code: KeyCode, steps: Steps) -> Option<Action> {
    match code {
        KeyCode::Up => Some(Action::Center(steps.center)),
        KeyCode::Down => Some(Action::Center(-steps.center)),
        KeyCode::Right => Some(Action::Width(steps.width)),
        KeyCode::Left => Some(Action::Width(-steps.width)),
        KeyCode::Char('+' | '=') => Some(Action::Zoom(steps.zoom)),
        KeyCode::Char('-' | '_') => Some(Action::Zoom(-steps.zoom)),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

pub fn apply_action(frame: &mut ImageFrame, action: Action) {
    match action {
        Action::Center(delta) => frame.adjust_window_center(delta),
        Action::Width(delta) => frame.adjust_window_width(delta),
        Action::Zoom(delta) => frame.adjust_zoom(delta),
        Action::Reset => frame.reset_viewport(),
        Action::Quit => {}
    }
}

/// Redraw-and-wait loop; returns when the user quits
pub fn run(
    frame: &mut ImageFrame,
    invert: bool,
    width: Option<u32>,
    height: Option<u32>,
    steps: Steps,
) -> Result<()> {
    let mut stdout = std::io::stdout();

    loop {
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)).context("Failed to clear terminal")?;
        print_frame(frame, invert, width, height)?;
        println!("{}", viewport_summary(frame));
        println!("[Up/Down] center  [Left/Right] width  [+/-] zoom  [r] reset  [q] quit");
        stdout.flush().context("Failed to flush stdout")?;

        let code = read_key()?;
        let Some(action) = action_for_key(code, steps) else {
            continue;
        };
        if action == Action::Quit {
            return Ok(());
        }

        apply_action(frame, action);
        debug!(?action, "Viewport updated");
    }
}

/// Block until a key is pressed. Raw mode is held only while waiting so the
/// image printer sees a normal terminal.
fn read_key() -> Result<KeyCode> {
    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    let code = loop {
        match event::read() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => break Ok(code),
            Ok(_) => {}
            Err(e) => break Err(e),
        }
    };
    terminal::disable_raw_mode().context("Failed to disable raw mode")?;

    code.context("Failed to read keyboard event")
}
