//! Terminal application state, layout and drawing

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use super::input::{InputHandler, TermAction};
use crate::config::{ConfigResult, EngineConfig};
use crate::engine::{EngineState, ExpressionEngine};
use crate::input::{dispatch, Keypad, KeypadAction, KeypadButtonDef};

/// Left edge of the display and keypad
pub const ORIGIN_X: u16 = 2;
/// Row of the display line
pub const DISPLAY_ROW: u16 = 2;
/// First keypad row
pub const KEYPAD_TOP: u16 = 4;
/// Horizontal cells per keypad button, gap included
pub const BUTTON_WIDTH: u16 = 6;
/// Cells drawn per button
const BUTTON_FACE: u16 = 5;

/// Terminal calculator state
#[derive(Debug)]
pub struct CalculatorApp {
    engine: ExpressionEngine,
    keypad: Keypad,
    input: InputHandler,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates an app with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(ExpressionEngine::new())
    }

    /// Creates an app with a validated configuration
    pub fn with_config(config: EngineConfig) -> ConfigResult<Self> {
        Ok(Self::with_engine(ExpressionEngine::with_config(config)?))
    }

    fn with_engine(engine: ExpressionEngine) -> Self {
        Self {
            engine,
            keypad: Keypad::new(),
            input: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    /// Returns the keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handles a key event; returns true if the key was consumed
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        match self.input.handle_key(event) {
            TermAction::Keypad(action) => {
                self.apply(action);
                true
            }
            TermAction::Quit => {
                self.quit();
                true
            }
            TermAction::None => false,
        }
    }

    /// Handles a mouse event; only left-button presses on a button count
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click_at(event.column, event.row),
            _ => false,
        }
    }

    /// Presses the keypad button drawn at the given cell
    pub fn click_at(&mut self, x: u16, y: u16) -> bool {
        match self.hit_test(x, y) {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, action: KeypadAction) {
        let _ = dispatch(&mut self.engine, action);
    }

    /// Top-left cell of a button face
    #[must_use]
    pub fn button_position(button: &KeypadButtonDef) -> (u16, u16) {
        let col = u16::try_from(button.col).unwrap_or(u16::MAX);
        let row = u16::try_from(button.row).unwrap_or(u16::MAX);
        (
            ORIGIN_X.saturating_add(col.saturating_mul(BUTTON_WIDTH)),
            KEYPAD_TOP.saturating_add(row),
        )
    }

    /// Converts a cell position to the action of the button drawn there
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<KeypadAction> {
        if x < ORIGIN_X || y < KEYPAD_TOP {
            return None;
        }
        let rel_x = x - ORIGIN_X;
        if rel_x % BUTTON_WIDTH >= BUTTON_FACE {
            return None;
        }
        let col = usize::from(rel_x / BUTTON_WIDTH);
        let row = usize::from(y - KEYPAD_TOP);
        self.keypad.get_button_at(row, col).map(|b| b.action)
    }

    /// Display text fitted to the keypad width, right-aligned.
    ///
    /// Long expressions show their tail.
    #[must_use]
    pub fn display_line(&self) -> String {
        let (_, cols) = self.keypad.dimensions();
        let width = cols * usize::from(BUTTON_WIDTH) - 1;
        let text = self.engine.display();
        let len = text.chars().count();
        let visible: String = text.chars().skip(len.saturating_sub(width)).collect();
        format!("{visible:>width$}")
    }

    /// Draws the whole screen
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(
            out,
            terminal::Clear(ClearType::All),
            MoveTo(ORIGIN_X, 0),
            SetAttribute(Attribute::Bold),
            Print("calc-buffer"),
            SetAttribute(Attribute::Reset),
            Print("  q: quit"),
            MoveTo(ORIGIN_X, DISPLAY_ROW),
        )?;

        if self.engine.state() == EngineState::Error {
            queue!(
                out,
                SetForegroundColor(Color::Red),
                Print(self.display_line()),
                ResetColor
            )?;
        } else {
            queue!(out, Print(self.display_line()))?;
        }

        for button in self.keypad.buttons() {
            let (x, y) = Self::button_position(button);
            let face = format!("[{:^3}]", button.action.label());
            queue!(out, MoveTo(x, y), Print(face))?;
        }
        out.flush()
    }
}

/// Raw mode, alternate screen and mouse capture, undone on drop
#[derive(Debug)]
struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let session = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(session)
    }

    /// Restores the terminal and reports the first failure
    fn leave(mut self) -> io::Result<()> {
        self.active = false;
        restore_terminal(&mut io::stdout())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            let _ = restore_terminal(&mut io::stdout());
        }
    }
}

/// Runs every restore step even if an earlier one fails
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    let screen = execute!(out, Show, DisableMouseCapture, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    screen.and(raw)
}

/// Runs the terminal loop until the user quits
///
/// The terminal is restored on every exit path, panics included.
pub fn run(app: &mut CalculatorApp) -> io::Result<()> {
    let session = TerminalSession::enter()?;
    let result = event_loop(app, &mut io::stdout());
    let restored = session.leave();
    result.and(restored)
}

fn event_loop<W: Write>(app: &mut CalculatorApp, out: &mut W) -> io::Result<()> {
    tracing::debug!("terminal loop started");
    app.render(out)?;
    while !app.should_quit() {
        let redraw = match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize(..) => true,
            _ => false,
        };
        if redraw && !app.should_quit() {
            app.render(out)?;
        }
    }
    tracing::debug!("terminal loop finished");
    Ok(())
}
