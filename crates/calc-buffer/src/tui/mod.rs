//! Terminal front-end
//!
//! One key or mouse event runs one engine operation, then the screen is
//! redrawn.

mod app;
mod input;

pub use app::{run, CalculatorApp, BUTTON_WIDTH, DISPLAY_ROW, KEYPAD_TOP, ORIGIN_X};
pub use input::{key_name, InputHandler, TermAction};
