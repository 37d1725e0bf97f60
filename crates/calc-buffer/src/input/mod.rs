//! Keypad and keyboard input
//!
//! Pointer clicks and key presses both resolve to a [`KeypadAction`], and
//! every action reaches the engine through [`dispatch`]. Front-ends never
//! call engine operations directly, so equal input produces equal state no
//! matter where it came from.

mod keypad;

pub use keypad::{Keypad, KeypadAction, KeypadButtonDef};

use crate::engine::{ExpressionEngine, Outcome};

/// Routes an action to exactly one engine operation
pub fn dispatch(engine: &mut ExpressionEngine, action: KeypadAction) -> Outcome {
    tracing::debug!(?action, "dispatch");
    match action {
        KeypadAction::Digit(d) => engine.append_digit(d),
        KeypadAction::Decimal => engine.append_decimal(),
        KeypadAction::Operator(op) => engine.append_operator(op),
        KeypadAction::Equals => engine.evaluate(),
        KeypadAction::Clear => engine.clear(),
        KeypadAction::Backspace => engine.backspace(),
    }
}
