//! calc-buffer: keypad calculator built around an expression buffer
//!
//! The [`engine::ExpressionEngine`] owns the text the user is typing and
//! applies keypad operations to it. Front-ends translate clicks and keys into
//! [`input::KeypadAction`]s and show whatever the engine reports as its
//! display. Evaluation goes through a small recursive-descent parser; nothing
//! is ever handed to a dynamic evaluator.
//!
//! # Example
//!
//! ```rust
//! use calc_buffer::prelude::*;
//!
//! let mut engine = ExpressionEngine::new();
//! for action in [
//!     KeypadAction::Digit(2),
//!     KeypadAction::Operator(Operation::Add),
//!     KeypadAction::Digit(3),
//!     KeypadAction::Operator(Operation::Multiply),
//!     KeypadAction::Digit(4),
//!     KeypadAction::Equals,
//! ] {
//!     let _ = dispatch(&mut engine, action);
//! }
//! assert_eq!(engine.display(), "14");
//!
//! // Failures show the error marker and empty the buffer
//! let _ = engine.set_expression("5/0");
//! let _ = engine.evaluate();
//! assert_eq!(engine.display(), "Error");
//! assert_eq!(engine.expression(), "");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod engine;
pub mod input;

#[cfg(feature = "tui")]
pub mod tui;

/// Browser front-end; the mock DOM builds without the `wasm` feature
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, ConfigResult, EngineConfig};
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::format::format_number;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, Operation};
    pub use crate::driver::CalculatorDriver;
    pub use crate::engine::{EngineState, ExpressionEngine, Outcome};
    pub use crate::input::{dispatch, Keypad, KeypadAction};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::wasm::{DomElement, DomEvent, MockDom, WasmDriver};
}
