//! Browser front-end
//!
//! The mock DOM and [`WasmDriver`] build on every target; the
//! `wasm-bindgen` bindings need the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;

#[cfg(feature = "wasm")]
pub use browser::{init, BrowserCalculator};
pub use dom::{DomElement, DomEvent, MockDom, DISPLAY_ID, ERROR_CLASS, KEYPAD_ID};
pub use driver::WasmDriver;
