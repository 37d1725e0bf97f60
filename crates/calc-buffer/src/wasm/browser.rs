//! Browser bindings
//!
//! The page forwards button clicks and `keydown` events here and calls
//! `preventDefault` only when a handler returns true.

use wasm_bindgen::prelude::*;
use web_sys::{console, Element};

use super::dom::DISPLAY_ID;
use crate::engine::ExpressionEngine;
use crate::input::{dispatch, KeypadAction};

/// Browser calculator, the WASM entry point
#[derive(Debug, Default)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    engine: ExpressionEngine,
    display: Option<Element>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a new browser calculator
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self::default()
    }

    /// Binds the display region by element id and renders into it.
    ///
    /// Falls back to the first `.display` element when the id is missing.
    pub fn mount(&mut self, display_id: Option<String>) -> bool {
        let id = display_id.unwrap_or_else(|| DISPLAY_ID.to_string());
        let document = web_sys::window().and_then(|w| w.document());
        self.display = document.and_then(|doc| {
            doc.get_element_by_id(&id)
                .or_else(|| doc.query_selector(".display").ok().flatten())
        });
        self.render();
        self.display.is_some()
    }

    /// Text for the display region
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.engine.display().to_string()
    }

    /// Raw expression buffer
    #[wasm_bindgen(getter)]
    pub fn expression(&self) -> String {
        self.engine.expression().to_string()
    }

    /// Handles a button click by element id and trimmed text
    pub fn handle_button(&mut self, element_id: &str, label: &str) -> bool {
        self.handle_action(KeypadAction::from_click(element_id, label))
    }

    /// Handles a `keydown` event; returns true if the page should
    /// prevent the default action
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> bool {
        self.handle_action(KeypadAction::from_key(key, ctrl))
    }

    fn handle_action(&mut self, action: Option<KeypadAction>) -> bool {
        let Some(action) = action else {
            return false;
        };
        if dispatch(&mut self.engine, action).is_updated() {
            self.render();
        }
        true
    }

    fn render(&self) {
        if let Some(display) = &self.display {
            display.set_text_content(Some(self.engine.display()));
        }
    }
}

/// Initialize the calculator in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"calc-buffer initialized".into());
}
