//! Driver for the browser page, backed by the mock DOM

use super::dom::{DomEvent, MockDom, DISPLAY_ID, ERROR_CLASS};
use crate::config::{ConfigResult, EngineConfig};
use crate::driver::CalculatorDriver;
use crate::engine::{EngineState, ExpressionEngine};
use crate::input::{dispatch, KeypadAction};

/// Engine wired to a mock DOM the same way the page wires it
#[derive(Debug)]
pub struct WasmDriver {
    engine: ExpressionEngine,
    dom: MockDom,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a driver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(ExpressionEngine::new())
    }

    /// Creates a driver with a custom configuration
    pub fn with_config(config: EngineConfig) -> ConfigResult<Self> {
        Ok(Self::with_engine(ExpressionEngine::with_config(config)?))
    }

    /// Creates a driver around an existing engine
    #[must_use]
    pub fn with_engine(engine: ExpressionEngine) -> Self {
        let mut driver = Self {
            engine,
            dom: MockDom::calculator(),
        };
        driver.sync_dom();
        driver
    }

    /// Returns a reference to the engine
    #[must_use]
    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    /// Returns a mutable reference to the engine
    pub fn engine_mut(&mut self) -> &mut ExpressionEngine {
        &mut self.engine
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Returns the display element's text
    #[must_use]
    pub fn display_element_text(&self) -> Option<&str> {
        self.dom.get_element_text(DISPLAY_ID)
    }

    /// Returns true if the display carries the error class
    #[must_use]
    pub fn display_shows_error(&self) -> bool {
        self.dom
            .get_element(DISPLAY_ID)
            .is_some_and(|e| e.has_class(ERROR_CLASS))
    }

    fn apply(&mut self, action: Option<KeypadAction>) -> bool {
        let Some(action) = action else {
            return false;
        };
        if dispatch(&mut self.engine, action).is_updated() {
            self.sync_dom();
        }
        true
    }

    /// Copies the engine display into the DOM
    fn sync_dom(&mut self) {
        let text = self.engine.display().to_string();
        let is_error = self.engine.state() == EngineState::Error;
        if let Some(display) = self.dom.get_element_mut(DISPLAY_ID) {
            display.set_text(&text);
            if is_error {
                display.add_class(ERROR_CLASS);
            } else {
                display.remove_class(ERROR_CLASS);
            }
        }
    }
}

impl CalculatorDriver for WasmDriver {
    fn press_key(&mut self, key: &str, ctrl: bool) -> bool {
        self.dom
            .dispatch_event(DomEvent::key_press_with_ctrl(key, ctrl));
        self.apply(KeypadAction::from_key(key, ctrl))
    }

    fn click(&mut self, element_id: &str) -> bool {
        let Some(label) = self.dom.get_element_text(element_id).map(str::to_string) else {
            return false;
        };
        self.dom.dispatch_event(DomEvent::click(element_id));
        self.apply(KeypadAction::from_click(element_id, &label))
    }

    fn display(&self) -> String {
        self.display_element_text().unwrap_or_default().to_string()
    }

    fn expression(&self) -> String {
        self.engine.expression().to_string()
    }
}
