//! Unified calculator driver
//!
//! Each front-end implements [`CalculatorDriver`], and the `verify_*`
//! functions below run the same behavioural checks against any of them.
//! A check written once covers the mock DOM and the terminal alike.

use crate::input::{Keypad, KeypadAction};

/// Abstract driver for calculator front-ends
///
/// # Example
///
/// ```rust
/// use calc_buffer::driver::{verify_basic_arithmetic, CalculatorDriver};
/// use calc_buffer::wasm::WasmDriver;
///
/// let mut driver = WasmDriver::new();
/// verify_basic_arithmetic(&mut driver);
/// ```
pub trait CalculatorDriver {
    /// Presses a key by its DOM key name (`"7"`, `"Enter"`, `"Escape"`, ...).
    ///
    /// Returns true if the calculator handled the key.
    fn press_key(&mut self, key: &str, ctrl: bool) -> bool;

    /// Clicks the keypad button with `element_id`.
    ///
    /// Returns true if the click resolved to a keypad action.
    fn click(&mut self, element_id: &str) -> bool;

    /// Text currently shown in the display region
    fn display(&self) -> String;

    /// Raw expression buffer
    fn expression(&self) -> String;

    /// Presses one key per character of `keys`
    fn type_keys(&mut self, keys: &str) {
        for ch in keys.chars() {
            let _ = self.press_key(&ch.to_string(), false);
        }
    }

    /// Clicks one keypad button per character of `keys`
    fn click_keys(&mut self, keys: &str) {
        for ch in keys.chars() {
            if let Some(id) = button_id_for_char(ch) {
                let _ = self.click(&id);
            }
        }
    }

    /// Clears the calculator with Escape
    fn clear(&mut self) {
        let _ = self.press_key("Escape", false);
    }
}

/// Terminal driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::CalculatorDriver;
    use crate::tui::CalculatorApp;

    /// Driver feeding synthetic crossterm events to the terminal app
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new terminal driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a terminal driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }
    }

    fn key_code(key: &str) -> Option<KeyCode> {
        match key {
            "Enter" => Some(KeyCode::Enter),
            "Backspace" => Some(KeyCode::Backspace),
            "Escape" => Some(KeyCode::Esc),
            "Tab" => Some(KeyCode::Tab),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(KeyCode::Char(ch)),
                    _ => None,
                }
            }
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press_key(&mut self, key: &str, ctrl: bool) -> bool {
            let Some(code) = key_code(key) else {
                return false;
            };
            let modifiers = if ctrl {
                KeyModifiers::CONTROL
            } else {
                KeyModifiers::NONE
            };
            self.app.handle_key(KeyEvent::new(code, modifiers))
        }

        fn click(&mut self, element_id: &str) -> bool {
            let Some(button) = self.app.keypad().find_button_by_id(element_id) else {
                return false;
            };
            let (x, y) = CalculatorApp::button_position(button);
            self.app.click_at(x, y)
        }

        fn display(&self) -> String {
            self.app.engine().display().to_string()
        }

        fn expression(&self) -> String {
            self.app.engine().expression().to_string()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

/// Keypad element id of the button that types `ch`
#[must_use]
pub fn button_id_for_char(ch: char) -> Option<String> {
    let action = KeypadAction::from_key(&ch.to_string(), false)?;
    Keypad::new()
        .find_button_by_action(action)
        .map(|button| button.id.clone())
}

// ===== Shared behavioural checks =====
// These run against ANY CalculatorDriver implementation

/// Verifies the four operations
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [("2+3", "5"), ("10-4", "6"), ("6*7", "42"), ("20/4", "5")] {
        driver.clear();
        driver.type_keys(keys);
        assert_eq!(driver.display(), keys);
        driver.type_keys("=");
        assert_eq!(driver.display(), expected, "{keys}");
    }
    driver.clear();
}

/// Verifies multiplication binds tighter than addition
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("2+3*4=");
    assert_eq!(driver.display(), "14");
    driver.clear();
    driver.type_keys("8-6/2=");
    assert_eq!(driver.display(), "5");
    driver.clear();
}

/// Verifies the empty display, the leading minus and operator replacement
pub fn verify_operator_rules<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.display(), "0");

    driver.type_keys("+");
    assert_eq!(driver.expression(), "");
    driver.type_keys("-");
    assert_eq!(driver.expression(), "-");

    driver.clear();
    driver.type_keys("5+*");
    assert_eq!(driver.expression(), "5*");
    driver.type_keys("2=");
    assert_eq!(driver.display(), "10");
    driver.clear();
}

/// Verifies the one-decimal-per-term guard
pub fn verify_decimal_guard<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys(".");
    assert_eq!(driver.expression(), "0.");
    driver.type_keys("5.");
    assert_eq!(driver.expression(), "0.5");
    driver.type_keys("+.");
    assert_eq!(driver.expression(), "0.5+0.");
    driver.type_keys("25=");
    assert_eq!(driver.display(), "0.75");
    driver.clear();
}

/// Verifies the error marker and recovery from it
pub fn verify_error_marker<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("5/0=");
    assert_eq!(driver.display(), "Error");
    assert_eq!(driver.expression(), "");

    // rejected input keeps the marker
    driver.type_keys("*");
    assert_eq!(driver.display(), "Error");

    driver.type_keys("7");
    assert_eq!(driver.display(), "7");
    driver.clear();
}

/// Verifies that results feed the next computation
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("10/4=");
    assert_eq!(driver.display(), "2.5");
    driver.type_keys("*4=");
    assert_eq!(driver.display(), "10");
    driver.type_keys("-");
    assert!(driver.press_key("Enter", false));
    assert_eq!(driver.display(), "10");
    driver.clear();
}

/// Verifies Backspace, Escape and Ctrl+c
pub fn verify_editing_keys<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("123");
    assert!(driver.press_key("Backspace", false));
    assert_eq!(driver.display(), "12");
    assert!(driver.press_key("c", true));
    assert_eq!(driver.display(), "0");
    driver.type_keys("9");
    assert!(driver.press_key("Escape", false));
    assert_eq!(driver.display(), "0");

    assert!(!driver.press_key("c", false));
    assert!(!driver.press_key("Tab", false));
    assert_eq!(driver.display(), "0");
}

/// Verifies that clicking and typing the same input agree
pub fn verify_click_matches_keys<D: CalculatorDriver>(driver: &mut D) {
    for input in ["12+3*4=", "7.5-.5=", "9/0=", "-6*-", "1.2.3+"] {
        driver.clear();
        driver.type_keys(input);
        let typed = (driver.display(), driver.expression());

        driver.clear();
        driver.click_keys(input);
        let clicked = (driver.display(), driver.expression());

        assert_eq!(typed, clicked, "{input}");
    }
    driver.clear();
}

/// Runs every check above
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_precedence(driver);
    verify_operator_rules(driver);
    verify_decimal_guard(driver);
    verify_error_marker(driver);
    verify_chaining(driver);
    verify_editing_keys(driver);
    verify_click_matches_keys(driver);
}
