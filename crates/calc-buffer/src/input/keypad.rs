//! Keypad layout and click/key resolution

use crate::core::Operation;

/// Actions that keypad buttons and keys can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Insert an operator
    Operator(Operation),
    /// Evaluate the expression
    Equals,
    /// Clear the expression
    Clear,
    /// Remove the last character
    Backspace,
}

impl KeypadAction {
    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }

    /// Resolves a clicked button from its element id and text label.
    ///
    /// The label is checked first for digits, `.` and operators; equals,
    /// clear and backspace match either their id or their label.
    #[must_use]
    pub fn from_click(element_id: &str, label: &str) -> Option<Self> {
        let label = label.trim();
        let mut chars = label.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(d) = ch.to_digit(10) {
                return Some(Self::Digit(d as u8));
            }
            if ch == '.' {
                return Some(Self::Decimal);
            }
            if let Some(op) = Operation::from_char(ch) {
                return Some(Self::Operator(op));
            }
        }

        if element_id == "equals" || label == "=" {
            Some(Self::Equals)
        } else if element_id == "clear" || label.eq_ignore_ascii_case("clear") {
            Some(Self::Clear)
        } else if element_id == "backspace" || label == "⌫" {
            Some(Self::Backspace)
        } else {
            Keypad::new().handle_click(element_id)
        }
    }

    /// Maps a keyboard key name to an action.
    ///
    /// Returns `None` for keys the calculator does not handle; those events
    /// must be left to the host.
    #[must_use]
    pub fn from_key(key: &str, ctrl: bool) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Equals),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::Clear),
            "c" if ctrl => Some(Self::Clear),
            "." => Some(Self::Decimal),
            _ => {
                let mut chars = key.chars();
                let (Some(ch), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                if let Some(d) = ch.to_digit(10) {
                    Some(Self::Digit(d as u8))
                } else {
                    Operation::from_char(ch).map(Self::Operator)
                }
            }
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        let id = match action {
            KeypadAction::Digit(d) => format!("btn-{d}"),
            KeypadAction::Decimal => "btn-decimal".to_string(),
            KeypadAction::Operator(op) => format!("btn-{}", op_name(op)),
            KeypadAction::Equals => "equals".to_string(),
            KeypadAction::Clear => "clear".to_string(),
            KeypadAction::Backspace => "backspace".to_string(),
        };
        Self {
            action,
            id,
            row,
            col,
        }
    }
}

/// Name of an operator for element IDs
fn op_name(op: Operation) -> &'static str {
    match op {
        Operation::Add => "plus",
        Operation::Subtract => "minus",
        Operation::Multiply => "times",
        Operation::Divide => "divide",
    }
}

/// Keypad layout
///
/// ```text
/// [ C ] [ ⌫ ] [ / ] [ * ]
/// [ 7 ] [ 8 ] [ 9 ] [ - ]
/// [ 4 ] [ 5 ] [ 6 ] [ + ]
/// [ 1 ] [ 2 ] [ 3 ] [ = ]
/// [ 0 ] [ . ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Backspace, Clear, Decimal, Digit, Equals, Operator};

        let grid: [&[KeypadAction]; 5] = [
            &[
                Clear,
                Backspace,
                Operator(Operation::Divide),
                Operator(Operation::Multiply),
            ],
            &[Digit(7), Digit(8), Digit(9), Operator(Operation::Subtract)],
            &[Digit(4), Digit(5), Digit(6), Operator(Operation::Add)],
            &[Digit(1), Digit(2), Digit(3), Equals],
            &[Digit(0), Decimal],
        ];

        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, &action)| KeypadButtonDef::new(action, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds a button by the action it performs
    #[must_use]
    pub fn find_button_by_action(&self, action: KeypadAction) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Returns the action of the button with `element_id`
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }
}
