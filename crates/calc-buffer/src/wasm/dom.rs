//! Mock DOM for testing the browser front-end without a browser
//!
//! Mirrors the page the calculator runs in: a `calc-display` text region and
//! one button per keypad action.

use std::collections::HashMap;

use crate::input::Keypad;

/// Element ID of the display region
pub const DISPLAY_ID: &str = "calc-display";
/// Element ID of the keypad container
pub const KEYPAD_ID: &str = "calc-keypad";
/// Class set on the display while the error marker is shown
pub const ERROR_CLASS: &str = "error";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// DOM events the calculator listens to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key press event
    KeyPress {
        /// The key that was pressed
        key: String,
        /// Whether Ctrl was held
        ctrl: bool,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::key_press_with_ctrl(key, false)
    }

    /// Creates a key press event with the Ctrl modifier state
    #[must_use]
    pub fn key_press_with_ctrl(key: &str, ctrl: bool) -> Self {
        Self::KeyPress {
            key: key.to_string(),
            ctrl,
        }
    }
}

/// Mock DOM for testing the browser calculator
#[derive(Debug)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    /// Elements by ID for quick lookup
    elements: HashMap<String, DomElement>,
    /// Event history for verification, oldest first
    event_history: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Most events kept in the history; older ones are dropped first
    pub const HISTORY_LIMIT: usize = 1024;

    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            elements: HashMap::new(),
            event_history: Vec::new(),
        }
    }

    /// Creates the calculator page: display region plus keypad
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();

        let display = DomElement::new("div")
            .with_id(DISPLAY_ID)
            .with_class("display")
            .with_attr("aria-live", "polite")
            .with_text("0");

        let buttons: Vec<DomElement> = Keypad::new()
            .buttons()
            .iter()
            .map(|btn| {
                DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.action.label())
                    .with_class("btn")
                    .with_class(&format!("keypad-row-{}", btn.row))
                    .with_class(&format!("keypad-col-{}", btn.col))
            })
            .collect();

        let mut keypad = DomElement::new("div").with_id(KEYPAD_ID).with_class("keypad");
        for button in &buttons {
            keypad = keypad.with_child(button.clone());
        }

        dom.root = DomElement::new("div")
            .with_id("calculator")
            .with_class("calculator-app")
            .with_child(display.clone())
            .with_child(keypad.clone());

        dom.register_element(display);
        dom.register_element(keypad);
        for button in buttons {
            dom.register_element(button);
        }

        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Records an event, keeping at most [`Self::HISTORY_LIMIT`]
    pub fn dispatch_event(&mut self, event: DomEvent) {
        if self.event_history.len() >= Self::HISTORY_LIMIT {
            let excess = self.event_history.len() + 1 - Self::HISTORY_LIMIT;
            self.event_history.drain(..excess);
        }
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }
}
