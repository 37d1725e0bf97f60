//! Expression buffer engine
//!
//! Owns the expression text and applies keypad operations to it. The display
//! is never stored: [`ExpressionEngine::display`] projects it from the buffer
//! and the pending evaluation error.
//!
//! ```text
//!            digit / '-' / '.'            '=' ok
//!   Empty ───────────────────▶ Accumulating ◀──────┐
//!     ▲  ◀── clear / backspace ─────┘  │   └─────────┘
//!     │                                │ '=' fails
//!     └──── next refresh ──── Error ◀──┘
//! ```
//!
//! Operations never fail across this boundary. Anything that goes wrong in
//! `=` becomes the error marker plus an empty buffer.

use crate::config::{ConfigResult, EngineConfig};
use crate::core::evaluator::Evaluator;
use crate::core::format::format_number;
use crate::core::sanitize::{check_allowed, normalize};
use crate::core::{CalcError, CalcResult, Operation};

/// Observable state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Buffer is empty, display shows the empty marker
    Empty,
    /// Buffer holds an expression or a result
    Accumulating,
    /// Last evaluation failed; buffer is empty, display shows the error marker
    Error,
}

/// What an operation did to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// Buffer or display changed; the host should redraw
    Updated,
    /// Operation was rejected and nothing changed
    Ignored,
}

impl Outcome {
    /// Returns true if the host should redraw
    #[must_use]
    pub const fn is_updated(self) -> bool {
        matches!(self, Self::Updated)
    }
}

/// The expression buffer and its keypad operations
#[derive(Debug, Clone)]
pub struct ExpressionEngine {
    config: EngineConfig,
    expression: String,
    /// Failure of the last `=`, kept until the next display refresh
    error: Option<CalcError>,
    evaluator: Evaluator,
}

impl Default for ExpressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEngine {
    /// Creates an engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            expression: String::new(),
            error: None,
            evaluator: Evaluator::new(),
        }
    }

    /// Creates an engine with a validated configuration
    pub fn with_config(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Returns the active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the raw expression text
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Length of the expression in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.expression.chars().count()
    }

    /// Returns true if the buffer is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    /// Returns the error that produced the current error marker, if any
    #[must_use]
    pub fn last_error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// Returns the current state
    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.error.is_some() {
            EngineState::Error
        } else if self.expression.is_empty() {
            EngineState::Empty
        } else {
            EngineState::Accumulating
        }
    }

    /// Text for the display region
    #[must_use]
    pub fn display(&self) -> &str {
        match self.state() {
            EngineState::Error => &self.config.error_marker,
            EngineState::Empty => &self.config.empty_marker,
            EngineState::Accumulating => &self.expression,
        }
    }

    /// Appends digit `d` (0-9) unless the buffer is full
    pub fn append_digit(&mut self, digit: u8) -> Outcome {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            tracing::debug!(digit, "ignoring non-decimal digit");
            return Outcome::Ignored;
        };
        if !self.has_room(1) {
            tracing::debug!(len = self.len(), "buffer full, digit dropped");
            return Outcome::Ignored;
        }
        self.expression.push(ch);
        self.refresh()
    }

    /// Appends an operator, replacing a trailing one.
    ///
    /// On an empty buffer only `-` is accepted, to start a negative number.
    pub fn append_operator(&mut self, op: Operation) -> Outcome {
        if self.expression.is_empty() {
            if op != Operation::Subtract {
                return Outcome::Ignored;
            }
            self.expression.push(op.symbol());
            return self.refresh();
        }

        if self.ends_with_operator() {
            self.expression.pop();
        } else if !self.has_room(1) {
            return Outcome::Ignored;
        }
        self.expression.push(op.symbol());
        self.refresh()
    }

    /// Starts or continues a decimal fraction in the current term.
    ///
    /// The current term is the text after the last operator character;
    /// parentheses are not taken into account.
    pub fn append_decimal(&mut self) -> Outcome {
        let term = self
            .expression
            .rsplit(Operation::is_operator_char)
            .next()
            .unwrap_or_default();
        if term.contains('.') {
            return Outcome::Ignored;
        }

        let insert = if term.is_empty() { "0." } else { "." };
        if !self.has_room(insert.len()) {
            return Outcome::Ignored;
        }
        self.expression.push_str(insert);
        self.refresh()
    }

    /// Removes the last character
    pub fn backspace(&mut self) -> Outcome {
        self.expression.pop();
        self.refresh()
    }

    /// Empties the buffer
    pub fn clear(&mut self) -> Outcome {
        self.expression.clear();
        self.refresh()
    }

    /// Evaluates the buffer and replaces it with the result.
    ///
    /// A trailing operator is dropped first. Any failure shows the error
    /// marker and empties the buffer.
    pub fn evaluate(&mut self) -> Outcome {
        if self.expression.is_empty() {
            return Outcome::Ignored;
        }
        if self.ends_with_operator() {
            self.expression.pop();
        }

        match self.compute() {
            Ok(value) => {
                let text = format_number(value);
                tracing::debug!(expression = %self.expression, result = %text, "evaluated");
                self.expression = text;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(expression = %self.expression, error = %err, "evaluation failed");
                self.expression.clear();
                self.error = Some(err);
            }
        }
        Outcome::Updated
    }

    /// Replaces the buffer, truncated to the configured capacity
    pub fn set_expression(&mut self, text: &str) -> Outcome {
        self.expression = text.chars().take(self.config.max_length).collect();
        self.refresh()
    }

    fn compute(&self) -> CalcResult<f64> {
        let normalized = normalize(&self.expression);
        check_allowed(&normalized)?;
        self.evaluator.evaluate_str(&normalized)
    }

    fn ends_with_operator(&self) -> bool {
        self.expression
            .chars()
            .next_back()
            .is_some_and(Operation::is_operator_char)
    }

    fn has_room(&self, extra: usize) -> bool {
        self.len() + extra <= self.config.max_length
    }

    fn refresh(&mut self) -> Outcome {
        self.error = None;
        Outcome::Updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(expr: &str) -> ExpressionEngine {
        let mut engine = ExpressionEngine::new();
        let _ = engine.set_expression(expr);
        engine
    }

    fn press_digits(engine: &mut ExpressionEngine, digits: &str) {
        for ch in digits.chars() {
            let d = ch.to_digit(10).unwrap() as u8;
            let _ = engine.append_digit(d);
        }
    }

    // ===== Construction =====

    #[test]
    fn test_new_engine_is_empty() {
        let engine = ExpressionEngine::new();
        assert!(engine.is_empty());
        assert_eq!(engine.state(), EngineState::Empty);
        assert_eq!(engine.display(), "0");
        assert!(engine.last_error().is_none());
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = EngineConfig::new().with_max_length(4);
        assert!(ExpressionEngine::with_config(config).is_err());
    }

    #[test]
    fn test_custom_markers() {
        let config = EngineConfig::new()
            .with_error_marker("ERR")
            .with_empty_marker("");
        let mut engine = ExpressionEngine::with_config(config).unwrap();
        assert_eq!(engine.display(), "");
        let _ = engine.set_expression("1/0");
        let _ = engine.evaluate();
        assert_eq!(engine.display(), "ERR");
    }

    // ===== appendDigit =====

    #[test]
    fn test_append_digits() {
        let mut engine = ExpressionEngine::new();
        press_digits(&mut engine, "123");
        assert_eq!(engine.expression(), "123");
        assert_eq!(engine.state(), EngineState::Accumulating);
        assert_eq!(engine.display(), "123");
    }

    #[test]
    fn test_append_digit_rejects_non_digit() {
        let mut engine = ExpressionEngine::new();
        assert_eq!(engine.append_digit(10), Outcome::Ignored);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_append_digit_at_capacity_is_ignored() {
        let mut engine = ExpressionEngine::new();
        press_digits(&mut engine, &"9".repeat(200));
        assert_eq!(engine.len(), 200);
        assert_eq!(engine.append_digit(1), Outcome::Ignored);
        assert_eq!(engine.len(), 200);
        assert!(engine.expression().ends_with('9'));
    }

    // ===== appendOperator =====

    #[test]
    fn test_leading_minus_accepted() {
        let mut engine = ExpressionEngine::new();
        assert_eq!(engine.append_operator(Operation::Subtract), Outcome::Updated);
        assert_eq!(engine.expression(), "-");
    }

    #[test]
    fn test_other_leading_operators_ignored() {
        for op in [Operation::Add, Operation::Multiply, Operation::Divide] {
            let mut engine = ExpressionEngine::new();
            assert_eq!(engine.append_operator(op), Outcome::Ignored);
            assert!(engine.is_empty());
        }
    }

    #[test]
    fn test_operator_replaces_trailing_operator() {
        let mut engine = engine_with("5");
        let _ = engine.append_operator(Operation::Add);
        let _ = engine.append_operator(Operation::Multiply);
        assert_eq!(engine.expression(), "5*");
        let _ = engine.append_operator(Operation::Subtract);
        assert_eq!(engine.expression(), "5-");
    }

    #[test]
    fn test_leading_minus_replaced_by_other_operator() {
        let mut engine = ExpressionEngine::new();
        let _ = engine.append_operator(Operation::Subtract);
        let _ = engine.append_operator(Operation::Add);
        assert_eq!(engine.expression(), "+");
    }

    #[test]
    fn test_operator_at_capacity() {
        let mut engine = engine_with(&"1".repeat(200));
        assert_eq!(engine.append_operator(Operation::Add), Outcome::Ignored);
        let _ = engine.backspace();
        let _ = engine.append_operator(Operation::Add);
        // replacing keeps the length
        assert_eq!(engine.append_operator(Operation::Divide), Outcome::Updated);
        assert_eq!(engine.len(), 200);
        assert!(engine.expression().ends_with('/'));
    }

    // ===== appendDecimal =====

    #[test]
    fn test_decimal_on_empty_inserts_zero() {
        let mut engine = ExpressionEngine::new();
        let _ = engine.append_decimal();
        assert_eq!(engine.expression(), "0.");
    }

    #[test]
    fn test_decimal_after_operator_inserts_zero() {
        let mut engine = engine_with("3+");
        let _ = engine.append_decimal();
        assert_eq!(engine.expression(), "3+0.");
    }

    #[test]
    fn test_decimal_after_leading_minus() {
        let mut engine = ExpressionEngine::new();
        let _ = engine.append_operator(Operation::Subtract);
        let _ = engine.append_decimal();
        assert_eq!(engine.expression(), "-0.");
    }

    #[test]
    fn test_decimal_appended_to_term() {
        let mut engine = engine_with("12");
        let _ = engine.append_decimal();
        assert_eq!(engine.expression(), "12.");
    }

    #[test]
    fn test_second_decimal_in_term_ignored() {
        let mut engine = engine_with("1.5");
        assert_eq!(engine.append_decimal(), Outcome::Ignored);
        assert_eq!(engine.expression(), "1.5");
    }

    #[test]
    fn test_decimal_allowed_in_new_term() {
        let mut engine = engine_with("1.5*2");
        let _ = engine.append_decimal();
        assert_eq!(engine.expression(), "1.5*2.");
    }

    #[test]
    fn test_decimal_ignores_parentheses() {
        let mut engine = engine_with("(1.2");
        assert_eq!(engine.append_decimal(), Outcome::Ignored);
        let mut engine = engine_with("(1");
        let _ = engine.append_decimal();
        assert_eq!(engine.expression(), "(1.");
    }

    #[test]
    fn test_decimal_needs_room_for_both_chars() {
        let mut engine = engine_with(&format!("{}+", "1".repeat(199)));
        assert_eq!(engine.append_decimal(), Outcome::Ignored);
        assert_eq!(engine.len(), 200);
    }

    // ===== backspace / clear =====

    #[test]
    fn test_backspace() {
        let mut engine = engine_with("12+");
        let _ = engine.backspace();
        assert_eq!(engine.expression(), "12");
    }

    #[test]
    fn test_backspace_on_empty() {
        let mut engine = ExpressionEngine::new();
        assert_eq!(engine.backspace(), Outcome::Updated);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut engine = engine_with("12+3");
        let _ = engine.clear();
        assert!(engine.is_empty());
        assert_eq!(engine.display(), "0");
    }

    // ===== evaluate =====

    #[test]
    fn test_evaluate_precedence() {
        let mut engine = engine_with("2+3*4");
        assert_eq!(engine.evaluate(), Outcome::Updated);
        assert_eq!(engine.expression(), "14");
        assert_eq!(engine.display(), "14");
        assert_eq!(engine.state(), EngineState::Accumulating);
    }

    #[test]
    fn test_evaluate_empty_is_ignored() {
        let mut engine = ExpressionEngine::new();
        assert_eq!(engine.evaluate(), Outcome::Ignored);
        assert_eq!(engine.state(), EngineState::Empty);
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        let mut engine = engine_with("5/0");
        let _ = engine.evaluate();
        assert_eq!(engine.display(), "Error");
        assert_eq!(engine.state(), EngineState::Error);
        assert!(engine.is_empty());
        assert!(matches!(engine.last_error(), Some(CalcError::NonFinite(_))));
    }

    #[test]
    fn test_evaluate_zero_over_zero() {
        let mut engine = engine_with("0/0");
        let _ = engine.evaluate();
        assert_eq!(engine.display(), "Error");
    }

    #[test]
    fn test_evaluate_trailing_operator_dropped() {
        let mut with_op = engine_with("3+");
        let mut without = engine_with("3");
        let _ = with_op.evaluate();
        let _ = without.evaluate();
        assert_eq!(with_op.expression(), "3");
        assert_eq!(with_op.expression(), without.expression());
    }

    #[test]
    fn test_evaluate_lone_minus_is_error() {
        let mut engine = ExpressionEngine::new();
        let _ = engine.append_operator(Operation::Subtract);
        let _ = engine.evaluate();
        assert_eq!(engine.state(), EngineState::Error);
        assert_eq!(engine.last_error(), Some(&CalcError::EmptyExpression));
    }

    #[test]
    fn test_evaluate_disallowed_characters() {
        for input in ["2+abc", "alert(1)", "1e5", "2^3", "3;4"] {
            let mut engine = engine_with(input);
            let _ = engine.evaluate();
            assert_eq!(engine.display(), "Error", "{input}");
            assert!(engine.is_empty());
        }
    }

    #[test]
    fn test_evaluate_malformed() {
        for input in ["(2+3", "2..3", ")", "1 2", "   "] {
            let mut engine = engine_with(input);
            let _ = engine.evaluate();
            assert_eq!(engine.state(), EngineState::Error, "{input}");
        }
    }

    #[test]
    fn test_evaluate_display_signs() {
        let mut engine = engine_with("6×7÷2");
        let _ = engine.evaluate();
        assert_eq!(engine.expression(), "21");
    }

    #[test]
    fn test_evaluate_parentheses_and_whitespace() {
        let mut engine = engine_with("( 2 + 3 ) * 4");
        let _ = engine.evaluate();
        assert_eq!(engine.expression(), "20");
    }

    #[test]
    fn test_evaluate_decimal_result() {
        let mut engine = engine_with("0.1+0.2");
        let _ = engine.evaluate();
        assert_eq!(engine.expression(), "0.30000000000000004");
    }

    #[test]
    fn test_evaluate_trailing_decimal_point() {
        let mut engine = engine_with("5.+1");
        let _ = engine.evaluate();
        assert_eq!(engine.expression(), "6");
    }

    #[test]
    fn test_evaluate_leading_zero_is_error() {
        for input in ["05", "07", "00.5", "3+08"] {
            let mut engine = engine_with(input);
            assert_eq!(engine.evaluate(), Outcome::Updated);
            assert_eq!(engine.display(), "Error", "{input}");
            assert!(engine.is_empty(), "{input}");
        }
    }

    #[test]
    fn test_evaluate_doubled_sign_is_error() {
        for input in ["2--3", "--5", "1++2"] {
            let mut engine = engine_with(input);
            let _ = engine.evaluate();
            assert_eq!(engine.display(), "Error", "{input}");
        }
    }

    #[test]
    fn test_evaluate_spaced_or_mixed_signs() {
        for (input, expected) in [("2- -3", "5"), ("2-+3", "-1"), ("- -5", "5")] {
            let mut engine = engine_with(input);
            let _ = engine.evaluate();
            assert_eq!(engine.display(), expected, "{input}");
        }
    }

    #[test]
    fn test_digit_after_zero_result_is_error() {
        let mut engine = ExpressionEngine::new();
        press_digits(&mut engine, "3");
        let _ = engine.append_operator(Operation::Subtract);
        press_digits(&mut engine, "3");
        let _ = engine.evaluate();
        assert_eq!(engine.display(), "0");

        press_digits(&mut engine, "7");
        assert_eq!(engine.expression(), "07");
        let _ = engine.evaluate();
        assert_eq!(engine.display(), "Error");
    }

    #[test]
    fn test_decimal_after_zero_result() {
        let mut engine = engine_with("3-3");
        let _ = engine.evaluate();
        let _ = engine.append_decimal();
        press_digits(&mut engine, "5");
        let _ = engine.evaluate();
        assert_eq!(engine.display(), "0.5");
    }

    #[test]
    fn test_chained_computation() {
        let mut engine = engine_with("10/4");
        let _ = engine.evaluate();
        assert_eq!(engine.expression(), "2.5");
        let _ = engine.append_operator(Operation::Multiply);
        press_digits(&mut engine, "4");
        let _ = engine.evaluate();
        assert_eq!(engine.expression(), "10");
    }

    #[test]
    fn test_negative_result_chains() {
        let mut engine = engine_with("2-5");
        let _ = engine.evaluate();
        assert_eq!(engine.expression(), "-3");
        let _ = engine.append_operator(Operation::Multiply);
        press_digits(&mut engine, "2");
        let _ = engine.evaluate();
        assert_eq!(engine.expression(), "-6");
    }

    // ===== Error marker lifetime =====

    #[test]
    fn test_error_survives_ignored_operations() {
        let mut engine = engine_with("5/0");
        let _ = engine.evaluate();
        assert_eq!(engine.append_operator(Operation::Add), Outcome::Ignored);
        assert_eq!(engine.evaluate(), Outcome::Ignored);
        assert_eq!(engine.display(), "Error");
    }

    #[test]
    fn test_error_cleared_by_next_input() {
        let mut engine = engine_with("5/0");
        let _ = engine.evaluate();
        let _ = engine.append_digit(7);
        assert_eq!(engine.state(), EngineState::Accumulating);
        assert_eq!(engine.display(), "7");
    }

    #[test]
    fn test_error_collapses_to_empty() {
        let mut engine = engine_with("5/0");
        let _ = engine.evaluate();
        let _ = engine.backspace();
        assert_eq!(engine.state(), EngineState::Empty);
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_successful_evaluate_after_error() {
        let mut engine = engine_with("1/0");
        let _ = engine.evaluate();
        let _ = engine.set_expression("1+1");
        let _ = engine.evaluate();
        assert_eq!(engine.display(), "2");
        assert!(engine.last_error().is_none());
    }

    // ===== setExpression =====

    #[test]
    fn test_set_expression_truncates() {
        let mut engine = ExpressionEngine::new();
        let _ = engine.set_expression(&"7".repeat(250));
        assert_eq!(engine.len(), 200);
    }

    #[test]
    fn test_set_expression_counts_characters() {
        let mut engine = ExpressionEngine::new();
        let text = "×".repeat(201);
        let _ = engine.set_expression(&text);
        assert_eq!(engine.len(), 200);
    }

    #[test]
    fn test_outcome_is_updated() {
        assert!(Outcome::Updated.is_updated());
        assert!(!Outcome::Ignored.is_updated());
    }
}
