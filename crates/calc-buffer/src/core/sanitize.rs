//! Symbol normalisation and the character allow-list applied before parsing

use std::borrow::Cow;

use crate::core::{CalcError, CalcResult};

/// Display-style multiplication sign accepted as `*`
pub const TIMES_SIGN: char = '×';
/// Display-style division sign accepted as `/`
pub const DIVISION_SIGN: char = '÷';

/// Replaces `×` and `÷` with their ASCII operators.
///
/// Borrows when there is nothing to replace.
#[must_use]
pub fn normalize(expr: &str) -> Cow<'_, str> {
    if expr.contains([TIMES_SIGN, DIVISION_SIGN]) {
        Cow::Owned(
            expr.chars()
                .map(|ch| match ch {
                    TIMES_SIGN => '*',
                    DIVISION_SIGN => '/',
                    other => other,
                })
                .collect(),
        )
    } else {
        Cow::Borrowed(expr)
    }
}

/// Returns true for digits, `+ - * / ( ) .` and whitespace
#[must_use]
pub fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '+' | '-' | '*' | '/' | '(' | ')' | '.') || ch.is_whitespace()
}

/// Checks `expr` against the allow-list.
///
/// An empty expression fails as well: there has to be at least one
/// character to evaluate.
pub fn check_allowed(expr: &str) -> CalcResult<()> {
    if expr.is_empty() {
        return Err(CalcError::EmptyExpression);
    }
    match expr.chars().find(|&ch| !is_allowed_char(ch)) {
        Some(ch) => Err(CalcError::DisallowedCharacter(ch)),
        None => Ok(()),
    }
}
