//! Single-operator formula splitting.
//!
//! A formula body is cut at the first `+`, `-`, `*` or `/` it contains. The
//! right operand runs up to the next operator character; anything after that
//! is dropped, so `1+2+3` reads as `1 + 2` and `A1*-5` has an empty right
//! operand.

use std::fmt;

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Plain IEEE arithmetic; zero divisors are the caller's concern.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Sub => left - right,
            Operator::Mul => left * right,
            Operator::Div => left / right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A formula body cut into `left`, `operator`, `right`.
///
/// `operator` and `right` are both present or both absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitFormula<'a> {
    pub left: &'a str,
    pub operator: Option<Operator>,
    pub right: Option<&'a str>,
}

/// Split a formula body (without the leading `=`) at its first operator.
pub fn split_formula(expression: &str) -> SplitFormula<'_> {
    let Some((idx, op)) = expression
        .char_indices()
        .find_map(|(i, c)| Operator::from_char(c).map(|op| (i, op)))
    else {
        return SplitFormula {
            left: expression,
            operator: None,
            right: None,
        };
    };

    // Operator characters are ASCII, so `idx + 1` is a char boundary.
    let rest = &expression[idx + 1..];
    let right_end = rest
        .find(|c: char| Operator::from_char(c).is_some())
        .unwrap_or(rest.len());

    SplitFormula {
        left: &expression[..idx],
        operator: Some(op),
        right: Some(&rest[..right_end]),
    }
}
