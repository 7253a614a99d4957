//! Cell reference parsing and formatting.
//!
//! Three textual forms name a cell:
//!
//! - A1 notation (`"B3"`), used for display and on the command line.
//! - The grid key (`"2-1"`), zero-based `row-col`, used for snapshots.
//! - A formula operand (`"b3"`, `"x5A1"`), matched with [`find_reference`].
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.col, 1);  // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! assert_eq!(cell.key(), "2-1");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "B2", "AA10").
    /// Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name)?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut col_acc = 0usize;
        for c in letters.to_ascii_uppercase().bytes() {
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col_acc.checked_sub(1)?;

        let row = numbers.parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef::new(col, row))
    }

    /// The grid key for this cell: zero-based `"<row>-<col>"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    /// Parse a grid key produced by [`CellRef::key`].
    pub fn from_key(key: &str) -> Option<CellRef> {
        let (row, col) = key.split_once('-')?;
        if !is_ascii_number(row) || !is_ascii_number(col) {
            return None;
        }
        Some(CellRef::new(col.parse().ok()?, row.parse().ok()?))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

/// A cell reference found inside a formula operand.
///
/// Matching the pattern and naming a real cell are separate questions:
/// `A0` is a reference, but it has no cell (see [`Reference::cell`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Column letter, uppercased.
    pub column: char,
    /// The 1-based row digits exactly as written.
    pub row_digits: &'a str,
}

impl Reference<'_> {
    /// The cell this reference points at, if any cell can have that address.
    pub fn cell(&self) -> Option<CellRef> {
        let col = (self.column as u8).checked_sub(b'A')? as usize;
        let row = self.row_digits.parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }
}

/// Find the first "one letter then digits" run anywhere in `operand`.
///
/// The search is unanchored and case-insensitive: `"a1"`, `"5A1"` and
/// `"A1x"` all match `A1`, and `"AB12"` matches `B12`.
pub fn find_reference(operand: &str) -> Option<Reference<'_>> {
    let caps = operand_ref_re().captures(operand)?;
    let column = caps.get(1)?.as_str().chars().next()?.to_ascii_uppercase();
    let row_digits = caps.get(2)?.as_str();
    Some(Reference { column, row_digits })
}

fn is_ascii_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").expect("valid A1 regex")
    })
}

// ASCII classes on purpose: `(?i)` and `\d` would admit Unicode letters and digits.
fn operand_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Za-z])([0-9]+)").expect("valid reference regex"))
}
