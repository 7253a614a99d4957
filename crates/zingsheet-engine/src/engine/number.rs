//! Lenient number parsing for formula operands.
//!
//! Leading whitespace is skipped and the longest decimal prefix wins.
//! Trailing garbage is ignored (`"12px"` is 12). `Infinity` is accepted so that the
//! caller's finiteness check is what rejects it.

use regex::Regex;
use std::sync::OnceLock;

fn float_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("valid float prefix regex")
    })
}

/// Space separators, line terminators, tab/VT/FF and U+FEFF.
///
/// Unlike `char::is_whitespace`, U+0085 (NEL) is not included.
fn is_leading_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{b}' | '\u{c}' | '\r' | ' ' | '\u{a0}' | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}' | '\u{2029}' | '\u{202f}' | '\u{205f}' | '\u{3000}' | '\u{feff}'
    )
}

/// Parse the numeric prefix of `text`. `None` stands for NaN.
pub fn parse_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start_matches(is_leading_space);
    let prefix = float_prefix_re().find(trimmed)?.as_str();

    match prefix.trim_start_matches(['+', '-']) {
        "Infinity" => Some(if prefix.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }),
        _ => prefix.parse::<f64>().ok(),
    }
}
