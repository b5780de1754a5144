//! `LIBXO_OPTIONS` parsing: a single environment string that configures
//! the default handle at lazy init, mirroring a character-coded option
//! string used for debug/trace flags.
//!
//! Kept as a pure function over `&str` (`parse`) with a thin `from_env`
//! wrapper so the decoding logic is testable without touching the
//! process environment.

use xo_core::{HandleConfig, HandleFlags, Style};

/// Decodes a `LIBXO_OPTIONS`-style string into a [`HandleConfig`].
///
/// Recognized characters: `H`/`J`/`T`/`X` select a style; `P`/`W`/`I`/`x`
/// set `PRETTY`/`WARN`/`INFO`/`XPATH`; `i` followed by one or more ASCII
/// digits sets `indent_by` to that value. Unknown characters, and a
/// trailing `i` with no digits, are ignored.
pub fn parse(s: &str) -> HandleConfig {
    let mut config = HandleConfig::default();
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            'H' => config.style = Style::Html,
            'J' => config.style = Style::Json,
            'T' => config.style = Style::Text,
            'X' => config.style = Style::Xml,
            'P' => config.flags.insert(HandleFlags::PRETTY),
            'W' => config.flags.insert(HandleFlags::WARN),
            'I' => config.flags.insert(HandleFlags::INFO),
            'x' => config.flags.insert(HandleFlags::XPATH),
            'i' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start {
                    let digits: String = chars[start..end].iter().collect();
                    if let Ok(n) = digits.parse::<usize>() {
                        config.indent_by = n;
                    }
                    i = end;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    config
}

/// Reads `LIBXO_OPTIONS` from the process environment and decodes it.
/// An unset or non-UTF-8 variable behaves like an empty string.
pub fn from_env() -> HandleConfig {
    let raw = std::env::var("LIBXO_OPTIONS").unwrap_or_default();
    parse(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_defaults() {
        let c = parse("");
        assert_eq!(c, HandleConfig::default());
    }

    #[test]
    fn style_letters_select_style() {
        assert_eq!(parse("H").style, Style::Html);
        assert_eq!(parse("J").style, Style::Json);
        assert_eq!(parse("T").style, Style::Text);
        assert_eq!(parse("X").style, Style::Xml);
    }

    #[test]
    fn flag_letters_set_bits() {
        let c = parse("PWIx");
        assert!(c.flags.contains(HandleFlags::PRETTY));
        assert!(c.flags.contains(HandleFlags::WARN));
        assert!(c.flags.contains(HandleFlags::INFO));
        assert!(c.flags.contains(HandleFlags::XPATH));
    }

    #[test]
    fn indent_digits_set_indent_by() {
        assert_eq!(parse("i4").indent_by, 4);
        assert_eq!(parse("i12P").indent_by, 12);
    }

    #[test]
    fn trailing_i_with_no_digits_is_ignored() {
        let c = parse("Pi");
        assert_eq!(c.indent_by, HandleConfig::default().indent_by);
        assert!(c.flags.contains(HandleFlags::PRETTY));
    }

    #[test]
    fn unknown_characters_are_ignored() {
        let c = parse("Pz9W");
        assert!(c.flags.contains(HandleFlags::PRETTY));
        assert!(c.flags.contains(HandleFlags::WARN));
    }

    #[test]
    fn combined_style_and_flags_and_indent() {
        let c = parse("JPi3W");
        assert_eq!(c.style, Style::Json);
        assert!(c.flags.contains(HandleFlags::PRETTY | HandleFlags::WARN));
        assert_eq!(c.indent_by, 3);
    }
}
