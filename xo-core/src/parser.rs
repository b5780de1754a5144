//! Scans a format string into literal runs, escaped-brace literals,
//! newlines, and brace fields, per the grammar:
//!
//! ```text
//! span        := literal-run | escaped-braces | brace-field | newline
//! escaped-braces := '{{' chars-until-'}}' '}}'
//! newline     := '\n'
//! brace-field := '{' modifiers [':' content] ['/' print-fmt ['/' encode-fmt]] '}'
//! ```
//!
//! The scanner is zero-copy: every [`Span`] borrows from the input
//! string, except when a caller-supplied formatter hook substitutes a
//! field's contents, in which case that one field's pieces are owned.

use crate::field::{FieldKind, ParsedField};
use crate::style::FieldFlags;
use crate::warn::Warning;

/// One scanned unit of the format string.
#[derive(Debug)]
pub enum Span<'a> {
    Literal(&'a str),
    Newline,
    Field(ParsedField<'a>),
    /// A field whose content came from the formatter hook rather than
    /// directly from the source string.
    OwnedField(OwnedField),
}

/// Like [`ParsedField`] but with owned strings, produced when a
/// formatter hook rewrites a field's body.
#[derive(Debug)]
pub struct OwnedField {
    pub kind: FieldKind,
    pub name: String,
    pub print_fmt: String,
    pub encode_fmt: String,
    pub flags: FieldFlags,
}

impl OwnedField {
    pub fn as_parsed(&self) -> ParsedField<'_> {
        ParsedField {
            kind: self.kind,
            name: &self.name,
            print_fmt: &self.print_fmt,
            encode_fmt: &self.encode_fmt,
            flags: self.flags,
        }
    }
}

pub type Formatter<'f> = dyn Fn(&str) -> Option<String> + 'f;

/// Scans `fmt` into a sequence of [`Span`]s, invoking `on_span` for each
/// and `on_warning` for every advisory produced along the way. Takes
/// callbacks rather than returning a `Vec` so callers can dispatch
/// straight to a renderer without an intermediate allocation.
pub struct Parser<'a, 'f> {
    input: &'a str,
    pos: usize,
    formatter: Option<&'f Formatter<'f>>,
}

impl<'a, 'f> Parser<'a, 'f> {
    pub fn new(input: &'a str) -> Self {
        Parser { input, pos: 0, formatter: None }
    }

    pub fn with_formatter(input: &'a str, formatter: &'f Formatter<'f>) -> Self {
        Parser { input, pos: 0, formatter: Some(formatter) }
    }

    pub fn run(
        mut self,
        mut on_span: impl FnMut(Span<'a>),
        mut on_warning: impl FnMut(Warning),
    ) {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            match rest.as_bytes()[0] {
                b'\n' => {
                    self.pos += 1;
                    on_span(Span::Newline);
                }
                b'{' if rest.as_bytes().get(1) == Some(&b'{') => {
                    self.pos += 2;
                    let end = self.input[self.pos..].find("}}").map(|i| self.pos + i);
                    let (text, advance) = match end {
                        Some(end) => (&self.input[self.pos..end], end + 2 - self.pos),
                        None => (&self.input[self.pos..], self.input.len() - self.pos),
                    };
                    self.pos += advance;
                    on_span(Span::Literal(text));
                }
                b'{' => {
                    self.pos += 1;
                    self.scan_field(&mut on_span, &mut on_warning);
                }
                _ => {
                    let len = rest.find(['{', '\n']).unwrap_or(rest.len());
                    let literal = &rest[..len];
                    self.pos += len;
                    on_span(Span::Literal(literal));
                }
            }
        }
    }

    fn scan_field(
        &mut self,
        on_span: &mut impl FnMut(Span<'a>),
        on_warning: &mut impl FnMut(Warning),
    ) {
        let modifiers_start = self.pos;
        let modifiers_end = self.scan_until(&[':', '/', '}']);
        let modifiers = &self.input[modifiers_start..modifiers_end];
        self.pos = modifiers_end;

        let content = if self.peek() == Some(b':') {
            self.pos += 1;
            let start = self.pos;
            let end = self.scan_until(&['/', '}']);
            self.pos = end;
            &self.input[start..end]
        } else {
            ""
        };

        let print_fmt = if self.peek() == Some(b'/') {
            self.pos += 1;
            let start = self.pos;
            let end = self.scan_until(&['/', '}']);
            self.pos = end;
            &self.input[start..end]
        } else {
            ""
        };

        let encode_fmt = if self.peek() == Some(b'/') {
            self.pos += 1;
            let start = self.pos;
            let end = self.scan_until(&['}']);
            self.pos = end;
            &self.input[start..end]
        } else {
            ""
        };

        // Consume the closing brace if present; an unterminated field at
        // end-of-string is a best-effort interpretation, not an error.
        if self.peek() == Some(b'}') {
            self.pos += 1;
        }

        let (kind, flags) = parse_modifiers(modifiers, on_warning);

        if let Some(formatter) = self.formatter {
            if let Some(replacement) = formatter(content) {
                let owned = reparse_hook_replacement(&replacement, kind, flags);
                on_span(Span::OwnedField(owned));
                return;
            }
        }

        on_span(Span::Field(ParsedField { kind, name: content, print_fmt, encode_fmt, flags }));
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn scan_until(&self, stops: &[char]) -> usize {
        self.input[self.pos..]
            .find(stops)
            .map(|i| self.pos + i)
            .unwrap_or(self.input.len())
    }
}

/// Interprets a field's modifier-letter run, returning its [`FieldKind`]
/// and [`FieldFlags`] and reporting anomalies via `on_warning`. The last
/// style letter among `D L P T V` wins when more than one appears.
fn parse_modifiers(modifiers: &str, on_warning: &mut impl FnMut(Warning)) -> (FieldKind, FieldFlags) {
    let mut kind = None;
    let mut style_letters = 0u32;
    let mut flags = FieldFlags::empty();

    for c in modifiers.chars() {
        match c {
            'D' => {
                kind = Some(FieldKind::Decoration);
                style_letters += 1;
            }
            'L' => {
                kind = Some(FieldKind::Label);
                style_letters += 1;
            }
            'P' => {
                kind = Some(FieldKind::Padding);
                style_letters += 1;
            }
            'T' => {
                kind = Some(FieldKind::Title);
                style_letters += 1;
            }
            'V' => {
                kind = Some(FieldKind::Value);
                style_letters += 1;
            }
            'C' => flags.insert(FieldFlags::COLON),
            'W' => flags.insert(FieldFlags::WS),
            'H' => flags.insert(FieldFlags::HIDE),
            'Q' => flags.insert(FieldFlags::QUOTE),
            'N' => flags.insert(FieldFlags::NO_QUOTE),
            other => on_warning(Warning::UnknownModifier { fmt: modifiers.to_string(), modifier: other }),
        }
    }

    if style_letters > 1 {
        on_warning(Warning::MultipleStyles { fmt: modifiers.to_string() });
    }

    (kind.unwrap_or(FieldKind::Value), flags)
}

/// Reparses a formatter hook's replacement string as a standalone
/// brace-field body (`modifiers[:content][/print-fmt[/encode-fmt]]`,
/// without the surrounding braces), keeping the outer cursor resuming
/// after the original field's closing `}` rather than re-scanning into
/// the source string.
fn reparse_hook_replacement(replacement: &str, fallback_kind: FieldKind, fallback_flags: FieldFlags) -> OwnedField {
    let colon = replacement.find(':');
    let rest_after_modifiers = colon.map(|i| &replacement[..i]).unwrap_or("");
    let mut discard = |_: Warning| {};
    let (kind, flags) = if colon.is_some() {
        parse_modifiers(rest_after_modifiers, &mut discard)
    } else {
        (fallback_kind, fallback_flags)
    };

    let body = colon.map(|i| &replacement[i + 1..]).unwrap_or(replacement);
    let mut parts = body.splitn(2, '/');
    let name = parts.next().unwrap_or("").to_string();
    let mut fmt_parts = parts.next().unwrap_or("").splitn(2, '/');
    let print_fmt = fmt_parts.next().unwrap_or("").to_string();
    let encode_fmt = fmt_parts.next().unwrap_or("").to_string();

    OwnedField { kind, name, print_fmt, encode_fmt, flags }
}

/// Helper for callers that want a `Cow` view of a span's rendering
/// source without matching on `Field` vs `OwnedField` at every call
/// site.
pub fn field_of<'a>(span: &'a Span<'a>) -> Option<ParsedField<'a>> {
    match span {
        Span::Field(f) => Some(f.clone()),
        Span::OwnedField(o) => Some(o.as_parsed()),
        _ => None,
    }
}
