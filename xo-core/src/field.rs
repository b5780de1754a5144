//! The semantic element a brace field decodes into, plus the parsed
//! pieces a renderer needs to turn it into output.

use crate::style::FieldFlags;

/// What kind of thing a brace field's modifier letters name. `Value` is
/// also the default when none of `D L P T V` appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Title,
    Label,
    Padding,
    Decoration,
    Value,
}

/// One parsed `{...}` field, borrowing directly from the source format
/// string (no allocation unless a formatter hook substitutes content).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedField<'a> {
    pub kind: FieldKind,
    pub name: &'a str,
    pub print_fmt: &'a str,
    pub encode_fmt: &'a str,
    pub flags: FieldFlags,
}

impl<'a> ParsedField<'a> {
    /// The encode-fmt to use for XML/JSON: falls back to print-fmt when
    /// empty, per the grammar's §4.5 rule.
    pub fn encode_fmt_or_print(&self) -> &'a str {
        if self.encode_fmt.is_empty() {
            self.print_fmt
        } else {
            self.encode_fmt
        }
    }

    /// The print-fmt to use for rendering: defaults to `%s` when empty.
    pub fn print_fmt_or_default(&self) -> &'a str {
        if self.print_fmt.is_empty() {
            "%s"
        } else {
            self.print_fmt
        }
    }
}
