//! Per-style renderers. One module per [`Style`](crate::style::Style),
//! each exposing the same set of free functions (`field`, `literal`,
//! `newline`, `open_container`, …) so [`crate::handle::Handle`] can
//! dispatch on style without a trait object in the hot path.

mod html;
mod json;
mod text;
mod xml;

use crate::field::ParsedField;
use crate::info::InfoTable;
use crate::printf;
use crate::stack::Stack;
use crate::style::{FieldFlags, HandleFlags, Style};
use crate::buffer::GrowBuffer;
use crate::value::Value;

/// Everything a renderer needs besides the field/name it is rendering.
/// Grouping these avoids a five-parameter function signature at every
/// call site.
///
/// Resolving a field's printf conversions happens here, one field at a
/// time, rather than in a single global pass over the whole assembled
/// format string: since fields are visited and their arguments consumed
/// in the same left-to-right order either way, the two are equivalent,
/// and resolving inline is what lets a renderer escape a value's
/// *substituted* text before it reaches the buffer.
pub struct RenderCtx<'a> {
    pub buf: &'a mut GrowBuffer,
    pub stack: &'a mut Stack,
    pub flags: &'a mut HandleFlags,
    pub indent_by: usize,
    pub info: &'a InfoTable,
    pub args: &'a [Value],
    pub cursor: usize,
}

impl RenderCtx<'_> {
    fn pretty(&self) -> bool {
        self.flags.contains(HandleFlags::PRETTY)
    }

    fn indent(&mut self) {
        if self.pretty() {
            let n = (self.stack.indent.max(0) as usize) * self.indent_by;
            for _ in 0..n {
                self.buf.append_str(" ");
            }
        }
    }

    fn newline_if_pretty(&mut self) {
        if self.pretty() {
            self.buf.append_str("\n");
        }
    }

    /// Resolve a Value field's print-fmt/encode-fmt against the
    /// remaining caller arguments, advancing the cursor by however many
    /// conversions the fmt used.
    fn resolve_from_args(&mut self, fmt: &str) -> String {
        let remaining = self.args.get(self.cursor..).unwrap_or(&[]);
        let (rendered, used) = printf::substitute_counted(fmt, remaining);
        self.cursor += used;
        rendered
    }

    /// Resolve a Title field's heading text from its own content rather
    /// than the caller's argument list.
    fn resolve_title(&self, content: &str, fmt: &str) -> String {
        printf::substitute(fmt, std::slice::from_ref(&Value::Str(content.to_string())))
    }
}

pub fn field(ctx: &mut RenderCtx<'_>, style: Style, f: &ParsedField) {
    match style {
        Style::Text => text::field(ctx, f),
        Style::Xml => xml::field(ctx, f),
        Style::Json => json::field(ctx, f),
        Style::Html => html::field(ctx, f),
    }
}

pub fn literal(ctx: &mut RenderCtx<'_>, style: Style, text: &str) {
    match style {
        Style::Text => text::literal(ctx, text),
        Style::Xml => xml::literal(ctx, text),
        Style::Json => json::literal(ctx, text),
        Style::Html => html::literal(ctx, text),
    }
}

pub fn newline(ctx: &mut RenderCtx<'_>, style: Style) {
    match style {
        Style::Text => text::newline(ctx),
        Style::Xml => xml::newline(ctx),
        Style::Json => json::newline(ctx),
        Style::Html => html::newline(ctx),
    }
}

pub fn open_container(ctx: &mut RenderCtx<'_>, style: Style, name: &str) {
    match style {
        Style::Text => text::open_container(ctx, name),
        Style::Xml => xml::open_container(ctx, name),
        Style::Json => json::open_container(ctx, name),
        Style::Html => html::open_container(ctx, name),
    }
}

pub fn close_container(ctx: &mut RenderCtx<'_>, style: Style, name: &str) {
    match style {
        Style::Text => text::close_container(ctx, name),
        Style::Xml => xml::close_container(ctx, name),
        Style::Json => json::close_container(ctx, name),
        Style::Html => html::close_container(ctx, name),
    }
}

pub fn open_list(ctx: &mut RenderCtx<'_>, style: Style, name: &str) {
    match style {
        Style::Text => text::open_list(ctx, name),
        Style::Xml => xml::open_list(ctx, name),
        Style::Json => json::open_list(ctx, name),
        Style::Html => html::open_list(ctx, name),
    }
}

pub fn close_list(ctx: &mut RenderCtx<'_>, style: Style, name: &str) {
    match style {
        Style::Text => text::close_list(ctx, name),
        Style::Xml => xml::close_list(ctx, name),
        Style::Json => json::close_list(ctx, name),
        Style::Html => html::close_list(ctx, name),
    }
}

pub fn open_instance(ctx: &mut RenderCtx<'_>, style: Style, name: &str) {
    match style {
        Style::Text => text::open_instance(ctx, name),
        Style::Xml => xml::open_instance(ctx, name),
        Style::Json => json::open_instance(ctx, name),
        Style::Html => html::open_instance(ctx, name),
    }
}

pub fn close_instance(ctx: &mut RenderCtx<'_>, style: Style, name: &str) {
    match style {
        Style::Text => text::close_instance(ctx, name),
        Style::Xml => xml::close_instance(ctx, name),
        Style::Json => json::close_instance(ctx, name),
        Style::Html => html::close_instance(ctx, name),
    }
}

/// Escapes `&`, `<`, `>`, `"` for XML/HTML payload text. Applied to
/// rendered value text, never to print-fmt/encode-fmt specifiers.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes `"`, `\`, and control characters per the JSON grammar.
pub(crate) fn escape_json(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Whether a value should be JSON-quoted: `Quote`/`NoQuote` override the
/// default rule of "quote iff the chosen fmt ends in `s`".
pub(crate) fn json_should_quote(f: &ParsedField) -> bool {
    if f.flags.contains(FieldFlags::QUOTE) {
        true
    } else if f.flags.contains(FieldFlags::NO_QUOTE) {
        false
    } else {
        f.encode_fmt_or_print().ends_with('s')
    }
}
