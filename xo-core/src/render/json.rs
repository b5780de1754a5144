//! JSON rendering: comma-separated `"name": value` pairs inside
//! objects/arrays. Non-value field kinds render nothing — label,
//! padding, decoration, and title are text-only concepts.

use super::{escape_json, json_should_quote, RenderCtx};
use crate::field::{FieldKind, ParsedField};

fn separator(ctx: &mut RenderCtx<'_>) {
    if ctx.stack.mark_not_first() {
        ctx.buf.append_str(",");
        if ctx.pretty() {
            ctx.buf.append_str("\n");
        } else {
            ctx.buf.append_str(" ");
        }
    } else if ctx.pretty() {
        ctx.buf.append_str("\n");
    }
}

pub fn field(ctx: &mut RenderCtx<'_>, f: &ParsedField) {
    if f.kind != FieldKind::Value || f.name.is_empty() {
        return;
    }
    let quote = json_should_quote(f);
    let value = ctx.resolve_from_args(f.encode_fmt_or_print());

    separator(ctx);
    ctx.indent();
    ctx.buf.append_str("\"");
    ctx.buf.append_str(f.name);
    ctx.buf.append_str("\": ");
    if quote {
        ctx.buf.append_str("\"");
        ctx.buf.append_str(&escape_json(&value));
        ctx.buf.append_str("\"");
    } else {
        ctx.buf.append_str(&value);
    }
}

pub fn literal(_ctx: &mut RenderCtx<'_>, _text: &str) {}

pub fn newline(_ctx: &mut RenderCtx<'_>) {}

pub fn open_container(ctx: &mut RenderCtx<'_>, name: &str) {
    separator(ctx);
    ctx.indent();
    ctx.buf.append_str("\"");
    ctx.buf.append_str(name);
    ctx.buf.append_str("\": {");
    ctx.newline_if_pretty();
}

pub fn close_container(ctx: &mut RenderCtx<'_>, _name: &str) {
    ctx.newline_if_pretty();
    ctx.indent();
    ctx.buf.append_str("}");
    if ctx.stack.depth() == 0 {
        ctx.buf.append_str("\n");
    }
    ctx.stack.mark_not_first();
}

pub fn open_list(ctx: &mut RenderCtx<'_>, name: &str) {
    separator(ctx);
    ctx.indent();
    ctx.buf.append_str("\"");
    ctx.buf.append_str(name);
    ctx.buf.append_str("\": [");
    ctx.newline_if_pretty();
}

pub fn close_list(ctx: &mut RenderCtx<'_>, _name: &str) {
    ctx.newline_if_pretty();
    ctx.indent();
    ctx.buf.append_str("]");
    ctx.stack.mark_not_first();
}

pub fn open_instance(ctx: &mut RenderCtx<'_>, _name: &str) {
    separator(ctx);
    ctx.indent();
    ctx.buf.append_str("{");
    ctx.newline_if_pretty();
}

pub fn close_instance(ctx: &mut RenderCtx<'_>, _name: &str) {
    ctx.newline_if_pretty();
    ctx.indent();
    ctx.buf.append_str("}");
    ctx.stack.mark_not_first();
}
