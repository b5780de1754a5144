//! XML rendering: `<name>value</name>` elements. Non-value field kinds
//! (label, padding, decoration, title) are text-only concepts and
//! render nothing here.

use super::{escape_xml, RenderCtx};
use crate::field::{FieldKind, ParsedField};

pub fn field(ctx: &mut RenderCtx<'_>, f: &ParsedField) {
    if f.kind != FieldKind::Value || f.name.is_empty() {
        return;
    }
    let value = ctx.resolve_from_args(f.encode_fmt_or_print());
    let escaped = escape_xml(&value);

    ctx.indent();
    ctx.buf.append_str("<");
    ctx.buf.append_str(f.name);
    ctx.buf.append_str(">");
    ctx.buf.append_str(&escaped);
    ctx.buf.append_str("</");
    ctx.buf.append_str(f.name);
    ctx.buf.append_str(">");
    ctx.newline_if_pretty();
}

pub fn literal(ctx: &mut RenderCtx<'_>, text: &str) {
    ctx.buf.append_str(&escape_xml(text));
}

pub fn newline(_ctx: &mut RenderCtx<'_>) {}

pub fn open_container(ctx: &mut RenderCtx<'_>, name: &str) {
    ctx.indent();
    ctx.buf.append_str("<");
    ctx.buf.append_str(name);
    ctx.buf.append_str(">");
    ctx.newline_if_pretty();
}

pub fn close_container(ctx: &mut RenderCtx<'_>, name: &str) {
    ctx.indent();
    ctx.buf.append_str("</");
    ctx.buf.append_str(name);
    ctx.buf.append_str(">");
    ctx.newline_if_pretty();
}

pub fn open_list(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn close_list(_ctx: &mut RenderCtx<'_>, _name: &str) {}

pub fn open_instance(ctx: &mut RenderCtx<'_>, name: &str) {
    open_container(ctx, name);
}

pub fn close_instance(ctx: &mut RenderCtx<'_>, name: &str) {
    close_container(ctx, name);
}
