//! HTML rendering: every element is a `<div class="...">`, grouped
//! inside a `<div class="line">` that opens before the first div of a
//! logical line and closes on the `\n` sentinel.

use super::{escape_xml, RenderCtx};
use crate::field::{FieldKind, ParsedField};
use crate::style::{FieldFlags, HandleFlags};
use crate::xpath;

fn open_line_if_needed(ctx: &mut RenderCtx<'_>) {
    if !ctx.flags.contains(HandleFlags::DIV_OPEN) {
        ctx.indent();
        ctx.buf.append_str("<div class=\"line\">");
        ctx.newline_if_pretty();
        ctx.flags.insert(HandleFlags::DIV_OPEN);
    }
}

fn div(ctx: &mut RenderCtx<'_>, class: &str, attrs: &[(&str, String)], text: &str) {
    open_line_if_needed(ctx);
    ctx.indent();
    ctx.buf.append_str("<div class=\"");
    ctx.buf.append_str(class);
    ctx.buf.append_str("\"");
    for (k, v) in attrs {
        ctx.buf.append_str(" ");
        ctx.buf.append_str(k);
        ctx.buf.append_str("=\"");
        ctx.buf.append_str(&escape_xml(v));
        ctx.buf.append_str("\"");
    }
    ctx.buf.append_str(">");
    ctx.buf.append_str(&escape_xml(text));
    ctx.buf.append_str("</div>");
    ctx.newline_if_pretty();
}

pub fn field(ctx: &mut RenderCtx<'_>, f: &ParsedField) {
    match f.kind {
        FieldKind::Title => {
            let text = ctx.resolve_title(f.name, f.print_fmt_or_default());
            div(ctx, "title", &[], &text);
        }
        FieldKind::Label => div(ctx, "label", &[], f.name),
        FieldKind::Padding => div(ctx, "padding", &[], f.name),
        FieldKind::Decoration => div(ctx, "decoration", &[], f.name),
        FieldKind::Value => {
            if f.flags.contains(FieldFlags::HIDE) {
                return;
            }
            let value = ctx.resolve_from_args(f.print_fmt_or_default());

            let mut attrs = vec![("data-tag", f.name.to_string())];
            if ctx.flags.contains(HandleFlags::XPATH) {
                attrs.push(("data-xpath", xpath::breadcrumb(ctx.stack, f.name)));
            }
            if ctx.flags.contains(HandleFlags::INFO) {
                if let Some(entry) = ctx.info.lookup(f.name) {
                    attrs.push(("data-type", entry.kind.to_string()));
                    attrs.push(("data-help", entry.help.to_string()));
                }
            }
            div(ctx, "data", &attrs, &value);
        }
    }

    if f.flags.contains(FieldFlags::COLON) {
        div(ctx, "decoration", &[], ":");
    }
    if f.flags.contains(FieldFlags::WS) {
        div(ctx, "padding", &[], " ");
    }
}

pub fn literal(ctx: &mut RenderCtx<'_>, text: &str) {
    div(ctx, "text", &[], text);
}

pub fn newline(ctx: &mut RenderCtx<'_>) {
    if ctx.flags.contains(HandleFlags::DIV_OPEN) {
        ctx.buf.append_str("</div>");
        ctx.newline_if_pretty();
        ctx.flags.remove(HandleFlags::DIV_OPEN);
    }
}

pub fn open_container(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn close_container(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn open_list(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn close_list(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn open_instance(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn close_instance(_ctx: &mut RenderCtx<'_>, _name: &str) {}
