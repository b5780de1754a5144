//! Plain-text rendering: no structural delimiters, no escaping.

use super::RenderCtx;
use crate::field::{FieldKind, ParsedField};
use crate::style::FieldFlags;

pub fn field(ctx: &mut RenderCtx<'_>, f: &ParsedField) {
    match f.kind {
        FieldKind::Title => {
            let text = ctx.resolve_title(f.name, f.print_fmt_or_default());
            ctx.buf.append_str(&text);
        }
        FieldKind::Label | FieldKind::Padding | FieldKind::Decoration => {
            ctx.buf.append_str(f.name);
        }
        FieldKind::Value => {
            if !f.flags.contains(FieldFlags::HIDE) {
                let text = ctx.resolve_from_args(f.print_fmt_or_default());
                ctx.buf.append_str(&text);
            }
        }
    }

    if f.flags.contains(FieldFlags::COLON) {
        ctx.buf.append_str(":");
    }
    if f.flags.contains(FieldFlags::WS) {
        ctx.buf.append_str(" ");
    }
}

pub fn literal(ctx: &mut RenderCtx<'_>, text: &str) {
    ctx.buf.append_str(text);
}

pub fn newline(ctx: &mut RenderCtx<'_>) {
    ctx.buf.append_str("\n");
}

pub fn open_container(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn close_container(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn open_list(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn close_list(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn open_instance(_ctx: &mut RenderCtx<'_>, _name: &str) {}
pub fn close_instance(_ctx: &mut RenderCtx<'_>, _name: &str) {}
