//! The per-stream handle: owns style, flags, the structural stack, the
//! assembly buffer, the sink, and the optional formatter hook/info
//! table. This is the orchestration point that ties the parser,
//! renderers, and printf engine together into one `emit` call.
//!
//! Grounded on a `PrintbufIndent`-style RAII pattern for the
//! container/list/instance guards: acquire on construction, release on
//! `Drop`, so scope-based nesting never forgets to close something.

use std::io;

use crate::error::XoError;
use crate::field::ParsedField;
use crate::info::InfoTable;
use crate::parser::{Parser, Span};
use crate::render::{self, RenderCtx};
use crate::sink::Sink;
use crate::stack::Stack;
use crate::style::{FrameFlags, HandleFlags, Style};
use crate::value::Value;
use crate::warn::{default_warn_sink, Warning};

const DEFAULT_INDENT_BY: usize = 2;
const DEFAULT_STACK_DEPTH: usize = 512;

/// Plain-data construction record: the `xo` facade's `options` module
/// and `Handle::with_config` callers build one of these before opening
/// a handle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandleConfig {
    pub style: Style,
    pub flags: HandleFlags,
    pub indent_by: usize,
    pub stack_depth: usize,
}

impl Default for HandleConfig {
    fn default() -> Self {
        HandleConfig {
            style: Style::default(),
            flags: HandleFlags::empty(),
            indent_by: DEFAULT_INDENT_BY,
            stack_depth: DEFAULT_STACK_DEPTH,
        }
    }
}

pub struct Handle {
    style: Style,
    flags: HandleFlags,
    indent_by: usize,
    stack: Stack,
    buf: crate::buffer::GrowBuffer,
    sink: Box<dyn Sink>,
    formatter: Option<Box<dyn Fn(&str) -> Option<String>>>,
    info: InfoTable,
    warn_sink: Box<dyn Fn(&Warning)>,
}

impl Handle {
    /// Allocates a handle writing to standard output, with the default
    /// indent-by (2) and stack depth (512).
    pub fn new(style: Style, flags: HandleFlags) -> Self {
        Handle::to_sink(Box::new(io::stdout()), style, flags)
    }

    /// Wires an arbitrary sink. If the caller wants the handle to own
    /// and close it on drop, set `HandleFlags::CLOSE_FP` in `flags`.
    pub fn to_sink(sink: Box<dyn Sink>, style: Style, flags: HandleFlags) -> Self {
        Handle::with_config(
            sink,
            HandleConfig { style, flags, indent_by: DEFAULT_INDENT_BY, stack_depth: DEFAULT_STACK_DEPTH },
        )
    }

    pub fn with_config(sink: Box<dyn Sink>, config: HandleConfig) -> Self {
        Handle {
            style: config.style,
            flags: config.flags,
            indent_by: config.indent_by,
            stack: Stack::with_capacity(config.stack_depth),
            buf: crate::buffer::GrowBuffer::new(),
            sink,
            formatter: None,
            info: InfoTable::default(),
            warn_sink: Box::new(default_warn_sink),
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn flags(&self) -> HandleFlags {
        self.flags
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Idempotent: setting already-set bits is a no-op.
    pub fn set_flags(&mut self, flags: HandleFlags) {
        self.flags.insert(flags);
    }

    /// Idempotent: clearing already-clear bits is a no-op.
    pub fn clear_flags(&mut self, flags: HandleFlags) {
        self.flags.remove(flags);
    }

    pub fn set_info(&mut self, info: InfoTable) {
        self.info = info;
    }

    pub fn set_formatter(&mut self, formatter: impl Fn(&str) -> Option<String> + 'static) {
        self.formatter = Some(Box::new(formatter));
    }

    pub fn set_sink(&mut self, sink: Box<dyn Sink>) {
        self.sink = sink;
    }

    pub fn set_warn_sink(&mut self, warn_sink: impl Fn(&Warning) + 'static) {
        self.warn_sink = Box::new(warn_sink);
    }

    fn route_warnings(&self, warnings: Vec<Warning>) {
        if self.flags.contains(HandleFlags::WARN) {
            for w in &warnings {
                (self.warn_sink)(w);
            }
        }
    }

    fn flush(&mut self) -> Result<usize, XoError> {
        let len = self.buf.len();
        self.sink.write(self.buf.as_str())?;
        Ok(len)
    }

    /// Walks `fmt` (per the grammar in [`crate::parser`]), resolving
    /// each field's printf conversions against `args` inline, and
    /// writes the assembled, per-style-escaped result to the sink.
    pub fn emit_with(&mut self, fmt: &str, args: &[Value]) -> Result<usize, XoError> {
        self.buf.clear();

        // Spans are collected before rendering so the render pass (which
        // needs `&mut self.buf`/`&mut self.stack`) doesn't have to share
        // a borrow with the parser's borrow of `fmt`.
        let mut warnings = Vec::new();
        let mut spans: Vec<OwnedSpan> = Vec::new();
        let collect = |span: Span<'_>| spans.push(OwnedSpan::from_span(span));
        let on_warning = |w| warnings.push(w);
        match self.formatter.as_deref() {
            Some(f) => Parser::with_formatter(fmt, f).run(collect, on_warning),
            None => Parser::new(fmt).run(collect, on_warning),
        }

        {
            let style = self.style;
            let mut ctx = RenderCtx {
                buf: &mut self.buf,
                stack: &mut self.stack,
                flags: &mut self.flags,
                indent_by: self.indent_by,
                info: &self.info,
                args,
                cursor: 0,
            };
            for span in &spans {
                match span {
                    OwnedSpan::Literal(text) => render::literal(&mut ctx, style, text),
                    OwnedSpan::Newline => render::newline(&mut ctx, style),
                    OwnedSpan::Field(f) => render::field(&mut ctx, style, &f.as_parsed()),
                }
            }
        }

        self.route_warnings(warnings);
        self.flush()
    }

    pub fn open_container(&mut self, name: &str) -> Result<usize, XoError> {
        self.structural_push(name, FrameFlags::EMPTY, render::open_container)
    }

    pub fn close_container(&mut self, name: &str) -> Result<usize, XoError> {
        self.structural_pop(name, FrameFlags::EMPTY, render::close_container)
    }

    pub fn open_list(&mut self, name: &str) -> Result<usize, XoError> {
        self.structural_push(name, FrameFlags::LIST, render::open_list)
    }

    pub fn close_list(&mut self, name: &str) -> Result<usize, XoError> {
        self.structural_pop(name, FrameFlags::LIST, render::close_list)
    }

    pub fn open_instance(&mut self, name: &str) -> Result<usize, XoError> {
        self.structural_push(name, FrameFlags::INSTANCE, render::open_instance)
    }

    pub fn close_instance(&mut self, name: &str) -> Result<usize, XoError> {
        self.structural_pop(name, FrameFlags::INSTANCE, render::close_instance)
    }

    fn structural_push(
        &mut self,
        name: &str,
        frame_flags: FrameFlags,
        render_fn: fn(&mut RenderCtx<'_>, Style, &str),
    ) -> Result<usize, XoError> {
        self.buf.clear();
        {
            let style = self.style;
            let mut ctx = RenderCtx {
                buf: &mut self.buf,
                stack: &mut self.stack,
                flags: &mut self.flags,
                indent_by: self.indent_by,
                info: &self.info,
                args: &[],
                cursor: 0,
            };
            render_fn(&mut ctx, style, name);
        }

        let keep_name = self.flags.intersects(HandleFlags::XPATH | HandleFlags::WARN);
        let owned_name = keep_name.then(|| std::borrow::Cow::Owned(name.to_string()));
        let indent_delta = match self.style {
            Style::Xml | Style::Json => 1,
            Style::Html | Style::Text => 0,
        };
        self.stack.depth_change(owned_name, 1, indent_delta, frame_flags, false, keep_name);
        self.flush()
    }

    fn structural_pop(
        &mut self,
        name: &str,
        frame_flags: FrameFlags,
        render_fn: fn(&mut RenderCtx<'_>, Style, &str),
    ) -> Result<usize, XoError> {
        let warn = self.flags.contains(HandleFlags::WARN);
        let indent_delta = match self.style {
            Style::Xml | Style::Json => -1,
            Style::Html | Style::Text => 0,
        };
        let warnings = self.stack.depth_change(
            Some(std::borrow::Cow::Owned(name.to_string())),
            -1,
            indent_delta,
            frame_flags,
            warn,
            true,
        );
        self.route_warnings(warnings);

        self.buf.clear();
        {
            let style = self.style;
            let mut ctx = RenderCtx {
                buf: &mut self.buf,
                stack: &mut self.stack,
                flags: &mut self.flags,
                indent_by: self.indent_by,
                info: &self.info,
                args: &[],
                cursor: 0,
            };
            render_fn(&mut ctx, style, name);
        }
        self.flush()
    }

    /// Opens a container and returns a guard that closes it on `Drop`,
    /// for callers who prefer scope-based nesting. Drop cannot surface
    /// a `Result`, so a close failure here is reported through the
    /// warning sink rather than propagated; callers who need the error
    /// should use [`Handle::close_container`] directly instead.
    pub fn container(&mut self, name: &str) -> Result<StructuralGuard<'_>, XoError> {
        self.open_container(name)?;
        Ok(StructuralGuard { handle: self, name: name.to_string(), kind: StructuralKind::Container })
    }

    pub fn list(&mut self, name: &str) -> Result<StructuralGuard<'_>, XoError> {
        self.open_list(name)?;
        Ok(StructuralGuard { handle: self, name: name.to_string(), kind: StructuralKind::List })
    }

    pub fn instance(&mut self, name: &str) -> Result<StructuralGuard<'_>, XoError> {
        self.open_instance(name)?;
        Ok(StructuralGuard { handle: self, name: name.to_string(), kind: StructuralKind::Instance })
    }
}

/// Fluent alternative to [`Handle::with_config`] for callers who'd
/// rather chain setters than build a [`HandleConfig`] by hand.
///
/// ```ignore
/// HandleBuilder::new()
///     .style(Style::Json)
///     .flags(HandleFlags::PRETTY | HandleFlags::WARN)
///     .indent_by(4)
///     .sink(my_sink)
///     .build();
/// ```
pub struct HandleBuilder {
    config: HandleConfig,
    sink: Option<Box<dyn Sink>>,
}

impl HandleBuilder {
    pub fn new() -> Self {
        HandleBuilder { config: HandleConfig::default(), sink: None }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.config.style = style;
        self
    }

    pub fn flags(mut self, flags: HandleFlags) -> Self {
        self.config.flags = flags;
        self
    }

    pub fn indent_by(mut self, indent_by: usize) -> Self {
        self.config.indent_by = indent_by;
        self
    }

    pub fn stack_depth(mut self, stack_depth: usize) -> Self {
        self.config.stack_depth = stack_depth;
        self
    }

    pub fn sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the handle. Defaults to stdout when no sink was given.
    pub fn build(self) -> Handle {
        let sink = self.sink.unwrap_or_else(|| Box::new(io::stdout()));
        Handle::with_config(sink, self.config)
    }
}

impl Default for HandleBuilder {
    fn default() -> Self {
        HandleBuilder::new()
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if self.flags.contains(HandleFlags::CLOSE_FP) {
            let _ = self.sink.close();
        }
    }
}

enum StructuralKind {
    Container,
    List,
    Instance,
}

pub struct StructuralGuard<'h> {
    handle: &'h mut Handle,
    name: String,
    kind: StructuralKind,
}

impl Drop for StructuralGuard<'_> {
    fn drop(&mut self) {
        let result = match self.kind {
            StructuralKind::Container => self.handle.close_container(&self.name),
            StructuralKind::List => self.handle.close_list(&self.name),
            StructuralKind::Instance => self.handle.close_instance(&self.name),
        };
        if let Err(err) = result {
            (self.handle.warn_sink)(&Warning::CloseWithEmptyStack { name: format!("{} ({err})", self.name) });
        }
    }
}

/// Owned mirror of [`Span`] so the parser's borrow of `fmt` ends before
/// the render pass borrows the handle's buffer/stack mutably.
enum OwnedSpan {
    Literal(String),
    Newline,
    Field(OwnedFieldSpan),
}

struct OwnedFieldSpan {
    kind: crate::field::FieldKind,
    name: String,
    print_fmt: String,
    encode_fmt: String,
    flags: crate::style::FieldFlags,
}

impl OwnedFieldSpan {
    fn as_parsed(&self) -> ParsedField<'_> {
        ParsedField {
            kind: self.kind,
            name: &self.name,
            print_fmt: &self.print_fmt,
            encode_fmt: &self.encode_fmt,
            flags: self.flags,
        }
    }
}

impl OwnedSpan {
    fn from_span(span: Span<'_>) -> Self {
        match span {
            Span::Literal(s) => OwnedSpan::Literal(s.to_string()),
            Span::Newline => OwnedSpan::Newline,
            Span::Field(f) => OwnedSpan::Field(OwnedFieldSpan {
                kind: f.kind,
                name: f.name.to_string(),
                print_fmt: f.print_fmt.to_string(),
                encode_fmt: f.encode_fmt.to_string(),
                flags: f.flags,
            }),
            Span::OwnedField(f) => OwnedSpan::Field(OwnedFieldSpan {
                kind: f.kind,
                name: f.name,
                print_fmt: f.print_fmt,
                encode_fmt: f.encode_fmt,
                flags: f.flags,
            }),
        }
    }
}

/// Collects trailing `Value`s from an `emit!` call site into a slice.
#[macro_export]
macro_rules! emit {
    ($handle:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        let args: Vec<$crate::value::Value> = vec![$($crate::value::Value::from($arg)),*];
        $handle.emit_with($fmt, &args)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    // `Handle` owns its `Box<dyn Sink>` opaquely, so tests that need to
    // inspect written bytes build their own sink and keep a clone of its
    // buffer through interior mutability instead of trying to read back
    // through the trait object.
    use std::cell::RefCell;
    use std::rc::Rc;

    struct SharedSink(Rc<RefCell<String>>);
    impl Sink for SharedSink {
        fn write(&mut self, data: &str) -> io::Result<()> {
            self.0.borrow_mut().push_str(data);
            Ok(())
        }
    }

    fn handle_with_capture(style: Style, flags: HandleFlags) -> (Handle, Rc<RefCell<String>>) {
        let captured = Rc::new(RefCell::new(String::new()));
        let handle = Handle::to_sink(Box::new(SharedSink(captured.clone())), style, flags);
        (handle, captured)
    }

    #[test]
    fn xml_container_and_value_round_trip() {
        let (mut h, out) = handle_with_capture(Style::Xml, HandleFlags::empty());
        h.open_container("top").unwrap();
        emit!(h, "{:x/%d}", 42).unwrap();
        h.close_container("top").unwrap();
        assert_eq!(out.borrow().as_str(), "<top><x>42</x></top>");
    }

    #[test]
    fn xml_container_and_value_pretty() {
        let (mut h, out) = handle_with_capture(Style::Xml, HandleFlags::PRETTY);
        h.open_container("top").unwrap();
        emit!(h, "{:x/%d}", 42).unwrap();
        h.close_container("top").unwrap();
        assert_eq!(out.borrow().as_str(), "<top>\n  <x>42</x>\n</top>\n");
    }

    #[test]
    fn json_list_of_two_instances() {
        let (mut h, out) = handle_with_capture(Style::Json, HandleFlags::empty());
        h.open_container("top").unwrap();
        h.open_list("item").unwrap();
        h.open_instance("item").unwrap();
        emit!(h, "{:name/%s}", "a").unwrap();
        h.close_instance("item").unwrap();
        h.open_instance("item").unwrap();
        emit!(h, "{:name/%s}", "b").unwrap();
        h.close_instance("item").unwrap();
        h.close_list("item").unwrap();
        h.close_container("top").unwrap();
        assert_eq!(
            out.borrow().as_str(),
            "{\"top\": {\"item\": [{\"name\": \"a\"}, {\"name\": \"b\"}]}}\n"
        );
    }

    #[test]
    fn json_quoting_follows_print_fmt_suffix_and_overrides() {
        let (mut h, out) = handle_with_capture(Style::Json, HandleFlags::empty());
        emit!(h, "{:k/%d}", 7).unwrap();
        assert_eq!(out.borrow().as_str(), "\"k\": 7");

        out.borrow_mut().clear();
        emit!(h, "{Q:k/%d}", 7).unwrap();
        assert_eq!(out.borrow().as_str(), "\"k\": \"7\"");

        out.borrow_mut().clear();
        emit!(h, "{N:k/%s}", "7").unwrap();
        assert_eq!(out.borrow().as_str(), "\"k\": 7");
    }

    #[test]
    fn text_label_value_decoration_padding() {
        let (mut h, out) = handle_with_capture(Style::Text, HandleFlags::empty());
        emit!(h, "{L:Item} '{:name/%s}':\n", "gum").unwrap();
        assert_eq!(out.borrow().as_str(), "Item 'gum':\n");
    }

    #[test]
    fn warning_on_mismatched_close() {
        let (mut h, _out) = handle_with_capture(Style::Xml, HandleFlags::WARN);
        let captured = Rc::new(RefCell::new(Vec::new()));
        let captured_clone = captured.clone();
        h.set_warn_sink(move |w| captured_clone.borrow_mut().push(w.to_string()));

        h.open_container("a").unwrap();
        h.close_container("b").unwrap();

        assert_eq!(captured.borrow().as_slice(), ["xo: incorrect close: 'b' .vs. 'a'"]);
    }

    #[test]
    fn close_with_empty_stack_is_silent_without_warn() {
        let (mut h, _out) = handle_with_capture(Style::Xml, HandleFlags::empty());
        assert!(h.close_container("anything").is_ok());
    }

    #[test]
    fn set_flags_and_clear_flags_are_idempotent() {
        let (mut h, _) = handle_with_capture(Style::Text, HandleFlags::PRETTY);
        h.set_flags(HandleFlags::PRETTY);
        assert_eq!(h.flags(), HandleFlags::PRETTY);
        h.clear_flags(HandleFlags::WARN);
        assert_eq!(h.flags(), HandleFlags::PRETTY);
    }

    #[test]
    fn handle_builder_wires_style_flags_and_sink() {
        let sink = SharedSink(Rc::new(RefCell::new(String::new())));
        let captured = sink.0.clone();
        let mut h = HandleBuilder::new()
            .style(Style::Json)
            .flags(HandleFlags::PRETTY)
            .indent_by(4)
            .sink(Box::new(sink))
            .build();
        assert_eq!(h.style(), Style::Json);
        assert!(h.flags().contains(HandleFlags::PRETTY));
        emit!(h, "{:k/%d}", 1).unwrap();
        assert!(captured.borrow().contains("\"k\": 1"));
    }
}
