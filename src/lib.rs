//! Facade over `xo-core`: wires the default handle, `LIBXO_OPTIONS`
//! decoding, and the concrete sinks (`StdoutSink`, `FileSink`) on top of
//! the style-agnostic emission engine.
//!
//! Every `xo-core` `Handle` method is reachable two ways here: a `*_h`
//! function taking `Option<&mut Handle>` (`None` meaning "the default
//! handle", the same convention a `NULL` handle pointer would carry),
//! and a short-form function that always targets the default handle.

#[cfg(feature = "libxo-options")]
pub mod options;

pub mod default;
pub mod file_sink;

pub use file_sink::{FileSink, StdoutSink};
pub use xo_core::{
    FieldFlags, FrameFlags, GrowBuffer, Handle, HandleBuilder, HandleConfig, HandleFlags,
    InfoEntry, InfoTable, ParsedField, Sink, Stack, StructuralGuard, Style, Value, VecSink,
    Warning, XoError,
};

use default::with_default;

/// Emits against an explicit handle, or this thread's default when
/// `handle` is `None`.
pub fn emit_h(handle: Option<&mut Handle>, fmt: &str, args: &[Value]) -> Result<usize, XoError> {
    match handle {
        Some(h) => h.emit_with(fmt, args),
        None => with_default(|h| h.emit_with(fmt, args)),
    }
}

/// Collects trailing arguments and emits against an explicit handle (or
/// the default, via [`emit_h`]).
#[macro_export]
macro_rules! emit_h {
    ($handle:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        let args: Vec<$crate::Value> = vec![$($crate::Value::from($arg)),*];
        $crate::emit_h($handle, $fmt, &args)
    }};
}

/// Collects trailing arguments and emits against this thread's default
/// handle. Equivalent to `xo::emit_h!(None, fmt, args...)`.
#[macro_export]
macro_rules! emit {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::emit_h!(None, $fmt $(, $arg)*)
    };
}

macro_rules! structural_pair {
    ($h_name:ident, $name:ident, $method:ident) => {
        #[doc = concat!(
            "Calls `Handle::", stringify!($method),
            "` on an explicit handle, or the default when `handle` is `None`."
        )]
        pub fn $h_name(handle: Option<&mut Handle>, name: &str) -> Result<usize, XoError> {
            match handle {
                Some(h) => h.$method(name),
                None => with_default(|h| h.$method(name)),
            }
        }

        #[doc = concat!("Calls `Handle::", stringify!($method), "` on the default handle.")]
        pub fn $name(name: &str) -> Result<usize, XoError> {
            $h_name(None, name)
        }
    };
}

structural_pair!(open_container_h, open_container, open_container);
structural_pair!(close_container_h, close_container, close_container);
structural_pair!(open_list_h, open_list, open_list);
structural_pair!(close_list_h, close_list, close_list);
structural_pair!(open_instance_h, open_instance, open_instance);
structural_pair!(close_instance_h, close_instance, close_instance);

/// Sets style on an explicit handle, or the default when `handle` is `None`.
pub fn set_style_h(handle: Option<&mut Handle>, style: Style) {
    match handle {
        Some(h) => h.set_style(style),
        None => with_default(|h| h.set_style(style)),
    }
}

pub fn set_style(style: Style) {
    set_style_h(None, style)
}

pub fn set_flags_h(handle: Option<&mut Handle>, flags: HandleFlags) {
    match handle {
        Some(h) => h.set_flags(flags),
        None => with_default(|h| h.set_flags(flags)),
    }
}

pub fn set_flags(flags: HandleFlags) {
    set_flags_h(None, flags)
}

pub fn clear_flags_h(handle: Option<&mut Handle>, flags: HandleFlags) {
    match handle {
        Some(h) => h.clear_flags(flags),
        None => with_default(|h| h.clear_flags(flags)),
    }
}

pub fn clear_flags(flags: HandleFlags) {
    clear_flags_h(None, flags)
}

pub fn set_info_h(handle: Option<&mut Handle>, info: InfoTable) {
    match handle {
        Some(h) => h.set_info(info),
        None => with_default(|h| h.set_info(info)),
    }
}

pub fn set_info(info: InfoTable) {
    set_info_h(None, info)
}

pub fn set_formatter_h(handle: Option<&mut Handle>, formatter: impl Fn(&str) -> Option<String> + 'static) {
    match handle {
        Some(h) => h.set_formatter(formatter),
        None => with_default(|h| h.set_formatter(formatter)),
    }
}

pub fn set_formatter(formatter: impl Fn(&str) -> Option<String> + 'static) {
    set_formatter_h(None, formatter)
}

pub fn set_sink_h(handle: Option<&mut Handle>, sink: Box<dyn Sink>) {
    match handle {
        Some(h) => h.set_sink(sink),
        None => with_default(|h| h.set_sink(sink)),
    }
}

pub fn set_sink(sink: Box<dyn Sink>) {
    set_sink_h(None, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_h_targets_explicit_handle_not_default() {
        let mut handle = Handle::to_sink(Box::new(VecSink::new()), Style::Text, HandleFlags::empty());
        let n = emit_h!(Some(&mut handle), "{:count/%d}", 3).unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn open_container_h_on_explicit_handle_round_trips() {
        let mut handle = Handle::to_sink(Box::new(VecSink::new()), Style::Xml, HandleFlags::empty());
        open_container_h(Some(&mut handle), "top").unwrap();
        emit_h!(Some(&mut handle), "{:x/%d}", 1).unwrap();
        close_container_h(Some(&mut handle), "top").unwrap();
    }
}
