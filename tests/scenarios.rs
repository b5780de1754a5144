//! End-to-end scenarios against the `xo` facade: default-handle macros,
//! explicit-handle functions, and `LIBXO_OPTIONS` decoding.

use std::cell::RefCell;
use std::rc::Rc;

use xo::{HandleFlags, Sink, Style};

#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<String>>);

impl Sink for SharedSink {
    fn write(&mut self, data: &str) -> std::io::Result<()> {
        self.0.borrow_mut().push_str(data);
        Ok(())
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn options_parse_decodes_style_and_flags() {
    init_logging();
    let config = xo::options::parse("JPWi4");
    assert_eq!(config.style, Style::Json);
    assert!(config.flags.contains(HandleFlags::PRETTY | HandleFlags::WARN));
    assert_eq!(config.indent_by, 4);
}

#[test]
fn explicit_handle_json_round_trip_is_well_formed() {
    let sink = SharedSink::default();
    let out = sink.0.clone();
    let mut handle = xo::Handle::to_sink(Box::new(sink), Style::Json, HandleFlags::empty());
    xo::open_container_h(Some(&mut handle), "top").unwrap();
    xo::emit_h!(Some(&mut handle), "{:n/%d}", 9).unwrap();
    xo::close_container_h(Some(&mut handle), "top").unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&out.borrow()).expect("well-formed JSON");
    assert_eq!(parsed["top"]["n"], 9);
}

#[test]
fn default_handle_emit_macro_does_not_panic() {
    xo::default::reset_default();
    xo::emit!("plain text with no fields\n").unwrap();
}
