//! Crate-level scenarios covering the full emit pipeline across all
//! four styles, exercised through the public `Handle` API rather than
//! the renderer internals.

use std::cell::RefCell;
use std::rc::Rc;

use xo_core::{Handle, HandleFlags, Sink, Style, Warning};

#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<String>>);

impl Sink for SharedSink {
    fn write(&mut self, data: &str) -> std::io::Result<()> {
        self.0.borrow_mut().push_str(data);
        Ok(())
    }
}

fn handle_with_capture(style: Style, flags: HandleFlags) -> (Handle, Rc<RefCell<String>>) {
    let sink = SharedSink::default();
    let out = sink.0.clone();
    (Handle::to_sink(Box::new(sink), style, flags), out)
}

#[test]
fn xml_container_and_value_round_trip() {
    let (mut h, out) = handle_with_capture(Style::Xml, HandleFlags::empty());
    h.open_container("top").unwrap();
    h.emit_with("{:x/%d}", &[42i64.into()]).unwrap();
    h.close_container("top").unwrap();
    assert_eq!(out.borrow().as_str(), "<top><x>42</x></top>");
}

#[test]
fn json_list_of_two_instances_is_well_formed() {
    let (mut h, out) = handle_with_capture(Style::Json, HandleFlags::empty());
    h.open_container("top").unwrap();
    h.open_list("item").unwrap();
    h.open_instance("item").unwrap();
    h.emit_with("{:name}", &["a".into()]).unwrap();
    h.close_instance("item").unwrap();
    h.open_instance("item").unwrap();
    h.emit_with("{:name}", &["b".into()]).unwrap();
    h.close_instance("item").unwrap();
    h.close_list("item").unwrap();
    h.close_container("top").unwrap();

    let text = out.borrow().clone();
    let parsed: serde_json::Value = serde_json::from_str(&text).expect("well-formed JSON");
    let items = &parsed["top"]["item"];
    assert_eq!(items[0]["name"], "a");
    assert_eq!(items[1]["name"], "b");
}

#[test]
fn json_quoting_follows_print_fmt_suffix_and_overrides() {
    let (mut h, out) = handle_with_capture(Style::Json, HandleFlags::empty());
    h.open_container("top").unwrap();
    h.emit_with("{:k/%d}", &[7i64.into()]).unwrap();
    h.close_container("top").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out.borrow()).unwrap();
    assert_eq!(parsed["top"]["k"], 7);

    let (mut h, out) = handle_with_capture(Style::Json, HandleFlags::empty());
    h.open_container("top").unwrap();
    h.emit_with("{Q:k/%d}", &[7i64.into()]).unwrap();
    h.close_container("top").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out.borrow()).unwrap();
    assert_eq!(parsed["top"]["k"], "7");
}

#[test]
fn html_value_field_carries_xpath_breadcrumb() {
    let (mut h, out) = handle_with_capture(Style::Html, HandleFlags::XPATH);
    h.emit_with("{:name}", &["widget".into()]).unwrap();
    let text = out.borrow().clone();
    assert!(text.contains("data-xpath=\"/name\""), "{text}");
    assert!(text.contains("data-tag=\"name\""), "{text}");
}

#[test]
fn escaping_survives_special_characters_in_every_structural_style() {
    let payload = "<a> & \"b\"";

    let (mut h, out) = handle_with_capture(Style::Xml, HandleFlags::empty());
    h.emit_with("{:v}", &[payload.into()]).unwrap();
    assert_eq!(out.borrow().as_str(), "<v>&lt;a&gt; &amp; &quot;b&quot;</v>");

    let (mut h, out) = handle_with_capture(Style::Json, HandleFlags::empty());
    h.open_container("top").unwrap();
    h.emit_with("{:v}", &[payload.into()]).unwrap();
    h.close_container("top").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out.borrow()).unwrap();
    assert_eq!(parsed["top"]["v"], payload);
}

#[test]
fn warning_on_mismatched_close_fires_exactly_once() {
    let (mut h, _out) = handle_with_capture(Style::Xml, HandleFlags::WARN);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = seen.clone();
    h.set_warn_sink(move |w: &Warning| seen_clone.borrow_mut().push(w.to_string()));

    h.open_container("a").unwrap();
    h.close_container("b").unwrap();

    assert_eq!(seen.borrow().as_slice(), ["xo: incorrect close: 'b' .vs. 'a'"]);
}

#[test]
fn text_round_trip_never_leaks_grammar_braces() {
    let (mut h, out) = handle_with_capture(Style::Text, HandleFlags::empty());
    h.emit_with("{LC:Count}{:count/%d}\n", &[5i64.into()]).unwrap();
    let text = out.borrow().clone();
    assert_eq!(text, "Count:5\n");
    assert!(!text.contains('{') && !text.contains('}'));
}
