//! Format-string parser and multi-style (text/XML/JSON/HTML) emission
//! engine. This crate has no opinion on process-wide defaults,
//! environment variables, or concrete sinks beyond stdout and an
//! in-memory buffer — that policy layer lives in the `xo` facade crate.

pub mod buffer;
pub mod error;
pub mod field;
pub mod handle;
pub mod info;
pub mod parser;
pub mod printf;
pub mod render;
pub mod sink;
pub mod stack;
pub mod style;
pub mod value;
pub mod warn;
pub mod xpath;

pub use buffer::GrowBuffer;
pub use error::XoError;
pub use field::{FieldKind, ParsedField};
pub use handle::{Handle, HandleBuilder, HandleConfig, StructuralGuard};
pub use info::{InfoEntry, InfoTable};
pub use sink::{Sink, VecSink};
pub use stack::{Frame, Stack};
pub use style::{FieldFlags, FrameFlags, HandleFlags, Style};
pub use value::Value;
pub use warn::Warning;
