//! The write endpoint a [`crate::handle::Handle`] hands rendered output
//! to. Kept minimal and `std::io`-shaped so concrete implementations
//! (stdout, file, in-memory) compose with the rest of the ecosystem's
//! I/O error handling instead of inventing a bespoke one.

use std::io;

pub trait Sink {
    fn write(&mut self, data: &str) -> io::Result<()>;

    /// Called at most once, when the owning handle is dropped with
    /// `HandleFlags::CLOSE_FP` set. Default is a no-op for sinks that
    /// don't own an underlying resource (e.g. an in-memory buffer).
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An in-memory sink, primarily for tests but usable standalone by any
/// caller that wants the rendered text as a `String` rather than
/// written to a stream.
#[derive(Debug, Default)]
pub struct VecSink {
    buf: String,
}

impl VecSink {
    pub fn new() -> Self {
        VecSink::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl Sink for VecSink {
    fn write(&mut self, data: &str) -> io::Result<()> {
        self.buf.push_str(data);
        Ok(())
    }
}

/// `Handle::new`'s default sink. The `xo` facade's own `StdoutSink`
/// wraps this rather than duplicating it.
impl Sink for io::Stdout {
    fn write(&mut self, data: &str) -> io::Result<()> {
        use io::Write;
        (&*self).write_all(data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_accumulates_writes() {
        let mut sink = VecSink::new();
        sink.write("a").unwrap();
        sink.write("b").unwrap();
        assert_eq!(sink.as_str(), "ab");
    }
}
