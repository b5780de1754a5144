//! Concrete [`Sink`] implementations the facade ships beyond `xo-core`'s
//! in-memory `VecSink`: standard output, and a file sink that honors
//! `HandleFlags::CLOSE_FP` by actually closing on drop.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use xo_core::Sink;

/// Writes to standard output. `xo_core::Handle::new` already defaults to
/// this via `impl Sink for io::Stdout`; this wrapper exists for callers
/// who want to name the type explicitly (e.g. in a `HandleConfig`-driven
/// constructor that takes `Box<dyn Sink>`).
#[derive(Debug, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write(&mut self, data: &str) -> io::Result<()> {
        io::stdout().write_all(data.as_bytes())
    }

    fn close(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// Writes to a file opened on construction. Pair with
/// `HandleFlags::CLOSE_FP` so the handle's `Drop` impl calls `close`,
/// the analogue of a `create_to_file`-style constructor.
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(FileSink { file: File::create(path)? })
    }

    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
        Ok(FileSink { file })
    }
}

impl Sink for FileSink {
    fn write(&mut self, data: &str) -> io::Result<()> {
        self.file.write_all(data.as_bytes())
    }

    fn close(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn file_sink_writes_and_closes() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("xo-file-sink-test-{}.txt", std::process::id()));
        {
            let mut sink = FileSink::create(&path).unwrap();
            sink.write("hello").unwrap();
            sink.close().unwrap();
        }
        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "hello");
        let _ = std::fs::remove_file(&path);
    }
}
