//! Append-only, growable byte buffer shared by the format-work and data
//! pipelines (see `Handle`). Grounded on a `Printbuf`-style text buffer,
//! a thin wrapper around a grow-on-demand text buffer used to assemble
//! formatted output one append at a time.

use crate::error::XoError;

/// Initial and minimum grow-chunk size, in bytes.
const INITIAL_CAPACITY: usize = 8 * 1024;

/// An ordered sequence of bytes that grows as appends require more room.
///
/// The original C implementation grew by exactly one `XO_BUFSIZ` chunk per
/// call to `xo_buf_has_room`, which is not guaranteed to fit an arbitrarily
/// large single append (a latent bug called out in the source). This
/// buffer instead doubles its capacity in a loop until the requested span
/// fits, which is the "double-by-chunk" policy the buffer is specified to
/// follow.
#[derive(Debug, Default)]
pub struct GrowBuffer {
    data: Vec<u8>,
}

impl GrowBuffer {
    pub fn new() -> Self {
        GrowBuffer { data: Vec::with_capacity(INITIAL_CAPACITY) }
    }

    /// Ensure at least `additional` more bytes can be appended without a
    /// further allocation. Grows by doubling (or by `INITIAL_CAPACITY`,
    /// whichever is larger) until the requested span fits.
    pub fn ensure_room(&mut self, additional: usize) -> Result<(), XoError> {
        let needed = self.data.len().checked_add(additional).ok_or(XoError::BufferGrowth {
            requested: additional,
        })?;

        if self.data.capacity() >= needed {
            return Ok(());
        }

        let mut cap = self.data.capacity().max(INITIAL_CAPACITY);
        while cap < needed {
            cap = cap.checked_mul(2).ok_or(XoError::BufferGrowth { requested: additional })?;
        }

        self.data.try_reserve(cap - self.data.len()).map_err(|_| XoError::BufferGrowth {
            requested: additional,
        })
    }

    /// Append `bytes`, growing first. A failed grow silently drops the
    /// append (the caller only checks the final realized write).
    pub fn append(&mut self, bytes: &[u8]) {
        if self.ensure_room(bytes.len()).is_ok() {
            self.data.extend_from_slice(bytes);
        }
    }

    pub fn append_str(&mut self, s: &str) {
        self.append(s.as_bytes());
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.data).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reset the insertion point to the start without deallocating.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_accumulates() {
        let mut buf = GrowBuffer::new();
        buf.append_str("hello, ");
        buf.append_str("world");
        assert_eq!(buf.as_str(), "hello, world");
    }

    #[test]
    fn clear_resets_without_losing_capacity() {
        let mut buf = GrowBuffer::new();
        buf.append_str("abc");
        let cap_before = buf.data.capacity();
        buf.clear();
        assert_eq!(buf.as_str(), "");
        assert_eq!(buf.data.capacity(), cap_before);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut buf = GrowBuffer::new();
        let chunk = "x".repeat(INITIAL_CAPACITY + 1);
        buf.append_str(&chunk);
        assert_eq!(buf.len(), chunk.len());
    }
}
