use std::io;

/// Errors an emission can fail with.
///
/// There is no panicking path through this crate; every fallible operation
/// either returns one of these or is advisory (see [`crate::warn::Warning`]).
#[derive(Debug, thiserror::Error)]
pub enum XoError {
    #[error("failed to grow buffer to accommodate {requested} bytes")]
    BufferGrowth { requested: usize },

    #[error("sink write failed: {0}")]
    Sink(#[from] io::Error),
}
