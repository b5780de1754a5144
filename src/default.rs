//! The per-thread default handle that `xo::emit!`/`xo::emit_h!` write to
//! when no explicit handle is given. Lazily built from `LIBXO_OPTIONS` on
//! first use.
//!
//! `Handle` boxes its sink/formatter/warn-sink as plain `dyn` trait
//! objects (no `+ Send` bound — a caller's closures and `VecSink`-style
//! test doubles shouldn't be forced to be `Send` just to sit behind a
//! default handle), so it cannot live behind a `'static` `Mutex`-guarded
//! process-wide singleton. A `thread_local!` gives the same "one implicit
//! handle you don't have to thread through every call" convenience
//! without that bound.

use std::cell::RefCell;

use xo_core::Handle;
#[cfg(not(feature = "libxo-options"))]
use xo_core::HandleConfig;

thread_local! {
    static DEFAULT: RefCell<Handle> = RefCell::new(build());
}

fn build() -> Handle {
    #[cfg(feature = "libxo-options")]
    let config = crate::options::from_env();
    #[cfg(not(feature = "libxo-options"))]
    let config = HandleConfig::default();
    Handle::with_config(Box::new(std::io::stdout()), config)
}

/// Runs `f` with exclusive access to this thread's default handle,
/// initializing it from `LIBXO_OPTIONS` on first call.
pub fn with_default<R>(f: impl FnOnce(&mut Handle) -> R) -> R {
    DEFAULT.with(|cell| f(&mut cell.borrow_mut()))
}

/// Replaces this thread's default handle with a fresh one built from the
/// current `LIBXO_OPTIONS`. Intended for tests that mutate the
/// environment variable between cases; production code should not need
/// this.
pub fn reset_default() {
    DEFAULT.with(|cell| *cell.borrow_mut() = build());
}
