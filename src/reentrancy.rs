//! Per-thread guard around record delivery.
//!
//! The HTTP stack logs through the same facades the bridges listen on. A
//! record emitted while this thread is already delivering one is dropped
//! instead of triggering another webhook call.

use std::cell::Cell;

thread_local! {
    static DELIVERING: Cell<bool> = const { Cell::new(false) };
}

struct Reset;

impl Drop for Reset {
    fn drop(&mut self) {
        DELIVERING.with(|flag| flag.set(false));
    }
}

/// Run `f` unless this thread is already inside `guarded`.
///
/// Returns `None` when the call was suppressed.
pub(crate) fn guarded<R>(f: impl FnOnce() -> R) -> Option<R> {
    if DELIVERING.with(|flag| flag.replace(true)) {
        return None;
    }
    let _reset = Reset;
    Some(f())
}
