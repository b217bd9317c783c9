//! Panic payload formatting.

use std::any::Any;

/// Format a panic payload into a readable message.
///
/// String payloads are used directly; common numeric payloads are
/// rendered with `Display`, anything else with `Debug`.
///
/// ```
/// use wishes::panic_message;
///
/// let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
/// assert_eq!(panic_message(payload.as_ref()), "boom");
/// ```
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .or_else(|| payload.downcast_ref::<i32>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<i64>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<u32>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<u64>().map(ToString::to_string))
        .or_else(|| payload.downcast_ref::<usize>().map(ToString::to_string))
        .unwrap_or_else(|| format!("{payload:?}"))
}
