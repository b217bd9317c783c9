//! Runtime configuration.
//!
//! The module exposes the `fail_on_pending` flag controlling whether a
//! scenario halted by an undefined step is reported as a failure instead of
//! a skip.

use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable consulted when no in-process override is set.
pub const FAIL_ON_PENDING_ENV: &str = "WISHES_FAIL_ON_PENDING";

const OVERRIDE_UNSET: u8 = 0;
const OVERRIDE_FALSE: u8 = 1;
const OVERRIDE_TRUE: u8 = 2;

static FAIL_ON_PENDING_OVERRIDE: AtomicU8 = AtomicU8::new(OVERRIDE_UNSET);

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_fail_on_pending() -> Option<bool> {
    std::env::var(FAIL_ON_PENDING_ENV)
        .ok()
        .as_deref()
        .and_then(parse_env_bool)
}

fn override_state() -> Option<bool> {
    match FAIL_ON_PENDING_OVERRIDE.load(Ordering::Relaxed) {
        OVERRIDE_FALSE => Some(false),
        OVERRIDE_TRUE => Some(true),
        _ => None,
    }
}

/// Determine whether pending scenarios should be reported as failures.
#[must_use]
pub fn fail_on_pending() -> bool {
    override_state()
        .or_else(env_fail_on_pending)
        .unwrap_or(false)
}

/// Override the `fail_on_pending` flag for the current process.
///
/// Call [`clear_fail_on_pending_override`] to restore environment driven
/// behaviour.
pub fn set_fail_on_pending(enabled: bool) {
    let value = if enabled {
        OVERRIDE_TRUE
    } else {
        OVERRIDE_FALSE
    };
    FAIL_ON_PENDING_OVERRIDE.store(value, Ordering::Relaxed);
}

/// Remove any in-process override for the `fail_on_pending` flag.
pub fn clear_fail_on_pending_override() {
    FAIL_ON_PENDING_OVERRIDE.store(OVERRIDE_UNSET, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serial_test::serial;

    #[test]
    #[serial]
    fn override_sets_flag() {
        clear_fail_on_pending_override();
        set_fail_on_pending(true);
        assert!(fail_on_pending());
        set_fail_on_pending(false);
        assert!(!fail_on_pending());
        clear_fail_on_pending_override();
    }

    #[rstest]
    #[case("1", Some(true))]
    #[case("Yes", Some(true))]
    #[case(" ON ", Some(true))]
    #[case("TRUE", Some(true))]
    #[case("0", Some(false))]
    #[case("off", Some(false))]
    #[case("False", Some(false))]
    #[case("maybe", None)]
    #[case("", None)]
    fn parses_env_values(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_env_bool(raw), expected);
    }
}
