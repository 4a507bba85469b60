//! Deduplicated warnings with colored terminal output.
//!
//! Lenient processing never fails on odd input, but some recoveries are
//! worth telling the user about. Each distinct `(component, message)` pair is
//! printed once per process (or until [`clear_warnings`] is called).

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// A poisoned lock only means another thread panicked mid-insert; the set
/// itself is still usable.
fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about a recoverable input problem (prints once per unique message).
///
/// # Example
/// ```
/// use quill_common::warning::{has_warned, warn_once};
///
/// warn_once("Lexer", "unterminated comment at end of input");
/// assert!(has_warned("Lexer", "unterminated comment at end of input"));
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = warned()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!("{YELLOW}[quill {component}] ⚠ {message}{RESET}");
    }
}

/// Whether the given warning has been emitted since the last clear.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call between unrelated documents if every
/// document should report its own problems).
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}
