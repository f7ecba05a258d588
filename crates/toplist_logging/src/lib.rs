#![deny(missing_docs)]
//! Shared logging utilities for the toplist workspace.
//!
//! This crate provides the `toplist_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line is tagged
//! with the navigation id of the page fetch the current thread is working on,
//! so interleaved fetches can be told apart in `toplist.log`.

use std::cell::Cell;

thread_local! {
    /// Id of the navigation (page fetch) the current thread is handling.
    static NAVIGATION: Cell<u64> = const { Cell::new(0) };
}

/// Sets the navigation id for the current thread.
/// Called whenever work for a page fetch starts; 0 tags work outside any navigation.
pub fn set_navigation(id: u64) {
    NAVIGATION.with(|v| v.set(id));
}

/// Retrieves the navigation id for the current thread.
/// Returns 0 before the first navigation.
pub fn current_navigation() -> u64 {
    NAVIGATION.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current navigation id.
#[macro_export]
macro_rules! toplist_trace {
    ($($arg:tt)*) => {{
        log::trace!("[nav {}] {}", $crate::current_navigation(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current navigation id.
#[macro_export]
macro_rules! toplist_debug {
    ($($arg:tt)*) => {{
        log::debug!("[nav {}] {}", $crate::current_navigation(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current navigation id.
#[macro_export]
macro_rules! toplist_info {
    ($($arg:tt)*) => {{
        log::info!("[nav {}] {}", $crate::current_navigation(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current navigation id.
#[macro_export]
macro_rules! toplist_warn {
    ($($arg:tt)*) => {{
        log::warn!("[nav {}] {}", $crate::current_navigation(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current navigation id.
#[macro_export]
macro_rules! toplist_error {
    ($($arg:tt)*) => {{
        log::error!("[nav {}] {}", $crate::current_navigation(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_id_is_thread_local() {
        set_navigation(7);
        assert_eq!(current_navigation(), 7);
        let other = std::thread::spawn(current_navigation).join().unwrap();
        assert_eq!(other, 0);
    }
}
