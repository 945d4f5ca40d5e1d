//! Logging utilities with colored output and a slide status line.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, shown only with `--verbose`
//! - `StatusLine` for the single overwriting block used by `reel play`
//!
//! # Example
//!
//! ```ignore
//! log!("resolve"; "found {} photos", count);
//! debug!("probe"; "timed out: {}", path.display());
//!
//! status_slide("slide 2/5", "Memory 2  slideshow/2.jpg");
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::LazyLock,
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    // A log line invalidates whatever the status block drew last
    STATUS.lock().forget();

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "play" => prefix.bright_blue().bold().to_string(),
        "resolve" => prefix.bright_green().bold().to_string(),
        "cake" => prefix.bright_magenta().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Status Line (single block with overwrite)
// ============================================================================

/// Get current time formatted as HH:MM:SS (UTC)
fn now() -> String {
    use std::time::SystemTime;
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Single-block status display for the slideshow.
///
/// Each message overwrites the previous one so the terminal shows only
/// the slide currently on screen.
///
/// # Example
///
/// ```ignore
/// let mut status = StatusLine::new();
/// status.slide("slide 1/4", "Memory 1  slideshow/1.jpg");
/// status.paused("slide 1/4");
/// ```
pub struct StatusLine {
    /// Lines of previous output to clear
    last_lines: usize,
}

static STATUS: LazyLock<Mutex<StatusLine>> = LazyLock::new(|| Mutex::new(StatusLine::new()));

impl StatusLine {
    /// Create a new status display.
    pub const fn new() -> Self {
        Self { last_lines: 0 }
    }

    /// Display a slide (▶ prefix, green).
    pub fn slide(&mut self, label: &str, detail: &str) {
        self.display(format!("{}", "▶".green()), &format!("{label}  {detail}"));
    }

    /// Display the paused marker (dimmed, ‖ prefix).
    pub fn paused(&mut self, label: &str) {
        self.display(
            format!("{}", "‖".yellow()),
            &format!("{}", format!("{label} (paused)").dimmed()),
        );
    }

    /// Display the closing wish slide (★ prefix, magenta).
    pub fn wish(&mut self, label: &str, message: &str) {
        self.display(format!("{}", "★".magenta()), &format!("{label}  {message}"));
    }

    /// Drop the overwrite window without touching the terminal.
    fn forget(&mut self) {
        self.last_lines = 0;
    }

    fn display(&mut self, symbol: String, message: &str) {
        let mut stdout = stdout().lock();

        if self.last_lines > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let lines = self.last_lines as u16;
            execute!(stdout, cursor::MoveUp(lines)).ok();
            execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
        }

        let timestamp = format!("[{}]", now()).dimmed().to_string();
        writeln!(stdout, "{timestamp} {symbol} {message}").ok();
        stdout.flush().ok();

        self.last_lines = line_count(message);
    }
}

/// Number of terminal lines a status message occupies.
fn line_count(message: &str) -> usize {
    message.matches('\n').count() + 1
}

/// Global status: slide
pub fn status_slide(label: &str, detail: &str) {
    STATUS.lock().slide(label, detail);
}

/// Global status: paused
pub fn status_paused(label: &str) {
    STATUS.lock().paused(label);
}

/// Global status: wish slide
pub fn status_wish(label: &str, message: &str) {
    STATUS.lock().wish(label, message);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_new() {
        let status = StatusLine::new();
        assert_eq!(status.last_lines, 0);
    }

    #[test]
    fn test_status_line_count_single() {
        assert_eq!(line_count("slide 1/4  Memory 1"), 1);
    }

    #[test]
    fn test_status_line_count_multiline() {
        assert_eq!(line_count("slide 4/4\nHappy Birthday!\n  make a wish"), 3);
    }

    #[test]
    fn test_status_line_forget() {
        let mut status = StatusLine { last_lines: 3 };
        status.forget();
        assert_eq!(status.last_lines, 0);
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
