use colored::Colorize;

// Diagnostics go to stderr; stdout is reserved for the emitted exports.

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}
