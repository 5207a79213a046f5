//! Terminal styling for step/progress messages, trimmed to a single theme since this language has
//! no user-facing theme configuration surface (the teacher's multi-theme picker doesn't apply).

use colored::{ColoredString, Colorize as _};

/// Styles a progress-stage label (e.g. `Reading`, `Tokenizing`).
#[must_use]
pub fn stage(text: &str) -> ColoredString {
	text.bold().cyan()
}

/// Styles a success banner.
#[must_use]
pub fn success(text: &str) -> ColoredString {
	text.bold().green()
}

/// Styles a failure banner.
#[must_use]
pub fn failure(text: &str) -> ColoredString {
	text.bold().red()
}
