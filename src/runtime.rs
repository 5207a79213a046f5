//! The bundled C runtime ("stdlib_c"): the `print_str`/`print_int`/`print_flt` shims and the
//! `pow_int`/list constructors that emitted code calls into (§4.5, §6). Embedded into the compiler
//! binary itself so that building or running emitted output never depends on a separate vendoring
//! step, the same way the teacher embeds its own prelude source.

/// The full text of `runtime/stdlib_c.h`, embedded at compile time.
pub const SOURCE: &str = include_str!("../runtime/stdlib_c.h");

/// The file name the runtime is written under, alongside emitted C output (`#include "stdlib_c.h"`
/// in the fixed header resolves against this).
pub const FILE_NAME: &str = "stdlib_c.h";

/// Writes the bundled runtime header into `directory`, so that a `.c` file emitted alongside it can
/// `#include "stdlib_c.h"` without any separate install step.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_beside(directory: &std::path::Path) -> std::io::Result<()> {
	std::fs::write(directory.join(FILE_NAME), SOURCE)
}

#[cfg(test)]
mod tests {
	use super::SOURCE;

	#[test]
	fn bundles_every_shim_the_checker_relies_on() {
		assert!(SOURCE.contains("print_str"));
		assert!(SOURCE.contains("print_int"));
		assert!(SOURCE.contains("print_flt"));
		assert!(SOURCE.contains("pow_int"));
		assert!(SOURCE.contains("list_new_int"));
		assert!(SOURCE.contains("list_new_flt"));
		assert!(SOURCE.contains("list_new_str"));
	}
}
