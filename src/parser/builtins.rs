//! Built-in callees (§4.5): `display_str`, `display_int`, and `display_flt` are recognized by name
//! at a call site and mapped to the matching C runtime shim from the bundled `stdlib_c` header
//! rather than to a user-declared function signature.

/// One built-in function: the C runtime shim it emits as, and the single argument type it expects.
/// Every built-in in this language is a one-argument `void`-returning display routine.
pub struct Builtin {
	/// The name of the C runtime shim this call emits as (declared in `runtime/stdlib_c.h`).
	pub c_name: &'static str,
	/// The single argument's required language type.
	pub argument_type: &'static str,
}

/// Maps a built-in callee name to its runtime shim and expected argument type.
pub static BUILTIN_FUNCTIONS: phf::Map<&'static str, Builtin> = phf::phf_map! {
	"display_str" => Builtin { c_name: "print_str", argument_type: "str" },
	"display_int" => Builtin { c_name: "print_int", argument_type: "int" },
	"display_flt" => Builtin { c_name: "print_flt", argument_type: "flt" },
};
