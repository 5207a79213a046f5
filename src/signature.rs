//! The signature codec (C5): pure transformations between the canonical encoded-signature strings
//! stored as the only values in the symbol and UDT tables (§3) and the structured [`Signature`]
//! shapes that the parser/checker/emitter (C6) actually reasons about.
//!
//! Encoding is intentionally flat: a list's element type and a dictionary's key/value types are
//! themselves primitive-or-UDT type names, never nested list/dictionary signatures, since the
//! grammar never produces a list of lists or a dictionary of dictionaries. The `_`-joined input
//! group of a function signature is therefore unambiguous only so long as no type identifier
//! (primitive or UDT name) itself contains an underscore - see DESIGN.md.

/// A decoded signature: the structured form of one of the five encodings in §3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
	/// `V<type>` - a variable of primitive or UDT type `<type>`.
	Variable(String),
	/// `L<elem>` - a list with element type `<elem>`.
	List(String),
	/// `D<key>_<val>` - a dictionary.
	Dict(String, String),
	/// `F<name>(_<in1>_<in2>…)(_<out>)` - a function.
	Function {
		/// The function's own name, carried inside its signature.
		name: String,
		/// The declared input types, in order. Empty for a zero-arity function (the `void`
		/// input marker normalizes to this, per §9's open question).
		inputs: Vec<String>,
		/// The declared output type, `"void"` for no return value.
		output: String,
	},
	/// `U<name>` - a UDT nominal.
	Udt(String),
}

impl Signature {
	/// Encodes this signature into its canonical string form.
	#[must_use]
	pub fn encode(&self) -> String {
		match self {
			Self::Variable(type_name) => encode_variable(type_name),
			Self::List(elem_type) => encode_list(elem_type),
			Self::Dict(key_type, value_type) => encode_dict(key_type, value_type),
			Self::Function { name, inputs, output } => encode_function(name, inputs, output),
			Self::Udt(name) => encode_udt(name),
		}
	}
}

impl std::fmt::Display for Signature {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.encode())
	}
}

/// Encodes a `V<type>` variable signature.
#[must_use]
pub fn encode_variable(type_name: &str) -> String {
	format!("V{type_name}")
}

/// Encodes an `L<elem>` list signature.
#[must_use]
pub fn encode_list(elem_type: &str) -> String {
	format!("L{elem_type}")
}

/// Encodes a `D<key>_<val>` dictionary signature.
#[must_use]
pub fn encode_dict(key_type: &str, value_type: &str) -> String {
	format!("D{key_type}_{value_type}")
}

/// Encodes an `F<name>(_<in1>_<in2>…)(_<out>)` function signature. An empty `inputs` slice encodes
/// to an empty input group, covering both the `void`-marker and empty-parentheses spellings of a
/// zero-arity function (§9).
#[must_use]
pub fn encode_function(name: &str, inputs: &[String], output: &str) -> String {
	format!("F{name}({})({output})", inputs.join("_"))
}

/// Encodes a `U<name>` UDT nominal signature.
#[must_use]
pub fn encode_udt(name: &str) -> String {
	format!("U{name}")
}

/// Decodes a canonical signature string back into a [`Signature`]. Returns `None` if `encoded`
/// does not begin with a recognized sort tag or is malformed for its tag.
#[must_use]
pub fn decode(encoded: &str) -> Option<Signature> {
	let mut chars = encoded.chars();
	let tag = chars.next()?;
	let rest = chars.as_str();

	match tag {
		'V' => Some(Signature::Variable(rest.to_owned())),
		'L' => Some(Signature::List(rest.to_owned())),
		'D' => {
			let (key_type, value_type) = rest.split_once('_')?;
			Some(Signature::Dict(key_type.to_owned(), value_type.to_owned()))
		}
		'U' => Some(Signature::Udt(rest.to_owned())),
		'F' => decode_function(rest),
		_ => None,
	}
}

/// Decodes the body of an `F…` signature (everything after the leading `F`).
fn decode_function(rest: &str) -> Option<Signature> {
	let input_open = rest.find('(')?;
	let name = rest[..input_open].to_owned();

	let input_close = rest[input_open..].find(')')? + input_open;
	let inputs_str = &rest[input_open + 1..input_close];
	let inputs = split_type_group(inputs_str);

	let after_inputs = &rest[input_close + 1..];
	let output_open = after_inputs.find('(')?;
	let output_close = after_inputs[output_open..].find(')')? + output_open;
	let output = after_inputs[output_open + 1..output_close].to_owned();

	Some(Signature::Function { name, inputs, output })
}

/// Splits an underscore-joined, possibly-leading-underscore type group (`_int_int` or `int_int` or
/// empty) into its individual type names.
fn split_type_group(group: &str) -> Vec<String> {
	group.trim_start_matches('_').split('_').filter(|segment| !segment.is_empty()).map(str::to_owned).collect()
}

/// Extracts the declared input type sequence from an encoded function signature. Returns `None` if
/// `encoded` does not decode to a [`Signature::Function`].
#[must_use]
pub fn parse_function_input_types(encoded: &str) -> Option<Vec<String>> {
	match decode(encoded)? {
		Signature::Function { inputs, .. } => Some(inputs),
		_ => None,
	}
}

/// Extracts the declared output type from an encoded function signature. Returns `None` if
/// `encoded` does not decode to a [`Signature::Function`].
#[must_use]
pub fn parse_function_return_type(encoded: &str) -> Option<String> {
	match decode(encoded)? {
		Signature::Function { output, .. } => Some(output),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::{decode, encode_dict, encode_function, encode_list, encode_udt, encode_variable, parse_function_input_types, parse_function_return_type, Signature};

	#[test]
	fn round_trips_every_shape() {
		let shapes = [
			Signature::Variable("int".to_owned()),
			Signature::List("flt".to_owned()),
			Signature::Dict("str".to_owned(), "int".to_owned()),
			Signature::Function {
				name: "add".to_owned(),
				inputs: vec!["int".to_owned(), "int".to_owned()],
				output: "int".to_owned(),
			},
			Signature::Function {
				name: "greet".to_owned(),
				inputs: vec![],
				output: "void".to_owned(),
			},
			Signature::Udt("Point".to_owned()),
		];

		for shape in shapes {
			let encoded = shape.encode();
			assert_eq!(decode(&encoded), Some(shape));
		}
	}

	#[test]
	fn encode_helpers_match_spec_forms() {
		assert_eq!(encode_variable("int"), "Vint");
		assert_eq!(encode_list("flt"), "Lflt");
		assert_eq!(encode_dict("str", "int"), "Dstr_int");
		assert_eq!(encode_function("add", &["int".to_owned(), "int".to_owned()], "int"), "Fadd(int_int)(int)");
		assert_eq!(encode_function("greet", &[], "void"), "Fgreet()(void)");
		assert_eq!(encode_udt("Point"), "UPoint");
	}

	#[test]
	fn parse_helpers_extract_function_parts() {
		let encoded = encode_function("add", &["int".to_owned(), "int".to_owned()], "int");
		assert_eq!(parse_function_input_types(&encoded), Some(vec!["int".to_owned(), "int".to_owned()]));
		assert_eq!(parse_function_return_type(&encoded), Some("int".to_owned()));
	}

	#[test]
	fn non_function_signature_has_no_function_parts() {
		let encoded = encode_variable("int");
		assert_eq!(parse_function_input_types(&encoded), None);
		assert_eq!(parse_function_return_type(&encoded), None);
	}

	#[test]
	fn unrecognized_tag_fails_to_decode() {
		assert_eq!(decode("Xint"), None);
		assert_eq!(decode(""), None);
	}
}
