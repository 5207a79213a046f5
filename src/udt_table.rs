//! The UDT table (C3): maps each user-defined type name to its attribute and method scopes (§4.3).

use crate::scopes::Scope;

/// A UDT descriptor: a nominal name plus the two scopes that together describe it (§3).
#[derive(Debug, Clone, Default)]
pub struct UdtDescriptor {
	/// The UDT's attributes, in declaration order. Order matters: a `new` expression's by-name
	/// initializers are reordered to this declaration order before emission (§4.5, §9).
	pub attributes: Scope,
	/// The UDT's methods.
	pub methods: Scope,
}

/// The table of every UDT declared in the compilation unit (C3).
#[derive(Debug, Clone, Default)]
pub struct UdtTable {
	udts: std::collections::HashMap<String, UdtDescriptor>,
}

impl UdtTable {
	/// Creates an empty UDT table.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a new UDT. Returns `true` iff `name` was not already present; insertion must be
	/// unique across the program (§3).
	pub fn insert(&mut self, name: impl Into<String>, attributes: Scope, methods: Scope) -> bool {
		let name = name.into();
		if self.udts.contains_key(&name) {
			return false;
		}
		self.udts.insert(name, UdtDescriptor { attributes, methods });
		true
	}

	/// Looks up a UDT's descriptor by name.
	#[must_use]
	pub fn lookup(&self, name: &str) -> Option<&UdtDescriptor> {
		self.udts.get(name)
	}

	/// Looks up a UDT's descriptor by name, for mutation - used to register a method's signature
	/// into an already-inserted UDT's method scope while its `ufn` block is being parsed.
	pub fn lookup_mut(&mut self, name: &str) -> Option<&mut UdtDescriptor> {
		self.udts.get_mut(name)
	}

	/// Returns `true` iff `name` names a registered UDT.
	#[must_use]
	pub fn has(&self, name: &str) -> bool {
		self.udts.contains_key(name)
	}
}

#[cfg(test)]
mod tests {
	use super::UdtTable;
	use crate::scopes::Scope;

	#[test]
	fn insert_is_unique_across_the_program() {
		let mut udts = UdtTable::new();
		assert!(udts.insert("Point", Scope::new(), Scope::new()));
		assert!(!udts.insert("Point", Scope::new(), Scope::new()));
	}

	#[test]
	fn lookup_finds_attribute_declaration_order() {
		let mut attributes = Scope::new();
		attributes.insert("x", "Vint");
		attributes.insert("y", "Vint");

		let mut udts = UdtTable::new();
		udts.insert("Point", attributes, Scope::new());

		let descriptor = udts.lookup("Point").unwrap();
		assert_eq!(descriptor.attributes.names_in_order(), ["x", "y"]);
	}

	#[test]
	fn has_reflects_registration() {
		let mut udts = UdtTable::new();
		assert!(!udts.has("Point"));
		udts.insert("Point", Scope::new(), Scope::new());
		assert!(udts.has("Point"));
	}
}
