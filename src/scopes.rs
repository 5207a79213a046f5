//! The symbol table (C2): a stack of lexical scope frames mapping names to encoded signatures
//! (§3, §4.2).

/// One ordered, insert-unique mapping from name to encoded signature, preserving declaration
/// order. Used both as a single frame of [`ScopeStack`] and, directly, as a UDT's attribute and
/// method scopes in [`crate::udt_table`] - a UDT's attribute order matters for `new` (§4.5).
#[derive(Debug, Clone, Default)]
pub struct Scope {
	order: Vec<String>,
	bindings: std::collections::HashMap<String, String>,
}

impl Scope {
	/// Creates a new, empty scope.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts `name -> encoded` into this scope. Returns `true` iff `name` was not already bound
	/// here; a `false` return leaves the existing binding untouched.
	pub fn insert(&mut self, name: impl Into<String>, encoded: impl Into<String>) -> bool {
		let name = name.into();
		if self.bindings.contains_key(&name) {
			return false;
		}
		self.bindings.insert(name.clone(), encoded.into());
		self.order.push(name);
		true
	}

	/// Looks up `name` in this scope only (no walking to enclosing scopes).
	#[must_use]
	pub fn lookup(&self, name: &str) -> Option<&str> {
		self.bindings.get(name).map(String::as_str)
	}

	/// Returns `true` iff `name` is bound in this scope.
	#[must_use]
	pub fn contains(&self, name: &str) -> bool {
		self.bindings.contains_key(name)
	}

	/// Returns the names bound in this scope, in declaration order.
	#[must_use]
	pub fn names_in_order(&self) -> &[String] {
		&self.order
	}

	/// Returns the number of bindings in this scope.
	#[must_use]
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Returns `true` iff this scope has no bindings.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}
}

/// The lexical scope stack (C2): an ordered stack of [`Scope`] frames. The bottommost frame is the
/// global scope and is never popped.
#[derive(Debug, Clone)]
pub struct ScopeStack {
	frames: Vec<Scope>,
}

impl ScopeStack {
	/// Creates a new scope stack containing only the global frame.
	#[must_use]
	pub fn new() -> Self {
		Self { frames: vec![Scope::new()] }
	}

	/// Pushes a fresh frame, entered when parsing a function body, a `start` block, or an `if`/`else`
	/// branch body (§3 Lifecycles).
	pub fn enter_scope(&mut self) {
		self.frames.push(Scope::new());
	}

	/// Pops the topmost frame. Exiting the global frame is forbidden (§4.2).
	///
	/// # Errors
	/// Returns an error if the scope stack is currently at the global frame.
	pub fn exit_scope(&mut self) -> anyhow::Result<()> {
		if self.is_global_scope() {
			anyhow::bail!("cannot exit the global scope");
		}
		self.frames.pop();
		Ok(())
	}

	/// Inserts `name -> encoded` into the topmost frame. Returns `true` iff the topmost frame had
	/// no existing binding named `name`.
	pub fn insert(&mut self, name: impl Into<String>, encoded: impl Into<String>) -> bool {
		self.frames.last_mut().expect("the scope stack always has at least the global frame").insert(name, encoded)
	}

	/// Looks up `name`, walking from the topmost frame to the global frame. Returns the first
	/// binding found, so an inner declaration shadows an outer one of the same name.
	#[must_use]
	pub fn lookup(&self, name: &str) -> Option<&str> {
		self.frames.iter().rev().find_map(|frame| frame.lookup(name))
	}

	/// Predicate used to gate function, UDT, and import declarations, which must be top-level.
	#[must_use]
	pub fn is_global_scope(&self) -> bool {
		self.frames.len() == 1
	}

	/// The current stack depth, counting the global frame. Used by tests to check that every
	/// `enter_scope` is matched by an `exit_scope`.
	#[must_use]
	pub fn depth(&self) -> usize {
		self.frames.len()
	}
}

impl Default for ScopeStack {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::ScopeStack;

	#[test]
	fn starts_at_global_scope_with_depth_one() {
		let scopes = ScopeStack::new();
		assert!(scopes.is_global_scope());
		assert_eq!(scopes.depth(), 1);
	}

	#[test]
	fn insert_fails_on_duplicate_in_same_frame() {
		let mut scopes = ScopeStack::new();
		assert!(scopes.insert("x", "Vint"));
		assert!(!scopes.insert("x", "Vflt"));
		assert_eq!(scopes.lookup("x"), Some("Vint"));
	}

	#[test]
	fn inner_binding_shadows_outer() {
		let mut scopes = ScopeStack::new();
		scopes.insert("x", "Vint");
		scopes.enter_scope();
		scopes.insert("x", "Vflt");
		assert_eq!(scopes.lookup("x"), Some("Vflt"));
		scopes.exit_scope().unwrap();
		assert_eq!(scopes.lookup("x"), Some("Vint"));
	}

	#[test]
	fn exiting_global_scope_is_an_error() {
		let mut scopes = ScopeStack::new();
		assert!(scopes.exit_scope().is_err());
	}

	#[test]
	fn enter_exit_is_balanced() {
		let mut scopes = ScopeStack::new();
		let start_depth = scopes.depth();
		scopes.enter_scope();
		scopes.enter_scope();
		scopes.exit_scope().unwrap();
		scopes.exit_scope().unwrap();
		assert_eq!(scopes.depth(), start_depth);
	}
}
