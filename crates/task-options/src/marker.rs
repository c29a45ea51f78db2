use std::{
	any::{type_name, TypeId},
	fmt,
	hash::{Hash, Hasher},
};

/// Declarative metadata that exposes an [`Operation`] as a command-line option.
///
/// A marker always carries at least one name: the first one is the primary name, used for
/// ordering and lookup, the remaining ones are aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMarker {
	names: Vec<&'static str>,
	description: &'static str,
}

impl OptionMarker {
	#[must_use]
	pub fn new(primary: &'static str, description: &'static str) -> Self {
		Self {
			names: vec![primary],
			description,
		}
	}

	#[must_use]
	pub fn alias(mut self, alias: &'static str) -> Self {
		self.names.push(alias);
		self
	}

	/// The canonical name of the option.
	#[must_use]
	pub fn primary_name(&self) -> &'static str {
		// `names` is never empty, `new` always seeds it with the primary name
		self.names[0]
	}

	/// All names of the option, primary name first.
	#[must_use]
	pub fn names(&self) -> &[&'static str] {
		&self.names
	}

	#[must_use]
	pub fn aliases(&self) -> &[&'static str] {
		&self.names[1..]
	}

	#[must_use]
	pub const fn description(&self) -> &'static str {
		self.description
	}
}

/// Handle to the type of a single operation parameter.
///
/// Two handles are equal when they point to the same concrete type, the stored name is only
/// used for display purposes.
#[derive(Clone, Copy)]
pub struct ParamType {
	id: TypeId,
	name: &'static str,
}

impl ParamType {
	#[must_use]
	pub fn of<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: type_name::<T>(),
		}
	}

	#[must_use]
	pub const fn name(&self) -> &'static str {
		self.name
	}

	#[must_use]
	pub fn is<T: ?Sized + 'static>(&self) -> bool {
		self.id == TypeId::of::<T>()
	}

	/// Plain `bool` and its nullable counterpart `Option<bool>` are both truth values.
	#[must_use]
	pub fn is_boolean(&self) -> bool {
		self.is::<bool>() || self.is::<Option<bool>>()
	}
}

impl PartialEq for ParamType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for ParamType {}

impl Hash for ParamType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for ParamType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ParamType<{}>", self.name)
	}
}

impl fmt::Display for ParamType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// A callable declared directly on a task type level.
///
/// Operations are identified by their declaring type, their name and their parameter types.
/// Only operations carrying an [`OptionMarker`] show up in an option catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
	declared_by: &'static str,
	name: &'static str,
	params: Vec<ParamType>,
	marker: Option<OptionMarker>,
}

impl Operation {
	#[must_use]
	pub const fn new(declared_by: &'static str, name: &'static str) -> Self {
		Self {
			declared_by,
			name,
			params: Vec::new(),
			marker: None,
		}
	}

	#[must_use]
	pub fn param<T: ?Sized + 'static>(self) -> Self {
		self.param_type(ParamType::of::<T>())
	}

	#[must_use]
	pub fn param_type(mut self, param: ParamType) -> Self {
		self.params.push(param);
		self
	}

	#[must_use]
	pub fn marked(mut self, marker: OptionMarker) -> Self {
		self.marker = Some(marker);
		self
	}

	#[must_use]
	pub const fn declared_by(&self) -> &'static str {
		self.declared_by
	}

	#[must_use]
	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Parameter types in declaration order, receivers are never included.
	#[must_use]
	pub fn parameter_types(&self) -> &[ParamType] {
		&self.params
	}

	#[must_use]
	pub const fn marker(&self) -> Option<&OptionMarker> {
		self.marker.as_ref()
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}::{}(", self.declared_by, self.name)?;
		for (idx, param) in self.params.iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{param}")?;
		}
		f.write_str(")")
	}
}
