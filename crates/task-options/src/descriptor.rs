use std::{cmp::Ordering, fmt};

use once_cell::unsync::OnceCell;
use serde::Serialize;
use tracing::trace;

use super::{
	error::Error,
	marker::{Operation, OptionMarker, ParamType},
};

const BOOLEAN_VALUES: [&str; 2] = ["true", "false"];

/// Legal values of an option, resolved from the parameters of its operation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ValueDomain {
	value_type: Option<ParamType>,
	values: Vec<String>,
}

impl ValueDomain {
	fn infer(operation: &Operation) -> Self {
		#[cfg(test)]
		tests::INFERENCE_RUNS.with(|runs| runs.set(runs.get() + 1));

		let domain = match operation.parameter_types() {
			[param] => Self {
				value_type: Some(*param),
				values: if param.is_boolean() {
					BOOLEAN_VALUES.into_iter().map(str::to_string).collect()
				} else {
					// Only truth values are enumerable for now
					Vec::new()
				},
			},
			// Setters taking no value or several values have no single value domain
			_ => Self {
				value_type: None,
				values: Vec::new(),
			},
		};

		trace!(
			operation = %operation,
			value_type = ?domain.value_type,
			values = domain.values.len(),
			"Resolved option value domain"
		);

		domain
	}
}

/// A single discovered option: an operation together with the marker exposing it.
///
/// The value domain is resolved on first access to [`OptionDescriptor::available_values`] or
/// [`OptionDescriptor::available_values_type`] and stays the same for the lifetime of the
/// descriptor. The memoization isn't synchronized, so descriptors can't be shared between
/// threads.
pub struct OptionDescriptor<'a> {
	marker: &'a OptionMarker,
	operation: &'a Operation,
	domain: OnceCell<ValueDomain>,
}

impl<'a> OptionDescriptor<'a> {
	#[must_use]
	pub const fn new(marker: &'a OptionMarker, operation: &'a Operation) -> Self {
		Self {
			marker,
			operation,
			domain: OnceCell::new(),
		}
	}

	#[must_use]
	pub const fn option(&self) -> &'a OptionMarker {
		self.marker
	}

	#[must_use]
	pub const fn annotated_operation(&self) -> &'a Operation {
		self.operation
	}

	#[must_use]
	pub fn primary_name(&self) -> &'static str {
		self.marker.primary_name()
	}

	#[must_use]
	pub fn names(&self) -> &'a [&'static str] {
		self.marker.names()
	}

	#[must_use]
	pub const fn description(&self) -> &'static str {
		self.marker.description()
	}

	/// Textual values this option accepts, empty when they can't be enumerated.
	#[must_use]
	pub fn available_values(&self) -> &[String] {
		&self.domain().values
	}

	/// The type of the single value this option takes, `None` when the operation doesn't take
	/// exactly one parameter.
	#[must_use]
	pub fn available_values_type(&self) -> Option<ParamType> {
		self.domain().value_type
	}

	/// Rejects options whose operation doesn't take exactly one parameter.
	///
	/// Catalogs never fail on such options, they just carry an empty value domain. This is for
	/// callers that want to be stricter than that.
	pub fn ensure_supported(&self) -> Result<(), Error> {
		let arity = self.operation.parameter_types().len();
		if arity == 1 {
			Ok(())
		} else {
			Err(Error::UnsupportedParameterShape {
				option: self.primary_name(),
				operation: self.operation.to_string(),
				arity,
			})
		}
	}

	#[must_use]
	pub fn summary(&self) -> OptionSummary {
		OptionSummary {
			name: self.primary_name(),
			aliases: self.marker.aliases().to_vec(),
			description: self.description(),
			declared_by: self.operation.declared_by(),
			operation: self.operation.name(),
			value_type: self.available_values_type().map(|ty| ty.name()),
			values: self.available_values().to_vec(),
		}
	}

	/// Catalog order: primary names compared byte-wise, nothing else is consulted.
	///
	/// Descriptors sharing a primary name compare equal even when they are backed by different
	/// operations.
	#[must_use]
	pub fn cmp_by_name(&self, other: &Self) -> Ordering {
		self.primary_name().cmp(other.primary_name())
	}

	fn domain(&self) -> &ValueDomain {
		self.domain.get_or_init(|| ValueDomain::infer(self.operation))
	}
}

impl fmt::Debug for OptionDescriptor<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OptionDescriptor")
			.field("names", &self.marker.names())
			.field("operation", &self.operation.to_string())
			.field("resolved", &self.domain.get().is_some())
			.finish()
	}
}

/// Owned, serializable snapshot of an [`OptionDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSummary {
	pub name: &'static str,
	pub aliases: Vec<&'static str>,
	pub description: &'static str,
	pub declared_by: &'static str,
	pub operation: &'static str,
	pub value_type: Option<&'static str>,
	pub values: Vec<String>,
}
