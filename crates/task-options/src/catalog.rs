use std::{fmt, slice};

use super::{descriptor::OptionDescriptor, error::Error};

/// Options discovered on a task type, sorted by primary name.
///
/// Catalogs are built fresh by every call to the [`reader`](crate::reader) functions and are
/// never cached.
#[derive(Debug)]
pub struct OptionCatalog<'a> {
	task_type: Option<&'static str>,
	options: Vec<OptionDescriptor<'a>>,
}

impl<'a> OptionCatalog<'a> {
	pub(crate) fn new(task_type: Option<&'static str>, options: Vec<OptionDescriptor<'a>>) -> Self {
		Self { task_type, options }
	}

	#[must_use]
	pub const fn empty() -> Self {
		Self {
			task_type: None,
			options: Vec::new(),
		}
	}

	/// Name of the task type this catalog was built from, `None` for an absent type.
	#[must_use]
	pub const fn task_type(&self) -> Option<&'static str> {
		self.task_type
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.options.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.options.is_empty()
	}

	pub fn iter(&self) -> slice::Iter<'_, OptionDescriptor<'a>> {
		self.options.iter()
	}

	/// Primary names in catalog order.
	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.options.iter().map(OptionDescriptor::primary_name)
	}

	/// Finds an option by its primary name or any of its aliases.
	///
	/// When several options share a name, the first one in catalog order wins.
	#[must_use]
	pub fn find(&self, name: &str) -> Option<&OptionDescriptor<'a>> {
		self.options
			.iter()
			.find(|option| option.primary_name() == name)
			.or_else(|| {
				self.options
					.iter()
					.find(|option| option.names().iter().any(|alias| *alias == name))
			})
	}

	pub fn get(&self, name: &str) -> Result<&OptionDescriptor<'a>, Error> {
		self.find(name).ok_or_else(|| Error::UnknownOption {
			task_type: self.task_type.unwrap_or_default().to_string(),
			option: name.to_string(),
		})
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<OptionDescriptor<'a>> {
		self.options
	}
}

impl Default for OptionCatalog<'_> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<'a> IntoIterator for OptionCatalog<'a> {
	type Item = OptionDescriptor<'a>;
	type IntoIter = std::vec::IntoIter<OptionDescriptor<'a>>;

	fn into_iter(self) -> Self::IntoIter {
		self.options.into_iter()
	}
}

impl<'c, 'a> IntoIterator for &'c OptionCatalog<'a> {
	type Item = &'c OptionDescriptor<'a>;
	type IntoIter = slice::Iter<'c, OptionDescriptor<'a>>;

	fn into_iter(self) -> Self::IntoIter {
		self.options.iter()
	}
}

fn flag(name: &str) -> String {
	if name.chars().count() == 1 {
		format!("-{name}")
	} else {
		format!("--{name}")
	}
}

/// Renders a help block, one entry per option:
///
/// ```text
/// --env           Environment to deploy to
/// --force, -f     Skips the confirmation prompt
///                 Available values are: true, false
/// ```
impl fmt::Display for OptionCatalog<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let labels = self
			.options
			.iter()
			.map(|option| {
				option
					.names()
					.iter()
					.map(|name| flag(name))
					.collect::<Vec<_>>()
					.join(", ")
			})
			.collect::<Vec<_>>();

		let width = labels
			.iter()
			.map(|label| label.chars().count())
			.max()
			.unwrap_or_default()
			+ 4;

		for (label, option) in labels.iter().zip(&self.options) {
			let line = format!("{label:<width$}{}", option.description());
			writeln!(f, "{}", line.trim_end())?;

			let values = option.available_values();
			if !values.is_empty() {
				writeln!(
					f,
					"{:width$}Available values are: {}",
					"",
					values.join(", ")
				)?;
			}
		}

		Ok(())
	}
}
