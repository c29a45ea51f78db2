use std::{fmt, iter};

use super::marker::{Operation, OptionMarker};

/// Resolves the metadata of a task type level.
///
/// Levels link to their base through this function pointer, so the base is only resolved when
/// the hierarchy is actually walked.
pub type TaskTypeFn = fn() -> &'static TaskType;

/// Metadata for one level of a task type hierarchy.
///
/// A level only knows about the operations it declares itself, operations of base levels are
/// reached through [`TaskType::parent`]. Most levels are generated by the
/// [`task_options`](crate::task_options) attribute macro, but they can also be assembled by hand
/// with [`TaskType::builder`].
pub struct TaskType {
	name: &'static str,
	operations: Vec<Operation>,
	parent: Option<TaskTypeFn>,
}

impl TaskType {
	#[must_use]
	pub const fn builder(name: &'static str) -> TaskTypeBuilder {
		TaskTypeBuilder {
			name,
			operations: Vec::new(),
			parent: None,
		}
	}

	#[must_use]
	pub const fn name(&self) -> &'static str {
		self.name
	}

	/// Operations declared directly on this level, in declaration order.
	#[must_use]
	pub fn declared_operations(&self) -> &[Operation] {
		&self.operations
	}

	/// The base level this level is composed on, if any.
	#[must_use]
	pub fn parent(&self) -> Option<&'static Self> {
		self.parent.map(|parent| parent())
	}

	/// Iterates this level followed by each base level, most derived first.
	pub fn ancestry(&self) -> impl Iterator<Item = &Self> {
		iter::successors(Some(self), |level| level.parent())
	}
}

impl fmt::Debug for TaskType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TaskType")
			.field("name", &self.name)
			.field("operations", &self.operations)
			.field("parent", &self.parent().map(Self::name))
			.finish()
	}
}

/// Manual registration API for task type levels that aren't generated by the attribute macro.
#[derive(Debug)]
#[must_use]
pub struct TaskTypeBuilder {
	name: &'static str,
	operations: Vec<Operation>,
	parent: Option<TaskTypeFn>,
}

impl TaskTypeBuilder {
	pub fn parent<T: DeclaredTaskType>(self) -> Self {
		self.parent_fn(T::task_type)
	}

	pub fn parent_fn(mut self, parent: TaskTypeFn) -> Self {
		self.parent = Some(parent);
		self
	}

	/// Declares an operation on this level, its declaring type is set to this level's name.
	pub fn operation(mut self, name: &'static str, f: impl FnOnce(Operation) -> Operation) -> Self {
		self.operations.push(f(Operation::new(self.name, name)));
		self
	}

	/// Shorthand for an operation marked as an option.
	pub fn option(
		self,
		name: &'static str,
		marker: OptionMarker,
		f: impl FnOnce(Operation) -> Operation,
	) -> Self {
		self.operation(name, |operation| f(operation.marked(marker)))
	}

	pub fn build(self) -> TaskType {
		TaskType {
			name: self.name,
			operations: self.operations,
			parent: self.parent,
		}
	}
}

/// Implemented by types that declare a task type level, usually through the
/// [`task_options`](crate::task_options) attribute macro.
pub trait DeclaredTaskType {
	fn task_type() -> &'static TaskType;
}

/// A task instance whose runtime type can be resolved to its most derived [`TaskType`].
pub trait Task: 'static {
	fn runtime_type(&self) -> &'static TaskType;
}

/// Blanket implementation for all types that declare their own task type level
impl<T: DeclaredTaskType + 'static> Task for T {
	fn runtime_type(&self) -> &'static TaskType {
		T::task_type()
	}
}

impl fmt::Debug for dyn Task {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<Task {}>", self.runtime_type().name())
	}
}
