//! Process-wide registry of task types, using `inventory`.
//!
//! Every `impl` block annotated with [`task_options`](crate::task_options) submits a
//! [`TaskRegistration`] at compile time, so task types can be looked up by name without any
//! registration boilerplate. Hand-built task types can register themselves the same way:
//!
//! ```ignore
//! inventory::submit! {
//!     sd_task_options::TaskRegistration::new(<MyTask as sd_task_options::DeclaredTaskType>::task_type)
//! }
//! ```

use std::collections::{btree_map::Entry, BTreeMap};

use once_cell::sync::Lazy;
use tracing::warn;

use super::{
	error::Error,
	task::{TaskType, TaskTypeFn},
};

/// Registry entry for a task type.
///
/// Holds a resolver instead of the task type itself, so entries can be built in const context
/// while the metadata is only materialized when the registry is first used.
pub struct TaskRegistration {
	task_type: TaskTypeFn,
}

impl TaskRegistration {
	#[must_use]
	pub const fn new(task_type: TaskTypeFn) -> Self {
		Self { task_type }
	}
}

inventory::collect!(TaskRegistration);

/// All registered task types keyed by name, built on first access.
///
/// When two registrations share a name the first one collected is kept.
static TASK_TYPES: Lazy<BTreeMap<&'static str, &'static TaskType>> = Lazy::new(|| {
	let mut map = BTreeMap::new();
	for entry in inventory::iter::<TaskRegistration>() {
		let task_type = (entry.task_type)();
		match map.entry(task_type.name()) {
			Entry::Vacant(slot) => {
				slot.insert(task_type);
			}
			Entry::Occupied(_) => {
				warn!(
					name = task_type.name(),
					"Task type registered more than once, ignoring the duplicate"
				);
			}
		}
	}
	map
});

/// Registered task types, sorted by name.
pub fn registered_task_types() -> impl Iterator<Item = &'static TaskType> {
	TASK_TYPES.values().copied()
}

pub fn find_task_type(name: &str) -> Result<&'static TaskType, Error> {
	TASK_TYPES
		.get(name)
		.copied()
		.ok_or_else(|| Error::UnknownTaskType(name.to_string()))
}
