//! Discovery of the options declared across a task type hierarchy.

use std::ptr;

use tracing::{debug, trace, warn};

use super::{
	catalog::OptionCatalog,
	descriptor::OptionDescriptor,
	marker::{Operation, OptionMarker},
	task::{DeclaredTaskType, Task, TaskType},
};

/// Collects every marked operation reachable from `task_type`, walking from the most derived
/// level to its last base level.
///
/// Each level only contributes the operations it declares itself, so an operation marked on two
/// levels shows up twice. The result isn't sorted.
#[must_use]
pub fn annotated_operations(task_type: Option<&TaskType>) -> Vec<(&OptionMarker, &Operation)> {
	let Some(task_type) = task_type else {
		return Vec::new();
	};

	let mut visited: Vec<*const TaskType> = Vec::new();
	let mut annotated = Vec::new();

	for level in task_type.ancestry() {
		if visited.iter().any(|seen| ptr::eq(*seen, level)) {
			warn!(
				task_type = task_type.name(),
				level = level.name(),
				"Task type hierarchy loops back on itself, stopping the walk"
			);
			break;
		}
		visited.push(level);

		for operation in level.declared_operations() {
			if let Some(marker) = operation.marker() {
				trace!(
					level = level.name(),
					option = marker.primary_name(),
					operation = operation.name(),
					"Found option"
				);
				annotated.push((marker, operation));
			}
		}
	}

	annotated
}

/// Builds the option catalog of a task type; an absent type has no options.
#[must_use]
pub fn options_for_type(task_type: Option<&TaskType>) -> OptionCatalog<'_> {
	let mut options = annotated_operations(task_type)
		.into_iter()
		.map(|(marker, operation)| OptionDescriptor::new(marker, operation))
		.collect::<Vec<_>>();

	options.sort_by(OptionDescriptor::cmp_by_name);

	let task_type = task_type.map(TaskType::name);

	debug!(?task_type, options = options.len(), "Built option catalog");

	OptionCatalog::new(task_type, options)
}

/// Builds the option catalog of a task instance, using its most derived task type.
#[must_use]
pub fn options_for_task(task: &dyn Task) -> OptionCatalog<'static> {
	options_for_type(Some(task.runtime_type()))
}

#[must_use]
pub fn options_of<T: DeclaredTaskType>() -> OptionCatalog<'static> {
	options_for_type(Some(T::task_type()))
}

#[cfg(test)]
mod tests {
	use once_cell::sync::Lazy;
	use tracing_test::traced_test;

	use crate::marker::ParamType;

	use super::*;

	struct Base;

	impl DeclaredTaskType for Base {
		fn task_type() -> &'static TaskType {
			static TYPE: Lazy<TaskType> = Lazy::new(|| {
				TaskType::builder("Base")
					.option(
						"set_verbose",
						OptionMarker::new("verbose", "Logs every step"),
						Operation::param::<bool>,
					)
					.operation("set_description", Operation::param::<String>)
					.build()
			});
			&TYPE
		}
	}

	struct Deploy;

	impl DeclaredTaskType for Deploy {
		fn task_type() -> &'static TaskType {
			static TYPE: Lazy<TaskType> = Lazy::new(|| {
				TaskType::builder("Deploy")
					.parent::<Base>()
					.option(
						"set_force",
						OptionMarker::new("force", "Skips the confirmation prompt").alias("f"),
						Operation::param::<bool>,
					)
					.option(
						"set_env",
						OptionMarker::new("env", "Environment to deploy to"),
						Operation::param::<String>,
					)
					.build()
			});
			&TYPE
		}
	}

	struct Redeploy;

	impl DeclaredTaskType for Redeploy {
		fn task_type() -> &'static TaskType {
			static TYPE: Lazy<TaskType> = Lazy::new(|| {
				TaskType::builder("Redeploy")
					.parent::<Deploy>()
					.option(
						"set_force",
						OptionMarker::new("force", "Redeploys even when nothing changed"),
						Operation::param::<bool>,
					)
					.build()
			});
			&TYPE
		}
	}

	struct Ouroboros;

	impl DeclaredTaskType for Ouroboros {
		fn task_type() -> &'static TaskType {
			static TYPE: Lazy<TaskType> = Lazy::new(|| {
				TaskType::builder("Ouroboros")
					.parent_fn(|| Lazy::force(&TAIL))
					.option(
						"set_head",
						OptionMarker::new("head", ""),
						Operation::param::<u8>,
					)
					.build()
			});
			static TAIL: Lazy<TaskType> = Lazy::new(|| {
				TaskType::builder("Tail")
					.parent::<Ouroboros>()
					.option(
						"set_tail",
						OptionMarker::new("tail", ""),
						Operation::param::<u8>,
					)
					.build()
			});
			&TYPE
		}
	}

	#[test]
	fn absent_type_has_no_options() {
		assert!(annotated_operations(None).is_empty());

		let catalog = options_for_type(None);
		assert!(catalog.is_empty());
		assert_eq!(catalog.task_type(), None);
	}

	#[test]
	fn type_without_markers_has_no_options() {
		let plain = TaskType::builder("Plain")
			.operation("run", |op| op)
			.operation("set_path", Operation::param::<String>)
			.build();

		assert!(options_for_type(Some(&plain)).is_empty());
	}

	#[test]
	fn walks_derived_level_first() {
		let levels = annotated_operations(Some(Deploy::task_type()))
			.into_iter()
			.map(|(_, operation)| operation.declared_by())
			.collect::<Vec<_>>();

		assert_eq!(levels, ["Deploy", "Deploy", "Base"]);
	}

	#[test]
	fn catalog_is_sorted_by_primary_name() {
		let catalog = options_of::<Deploy>();

		assert_eq!(catalog.task_type(), Some("Deploy"));
		assert_eq!(catalog.names().collect::<Vec<_>>(), ["env", "force", "verbose"]);

		let force = catalog.get("force").expect("force option");
		assert_eq!(force.names(), ["force", "f"]);
		assert_eq!(force.available_values(), ["true", "false"]);

		let env = catalog.get("env").expect("env option");
		assert!(env.available_values().is_empty());
		assert_eq!(env.available_values_type(), Some(ParamType::of::<String>()));

		let verbose = catalog.get("verbose").expect("verbose option");
		assert_eq!(verbose.available_values(), ["true", "false"]);
		assert_eq!(verbose.annotated_operation().declared_by(), "Base");
	}

	#[test]
	fn instance_resolves_most_derived_type() {
		let task: Box<dyn Task> = Box::new(Redeploy);

		let catalog = options_for_task(task.as_ref());
		assert_eq!(catalog.task_type(), Some("Redeploy"));
		assert_eq!(catalog.len(), 4);
	}

	#[test]
	fn overridden_options_appear_once_per_level() {
		let catalog = options_of::<Redeploy>();

		let declared_by = catalog
			.iter()
			.filter(|option| option.primary_name() == "force")
			.map(|option| option.annotated_operation().declared_by())
			.collect::<Vec<_>>();

		assert_eq!(declared_by.len(), 2);
		assert!(declared_by.contains(&"Deploy"));
		assert!(declared_by.contains(&"Redeploy"));
	}

	#[test]
	fn catalogs_are_rebuilt_identically() {
		let first = options_of::<Redeploy>();
		let second = options_of::<Redeploy>();

		let summaries = |catalog: &OptionCatalog<'_>| {
			catalog.iter().map(OptionDescriptor::summary).collect::<Vec<_>>()
		};

		assert_eq!(summaries(&first), summaries(&second));
		assert!(first.iter().zip(&second).all(|(a, b)| !ptr::eq(a, b)));
	}

	#[test]
	#[traced_test]
	fn looping_hierarchy_stops_the_walk() {
		let names = options_of::<Ouroboros>().names().collect::<Vec<_>>();

		assert_eq!(names, ["head", "tail"]);
		assert!(logs_contain("loops back on itself"));
	}
}
