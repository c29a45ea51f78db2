//!
//! # Task Options
//!
//! Discovers which operations of a task type are exposed as command-line options and builds an
//! ordered catalog of them.
//!
//! Task types describe themselves one level at a time: each level lists the operations it
//! declares and names the base level it is composed on. The [`task_options`] attribute macro
//! generates that description from an `impl` block, picking up every method marked with
//! `#[option(...)]`. The [`reader`] functions then walk the hierarchy, most derived level first,
//! and return an [`OptionCatalog`] sorted by primary option name.
//!
//! Aside from discovery, descriptors lazily work out which textual values an option accepts:
//! - setters taking a single `bool` (or `Option<bool>`) accept `true` and `false`;
//! - setters taking a single value of any other type accept a value of that type, without an
//!   enumerable set of values;
//! - setters taking no value or several values have no value domain at all.
//!
//! This crate never parses command lines nor invokes the operations it describes.
//!
//! ## Basic example
//!
//! ```
//! use sd_task_options::{reader, task_options, ParamType};
//!
//! #[derive(Default)]
//! pub struct Deploy {
//!     force: bool,
//!     env: String,
//! }
//!
//! #[task_options]
//! impl Deploy {
//!     #[option(name = "force", alias = "f", description = "Skips the confirmation prompt")]
//!     pub fn set_force(&mut self, force: bool) {
//!         self.force = force;
//!     }
//!
//!     #[option(name = "env", description = "Environment to deploy to")]
//!     pub fn set_env(&mut self, env: String) {
//!         self.env = env;
//!     }
//! }
//!
//! let catalog = reader::options_for_task(&Deploy::default());
//!
//! assert_eq!(catalog.names().collect::<Vec<_>>(), ["env", "force"]);
//! assert_eq!(catalog.get("f").unwrap().available_values(), ["true", "false"]);
//! assert_eq!(
//!     catalog.get("env").unwrap().available_values_type(),
//!     Some(ParamType::of::<String>())
//! );
//! ```

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

// Lets the attribute macro's `::sd_task_options` paths resolve inside this crate as well
extern crate self as sd_task_options;

mod catalog;
mod descriptor;
mod error;
mod marker;
pub mod reader;
pub mod registry;
mod task;

pub use catalog::OptionCatalog;
pub use descriptor::{OptionDescriptor, OptionSummary};
pub use error::Error;
pub use marker::{Operation, OptionMarker, ParamType};
pub use registry::TaskRegistration;
pub use task::{DeclaredTaskType, Task, TaskType, TaskTypeBuilder, TaskTypeFn};

pub use sd_task_options_derive::task_options;

#[doc(hidden)]
pub mod __private {
	pub use inventory;
	pub use once_cell::sync::Lazy;
}
