//! Attribute macros for declaring task type options

use proc_macro::TokenStream;

mod task_options;

/// Task options macro - generates the task type metadata of an `impl` block
///
/// Every method of the annotated block becomes an operation of the task type level, methods
/// marked with `#[option(...)]` are exposed as command-line options. The macro also registers
/// the task type in the `sd_task_options::registry` using the `inventory` crate.
///
/// Arguments:
/// - `name = "..."`: name of the task type, defaults to the name of the type
/// - `parent = Type`: base task type level this one is composed on
///
/// Option markers take a `name`, any number of `alias` entries and a `description`.
///
/// Usage:
/// ```rust,ignore
/// use sd_task_options::task_options;
///
/// #[task_options(name = "deploy", parent = BaseTask)]
/// impl Deploy {
///     #[option(name = "force", alias = "f", description = "Skips the confirmation prompt")]
///     pub fn set_force(&mut self, force: bool) {
///         self.force = force;
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn task_options(args: TokenStream, input: TokenStream) -> TokenStream {
	task_options::task_options_impl(args, input)
}
