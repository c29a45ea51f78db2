use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("task type not registered: {0}")]
	UnknownTaskType(String),
	#[error("task type <name='{task_type}'> has no option named '{option}'")]
	UnknownOption { task_type: String, option: String },
	#[error(
		"option '{option}' is backed by <operation='{operation}'> taking {arity} parameters, expected exactly one"
	)]
	UnsupportedParameterShape {
		option: &'static str,
		operation: String,
		arity: usize,
	},
}
