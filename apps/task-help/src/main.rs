use sd_task_options::{reader, registry, OptionDescriptor, OptionSummary, TaskType};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[allow(dead_code)]
mod tasks;

#[derive(Parser, Debug)]
#[command(
	name = "task-help",
	about = "Prints the command-line options of registered task types"
)]
struct Args {
	/// Task type to describe, lists every registered task type when omitted
	#[arg(short, long, env = "TASK_HELP_TASK")]
	task: Option<String>,

	/// Print JSON instead of a help block
	#[arg(long)]
	json: bool,

	/// Log filter used when `RUST_LOG` isn't set
	#[arg(long, default_value = "warn")]
	log: String,
}

#[derive(Debug, Serialize)]
struct TaskTypeSummary {
	name: &'static str,
	parent: Option<&'static str>,
	options: Vec<&'static str>,
}

impl From<&TaskType> for TaskTypeSummary {
	fn from(task_type: &TaskType) -> Self {
		Self {
			name: task_type.name(),
			parent: task_type.parent().map(TaskType::name),
			options: reader::options_for_type(Some(task_type)).names().collect(),
		}
	}
}

fn init_tracing(default_filter: &str) {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
		)
		.with_writer(std::io::stderr)
		.try_init();
}

fn list_task_types(json: bool) -> Result<()> {
	let summaries = registry::registered_task_types()
		.map(TaskTypeSummary::from)
		.collect::<Vec<_>>();

	debug!(task_types = summaries.len(), "Listing registered task types");

	if json {
		println!(
			"{}",
			serde_json::to_string_pretty(&summaries).context("serializing task types")?
		);
		return Ok(());
	}

	for summary in summaries {
		match summary.parent {
			Some(parent) => println!("{} (extends {parent})", summary.name),
			None => println!("{}", summary.name),
		}
	}

	Ok(())
}

fn describe_task_type(name: &str, json: bool) -> Result<()> {
	let task_type = registry::find_task_type(name)?;
	let catalog = reader::options_for_type(Some(task_type));

	if json {
		let options = catalog
			.iter()
			.map(OptionDescriptor::summary)
			.collect::<Vec<OptionSummary>>();
		println!(
			"{}",
			serde_json::to_string_pretty(&options)
				.with_context(|| format!("serializing options of {name}"))?
		);
		return Ok(());
	}

	println!("Task: {}", task_type.name());
	if catalog.is_empty() {
		println!("\nNo options.");
	} else {
		print!("\nOptions\n{catalog}");
	}

	Ok(())
}

fn main() -> Result<()> {
	let args = Args::parse();

	init_tracing(&args.log);

	match args.task.as_deref() {
		Some(name) => describe_task_type(name, args.json),
		None => list_task_types(args.json),
	}
}
