use std::path::PathBuf;

use sd_task_options::task_options;

#[derive(Debug, Default)]
pub struct BaseTask {
	verbose: bool,
	description: Option<String>,
}

#[task_options]
impl BaseTask {
	#[option(name = "verbose", description = "Logs every step of the task")]
	pub fn set_verbose(&mut self, verbose: bool) {
		self.verbose = verbose;
	}

	pub fn set_description(&mut self, description: &str) {
		self.description = Some(description.to_string());
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
	Rolling,
	BlueGreen,
}

#[derive(Debug, Default)]
pub struct Deploy {
	base: BaseTask,
	force: bool,
	env: String,
	strategy: Option<Strategy>,
	dry_run: Option<bool>,
	replicas: Option<(String, u16)>,
}

#[task_options(parent = BaseTask)]
impl Deploy {
	#[option(name = "force", alias = "f", description = "Skips the confirmation prompt")]
	pub fn set_force(&mut self, force: bool) {
		self.force = force;
	}

	#[option(name = "env", description = "Environment to deploy to")]
	pub fn set_env(&mut self, env: String) {
		self.env = env;
	}

	#[option(name = "strategy", description = "How instances are replaced")]
	pub fn set_strategy(&mut self, strategy: Strategy) {
		self.strategy = Some(strategy);
	}

	#[option(name = "dry-run", description = "Only prints what would be deployed")]
	pub fn set_dry_run(&mut self, dry_run: Option<bool>) {
		self.dry_run = dry_run;
	}

	#[option(name = "replicas", description = "Replica count for a region")]
	pub fn set_replicas(&mut self, region: String, count: u16) {
		self.replicas = Some((region, count));
	}

	#[option(name = "rollback", description = "Rolls back the last deploy")]
	pub fn rollback(&mut self) {
		self.env.clear();
	}

	pub fn base(&self) -> &BaseTask {
		&self.base
	}
}

#[derive(Debug, Default)]
pub struct CanaryDeploy {
	deploy: Deploy,
	force: bool,
}

#[task_options(name = "canary-deploy", parent = Deploy)]
impl CanaryDeploy {
	#[option(name = "force", description = "Promotes the canary without waiting")]
	pub fn set_force(&mut self, force: bool) {
		self.force = force;
	}
}

#[derive(Debug, Default)]
pub struct Clean {
	target: PathBuf,
}

#[task_options(name = "clean")]
impl Clean {
	pub fn new(target: PathBuf) -> Self {
		Self { target }
	}

	pub fn set_target(&mut self, target: PathBuf) {
		self.target = target;
	}

	pub fn apply<F: FnOnce(&mut Self)>(&mut self, f: F) {
		f(self);
	}
}

#[derive(Debug, Default)]
pub struct Archive {
	name: String,
	destination: Option<PathBuf>,
}

#[task_options(name = "archive")]
impl Archive {
	#[option(name = "name", alias = "n", description = "Archive file name")]
	pub fn set_name(&mut self, name: &str) {
		self.name = name.to_string();
	}

	#[option(name = "Merge", description = "Merges the settings of another archive task")]
	pub fn merge_from(&mut self, other: Self) {
		self.destination = other.destination.or(self.destination.take());
	}
}

#[derive(Default)]
pub struct Watch {
	on_change: Option<fn(&str) -> usize>,
	transform: Option<for<'a> fn(&'a str) -> &'a str>,
	prefix: String,
	lines: Vec<String>,
}

#[task_options(name = "watch")]
impl Watch {
	#[option(name = "on-change", description = "Called with every changed path")]
	pub fn set_on_change(&mut self, on_change: fn(&str) -> usize) {
		self.on_change = Some(on_change);
	}

	#[option(name = "transform", description = "Rewrites every path before it is reported")]
	pub fn set_transform(&mut self, transform: for<'a> fn(&'a str) -> &'a str) {
		self.transform = Some(transform);
	}

	#[option(name = "prefix", description = "Prefix of the reported paths")]
	pub fn set_prefix<'p>(&mut self, prefix: &'p str) {
		self.prefix = prefix.to_string();
	}

	pub fn on_line(&mut self, line: for<'a> fn(&'a str)) {
		for path in &self.lines {
			line(path.as_str());
		}
	}

	pub fn filter_lines(&mut self, keep: &dyn Fn(&str) -> bool) {
		self.lines.retain(|line| keep(line.as_str()));
	}
}
