//! Sample build pipeline task types, registered on startup through `#[task_options]`.

use std::path::PathBuf;

use sd_task_options::task_options;

#[derive(Debug, Default)]
pub struct DefaultTask {
	verbose: bool,
	group: Option<String>,
}

#[task_options]
impl DefaultTask {
	#[option(name = "verbose", alias = "v", description = "Logs every step of the task")]
	pub fn set_verbose(&mut self, verbose: bool) {
		self.verbose = verbose;
	}

	pub fn set_group(&mut self, group: &str) {
		self.group = Some(group.to_string());
	}
}

#[derive(Debug, Default)]
pub struct Compile {
	base: DefaultTask,
	release: bool,
	target: Option<String>,
	jobs: Option<u32>,
	features: Vec<String>,
}

#[task_options(name = "compile", parent = DefaultTask)]
impl Compile {
	#[option(name = "release", description = "Builds with optimizations")]
	pub fn set_release(&mut self, release: bool) {
		self.release = release;
	}

	#[option(name = "target", description = "Target triple to build for")]
	pub fn set_target(&mut self, target: String) {
		self.target = Some(target);
	}

	#[option(name = "jobs", alias = "j", description = "Number of parallel jobs")]
	pub fn set_jobs(&mut self, jobs: u32) {
		self.jobs = Some(jobs);
	}

	#[option(name = "feature", description = "Enables a feature of a package")]
	pub fn add_feature(&mut self, package: &str, feature: &str) {
		self.features.push(format!("{package}/{feature}"));
	}
}

#[derive(Debug, Default)]
pub struct Test {
	compile: Compile,
	filter: Option<String>,
	fail_fast: Option<bool>,
}

#[task_options(name = "test", parent = Compile)]
impl Test {
	#[option(name = "filter", description = "Only runs tests whose name contains the filter")]
	pub fn set_filter(&mut self, filter: String) {
		self.filter = Some(filter);
	}

	#[option(name = "fail-fast", description = "Stops on the first failing test")]
	pub fn set_fail_fast(&mut self, fail_fast: Option<bool>) {
		self.fail_fast = fail_fast;
	}
}

#[derive(Debug, Default)]
pub struct Clean {
	target_dir: PathBuf,
	dry_run: bool,
}

#[task_options(name = "clean", parent = DefaultTask)]
impl Clean {
	#[option(name = "target-dir", description = "Directory to remove")]
	pub fn set_target_dir(&mut self, target_dir: PathBuf) {
		self.target_dir = target_dir;
	}

	#[option(name = "dry-run", alias = "n", description = "Only prints what would be removed")]
	pub fn set_dry_run(&mut self, dry_run: bool) {
		self.dry_run = dry_run;
	}
}
