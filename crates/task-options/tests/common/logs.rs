use std::{
	io,
	sync::{Arc, Mutex, PoisonError},
};

use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

/// In-memory sink for a `tracing_subscriber::fmt` subscriber scoped to the current thread.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
	pub fn capture<R>(&self, filter: &str, f: impl FnOnce() -> R) -> R {
		let subscriber = tracing_subscriber::fmt()
			.with_env_filter(EnvFilter::new(filter))
			.with_writer(self.clone())
			.with_ansi(false)
			.finish();

		tracing::subscriber::with_default(subscriber, f)
	}

	pub fn contents(&self) -> String {
		String::from_utf8_lossy(&self.0.lock().unwrap_or_else(PoisonError::into_inner)).into_owned()
	}
}

impl io::Write for CapturedLogs {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl<'a> MakeWriter<'a> for CapturedLogs {
	type Writer = Self;

	fn make_writer(&'a self) -> Self::Writer {
		self.clone()
	}
}
