//! Per-run log file
use std::{
    fs::File,
    path::{Path, PathBuf},
};

use tracing::{level_filters::LevelFilter, Dispatch};
use tracing_appender::non_blocking::WorkerGuard;

use crate::error::Error;

/// Default log file name, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "miniAOD_output.log";

/// Log file receiving the INFO-level events emitted while a report runs
///
/// The file is truncated on creation and closed when the `RunLog` is
/// closed or dropped, whichever comes first. Pending lines are flushed on
/// close.
pub struct RunLog {
    path: PathBuf,
    dispatch: Dispatch,
    guard: WorkerGuard,
}

impl RunLog {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_owned();
        let file = File::create(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_max_level(LevelFilter::INFO)
            .with_ansi(false)
            .with_target(false)
            .finish();
        Ok(Self {
            path,
            dispatch: Dispatch::new(subscriber),
            guard,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` with this log as the current thread's default subscriber
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Flush all pending lines and close the file
    pub fn close(self) {
        let Self { dispatch, guard, .. } = self;
        drop(dispatch);
        drop(guard);
    }
}

impl std::fmt::Debug for RunLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLog").field("path", &self.path).finish()
    }
}
