use std::io;
use std::path;

use thiserror::Error;

/// The mutating operation that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
	CreateDirectory,
	RemoveDirectory,
}

/// A directory could not be created or removed.
///
/// The message names the operation and the path as it was given. The
/// underlying OS error is kept as the [source](std::error::Error::source).
#[derive(Error, Debug)]
pub enum FileSystemError {
	#[error("Could not create directory: '{}'", .path.display())]
	CreateDirectory {
		path: path::PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("Could not remove directory: '{}'", .path.display())]
	RemoveDirectory {
		path: path::PathBuf,
		#[source]
		source: io::Error,
	},
}

impl FileSystemError {
	pub fn operation(&self) -> Operation {
		match self {
			Self::CreateDirectory { .. } => Operation::CreateDirectory,
			Self::RemoveDirectory { .. } => Operation::RemoveDirectory,
		}
	}

	/// The path the failed operation was called with.
	pub fn path(&self) -> &path::Path {
		match self {
			Self::CreateDirectory { path, .. } | Self::RemoveDirectory { path, .. } => path,
		}
	}

	pub fn io_error(&self) -> &io::Error {
		match self {
			Self::CreateDirectory { source, .. } | Self::RemoveDirectory { source, .. } => source,
		}
	}
}
