use std::io;
use std::path;

use log::debug;

use crate::backend::Access;
use crate::backend::Fs;
use crate::backend::Native;
use crate::error::FileSystemError;
use crate::restricted::Restricted;

/// Options for [`FileSystem::make_directory_with`], in the manner of
/// [`std::fs::DirBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectoryOptions {
	mode: u32,
	recursive: bool,
}

impl DirectoryOptions {
	/// Mode `0o777`, not recursive.
	pub fn new() -> Self {
		Self {
			mode: 0o777,
			recursive: false,
		}
	}

	/// Permission bits for created directories. Masked by the process umask.
	pub fn mode(mut self, mode: u32) -> Self {
		self.mode = mode;
		self
	}

	/// Create missing parent directories as well.
	pub fn recursive(mut self, recursive: bool) -> Self {
		self.recursive = recursive;
		self
	}
}

impl Default for DirectoryOptions {
	fn default() -> Self {
		Self::new()
	}
}

/// Queries and mutations on the filesystem with failures translated.
///
/// Queries never fail: any error from the backend, including being denied
/// access, is reported as `false`. That makes `false` mean both "does not have
/// the property" and "could not be determined". Directory creation and removal
/// return a [`FileSystemError`] instead.
///
/// The facade keeps no state between calls. Nothing is cached and check-then-act
/// sequences such as [`directory`](Self::directory) are not atomic.
///
/// # Examples
///
/// ```no_run
/// use fs_guard::FileSystem;
///
/// fn main() -> Result<(), fs_guard::FileSystemError> {
/// 	let fs = FileSystem::new();
/// 	let cache = fs.directory("./cache", true)?;
/// 	assert!(cache.is_some());
/// 	assert!(fs.is_writable("./cache"));
/// 	Ok(())
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct FileSystem<F = Native> {
	backend: F,
}

impl FileSystem<Native> {
	pub fn new() -> Self {
		Self::with_backend(Native {})
	}

	/// A facade that only reaches paths under `roots`.
	pub fn restricted<I, P>(roots: I) -> FileSystem<Restricted<Native>>
	where
		I: IntoIterator<Item = P>,
		P: AsRef<path::Path>,
	{
		FileSystem::with_backend(Restricted::new(Native {}, roots))
	}

	/// A facade restricted to the roots listed in
	/// [`ALLOWED_ROOTS_ENV`](crate::ALLOWED_ROOTS_ENV), if any.
	pub fn from_env() -> FileSystem<Restricted<Native>> {
		FileSystem::with_backend(Restricted::from_env(Native {}))
	}
}

impl<F: Fs> FileSystem<F> {
	pub fn with_backend(backend: F) -> Self {
		Self {
			backend,
		}
	}

	pub fn backend(&self) -> &F {
		&self.backend
	}

	/// Returns true if an entry exists at `path`. Symbolic links are followed,
	/// so a dangling link does not exist.
	pub fn exists(&self, path: impl AsRef<path::Path>) -> bool {
		let path = path.as_ref();
		query("exists", path, self.backend.metadata(path).map(|_| true))
	}

	/// Returns true if `path` resolves to a regular file.
	pub fn is_file(&self, path: impl AsRef<path::Path>) -> bool {
		let path = path.as_ref();
		query("is_file", path, self.backend.metadata(path).map(|metadata| metadata.is_file()))
	}

	/// Returns true if `path` resolves to a directory.
	pub fn is_directory(&self, path: impl AsRef<path::Path>) -> bool {
		let path = path.as_ref();
		query("is_directory", path, self.backend.metadata(path).map(|metadata| metadata.is_dir()))
	}

	pub fn is_readable(&self, path: impl AsRef<path::Path>) -> bool {
		let path = path.as_ref();
		query("is_readable", path, self.backend.access(path, Access::Read).map(|()| true))
	}

	pub fn is_writable(&self, path: impl AsRef<path::Path>) -> bool {
		let path = path.as_ref();
		query("is_writable", path, self.backend.access(path, Access::Write).map(|()| true))
	}

	/// Creates a single directory with mode `0o777` and returns its canonical
	/// path.
	///
	/// # Errors
	///
	/// Returns [`FileSystemError::CreateDirectory`] if the directory already
	/// exists, its parent is missing, or the backend refuses the call.
	pub fn make_directory(&self, path: impl AsRef<path::Path>) -> Result<path::PathBuf, FileSystemError> {
		self.make_directory_with(path, &DirectoryOptions::new())
	}

	/// Creates a directory as configured by `options` and returns its canonical
	/// path.
	///
	/// A recursive call may leave some parents behind when it fails part way.
	///
	/// # Errors
	///
	/// Returns [`FileSystemError::CreateDirectory`] on any backend failure,
	/// including when the directory already exists.
	pub fn make_directory_with(
		&self,
		path: impl AsRef<path::Path>,
		options: &DirectoryOptions,
	) -> Result<path::PathBuf, FileSystemError> {
		let path = path.as_ref();
		self.backend.create_dir(path, options.mode, options.recursive).map_err(|source| {
			FileSystemError::CreateDirectory {
				path: path.to_path_buf(),
				source,
			}
		})?;
		debug!("Created directory: {}", path.display());
		Ok(self.real_path(path))
	}

	/// Removes an empty directory.
	///
	/// # Errors
	///
	/// Returns [`FileSystemError::RemoveDirectory`] if the directory does not
	/// exist, is not empty, or the backend refuses the call.
	pub fn remove_directory(&self, path: impl AsRef<path::Path>) -> Result<(), FileSystemError> {
		let path = path.as_ref();
		self.backend.remove_dir(path).map_err(|source| FileSystemError::RemoveDirectory {
			path: path.to_path_buf(),
			source,
		})?;
		debug!("Removed directory: {}", path.display());
		Ok(())
	}

	/// Returns the canonical path of the directory at `path`.
	///
	/// When there is no directory and `create` is set, it is created along with
	/// any missing parents. Otherwise `None` is returned. Calling this again on
	/// a directory it created succeeds with the same path.
	///
	/// # Errors
	///
	/// Returns [`FileSystemError::CreateDirectory`] if creating fails.
	pub fn directory(
		&self,
		path: impl AsRef<path::Path>,
		create: bool,
	) -> Result<Option<path::PathBuf>, FileSystemError> {
		let path = path.as_ref();
		if self.is_directory(path) {
			return Ok(Some(self.real_path(path)));
		}
		if create {
			let options = DirectoryOptions::new().recursive(true);
			return self.make_directory_with(path, &options).map(Some);
		}
		Ok(None)
	}

	/// Returns the canonical, absolute form of `path`, or `path` itself when it
	/// cannot be resolved.
	pub fn real_path(&self, path: impl AsRef<path::Path>) -> path::PathBuf {
		let path = path.as_ref();
		match self.backend.canonicalize(path) {
			Ok(real) => real,
			Err(e) => {
				debug!("Unable to resolve {}: {}", path.display(), e);
				path.to_path_buf()
			}
		}
	}
}

fn query(name: &str, path: &path::Path, result: io::Result<bool>) -> bool {
	result.unwrap_or_else(|e| {
		debug!("{} failed for {}: {}", name, path.display(), e);
		false
	})
}
