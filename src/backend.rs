use std::fs;
use std::fs::Metadata;
use std::io;
use std::path;
use std::path::Component;

/// Permission checked by [`Fs::access`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
	Read,
	Write,
}

/// The operating system primitives the [`FileSystem`](crate::FileSystem)
/// facade is built on.
///
/// Every method is a single blocking call that reports failure through
/// [`io::Result`]. Implementations must not swallow errors; translating them is
/// left to the facade.
pub trait Fs {
	/// Resolves `path` to an absolute path free of `.`, `..` and symbolic links.
	///
	/// The facade falls back to the unresolved path when this fails, so an error
	/// here never reaches callers of [`FileSystem::real_path`](crate::FileSystem::real_path).
	///
	/// # Errors
	///
	/// Fails when any component of `path` is missing or cannot be searched.
	fn canonicalize(&self, path: &path::Path) -> io::Result<path::PathBuf>;

	/// Returns the metadata of the entry `path` resolves to.
	///
	/// Symbolic links are followed, which is what makes a link to a file answer
	/// [`is_file`](crate::FileSystem::is_file) and a dangling link not exist.
	///
	/// # Errors
	///
	/// Fails when nothing is reachable at `path`. Wrapping backends such as
	/// [`Restricted`](crate::Restricted) fail with
	/// [`io::ErrorKind::PermissionDenied`] for paths they refuse.
	fn metadata(&self, path: &path::Path) -> io::Result<Metadata>;

	/// Checks whether the calling process may access `path` in the given way.
	///
	/// Symbolic links are followed.
	///
	/// # Platform-specific behavior
	///
	/// This function currently corresponds to the `access` function on Unix,
	/// which checks against the real user and group IDs. On other platforms,
	/// read access means the metadata can be queried and write access means the
	/// entry is not marked read-only.
	///
	/// # Errors
	///
	/// Returns an error if access is not granted or `path` does not exist.
	fn access(&self, path: &path::Path, access: Access) -> io::Result<()>;

	/// Creates a new directory at the provided path with the given permission
	/// bits.
	///
	/// When `recursive` is set, missing parents are created first using the same
	/// permission bits. The final component is always created on its own, so an
	/// existing directory at `path` is an error either way.
	///
	/// # Platform-specific behavior
	///
	/// The permission bits are masked by the process umask on Unix and ignored
	/// elsewhere.
	///
	/// # Errors
	///
	/// This function will return an error in the following situations, but is not
	/// limited to just these cases:
	///
	/// * User lacks permissions to create directory at `path`.
	/// * A parent of the given path doesn't exist and `recursive` is not set.
	/// * `path` already exists.
	///
	/// If this function returns an error, some of the parent components might have
	/// been created already.
	fn create_dir(&self, path: &path::Path, mode: u32, recursive: bool) -> io::Result<()>;

	/// Removes the empty directory at `path`. Links are not followed.
	///
	/// # Errors
	///
	/// Fails when `path` is missing, not a directory or still has entries, and
	/// with [`io::ErrorKind::PermissionDenied`] when the OS or a wrapping backend
	/// refuses it.
	fn remove_dir(&self, path: &path::Path) -> io::Result<()>;
}

/// The host filesystem, forwarding to [`std::fs`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Native {}

impl Fs for Native {
	fn canonicalize(&self, path: &path::Path) -> io::Result<path::PathBuf> {
		fs::canonicalize(path)
	}

	fn metadata(&self, path: &path::Path) -> io::Result<Metadata> {
		fs::metadata(path)
	}

	#[cfg(unix)]
	fn access(&self, path: &path::Path, access: Access) -> io::Result<()> {
		let mode = match access {
			Access::Read => rustix::fs::Access::READ_OK,
			Access::Write => rustix::fs::Access::WRITE_OK,
		};
		rustix::fs::access(path, mode).map_err(io::Error::from)
	}

	#[cfg(not(unix))]
	fn access(&self, path: &path::Path, access: Access) -> io::Result<()> {
		let metadata = fs::metadata(path)?;
		if access == Access::Write && metadata.permissions().readonly() {
			return Err(io::Error::new(io::ErrorKind::PermissionDenied, "entry is read-only"));
		}
		Ok(())
	}

	fn create_dir(&self, path: &path::Path, mode: u32, recursive: bool) -> io::Result<()> {
		let mut builder = fs::DirBuilder::new();
		#[cfg(unix)]
		{
			use std::os::unix::fs::DirBuilderExt;
			builder.mode(mode);
		}
		#[cfg(not(unix))]
		let _ = mode;

		if !recursive {
			return builder.create(path);
		}
		// `Path::parent` skips a trailing `.`, so collapse dots before splitting.
		let target = normalize(&path::absolute(path)?);
		if let Some(parent) = target.parent() {
			builder.recursive(true).create(parent)?;
		}
		builder.recursive(false).create(&target)
	}

	fn remove_dir(&self, path: &path::Path) -> io::Result<()> {
		fs::remove_dir(path)
	}
}

/// Resolves `.` and `..` without touching the filesystem.
pub(crate) fn normalize(path: &path::Path) -> path::PathBuf {
	let mut normalized = path::PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				normalized.pop();
			}
			other => normalized.push(other),
		}
	}
	normalized
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn recursive_create_rejects_existing_leaf() {
		let dir = tempfile::tempdir().unwrap();
		let leaf = dir.path().join("a/b");
		Native {}.create_dir(&leaf, 0o777, true).unwrap();
		let err = Native {}.create_dir(&leaf, 0o777, true).unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
	}

	#[test]
	fn missing_parent_without_recursive() {
		let dir = tempfile::tempdir().unwrap();
		let err = Native {}.create_dir(&dir.path().join("a/b"), 0o777, false).unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}

	#[test]
	fn access_missing_entry() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("missing");
		assert!(Native {}.access(&missing, Access::Read).is_err());
		assert!(Native {}.access(&missing, Access::Write).is_err());
	}

	#[test]
	fn normalize_dots() {
		assert_eq!(normalize(path::Path::new("/a/./b/../c")), path::Path::new("/a/c"));
		assert_eq!(normalize(path::Path::new("/a/../../b")), path::Path::new("/b"));
		assert_eq!(normalize(path::Path::new("/a/b/.")), path::Path::new("/a/b"));
	}

	#[test]
	fn recursive_create_collapses_dots() {
		let dir = tempfile::tempdir().unwrap();
		Native {}.create_dir(&dir.path().join("a/b/."), 0o777, true).unwrap();
		assert!(dir.path().join("a/b").is_dir());
		Native {}.create_dir(&dir.path().join("p/q/.."), 0o777, true).unwrap();
		assert!(dir.path().join("p").is_dir());
		assert!(!dir.path().join("p/q").exists());
	}
}
