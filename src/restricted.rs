use std::env;
use std::ffi::OsString;
use std::fs::Metadata;
use std::io;
use std::path;

use log::debug;

use crate::backend::normalize;
use crate::backend::Access;
use crate::backend::Fs;

/// Environment variable holding the allowed roots, as an OS path list.
pub const ALLOWED_ROOTS_ENV: &str = "FS_GUARD_ALLOWED_ROOTS";

/// A backend that only lets paths under a set of allowed roots through to the
/// wrapped backend.
///
/// Paths outside every root fail with [`io::ErrorKind::PermissionDenied`]
/// without touching the inner backend. Symbolic links are resolved before the
/// check, so a link inside a root pointing outside of it is denied. With no
/// roots configured every path is let through.
#[derive(Clone, Debug)]
pub struct Restricted<F> {
	inner: F,
	roots: Vec<path::PathBuf>,
}

impl<F: Fs> Restricted<F> {
	pub fn new<I, P>(inner: F, roots: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: AsRef<path::Path>,
	{
		let roots = roots
			.into_iter()
			.filter(|root| !root.as_ref().as_os_str().is_empty())
			.map(|root| resolve_root(&inner, root.as_ref()))
			.collect();
		Self {
			inner,
			roots,
		}
	}

	/// Reads the allowed roots from [`ALLOWED_ROOTS_ENV`]. Unset or empty means
	/// unrestricted.
	pub fn from_env(inner: F) -> Self {
		let value = env::var_os(ALLOWED_ROOTS_ENV).unwrap_or_else(OsString::new);
		let roots: Vec<_> = env::split_paths(&value).collect();
		debug!("Allowed roots from {}: {:?}", ALLOWED_ROOTS_ENV, roots);
		Self::new(inner, roots)
	}

	pub fn roots(&self) -> &[path::PathBuf] {
		&self.roots
	}

	pub fn is_allowed(&self, path: &path::Path) -> bool {
		if self.roots.is_empty() {
			return true;
		}
		let Ok(resolved) = self.resolve(path) else {
			return false;
		};
		self.roots.iter().any(|root| resolved.starts_with(root))
	}

	fn check(&self, path: &path::Path) -> io::Result<()> {
		if self.is_allowed(path) {
			Ok(())
		} else {
			debug!("Denied access outside allowed roots: {}", path.display());
			Err(io::Error::new(
				io::ErrorKind::PermissionDenied,
				format!("path is outside the allowed roots: {}", path.display()),
			))
		}
	}

	// Canonicalizes the deepest existing ancestor and appends the rest.
	fn resolve(&self, path: &path::Path) -> io::Result<path::PathBuf> {
		let absolute = path::absolute(path)?;
		for ancestor in absolute.ancestors() {
			if let Ok(real) = self.inner.canonicalize(ancestor) {
				let rest = absolute.strip_prefix(ancestor).unwrap_or(path::Path::new(""));
				return Ok(normalize(&real.join(rest)));
			}
		}
		Ok(normalize(&absolute))
	}
}

impl<F: Fs> Fs for Restricted<F> {
	fn canonicalize(&self, path: &path::Path) -> io::Result<path::PathBuf> {
		self.check(path)?;
		self.inner.canonicalize(path)
	}

	fn metadata(&self, path: &path::Path) -> io::Result<Metadata> {
		self.check(path)?;
		self.inner.metadata(path)
	}

	fn access(&self, path: &path::Path, access: Access) -> io::Result<()> {
		self.check(path)?;
		self.inner.access(path, access)
	}

	fn create_dir(&self, path: &path::Path, mode: u32, recursive: bool) -> io::Result<()> {
		self.check(path)?;
		self.inner.create_dir(path, mode, recursive)
	}

	fn remove_dir(&self, path: &path::Path) -> io::Result<()> {
		self.check(path)?;
		self.inner.remove_dir(path)
	}
}

fn resolve_root<F: Fs>(inner: &F, root: &path::Path) -> path::PathBuf {
	if let Ok(real) = inner.canonicalize(root) {
		return real;
	}
	match path::absolute(root) {
		Ok(absolute) => normalize(&absolute),
		Err(_) => root.to_path_buf(),
	}
}
