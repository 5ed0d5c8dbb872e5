#![allow(dead_code)]

use std::fs;
use std::fs::Permissions;
use std::os::unix::fs::symlink;
use std::os::unix::fs::PermissionsExt;
use std::path;

use tempfile::TempDir;

pub fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// `access(2)` grants root read and write regardless of mode bits.
pub fn running_as_root() -> bool {
	rustix::process::geteuid().is_root()
}

/// A temporary directory populated with the entries the query tests probe.
pub struct Fixtures {
	dir: TempDir,
}

impl Fixtures {
	pub fn new() -> anyhow::Result<Self> {
		init_logging();
		let dir = tempfile::tempdir()?;
		let root = dir.path();
		fs::create_dir(root.join("empty-dir"))?;
		fs::write(root.join("empty-file"), "")?;
		fs::write(root.join("readonly-file"), "")?;
		fs::set_permissions(root.join("readonly-file"), Permissions::from_mode(0o444))?;
		fs::write(root.join("writeonly-file"), "")?;
		fs::set_permissions(root.join("writeonly-file"), Permissions::from_mode(0o222))?;
		symlink(root.join("empty-file"), root.join("symlink-file"))?;
		symlink(root.join("empty-dir"), root.join("symlink-dir"))?;
		Ok(Self {
			dir,
		})
	}

	pub fn root(&self) -> &path::Path {
		self.dir.path()
	}

	pub fn path(&self, name: &str) -> path::PathBuf {
		self.dir.path().join(name)
	}
}
