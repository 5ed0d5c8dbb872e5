use std::fmt;
use std::path;

/// A filesystem path held as an immutable string.
///
/// No validation is done on construction: the path does not need to exist or
/// even be well-formed. Rendering with [`Display`](fmt::Display) returns the
/// exact string the value was built from.
///
/// # Examples
///
/// ```
/// use fs_guard::Path;
///
/// let path = Path::new("/tmp/cache");
/// let copy = Path::from(&path);
/// assert_eq!(copy.to_string(), "/tmp/cache");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
	value: String,
}

impl Path {
	pub fn new(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.value
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.value)
	}
}

impl From<&str> for Path {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for Path {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&Path> for Path {
	fn from(value: &Path) -> Self {
		value.clone()
	}
}

impl From<Path> for String {
	fn from(value: Path) -> Self {
		value.value
	}
}

impl AsRef<path::Path> for Path {
	fn as_ref(&self) -> &path::Path {
		path::Path::new(&self.value)
	}
}

impl AsRef<str> for Path {
	fn as_ref(&self) -> &str {
		&self.value
	}
}
