//! Filesystem checks and directory operations that translate OS failures.
//!
//! Queries such as [`FileSystem::exists`] answer `false` when the operating
//! system refuses or fails the call. Directory creation and removal report a
//! [`FileSystemError`] naming the operation and the path instead.
//!
//! The OS primitives sit behind the [`Fs`] trait. [`Native`] talks to the host
//! and [`Restricted`] confines another backend to a set of allowed roots.
#![allow(clippy::tabs_in_doc_comments)]
mod backend;
mod error;
mod file_system;
mod path;
mod restricted;

pub use backend::Access;
pub use backend::Fs;
pub use backend::Native;
pub use error::FileSystemError;
pub use error::Operation;
pub use file_system::DirectoryOptions;
pub use file_system::FileSystem;
pub use path::Path;
pub use restricted::Restricted;
pub use restricted::ALLOWED_ROOTS_ENV;
