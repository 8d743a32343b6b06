//! Sandboxed file storage for Cabinet documents.
//!
//! # Core Features
//!
//! - **Sandbox Security**: relative paths only; `..` and symlinks cannot leave the root.
//! - **Atomic Writes**: unique temp file + `fsync` + `rename`.
//! - **Transparent Compression**: optional LZ4 block compression.
//! - **Namespaces**: one directory per logical group (a document collection), listable.
//! - **Self-Healing**: stale temporary files are purged on connect.
//!
//! # Examples
//!
//! ```rust
//! use cab_storage::{Storage, StorageError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let storage = Storage::builder().root(tmp.path().join("data")).connect().await?;
//!
//!     storage.write("settings.json", b"{}").await?;
//!     assert_eq!(storage.read("settings.json").await?, b"{}");
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod namespace;
mod security;

pub use builder::StorageBuilder;
pub use engine::{Compression, Storage};
pub use error::{StorageError, StorageErrorExt};
pub use namespace::{NamespaceName, NamespacedStorage};
