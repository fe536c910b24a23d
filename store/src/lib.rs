//! # Cargotower Store Library
//!
//! Persistence layer for user preferences in the Cargotower admin console.
//! The crate is deliberately domain-agnostic: it knows about string keys,
//! string values and how to retry failing backends, while the application
//! crate decides what gets stored and how it is validated.
//!
//! ## Modules
//!
//! - [`backend`] - The [`KeyValueStore`] seam every backend implements
//! - [`memory`] - Process-local backend used for tests and ephemeral sessions
//! - [`file`] - Durable backend persisting a JSON object file on disk
//! - [`errors`] - Backend and storage error types
//! - [`retry`] - Capped exponential backoff policy
//! - `testing` - Scripted backend with failure injection (feature `test-utils`)

pub mod backend;
pub mod errors;
pub mod file;
pub mod memory;
pub mod retry;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use backend::KeyValueStore;
pub use errors::{BackendError, StorageError, StorageOperation};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use retry::RetryPolicy;
