//! # Shared Registry
//!
//! A thread-safe, string-keyed registry for sharing objects across threads,
//! with atomic get-or-register-default operations, plus a multi-part
//! operation [`Outcome`] container for returning complex results.
//!
//! ## Quick Start
//!
//! ```rust
//! use shared_registry::Registry;
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//!
//! // Register a value under a name
//! registry.register("greeting", "Hello, World!".to_string());
//!
//! // Retrieve the value
//! let message: Arc<String> = registry.retrieve_as("greeting").unwrap();
//! assert_eq!(&*message, "Hello, World!");
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: a single coarse lock serializes every operation, so
//!   the check-then-act sequences of the get-or-default variants are atomic
//! - **Explicit instances**: construct a [`Registry`] at startup and inject
//!   it, or use [`define_registry!`] for a named process-wide instance
//! - **Lazy defaults by type name**: [`TypeCatalog`] resolves string type
//!   names to constructor handles registered at startup
//! - **Tracing support**: optional callback system for monitoring registry
//!   operations
//!
//! ## Main Types
//!
//! - [`Registry`] - the string-keyed table with register/retrieve and
//!   get-or-default operations
//! - [`TypeCatalog`] / [`TypeHandle`] - name-to-constructor resolution for
//!   by-type-name defaults
//! - [`Outcome`] - value object bundling a success flag, captured error and
//!   named properties
//! - [`Retrieval`] - value plus whether a get-or-default call installed the
//!   default

mod catalog;
mod macros;
mod outcome;
mod registry;
mod registry_error;
mod registry_event;

// Re-export the main public API
pub use catalog::{Constructor, TypeCatalog, TypeHandle};
pub use outcome::{Outcome, CONSOLE_TRACING_VAR};
pub use registry::{Registry, Retrieval, TraceCallback};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
