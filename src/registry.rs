//! A thread-safe key-value registry for sharing objects across threads.
//!
//! This module provides [`Registry`], a string-keyed table guarded by a
//! single coarse lock. Every operation acquires the lock for its whole
//! body, so the check-then-act sequences of the get-or-default variants
//! are atomic with respect to each other.
//!
//! # Examples
//!
//! ```
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

use std::{
    any::Any,
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::{
    catalog::{TypeCatalog, TypeHandle},
    RegistryError, RegistryEvent,
};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the
/// registry is interacted with. It must be thread-safe because the registry
/// itself is shared across threads.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Result of a get-or-default operation.
///
/// Bundles the returned value with whether this call installed the default
/// (`true`) or found a pre-existing entry (`false`).
#[derive(Debug)]
pub struct Retrieval<T: ?Sized> {
    /// The value now registered under the requested name.
    pub value: Arc<T>,
    /// Whether this call wrote the default into the registry.
    pub default_installed: bool,
}

/// Thread-safe, string-keyed table for sharing objects across threads.
///
/// The table is an explicit instance rather than an implicit process
/// global: construct one at startup and pass (or inject) it into the
/// components that need it. Each test can then build its own isolated
/// registry. For singleton-style usage, the [`define_registry!`] macro
/// wraps a named static instance.
///
/// Entries map a name to an `Arc<dyn Any + Send + Sync>`; registering
/// under an occupied name replaces the previous value (last write wins),
/// and entries are never removed automatically.
///
/// [`define_registry!`]: crate::define_registry
#[derive(Default)]
pub struct Registry {
    entries: Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback that will be invoked on every registry
    /// interaction.
    ///
    /// The callback must not call `set_trace_callback` or
    /// `clear_trace_callback` on the same registry from within itself, as
    /// it is invoked while the trace lock is held. Registry operations on a
    /// *different* registry are fine.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the trace lock is poisoned (due to a panic while holding the
    /// lock), this method automatically recovers by extracting the inner
    /// value. This is safe because trace operations are non-critical and
    /// idempotent.
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback (disables registry tracing).
    ///
    /// Note: This does not affect registered values, only the callback.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// Convenience wrapper to emit a registry event using the current callback.
    ///
    /// The entries lock is never held during callback execution, so a
    /// panicking callback cannot poison the table.
    fn emit_event(&self, event: &RegistryEvent) {
        let guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(callback) = guard.as_ref() {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Register an `Arc`-wrapped value under `name`.
    ///
    /// More efficient than [`Registry::register`] when you already have an
    /// `Arc`, as it avoids creating an additional reference count.
    ///
    /// Unconditionally inserts: a previous value under the same name is
    /// replaced. This operation is total.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the entries lock is poisoned, this method automatically
    /// recovers. This is safe because the insert operation is idempotent.
    pub fn register_arc<T: Send + Sync + 'static>(&self, name: impl Into<String>, value: Arc<T>) {
        let name = name.into();
        self.emit_event(&RegistryEvent::Register { name: name.clone() });

        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(name, value);
    }

    /// Register a value under `name`.
    ///
    /// Takes ownership of the value and wraps it in an `Arc` automatically.
    ///
    /// # Examples
    ///
    /// ```
    /// use shared_registry::Registry;
    /// use std::sync::Arc;
    ///
    /// let registry = Registry::new();
    /// registry.register("answer", 42i32);
    /// registry.register("greeting", "Hello".to_string());
    ///
    /// let num: Arc<i32> = registry.retrieve_as("answer").unwrap();
    /// assert_eq!(*num, 42);
    /// ```
    pub fn register<T: Send + Sync + 'static>(&self, name: impl Into<String>, value: T) {
        self.register_arc(name, Arc::new(value));
    }

    /// Retrieve the value registered under `name`, type-erased.
    ///
    /// Returns `None` if the name was never registered. This operation is
    /// total; lock poisoning is recovered.
    pub fn retrieve(&self, name: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        let found = self
            .entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(name)
            .cloned();

        self.emit_event(&RegistryEvent::Retrieve {
            name: name.to_string(),
            found: found.is_some(),
        });

        found
    }

    /// Retrieve the value registered under `name` as an `Arc<T>`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the name was never registered
    /// - `TypeMismatch` if the entry holds a different type
    /// - `Lock` if the entries lock is poisoned
    pub fn retrieve_as<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, RegistryError> {
        let entries = self.entries.lock().map_err(|_| RegistryError::Lock)?;
        let any_arc_opt = entries.get(name).cloned();
        drop(entries);

        let result: Result<Arc<T>, RegistryError> = match any_arc_opt {
            Some(any_arc) => any_arc
                .downcast::<T>()
                .map_err(|_| RegistryError::TypeMismatch {
                    name: name.to_string(),
                    expected: std::any::type_name::<T>(),
                }),
            None => Err(RegistryError::NotFound {
                name: name.to_string(),
            }),
        };

        self.emit_event(&RegistryEvent::Retrieve {
            name: name.to_string(),
            found: result.is_ok(),
        });

        result
    }

    /// Check whether a value is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        let found = self
            .entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .contains_key(name);

        self.emit_event(&RegistryEvent::Contains {
            name: name.to_string(),
            found,
        });

        found
    }

    /// Retrieve the value under `name`, installing `default` if absent.
    ///
    /// The whole check-then-act sequence runs under the entries lock, so
    /// no other thread can observe or cause an intervening write between
    /// the check and the install. When N threads race on an empty name,
    /// exactly one default wins and every caller gets the winning value.
    ///
    /// The returned [`Retrieval`] reports `default_installed = true` only
    /// when this call wrote the default; a pre-existing entry is returned
    /// with `default_installed = false`. Either way the operation
    /// succeeded; the flag carries no error polarity.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` if a pre-existing entry holds a type other than `T`
    /// - `Lock` if the entries lock is poisoned
    ///
    /// # Examples
    ///
    /// ```
    /// use shared_registry::Registry;
    ///
    /// let registry = Registry::new();
    ///
    /// let first = registry.retrieve_or_default("k", 1i32).unwrap();
    /// assert!(first.default_installed);
    ///
    /// let second = registry.retrieve_or_default("k", 2i32).unwrap();
    /// assert!(!second.default_installed);
    /// assert_eq!(*second.value, 1);
    /// ```
    pub fn retrieve_or_default<T: Send + Sync + 'static>(
        &self,
        name: &str,
        default: T,
    ) -> Result<Retrieval<T>, RegistryError> {
        let mut entries = self.entries.lock().map_err(|_| RegistryError::Lock)?;

        let (value, default_installed) = match entries.get(name).cloned() {
            Some(existing) => {
                let value = existing
                    .downcast::<T>()
                    .map_err(|_| RegistryError::TypeMismatch {
                        name: name.to_string(),
                        expected: std::any::type_name::<T>(),
                    })?;
                (value, false)
            }
            None => {
                let value = Arc::new(default);
                entries.insert(
                    name.to_string(),
                    value.clone() as Arc<dyn Any + Send + Sync>,
                );
                (value, true)
            }
        };
        drop(entries);

        self.emit_event(&RegistryEvent::RetrieveOrDefault {
            name: name.to_string(),
            default_installed,
        });

        Ok(Retrieval {
            value,
            default_installed,
        })
    }

    /// Retrieve the value under `name`, resolving and installing a default
    /// by type name if absent.
    ///
    /// If `name` is already registered, the entry is returned unchanged
    /// with `default_installed = false`. Otherwise `type_name` is resolved
    /// in `catalog`; on success the resolved [`TypeHandle`] itself (not an
    /// instance of it) is registered under `name` and returned with
    /// `default_installed = true`. On resolution failure nothing is
    /// registered and the error is returned as a value, never allowed to
    /// panic past the caller.
    ///
    /// Atomic like [`Registry::retrieve_or_default`]: the check, the
    /// catalog lookup and the install all happen under the entries lock.
    ///
    /// # Errors
    ///
    /// - `UnknownTypeName` if the catalog has no handle for `type_name`
    /// - `TypeMismatch` if a pre-existing entry is not a `TypeHandle`
    /// - `Lock` if the entries lock is poisoned
    pub fn retrieve_or_resolve(
        &self,
        name: &str,
        type_name: &str,
        catalog: &TypeCatalog,
    ) -> Result<Retrieval<TypeHandle>, RegistryError> {
        let mut entries = self.entries.lock().map_err(|_| RegistryError::Lock)?;

        let (value, default_installed) = match entries.get(name).cloned() {
            Some(existing) => {
                let value =
                    existing
                        .downcast::<TypeHandle>()
                        .map_err(|_| RegistryError::TypeMismatch {
                            name: name.to_string(),
                            expected: std::any::type_name::<TypeHandle>(),
                        })?;
                (value, false)
            }
            None => match catalog.resolve(type_name) {
                Some(handle) => {
                    entries.insert(
                        name.to_string(),
                        handle.clone() as Arc<dyn Any + Send + Sync>,
                    );
                    (handle, true)
                }
                None => {
                    return Err(RegistryError::UnknownTypeName {
                        type_name: type_name.to_string(),
                    })
                }
            },
        };
        drop(entries);

        self.emit_event(&RegistryEvent::RetrieveOrDefault {
            name: name.to_string(),
            default_installed,
        });

        Ok(Retrieval {
            value,
            default_installed,
        })
    }

    /// Remove all entries from the registry.
    ///
    /// Primarily intended for testing. Already-retrieved `Arc`s remain
    /// valid, and the tracing callback is unaffected (use
    /// `clear_trace_callback` for that).
    #[doc(hidden)]
    pub fn clear(&self) {
        self.emit_event(&RegistryEvent::Clear {});

        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
