//! Macro for creating named process-wide registries.
//!
//! The core [`Registry`](crate::Registry) is an explicit instance that is
//! constructed once and passed around. For singleton-style call sites this
//! module provides a macro that wraps a named static instance behind
//! ergonomic free functions.

/// Creates a named process-wide registry with a single macro invocation.
///
/// The macro generates a module containing a lazily-initialized
/// [`Registry`](crate::Registry) static plus free functions delegating
/// every registry operation. Separate invocations are completely isolated
/// from each other.
///
/// # Examples
///
/// ```rust
/// use shared_registry::define_registry;
/// use std::sync::Arc;
///
/// // Create a process-wide registry
/// define_registry!(global);
///
/// // Register values (ergonomic free functions)
/// global::register("answer", 42i32);
/// global::register("greeting", "Hello".to_string());
///
/// // Retrieve values
/// let num: Arc<i32> = global::retrieve_as("answer").unwrap();
/// let msg: Arc<String> = global::retrieve_as("greeting").unwrap();
///
/// assert_eq!(*num, 42);
/// assert_eq!(&**msg, "Hello");
/// ```
///
/// # Multiple Registries
///
/// ```rust
/// use shared_registry::define_registry;
///
/// define_registry!(database);
/// define_registry!(cache);
///
/// // Each registry is completely isolated
/// database::register("conn", "db_connection".to_string());
/// cache::register("conn", "redis_connection".to_string());
///
/// assert_eq!(
///     &*database::retrieve_as::<String>("conn").unwrap(),
///     "db_connection"
/// );
/// ```
///
/// # Instance-Based Usage
///
/// If you need to pass the registry to code that takes `&Registry`, the
/// `handle` function exposes the underlying instance:
///
/// ```rust
/// use shared_registry::define_registry;
///
/// define_registry!(app);
///
/// app::handle().register("port", 8080u16);
/// assert!(app::handle().contains("port"));
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::any::Any;
            use std::sync::{Arc, LazyLock};

            // The registry instance backing this module (module-private)
            static REGISTRY: LazyLock<$crate::Registry> = LazyLock::new($crate::Registry::new);

            /// Access the underlying registry instance.
            pub fn handle() -> &'static $crate::Registry {
                &REGISTRY
            }

            /// Register a value under a name.
            pub fn register<T: Send + Sync + 'static>(name: impl Into<String>, value: T) {
                REGISTRY.register(name, value)
            }

            /// Register an Arc-wrapped value under a name.
            pub fn register_arc<T: Send + Sync + 'static>(name: impl Into<String>, value: Arc<T>) {
                REGISTRY.register_arc(name, value)
            }

            /// Retrieve the value under a name, type-erased.
            pub fn retrieve(name: &str) -> Option<Arc<dyn Any + Send + Sync>> {
                REGISTRY.retrieve(name)
            }

            /// Retrieve the value under a name as `Arc<T>`.
            pub fn retrieve_as<T: Send + Sync + 'static>(
                name: &str,
            ) -> Result<Arc<T>, $crate::RegistryError> {
                REGISTRY.retrieve_as(name)
            }

            /// Check whether a value is registered under a name.
            pub fn contains(name: &str) -> bool {
                REGISTRY.contains(name)
            }

            /// Retrieve the value under a name, installing the default if absent.
            pub fn retrieve_or_default<T: Send + Sync + 'static>(
                name: &str,
                default: T,
            ) -> Result<$crate::Retrieval<T>, $crate::RegistryError> {
                REGISTRY.retrieve_or_default(name, default)
            }

            /// Retrieve the value under a name, resolving a default by type name if absent.
            pub fn retrieve_or_resolve(
                name: &str,
                type_name: &str,
                catalog: &$crate::TypeCatalog,
            ) -> Result<$crate::Retrieval<$crate::TypeHandle>, $crate::RegistryError> {
                REGISTRY.retrieve_or_resolve(name, type_name, catalog)
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                REGISTRY.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                REGISTRY.clear_trace_callback()
            }

            #[doc(hidden)]
            pub fn clear() {
                REGISTRY.clear()
            }
        }
    };
}
