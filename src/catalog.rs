//! Name-to-type resolution for lazily-resolved registry defaults.
//!
//! Dynamic by-string class loading is not available in Rust, so the catalog
//! substitutes a table of [`TypeHandle`]s populated at startup: each handle
//! binds a type name to the type's `TypeId` and a constructor closure. A
//! registry can then resolve a type name at runtime and install the handle
//! itself (not an instance of it) as a default entry.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex},
};

/// Constructor closure stored in a [`TypeHandle`].
pub type Constructor = dyn Fn() -> Arc<dyn Any + Send + Sync> + Send + Sync;

/// A resolvable handle to a registered type.
///
/// The handle is what gets installed in a registry by
/// `retrieve_or_resolve`: the analogue of registering a class object
/// rather than an instance. Callers that want an instance invoke
/// [`TypeHandle::instantiate`] themselves.
pub struct TypeHandle {
    type_name: String,
    type_id: TypeId,
    construct: Box<Constructor>,
}

impl TypeHandle {
    /// Create a handle for `T` whose constructor is `T::default`.
    pub fn of<T: Default + Send + Sync + 'static>(type_name: impl Into<String>) -> Self {
        Self::with_constructor::<T, _>(type_name, T::default)
    }

    /// Create a handle for `T` with an explicit constructor.
    pub fn with_constructor<T, F>(type_name: impl Into<String>, construct: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        TypeHandle {
            type_name: type_name.into(),
            type_id: TypeId::of::<T>(),
            construct: Box::new(move || Arc::new(construct())),
        }
    }

    /// The name the handle was registered under.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The `TypeId` of the type the handle constructs.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Build a fresh instance of the handled type.
    pub fn instantiate(&self) -> Arc<dyn Any + Send + Sync> {
        (self.construct)()
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeHandle")
            .field("type_name", &self.type_name)
            .field("type_id", &self.type_id)
            .finish()
    }
}

/// Table mapping type names to [`TypeHandle`]s.
///
/// Populated during application startup, consulted by
/// `Registry::retrieve_or_resolve` when a default must be resolved by name.
///
/// # Examples
///
/// ```rust
/// use shared_registry::TypeCatalog;
///
/// let catalog = TypeCatalog::new();
/// catalog.register::<Vec<u8>>("buffer.Bytes");
///
/// let handle = catalog.resolve("buffer.Bytes").unwrap();
/// assert_eq!(handle.type_name(), "buffer.Bytes");
/// assert!(catalog.resolve("does.not.Exist").is_none());
/// ```
#[derive(Default)]
pub struct TypeCatalog {
    entries: Mutex<HashMap<String, Arc<TypeHandle>>>,
}

impl TypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `type_name`, constructed via `T::default`.
    ///
    /// A handle already registered under the same name is replaced.
    pub fn register<T: Default + Send + Sync + 'static>(&self, type_name: impl Into<String>) {
        self.insert(TypeHandle::of::<T>(type_name));
    }

    /// Register `T` under `type_name` with an explicit constructor.
    pub fn register_with<T, F>(&self, type_name: impl Into<String>, construct: F)
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.insert(TypeHandle::with_constructor::<T, F>(type_name, construct));
    }

    fn insert(&self, handle: TypeHandle) {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(handle.type_name.clone(), Arc::new(handle));
    }

    /// Look up the handle registered under `type_name`.
    pub fn resolve(&self, type_name: &str) -> Option<Arc<TypeHandle>> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(type_name)
            .cloned()
    }

    /// Check whether a handle is registered under `type_name`.
    pub fn contains(&self, type_name: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .contains_key(type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::{TypeCatalog, TypeHandle};
    use std::any::TypeId;

    #[derive(Default)]
    struct Widget {
        label: String,
    }

    #[test]
    fn test_register_and_resolve() {
        let catalog = TypeCatalog::new();
        catalog.register::<Widget>("app.Widget");

        let handle = catalog.resolve("app.Widget").expect("handle registered");
        assert_eq!(handle.type_name(), "app.Widget");
        assert_eq!(handle.type_id(), TypeId::of::<Widget>());
    }

    #[test]
    fn test_resolve_unknown_name() {
        let catalog = TypeCatalog::new();
        assert!(catalog.resolve("does.not.Exist").is_none());
        assert!(!catalog.contains("does.not.Exist"));
    }

    #[test]
    fn test_instantiate_default() {
        let catalog = TypeCatalog::new();
        catalog.register::<Widget>("app.Widget");

        let handle = catalog.resolve("app.Widget").unwrap();
        let instance = handle.instantiate();
        let widget = instance.downcast::<Widget>().expect("constructs a Widget");
        assert_eq!(widget.label, "");
    }

    #[test]
    fn test_instantiate_with_constructor() {
        let catalog = TypeCatalog::new();
        catalog.register_with("app.Widget", || Widget {
            label: "preset".to_string(),
        });

        let handle = catalog.resolve("app.Widget").unwrap();
        let widget = handle.instantiate().downcast::<Widget>().unwrap();
        assert_eq!(widget.label, "preset");

        // Each instantiation builds a fresh value
        let again = handle.instantiate().downcast::<Widget>().unwrap();
        assert_eq!(again.label, "preset");
    }

    #[test]
    fn test_reregister_replaces_handle() {
        let catalog = TypeCatalog::new();
        catalog.register_with("app.Widget", || Widget {
            label: "first".to_string(),
        });
        catalog.register_with("app.Widget", || Widget {
            label: "second".to_string(),
        });

        let handle = catalog.resolve("app.Widget").unwrap();
        let widget = handle.instantiate().downcast::<Widget>().unwrap();
        assert_eq!(widget.label, "second");
    }

    #[test]
    fn test_debug_omits_constructor() {
        let handle = TypeHandle::of::<Widget>("app.Widget");
        let rendered = format!("{:?}", handle);
        assert!(rendered.contains("app.Widget"));
        assert!(!rendered.contains("construct"));
    }
}
