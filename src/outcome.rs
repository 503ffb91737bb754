//! Multi-part operation result container.
//!
//! An [`Outcome`] is produced by a callee and consumed by its caller when a
//! plain `Result` is not enough: it bundles a success flag, an optional
//! captured error, and ad-hoc named properties (string-valued and
//! object-valued) in independent namespaces.
//!
//! # Examples
//!
//! ```rust
//! use shared_registry::Outcome;
//!
//! let mut outcome = Outcome::new();
//! outcome.set_status(true);
//! outcome.set_property("rows", "42");
//! outcome.set_object_property("payload", vec![1u8, 2, 3]);
//!
//! assert!(outcome.status());
//! assert_eq!(outcome.property("rows"), Some("42"));
//! assert_eq!(
//!     outcome.object_property::<Vec<u8>>("payload"),
//!     Some(&vec![1u8, 2, 3])
//! );
//! ```

use std::{any::Any, collections::HashMap, error::Error, fmt};

/// Environment flag enabling verbose mutation tracing to stderr.
pub const CONSOLE_TRACING_VAR: &str = "OUTCOME_CONSOLE_TRACING";

type BoxedError = Box<dyn Error + Send + Sync + 'static>;

/// Mutable value object for returning complex multi-part results.
///
/// The success flag is tri-state: reading it before it was ever set yields
/// `false`, never an error. Missing properties read as `None`. The object
/// property map stores values type-erased; typed access goes through
/// [`Outcome::object_property`], which downcasts at the call site.
///
/// An `Outcome` is a single-owner value. It is not meant to be shared
/// across threads without external synchronization.
pub struct Outcome {
    status: Option<bool>,
    error: Option<BoxedError>,
    string_properties: HashMap<String, String>,
    object_properties: HashMap<String, Box<dyn Any>>,
    console_tracing: bool,
}

impl Outcome {
    /// Create a fresh outcome with everything unset.
    ///
    /// The `OUTCOME_CONSOLE_TRACING` environment flag is read here: the
    /// value `true` (case-insensitive) enables verbose tracing of every
    /// mutation to stderr for the lifetime of this instance.
    pub fn new() -> Self {
        Outcome {
            status: None,
            error: None,
            string_properties: HashMap::new(),
            object_properties: HashMap::new(),
            console_tracing: console_tracing_enabled(),
        }
    }

    /// The success flag; `false` if it was never set.
    pub fn status(&self) -> bool {
        self.status.unwrap_or(false)
    }

    /// Whether the success flag was explicitly assigned.
    pub fn is_set(&self) -> bool {
        self.status.is_some()
    }

    /// Store the success flag.
    pub fn set_status(&mut self, status: bool) {
        self.trace(format_args!("set_status: {}", status));
        self.status = Some(status);
    }

    /// The captured error, if any.
    pub fn error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.error.as_deref()
    }

    /// Capture an error. Does not alter the success flag.
    pub fn set_error(&mut self, error: impl Into<BoxedError>) {
        let error = error.into();
        self.trace(format_args!("set_error: {}", error));
        self.error = Some(error);
    }

    /// Take ownership of the captured error, leaving the slot empty.
    pub fn take_error(&mut self) -> Option<BoxedError> {
        self.error.take()
    }

    /// Set a string-valued property. Replaces any previous value.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        self.trace(format_args!("set_property: {} = {}", name, value));
        self.string_properties.insert(name, value);
    }

    /// Read a string-valued property; `None` if the name is unknown.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.string_properties.get(name).map(String::as_str)
    }

    /// Set an object-valued property. Replaces any previous value.
    ///
    /// The value is stored type-erased; the producer must document the
    /// real type out of band. Independent namespace from the string
    /// properties.
    pub fn set_object_property<T: Any>(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        self.trace(format_args!(
            "set_object_property: {} ({})",
            name,
            std::any::type_name::<T>()
        ));
        self.object_properties.insert(name, Box::new(value));
    }

    /// Read an object-valued property as `T`.
    ///
    /// Returns `None` when the name is unknown or the stored value is not
    /// a `T`; never panics.
    pub fn object_property<T: Any>(&self, name: &str) -> Option<&T> {
        self.object_properties
            .get(name)
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Whether this instance traces mutations to stderr.
    pub fn console_tracing(&self) -> bool {
        self.console_tracing
    }

    fn trace(&self, message: fmt::Arguments<'_>) {
        if self.console_tracing {
            eprintln!("[outcome] {}", message);
        }
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outcome")
            .field("status", &self.status)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .field("string_properties", &self.string_properties)
            .field(
                "object_properties",
                &self.object_properties.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn console_tracing_enabled() -> bool {
    std::env::var(CONSOLE_TRACING_VAR)
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryError;

    #[test]
    fn test_fresh_status_is_false() {
        let outcome = Outcome::new();
        assert!(!outcome.status());
        assert!(!outcome.is_set());
    }

    #[test]
    fn test_set_status() {
        let mut outcome = Outcome::new();

        outcome.set_status(true);
        assert!(outcome.status());
        assert!(outcome.is_set());

        outcome.set_status(false);
        assert!(!outcome.status());
        assert!(outcome.is_set());
    }

    #[test]
    fn test_error_capture_leaves_status_alone() {
        let mut outcome = Outcome::new();
        assert!(outcome.error().is_none());

        outcome.set_error(RegistryError::Lock);
        assert!(!outcome.is_set());
        assert_eq!(
            outcome.error().map(|e| e.to_string()),
            Some("failed to acquire registry lock".to_string())
        );
    }

    #[test]
    fn test_take_error() {
        let mut outcome = Outcome::new();
        outcome.set_error(RegistryError::Lock);

        let taken = outcome.take_error().expect("error was set");
        assert_eq!(taken.to_string(), "failed to acquire registry lock");
        assert!(outcome.error().is_none());
    }

    #[test]
    fn test_missing_properties_read_as_none() {
        let outcome = Outcome::new();
        assert_eq!(outcome.property("missing"), None);
        assert_eq!(outcome.object_property::<i32>("missing"), None);
    }

    #[test]
    fn test_string_property_overwrite() {
        let mut outcome = Outcome::new();
        outcome.set_property("rows", "1");
        outcome.set_property("rows", "2");
        assert_eq!(outcome.property("rows"), Some("2"));
    }

    #[test]
    fn test_property_namespaces_are_independent() {
        let mut outcome = Outcome::new();
        outcome.set_property("x", "1");
        outcome.set_object_property("x", 42i32);

        assert_eq!(outcome.property("x"), Some("1"));
        assert_eq!(outcome.object_property::<i32>("x"), Some(&42));
    }

    #[test]
    fn test_object_property_wrong_type_reads_as_none() {
        let mut outcome = Outcome::new();
        outcome.set_object_property("x", 42i32);
        assert_eq!(outcome.object_property::<String>("x"), None);
    }

    #[test]
    fn test_debug_lists_object_property_names_only() {
        let mut outcome = Outcome::new();
        outcome.set_object_property("payload", vec![0u8; 4]);
        let rendered = format!("{:?}", outcome);
        assert!(rendered.contains("payload"));
    }
}
