use thiserror::Error;

/// Errors reported by the fallible registry operations.
///
/// Untyped reads (`retrieve`) and writes (`register`) are total and never
/// produce these; only the typed retrieval paths and the by-type-name
/// default resolution can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The entries lock was poisoned by a panic in another thread.
    #[error("failed to acquire registry lock")]
    Lock,

    /// No value is registered under the requested name.
    #[error("no entry registered under name: {name}")]
    NotFound { name: String },

    /// The entry under the requested name holds a different type.
    #[error("type mismatch for entry {name}: expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },

    /// The type name could not be resolved in the catalog, so no default
    /// was installed.
    #[error("unknown type name: {type_name}")]
    UnknownTypeName { type_name: String },
}
