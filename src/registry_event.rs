/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via
/// `Registry::set_trace_callback`. The `Clone` derive allows callbacks to
/// store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use shared_registry::RegistryEvent;
///
/// let event = RegistryEvent::Register { name: "db".to_string() };
/// println!("{:?}", event);
/// ```
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// A value was registered under a name.
    Register {
        /// The registry key the value was stored under
        name: String,
    },

    /// A value was requested from the registry.
    Retrieve {
        /// The registry key that was requested
        name: String,
        /// Whether a value was present under the key
        found: bool,
    },

    /// A key existence check was performed.
    Contains {
        /// The registry key that was checked
        name: String,
        /// Whether the key exists in the registry
        found: bool,
    },

    /// A get-or-default operation completed.
    RetrieveOrDefault {
        /// The registry key that was requested
        name: String,
        /// Whether this call installed the default value
        default_installed: bool,
    },

    /// The registry was cleared.
    Clear {},
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register { name } => {
                write!(f, "register {{ name: {} }}", name)
            }
            RegistryEvent::Retrieve { name, found } => {
                write!(f, "retrieve {{ name: {}, found: {} }}", name, found)
            }
            RegistryEvent::Contains { name, found } => {
                write!(f, "contains {{ name: {}, found: {} }}", name, found)
            }
            RegistryEvent::RetrieveOrDefault {
                name,
                default_installed,
            } => {
                write!(
                    f,
                    "retrieve_or_default {{ name: {}, default_installed: {} }}",
                    name, default_installed
                )
            }
            RegistryEvent::Clear {} => write!(f, "Clearing the Registry"),
        }
    }
}
