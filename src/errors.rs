//! Error types for construct and synthesis operations

use thiserror::Error;

use crate::domain::{ValidationError, ZoneNameError};

/// Errors that can occur while building or synthesizing a construct tree
///
/// Every variant is raised synchronously by the call that received the bad
/// input, except [`ConstructError::AttributeUnavailable`], which is raised
/// only when the unavailable accessor is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// A field the schema marks as required was not supplied
    #[error("{kind}: missing required field '{field}'")]
    MissingRequiredField { kind: String, field: String },

    /// A field was supplied with a value of the wrong shape
    #[error("{kind}: field '{field}' expects {expected}, got {actual}")]
    InvalidFieldType {
        kind: String,
        field: String,
        expected: String,
        actual: String,
    },

    /// A field name that the schema does not declare
    #[error("{kind}: unknown field '{field}'")]
    UnknownField { kind: String, field: String },

    /// An attribute name that the resource type does not expose
    #[error("{resource_type}: unknown attribute '{attribute}'")]
    UnknownAttribute {
        resource_type: String,
        attribute: String,
    },

    /// A construct id is already taken within its scope
    #[error("There is already a construct with id '{id}' in scope '{scope}'")]
    DuplicateConstructId { scope: String, id: String },

    /// A construct id that cannot be used as a path segment
    #[error("Invalid construct id '{0}': ids must be non-empty and must not contain '/'")]
    InvalidConstructId(String),

    /// A construct still referenced by a resource outside the removed subtree
    #[error("Cannot remove '{path}': resource {referenced_by} still references {logical_id}")]
    StillReferenced {
        path: String,
        logical_id: String,
        referenced_by: String,
    },

    /// The scope a construct is being added to does not exist
    #[error("Scope '{0}' does not exist")]
    UnknownScope(String),

    /// An attribute that cannot be known for this construct
    #[error("{construct}: attribute '{attribute}' is unavailable: {reason}")]
    AttributeUnavailable {
        construct: String,
        attribute: String,
        reason: String,
    },

    /// A context lookup was attempted in an environment-agnostic stack
    #[error(
        "Cannot retrieve value from context provider {provider} since account/region are not \
         specified at the stack level"
    )]
    MissingEnvironment { provider: String },

    /// A context lookup returned an error or an unusable value
    #[error("Context lookup '{key}' failed: {message}")]
    LookupFailed { key: String, message: String },

    /// A record target carrying both literal values and an alias target
    #[error("RecordTarget accepts either values or an alias target, not both")]
    ConflictingRecordTarget,

    /// A record target carrying neither literal values nor an alias target
    #[error("RecordTarget requires either values or an alias target")]
    EmptyRecordTarget,

    /// An argument outside of its accepted range or combination
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// Zone name validation failed
    #[error(transparent)]
    ZoneName(#[from] ZoneNameError),

    /// Domain invariant validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Template serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error while reading a context file
    #[error("I/O error: {0}")]
    Io(String),
}

impl ConstructError {
    /// Shorthand for [`ConstructError::InvalidArgument`]
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }
}

/// Result type for construct operations
pub type ConstructResult<T> = Result<T, ConstructError>;

impl From<serde_json::Error> for ConstructError {
    fn from(err: serde_json::Error) -> Self {
        ConstructError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConstructError {
    fn from(err: serde_yaml::Error) -> Self {
        ConstructError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ConstructError {
    fn from(err: std::io::Error) -> Self {
        ConstructError::Io(err.to_string())
    }
}
