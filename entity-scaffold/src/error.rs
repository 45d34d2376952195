//! Error types and error handling

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Broad category of a [`ScaffoldError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced type does not exist
    NotFound,
    /// The model class or the crate settings do not match the expected layout
    Configuration,
    /// A value handed to a generator cannot be interpreted
    InvalidInput,
}

/// Scaffold derivation error
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The class is unknown to the type registry
    #[error("The class \"{0}\" does not exist.")]
    ClassNotFound(String),

    /// No registered bundle namespace is a prefix of the class
    #[error("No registered bundle owns the class \"{0}\".")]
    BundleNotFound(String),

    /// The class does not live under its bundle's entity directory
    #[error("The model class should contain \"{entity_root}\" (got \"{class}\").")]
    OutsideEntityRoot {
        /// Offending class name
        class: String,
        /// Expected `<BundleNamespace>\Entity\` prefix
        entity_root: String,
    },

    /// The class name has an empty namespace segment below the entity root
    #[error("The class \"{0}\" has an empty namespace segment.")]
    EmptySegment(String),

    /// The enum value provider has no values for the type
    #[error("Unknown enum type \"{0}\".")]
    UnknownEnumType(String),

    /// A date or datetime fixture value could not be parsed
    #[error("Invalid date value \"{0}\".")]
    InvalidDate(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl ScaffoldError {
    /// Category of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ClassNotFound(_) => ErrorKind::NotFound,
            Self::BundleNotFound(_) | Self::OutsideEntityRoot { .. } | Self::Config(_) => {
                ErrorKind::Configuration
            }
            Self::EmptySegment(_) | Self::UnknownEnumType(_) | Self::InvalidDate(_) => {
                ErrorKind::InvalidInput
            }
        }
    }
}

impl From<figment::Error> for ScaffoldError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
