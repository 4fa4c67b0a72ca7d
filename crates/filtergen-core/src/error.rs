//! Error types for the filtergen workspace.
//!
//! This module provides the error hierarchy shared by the symbol graph, the
//! discovery engine, and the generators.
//!
//! # Examples
//!
//! ```
//! use filtergen_core::{Error, Result};
//!
//! fn require_key(key: &str, present: bool) -> Result<()> {
//!     if !present {
//!         return Err(Error::MissingTemplateVariable {
//!             key: key.to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_key("packageName", false).unwrap_err();
//! assert!(err.is_missing_template_variable());
//! ```

use thiserror::Error;

/// Main error type for filtergen.
///
/// All errors in the workspace use this type, providing consistent error
/// handling across the symbol, discovery, and generation crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Rust source text could not be parsed into the symbol graph.
    #[error("Failed to parse source '{file}': {message}")]
    Parse {
        /// Name under which the source was registered
        file: String,
        /// Parser error description
        message: String,
    },

    /// A configured type name does not resolve in the symbol graph.
    ///
    /// Raised when a provider, pipe owner, or handler owner named by a
    /// projection's exposure configuration is not present in any registered
    /// source.
    #[error("Unresolved type reference: {name}")]
    UnresolvedType {
        /// The type path that failed to resolve
        name: String,
    },

    /// A routine does not match its required structural signature.
    ///
    /// Raised when a computed-attribute routine, pipe routine, or handler
    /// routine fails its exact shape check.
    #[error("Invalid signature on {member}: {reason}")]
    ShapeViolation {
        /// Qualified name of the offending member
        member: String,
        /// Description of the expected shape and the mismatch
        reason: String,
    },

    /// A template name is not registered with the template engine.
    #[error("Unknown template: {name}")]
    UnknownTemplate {
        /// The requested template name
        name: String,
    },

    /// A placeholder key was not present in the rendering context.
    ///
    /// Rendering aborts without producing partial output.
    #[error("Missing template variable: {key}")]
    MissingTemplateVariable {
        /// The placeholder key that failed to resolve
        key: String,
    },

    /// A placeholder key resolved to the null value.
    ///
    /// Null values are never silently converted to empty text.
    #[error("Invalid template variable (null value): {key}")]
    InvalidTemplateVariable {
        /// The placeholder key bound to null
        key: String,
    },

    /// Writing a generated artifact failed.
    #[error("Failed to write artifact '{artifact}'")]
    ArtifactWrite {
        /// Qualified name of the artifact being persisted
        artifact: String,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Generator configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },
}

impl Error {
    /// Returns `true` if this is a source parse error.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::Error;
    ///
    /// let err = Error::Parse {
    ///     file: "dto.rs".to_string(),
    ///     message: "unexpected token".to_string(),
    /// };
    /// assert!(err.is_parse_error());
    /// ```
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns `true` if this is an unresolved type reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::Error;
    ///
    /// let err = Error::UnresolvedType {
    ///     name: "crate::ops::Missing".to_string(),
    /// };
    /// assert!(err.is_unresolved_type());
    /// ```
    #[must_use]
    pub const fn is_unresolved_type(&self) -> bool {
        matches!(self, Self::UnresolvedType { .. })
    }

    /// Returns `true` if this is a signature shape violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::Error;
    ///
    /// let err = Error::ShapeViolation {
    ///     member: "GeoOps::region".to_string(),
    ///     reason: "expected (&str, &[Value])".to_string(),
    /// };
    /// assert!(err.is_shape_violation());
    /// ```
    #[must_use]
    pub const fn is_shape_violation(&self) -> bool {
        matches!(self, Self::ShapeViolation { .. })
    }

    /// Returns `true` if this is a missing-template-variable error.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::Error;
    ///
    /// let err = Error::MissingTemplateVariable {
    ///     key: "enumName".to_string(),
    /// };
    /// assert!(err.is_missing_template_variable());
    /// ```
    #[must_use]
    pub const fn is_missing_template_variable(&self) -> bool {
        matches!(self, Self::MissingTemplateVariable { .. })
    }

    /// Returns `true` if this is an invalid (null) template variable error.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::Error;
    ///
    /// let err = Error::InvalidTemplateVariable {
    ///     key: "constants".to_string(),
    /// };
    /// assert!(err.is_invalid_template_variable());
    /// ```
    #[must_use]
    pub const fn is_invalid_template_variable(&self) -> bool {
        matches!(self, Self::InvalidTemplateVariable { .. })
    }

    /// Returns `true` if this is an artifact write error.
    #[must_use]
    pub const fn is_artifact_write(&self) -> bool {
        matches!(self, Self::ArtifactWrite { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Result type alias for filtergen operations.
///
/// # Examples
///
/// ```
/// use filtergen_core::{Error, Result};
///
/// fn validate_suffix(suffix: &str) -> Result<()> {
///     if suffix.is_empty() {
///         return Err(Error::Config {
///             message: "reference suffix cannot be empty".to_string(),
///         });
///     }
///     Ok(())
/// }
///
/// assert!(validate_suffix("Ref").is_ok());
/// assert!(validate_suffix("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
