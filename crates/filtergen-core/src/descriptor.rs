//! Projection descriptors and endpoint exposure configuration.
//!
//! A [`ProjectionDescriptor`] identifies one source type being processed:
//! its qualified path, backing entity, the ordered attribute metadata list
//! produced by discovery, and the optional endpoint exposure configuration.
//! Descriptors are constructed by the discovery engine, never mutated
//! afterwards, and handed by reference to each generator.

use crate::AttributeMetadata;
use serde::{Deserialize, Serialize};

/// Declared result shape of a projection's query endpoint.
///
/// # Examples
///
/// ```
/// use filtergen_core::Strategy;
///
/// assert_eq!(Strategy::parse("list"), Some(Strategy::List));
/// assert_eq!(Strategy::parse("table"), None);
/// assert_eq!(Strategy::default(), Strategy::Projected);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Generic key-value paginated result.
    #[default]
    Projected,
    /// Paginated result parameterized by the projection type.
    Paginated,
    /// Bare list parameterized by the projection type.
    List,
    /// Shape taken from the user-supplied handler's own return type.
    Custom,
}

impl Strategy {
    /// Parses a strategy from its configuration tag value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "projected" => Some(Self::Projected),
            "paginated" => Some(Self::Paginated),
            "list" => Some(Self::List),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Reference to a routine on a named type, e.g. `crate::pipes::Normalize::apply`.
///
/// Used for pipe and handler configuration: the owner path locates the type
/// in the symbol graph, the method names the routine to validate and call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRef {
    /// Path of the type declaring the routine, as written in the tag.
    pub owner: String,
    /// Routine name.
    pub method: String,
}

impl MethodRef {
    /// Creates a method reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::MethodRef;
    ///
    /// let r = MethodRef::new("crate::pipes::Normalize", "apply");
    /// assert_eq!(r.qualified(), "crate::pipes::Normalize::apply");
    /// ```
    #[must_use]
    pub fn new(owner: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            method: method.into(),
        }
    }

    /// Returns the fully qualified `owner::method` form.
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("{}::{}", self.owner, self.method)
    }
}

/// One auxiliary provider contributing computed attributes to a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRef {
    /// Path of the provider type, as written in the projection tag.
    pub path: String,
    /// Optional named-instance key disambiguating provider instances.
    pub instance_key: Option<String>,
}

/// Endpoint exposure configuration attached to a projection.
///
/// All fields are optional in source; generators apply naming defaults at
/// emission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureConfig {
    /// Exposed resource name; kebab-cased simple name when absent.
    pub name: Option<String>,
    /// Base URI path prefix; empty when absent.
    pub base_path: Option<String>,
    /// Endpoint method name; `search_<snake(simple)>` when absent.
    pub endpoint: Option<String>,
    /// Declared result shape.
    pub strategy: Strategy,
    /// Ordered request pre-processing pipes.
    pub pipes: Vec<MethodRef>,
    /// Explicit dispatch handler; the default search dispatch when absent.
    pub handler: Option<MethodRef>,
}

/// Identity and discovered content of one projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionDescriptor {
    /// Qualified path of the projection type, e.g. `crate::dto::AddressView`.
    pub path: String,
    /// Module path containing the projection, e.g. `crate::dto`.
    pub module: String,
    /// Simple type name, e.g. `AddressView`.
    pub simple_name: String,
    /// Qualified path of the backing entity type.
    pub entity: String,
    /// Ordered attribute metadata, in discovery order.
    pub attributes: Vec<AttributeMetadata>,
    /// Endpoint exposure configuration, when the projection is exposed.
    pub exposure: Option<ExposureConfig>,
}

impl ProjectionDescriptor {
    /// Returns `true` if any attribute requires shared-instance resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::{AttributeMetadata, Op, ProjectionDescriptor};
    ///
    /// let desc = ProjectionDescriptor {
    ///     path: "crate::dto::AddressView".to_string(),
    ///     module: "crate::dto".to_string(),
    ///     simple_name: "AddressView".to_string(),
    ///     entity: "crate::model::Address".to_string(),
    ///     attributes: vec![AttributeMetadata::direct("CITY", "city", vec![Op::Eq])],
    ///     exposure: None,
    /// };
    /// assert!(!desc.needs_instance_resolution());
    /// ```
    #[must_use]
    pub fn needs_instance_resolution(&self) -> bool {
        self.attributes
            .iter()
            .any(AttributeMetadata::needs_instance_resolution)
    }
}
