//! Attribute metadata model.
//!
//! One [`AttributeMetadata`] value describes one exposed, filterable
//! attribute of a projection. Metadata is created during the discovery pass,
//! is immutable afterwards, and is consumed by all three generators.
//!
//! Direct and computed attributes are the two kinds of the
//! [`AttributeKind`] union: a direct attribute is backed by a literal
//! storage path on the entity; a computed attribute delegates to a provider
//! routine returning a query-predicate wrapper.

use crate::Op;
use serde::{Deserialize, Serialize};

/// Metadata for one exposed attribute (direct or computed).
///
/// # Examples
///
/// ```
/// use filtergen_core::{AttributeMetadata, Op};
///
/// let direct = AttributeMetadata::direct("CITY", "city", vec![Op::Eq, Op::Matches]);
/// assert!(!direct.is_computed());
/// assert_eq!(direct.reference, "CITY");
///
/// let computed = AttributeMetadata::computed(
///     "REGION",
///     "region",
///     vec![Op::Eq],
///     "crate::ops::GeoOps",
///     None,
///     true,
/// );
/// assert!(computed.is_computed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMetadata {
    /// The exposed constant identifier, unique within a projection.
    pub reference: String,
    /// Allowed comparison operators, in discovery order. Never empty.
    pub operators: Vec<Op>,
    /// Direct storage path or computed-routine details.
    pub kind: AttributeKind,
}

/// The two attribute kinds.
///
/// Modeled as a tagged union rather than subclassing: each kind carries its
/// own payload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Backed by a literal storage path on the entity.
    Direct {
        /// The underlying field name, used verbatim as the storage path.
        path: String,
    },
    /// Backed by a provider routine returning a query-predicate wrapper.
    Computed {
        /// The computation routine name on the provider type.
        method: String,
        /// Qualified path of the provider type declaring the routine.
        provider: String,
        /// Named-instance key disambiguating multiple provider instances.
        ///
        /// Ignored at emission time when `is_static` is true.
        instance_key: Option<String>,
        /// True if the routine is invocable without a provider instance.
        is_static: bool,
    },
}

impl AttributeMetadata {
    /// Creates metadata for a direct attribute.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::{AttributeKind, AttributeMetadata, Op};
    ///
    /// let meta = AttributeMetadata::direct("STREET", "street", vec![Op::Eq]);
    /// assert_eq!(meta.kind, AttributeKind::Direct { path: "street".to_string() });
    /// ```
    #[must_use]
    pub fn direct(
        reference: impl Into<String>,
        path: impl Into<String>,
        operators: Vec<Op>,
    ) -> Self {
        Self {
            reference: reference.into(),
            operators,
            kind: AttributeKind::Direct { path: path.into() },
        }
    }

    /// Creates metadata for a computed attribute contributed by a provider.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::{AttributeMetadata, Op};
    ///
    /// let meta = AttributeMetadata::computed(
    ///     "TENANT",
    ///     "tenant_filter",
    ///     vec![Op::Eq],
    ///     "crate::ops::TenancyOps",
    ///     Some("tenancy".to_string()),
    ///     false,
    /// );
    /// assert!(meta.is_computed());
    /// ```
    #[must_use]
    pub fn computed(
        reference: impl Into<String>,
        method: impl Into<String>,
        operators: Vec<Op>,
        provider: impl Into<String>,
        instance_key: Option<String>,
        is_static: bool,
    ) -> Self {
        Self {
            reference: reference.into(),
            operators,
            kind: AttributeKind::Computed {
                method: method.into(),
                provider: provider.into(),
                instance_key,
                is_static,
            },
        }
    }

    /// Returns `true` if this attribute is computed.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::{AttributeMetadata, Op};
    ///
    /// let meta = AttributeMetadata::direct("AGE", "age", vec![Op::Eq]);
    /// assert!(!meta.is_computed());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        matches!(self.kind, AttributeKind::Computed { .. })
    }

    /// Returns `true` if this attribute requires a shared-instance resolver
    /// at registration time.
    ///
    /// Only computed attributes whose routine is not static need instance
    /// resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::{AttributeMetadata, Op};
    ///
    /// let stat = AttributeMetadata::computed("A", "a", vec![Op::Eq], "T", None, true);
    /// let inst = AttributeMetadata::computed("B", "b", vec![Op::Eq], "T", None, false);
    /// assert!(!stat.needs_instance_resolution());
    /// assert!(inst.needs_instance_resolution());
    /// ```
    #[must_use]
    pub const fn needs_instance_resolution(&self) -> bool {
        matches!(
            self.kind,
            AttributeKind::Computed {
                is_static: false,
                ..
            }
        )
    }

    /// The underlying source name: the storage path for a direct attribute,
    /// the routine name for a computed one.
    #[must_use]
    pub fn source_name(&self) -> &str {
        match &self.kind {
            AttributeKind::Direct { path } => path,
            AttributeKind::Computed { method, .. } => method,
        }
    }
}
