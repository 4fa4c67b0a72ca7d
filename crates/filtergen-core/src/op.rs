//! Comparison operator tags.
//!
//! The closed set of operators a filterable attribute may allow. Operators
//! travel with attribute metadata from discovery through every generator and
//! render into emitted source as `Op::<Name>` expressions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator tag.
///
/// The ordered list attached to an attribute is preserved exactly as
/// discovered; emission never re-sorts it.
///
/// # Examples
///
/// ```
/// use filtergen_core::Op;
///
/// assert_eq!(Op::Eq.code(), "Op::Eq");
/// assert_eq!(Op::parse("Matches"), Some(Op::Matches));
/// assert_eq!(Op::parse("Like"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    /// Equality.
    Eq,
    /// Inequality.
    Ne,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Pattern containment match (text).
    Matches,
    /// Membership in a value set.
    In,
    /// Inclusive bounds range.
    Range,
    /// Null / absence check.
    IsNull,
}

impl Op {
    /// All operators, in canonical declaration order.
    pub const ALL: [Self; 10] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Matches,
        Self::In,
        Self::Range,
        Self::IsNull,
    ];

    /// Parses an operator from its tag identifier.
    ///
    /// Returns `None` for unknown identifiers; callers decide whether that
    /// is a diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::Op;
    ///
    /// assert_eq!(Op::parse("Gte"), Some(Op::Gte));
    /// assert_eq!(Op::parse("IsNull"), Some(Op::IsNull));
    /// assert_eq!(Op::parse("gte"), None);
    /// ```
    #[must_use]
    pub fn parse(ident: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == ident)
    }

    /// Returns the bare tag name, e.g. `"Eq"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eq => "Eq",
            Self::Ne => "Ne",
            Self::Gt => "Gt",
            Self::Gte => "Gte",
            Self::Lt => "Lt",
            Self::Lte => "Lte",
            Self::Matches => "Matches",
            Self::In => "In",
            Self::Range => "Range",
            Self::IsNull => "IsNull",
        }
    }

    /// Returns the expression form used in emitted source, e.g. `"Op::Eq"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::Op;
    ///
    /// assert_eq!(Op::Range.code(), "Op::Range");
    /// ```
    #[must_use]
    pub fn code(self) -> String {
        format!("Op::{}", self.name())
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
