//! Host-visible diagnostics.
//!
//! Every discovery or validation failure is reported bound to the graph
//! element that caused it, in the order encountered. The hosting build reads
//! the collection after a pass; nothing here aborts processing. Each push is
//! also logged through `tracing`.

use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A failure that degraded one artifact or fragment.
    Error,
    /// A suspicious condition that did not degrade output.
    Warning,
    /// Informational note.
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
            Self::Note => f.write_str("note"),
        }
    }
}

/// One diagnostic, bound to the element that originated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the diagnostic.
    pub severity: Severity,
    /// Qualified name of the originating graph element.
    pub element: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.element, self.message)
    }
}

/// Ordered diagnostic collection for one generation pass.
///
/// # Examples
///
/// ```
/// use filtergen_core::{Diagnostics, Severity};
///
/// let mut diags = Diagnostics::new();
/// diags.warning("crate::dto::Empty", "no filterable attributes found");
/// assert!(!diags.has_errors());
/// assert_eq!(diags.iter().count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error bound to `element`.
    pub fn error(&mut self, element: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, element.into(), message.into());
    }

    /// Records a warning bound to `element`.
    pub fn warning(&mut self, element: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, element.into(), message.into());
    }

    /// Records a note bound to `element`.
    pub fn note(&mut self, element: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Note, element.into(), message.into());
    }

    fn push(&mut self, severity: Severity, element: String, message: String) {
        match severity {
            Severity::Error => tracing::error!(element = %element, "{message}"),
            Severity::Warning => tracing::warn!(element = %element, "{message}"),
            Severity::Note => tracing::debug!(element = %element, "{message}"),
        }
        self.entries.push(Diagnostic {
            severity,
            element,
            message,
        });
    }

    /// Returns `true` if any error-severity diagnostic was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Iterates diagnostics in the order recorded.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of recorded diagnostics.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
