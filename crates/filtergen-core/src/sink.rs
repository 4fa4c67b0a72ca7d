//! Artifact persistence.
//!
//! Generated source text is handed to an [`ArtifactSink`] keyed by qualified
//! name. The hosting build normally supplies the sink; [`FsSink`] writes a
//! conventional directory layout and [`MemorySink`] keeps artifacts in memory
//! for inspection.

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Persists one generated artifact per call.
///
/// Writes are synchronous, unbuffered, single-pass, with no retry. A sink
/// receives each artifact at most once per generation pass.
pub trait ArtifactSink: std::fmt::Debug {
    /// Persists `contents` under `qualified_name` (e.g. `crate::dto::AddressViewRef`).
    fn write(&mut self, qualified_name: &str, contents: &str) -> Result<()>;
}

/// In-memory sink preserving write order.
///
/// # Examples
///
/// ```
/// use filtergen_core::{ArtifactSink, MemorySink};
///
/// let mut sink = MemorySink::new();
/// sink.write("gen::contexts", "// generated").unwrap();
/// assert_eq!(sink.artifacts().len(), 1);
/// assert_eq!(sink.get("gen::contexts"), Some("// generated"));
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Vec<(String, String)>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All artifacts, in write order.
    #[must_use]
    pub fn artifacts(&self) -> &[(String, String)] {
        &self.artifacts
    }

    /// Looks up an artifact's contents by qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|(name, _)| name == qualified_name)
            .map(|(_, contents)| contents.as_str())
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, qualified_name: &str, contents: &str) -> Result<()> {
        self.artifacts
            .push((qualified_name.to_string(), contents.to_string()));
        Ok(())
    }
}

/// Filesystem sink mapping `a::b::C` to `<root>/a/b/C.rs`.
#[derive(Debug)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// Creates a sink rooted at `root`. The directory is created on first
    /// write, not here.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, qualified_name: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in qualified_name.split("::") {
            path.push(segment);
        }
        path.set_extension("rs");
        path
    }
}

impl ArtifactSink for FsSink {
    fn write(&mut self, qualified_name: &str, contents: &str) -> Result<()> {
        let path = self.path_for(qualified_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::ArtifactWrite {
                artifact: qualified_name.to_string(),
                source,
            })?;
        }
        fs::write(&path, contents).map_err(|source| Error::ArtifactWrite {
            artifact: qualified_name.to_string(),
            source,
        })?;
        tracing::debug!(artifact = %qualified_name, path = %path.display(), "wrote artifact");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_preserves_order() {
        let mut sink = MemorySink::new();
        sink.write("b::B", "2").unwrap();
        sink.write("a::A", "1").unwrap();
        let names: Vec<_> = sink.artifacts().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b::B", "a::A"]);
    }

    #[test]
    fn test_memory_sink_lookup() {
        let mut sink = MemorySink::new();
        sink.write("x::Y", "body").unwrap();
        assert_eq!(sink.get("x::Y"), Some("body"));
        assert_eq!(sink.get("x::Z"), None);
    }

    #[test]
    fn test_fs_sink_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSink::new(dir.path());
        sink.write("crate::dto::AddressViewRef", "pub enum AddressViewRef {}")
            .unwrap();

        let expected = dir.path().join("crate").join("dto").join("AddressViewRef.rs");
        let written = fs::read_to_string(expected).unwrap();
        assert_eq!(written, "pub enum AddressViewRef {}");
    }

    #[test]
    fn test_fs_sink_single_segment() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsSink::new(dir.path());
        sink.write("contexts", "// module").unwrap();
        assert!(dir.path().join("contexts.rs").exists());
    }
}
