//! Symbol graph and attribute discovery for filtergen.
//!
//! Parses annotated Rust source into a read-only symbol graph, then walks it
//! to discover filterable projections: their direct attributes, the computed
//! attributes contributed by provider types, and the endpoint exposure
//! configuration. Computed-attribute routines are validated against an exact
//! structural signature before they are admitted.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod discover;
pub mod graph;
pub mod tags;
pub mod typing;

pub use discover::DiscoveryEngine;
pub use graph::{FieldSymbol, MethodSymbol, StructSymbol, SymbolGraph};
