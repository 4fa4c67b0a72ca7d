//! Template-driven source generation for filtergen.
//!
//! Consumes discovered projection descriptors and materializes the three
//! generated artifacts through a strict `${placeholder}` template engine:
//!
//! 1. one reference enum per projection,
//! 2. one registration module of filter-context factories,
//! 3. one endpoint module with a search operation per exposed projection.
//!
//! The [`Orchestrator`] owns all cross-round state for a generation pass and
//! drives the generators in discovery order, so output text is deterministic
//! for a fixed input graph.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod context;
pub mod endpoints;
pub mod orchestrator;
pub mod reference;
pub mod template;

pub use context::ContextModuleGenerator;
pub use endpoints::EndpointModuleGenerator;
pub use orchestrator::Orchestrator;
pub use reference::ReferenceEnumGenerator;
pub use template::{RenderContext, TemplateEngine};
