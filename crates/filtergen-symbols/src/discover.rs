//! The discovery and validation engine.
//!
//! Walks a projection's declared type and its configured providers and
//! produces the ordered attribute metadata list:
//!
//! 1. the root struct's own public fields, in declaration order, become
//!    direct attributes;
//! 2. each provider's public tagged methods, in configuration then
//!    declaration order, become computed attributes after an exact shape
//!    check;
//! 3. reference names are unique across both steps — the first registration
//!    wins and later duplicates are silently dropped (a deliberate policy;
//!    an error might be the safer contract, see DESIGN.md);
//! 4. discovery order is preserved through every downstream emission.
//!
//! Shape-validation failures are reported per member and never abort the
//! pass.

use crate::graph::{MethodSymbol, SymbolGraph};
use crate::tags;
use crate::typing;
use filtergen_core::naming;
use filtergen_core::{AttributeMetadata, Diagnostics, Op, ProjectionDescriptor};
use std::collections::HashSet;

/// Discovers attribute metadata for projection types in a symbol graph.
///
/// # Examples
///
/// ```
/// use filtergen_core::Diagnostics;
/// use filtergen_symbols::{DiscoveryEngine, SymbolGraph};
///
/// let mut graph = SymbolGraph::new();
/// graph
///     .add_source(
///         "crate::dto",
///         "dto.rs",
///         r"#[projection(entity = crate::model::Address)]
///           pub struct AddressView { pub street: String, pub city: String }",
///     )
///     .unwrap();
///
/// let engine = DiscoveryEngine::new(&graph);
/// let mut diagnostics = Diagnostics::new();
/// let descriptor = engine
///     .analyze("crate::dto::AddressView", &mut diagnostics)
///     .unwrap();
/// assert_eq!(descriptor.attributes.len(), 2);
/// assert_eq!(descriptor.attributes[0].reference, "STREET");
/// ```
#[derive(Debug)]
pub struct DiscoveryEngine<'g> {
    graph: &'g SymbolGraph,
}

impl<'g> DiscoveryEngine<'g> {
    /// Creates an engine over a read-only symbol graph.
    #[inline]
    #[must_use]
    pub const fn new(graph: &'g SymbolGraph) -> Self {
        Self { graph }
    }

    /// Analyzes one projection root and builds its descriptor.
    ///
    /// Returns `None` when the root does not resolve or carries no usable
    /// `#[projection]` tag; all failures are recorded in `diagnostics`.
    pub fn analyze(
        &self,
        root: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<ProjectionDescriptor> {
        let Some(structure) = self.graph.resolve_struct(root) else {
            diagnostics.error(root, "unresolved projection type");
            return None;
        };

        let tag = match tags::projection_tag(&structure.attrs) {
            Ok(Some(tag)) => tag,
            Ok(None) => {
                diagnostics.error(&structure.path, "missing `#[projection]` tag");
                return None;
            }
            Err(e) => {
                diagnostics.error(&structure.path, format!("invalid `#[projection]` tag: {e}"));
                return None;
            }
        };

        let mut attributes: Vec<AttributeMetadata> = Vec::new();
        let mut observed: HashSet<String> = HashSet::new();

        // Step 1: direct attributes from the root's own fields.
        for field in &structure.fields {
            if !field.is_public || tags::is_not_filterable(&field.attrs) {
                continue;
            }
            let member = format!("{}::{}", structure.path, field.ident);
            let exposed = match tags::exposed_tag(&field.attrs) {
                Ok(t) => t,
                Err(e) => {
                    diagnostics.error(&member, format!("invalid `#[exposed]` tag: {e}"));
                    continue;
                }
            };

            let reference = exposed
                .as_ref()
                .and_then(|t| t.name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| naming::to_upper_snake_case(&field.ident));
            let operators = match &exposed {
                Some(t) if !t.operators.is_empty() => t.operators.clone(),
                _ => typing::default_operators(typing::classify(&field.ty)),
            };

            if !observed.insert(reference.clone()) {
                continue; // first registration wins
            }
            attributes.push(AttributeMetadata::direct(reference, &field.ident, operators));
        }

        // Step 2: computed attributes contributed by providers.
        for provider in &tag.providers {
            if !self.graph.resolves(&provider.path) {
                diagnostics.error(
                    &structure.path,
                    format!("unresolved provider type `{}`", provider.path),
                );
                continue;
            }

            for method in self.graph.methods_of(&provider.path) {
                if !method.is_public {
                    continue;
                }
                let member = format!("{}::{}", provider.path, method.ident);
                let exposed = match tags::exposed_tag(&method.attrs) {
                    Ok(Some(t)) => t,
                    Ok(None) => continue,
                    Err(e) => {
                        diagnostics.error(&member, format!("invalid `#[exposed]` tag: {e}"));
                        continue;
                    }
                };

                if let Err(reason) = validate_computed_shape(method, &tag.entity) {
                    diagnostics.error(&member, reason);
                    continue;
                }

                let reference = exposed
                    .name
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| naming::to_upper_snake_case(&method.ident));
                let operators = if exposed.operators.is_empty() {
                    vec![Op::Eq]
                } else {
                    exposed.operators
                };

                if !observed.insert(reference.clone()) {
                    continue; // first registration wins
                }
                attributes.push(AttributeMetadata::computed(
                    reference,
                    &method.ident,
                    operators,
                    &provider.path,
                    provider.instance_key.clone(),
                    !method.has_receiver,
                ));
            }
        }

        if attributes.is_empty() {
            diagnostics.warning(&structure.path, "no filterable attributes found");
        }

        let exposure = match tags::exposure_tag(&structure.attrs) {
            Ok(config) => config,
            Err(e) => {
                diagnostics.error(&structure.path, format!("invalid `#[exposure]` tag: {e}"));
                None
            }
        };

        tracing::info!(
            projection = %structure.path,
            attributes = attributes.len(),
            "discovered projection"
        );

        Some(ProjectionDescriptor {
            path: structure.path.clone(),
            module: naming::module_path(&structure.path).to_string(),
            simple_name: structure.ident.clone(),
            entity: tag.entity,
            attributes,
            exposure,
        })
    }
}

/// Checks the exact computed-attribute routine shape:
/// `fn name([&self,] op: &str, args: &[Value]) -> PredicateResolver<Entity>`.
fn validate_computed_shape(method: &MethodSymbol, entity: &str) -> Result<(), String> {
    let expected = format!("PredicateResolver<{entity}>");

    let Some(ret) = &method.ret else {
        return Err(format!("expected return type `{expected}`, found `()`"));
    };
    let Some(arg) = typing::single_generic_arg(ret, "PredicateResolver") else {
        return Err(format!(
            "expected return type `{expected}`, found `{}`",
            typing::compact_type_text(ret)
        ));
    };
    if !typing::path_matches(arg, entity) {
        return Err(format!(
            "expected return type `{expected}`, found `{}`",
            typing::compact_type_text(ret)
        ));
    }

    if method.params.len() != 2 {
        return Err(
            "computed attribute routine must take exactly (op: &str, args: &[Value])".to_string(),
        );
    }
    if !typing::is_op_text_param(&method.params[0]) || !typing::is_args_array_param(&method.params[1])
    {
        return Err(format!(
            "computed attribute routine parameters must be (&str, &[Value]), found ({}, {})",
            typing::compact_type_text(&method.params[0]),
            typing::compact_type_text(&method.params[1]),
        ));
    }

    Ok(())
}
