//! Reference enum generation.
//!
//! Emits the closed-constant reference enum for one projection: its constant
//! list, the value-type lookup, the allowed-operator lookup, and the
//! backing-entity accessor. Direct attributes resolve their value type
//! through the external projection registry by storage path; computed
//! attributes report the opaque type, since their result type is not
//! materializable at generation time.
//!
//! Case order in both lookups follows discovery order, and operator sets are
//! emitted in the order attached to the metadata.

use crate::template::{RenderContext, TemplateEngine};
use filtergen_core::naming;
use filtergen_core::{AttributeKind, AttributeMetadata, Op, Result};

/// Generator for per-projection reference enums.
///
/// # Examples
///
/// ```
/// use filtergen_codegen::ReferenceEnumGenerator;
/// use filtergen_core::{AttributeMetadata, Op};
///
/// let generator = ReferenceEnumGenerator::new().unwrap();
/// let attributes = vec![AttributeMetadata::direct("CITY", "city", vec![Op::Eq])];
/// let source = generator
///     .generate("crate::dto", "AddressView", "AddressViewRef", &attributes)
///     .unwrap();
/// assert!(source.contains("pub enum AddressViewRef"));
/// ```
#[derive(Debug)]
pub struct ReferenceEnumGenerator {
    engine: TemplateEngine,
}

impl ReferenceEnumGenerator {
    /// Creates a generator with its own template engine.
    ///
    /// # Errors
    ///
    /// Returns an error if template-engine construction fails.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
        })
    }

    /// Generates the reference enum source for one projection.
    ///
    /// A zero-length metadata list still produces an (empty) enum; the
    /// downstream build surfaces any use of it as a compile-time signal.
    ///
    /// # Errors
    ///
    /// Returns template-rendering errors; no partial source is produced.
    pub fn generate(
        &self,
        module_path: &str,
        projection_simple_name: &str,
        enum_name: &str,
        attributes: &[AttributeMetadata],
    ) -> Result<String> {
        let projection_path = naming::qualify(module_path, projection_simple_name);
        tracing::debug!(projection = %projection_path, enum_name, "generating reference enum");

        let mut context = RenderContext::new();
        context.set("enum_name", enum_name);
        context.set("projection_path", projection_path.as_str());
        context.set("constants", constants(attributes));
        context.set("value_type_body", value_type_body(&projection_path, attributes));
        context.set("operators_body", operators_body(attributes));

        self.engine.render_named("reference-enum", &context)
    }
}

fn constants(attributes: &[AttributeMetadata]) -> String {
    attributes
        .iter()
        .map(|attr| format!("    {},", attr.reference))
        .collect::<Vec<_>>()
        .join("\n")
}

fn value_type_body(projection_path: &str, attributes: &[AttributeMetadata]) -> String {
    if attributes.is_empty() {
        return "        match *self {}".to_string();
    }

    // The registry binding is only needed when a direct attribute resolves
    // its type through it.
    let mut body = String::new();
    if attributes.iter().any(|attr| !attr.is_computed()) {
        body.push_str(&format!(
            "        let meta = ProjectionRegistry::metadata_of::<{projection_path}>();\n"
        ));
    }
    body.push_str("        match self {\n");
    for attr in attributes {
        match &attr.kind {
            AttributeKind::Direct { path } => {
                body.push_str(&format!(
                    "            Self::{} => meta.direct_mapping(\"{path}\").value_type(),\n",
                    attr.reference
                ));
            }
            AttributeKind::Computed { .. } => {
                body.push_str(&format!(
                    "            Self::{} => ValueType::Opaque,\n",
                    attr.reference
                ));
            }
        }
    }
    body.push_str("        }");
    body
}

fn operators_body(attributes: &[AttributeMetadata]) -> String {
    if attributes.is_empty() {
        return "        match *self {}".to_string();
    }

    let mut body = "        match self {\n".to_string();
    for attr in attributes {
        body.push_str(&format!(
            "            Self::{} => &[{}],\n",
            attr.reference,
            operator_set(&attr.operators)
        ));
    }
    body.push_str("        }");
    body
}

fn operator_set(operators: &[Op]) -> String {
    operators
        .iter()
        .map(|op| op.code())
        .collect::<Vec<_>>()
        .join(", ")
}
