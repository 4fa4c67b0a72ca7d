//! Registration module generation.
//!
//! Accumulates one filter-context factory per projection and wraps all of
//! them in a single generated module. Each factory dispatches every
//! reference constant to either a literal storage path (direct attributes)
//! or a wrapped computation call (computed attributes); it takes a
//! shared-instance resolver parameter iff any attribute is computed and
//! non-static.
//!
//! Blocks accumulate without content de-duplication; the orchestrator
//! guarantees at most one registration per projection per generation pass.

use crate::template::{RenderContext, TemplateEngine};
use filtergen_core::naming;
use filtergen_core::{AttributeKind, AttributeMetadata, GeneratorConfig, Result};

/// Accumulating generator for the registration module.
///
/// # Examples
///
/// ```
/// use filtergen_codegen::ContextModuleGenerator;
/// use filtergen_core::{AttributeMetadata, GeneratorConfig, Op};
///
/// let mut generator = ContextModuleGenerator::new(GeneratorConfig::default()).unwrap();
/// let attributes = vec![AttributeMetadata::direct("CITY", "city", vec![Op::Eq])];
/// generator
///     .register("crate::dto", "crate::dto::AddressView", &attributes, "crate::model::Address")
///     .unwrap();
/// let source = generator.generate().unwrap();
/// assert!(source.contains("pub fn context_of_address_view()"));
/// ```
#[derive(Debug)]
pub struct ContextModuleGenerator {
    engine: TemplateEngine,
    config: GeneratorConfig,
    blocks: Vec<String>,
}

impl ContextModuleGenerator {
    /// Creates a generator with its own template engine.
    ///
    /// # Errors
    ///
    /// Returns an error if template-engine construction fails.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            config,
            blocks: Vec::new(),
        })
    }

    /// Accumulates the registration block for one projection.
    ///
    /// # Errors
    ///
    /// Returns template-rendering errors; a failed block is not recorded.
    pub fn register(
        &mut self,
        module_path: &str,
        projection_path: &str,
        attributes: &[AttributeMetadata],
        entity_path: &str,
    ) -> Result<()> {
        let simple = naming::simple_name(projection_path);
        let enum_path = naming::qualify(module_path, &self.config.reference_name(simple));
        let factory_name = format!("context_of_{}", naming::to_snake_case(simple));

        let needs_resolver = attributes
            .iter()
            .any(AttributeMetadata::needs_instance_resolution);
        let resolver_param = if needs_resolver {
            "resolver: InstanceResolver"
        } else {
            ""
        };

        let mut context = RenderContext::new();
        context.set("projection_path", projection_path);
        context.set("entity_path", entity_path);
        context.set("factory_name", factory_name.as_str());
        context.set("enum_path", enum_path.as_str());
        context.set("resolver_param", resolver_param);
        context.set("match_arms", match_arms(&enum_path, attributes));

        let block = self.engine.render_named("context-factory", &context)?;
        tracing::debug!(projection = %projection_path, factory = %factory_name, "registered filter context");
        self.blocks.push(block);
        Ok(())
    }

    /// Wraps every accumulated block into the registration module source.
    ///
    /// # Errors
    ///
    /// Returns template-rendering errors.
    pub fn generate(&self) -> Result<String> {
        let mut context = RenderContext::new();
        context.set("factories", self.blocks.join("\n"));
        self.engine.render_named("context-module", &context)
    }

    /// Number of accumulated registration blocks.
    #[inline]
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

fn match_arms(enum_path: &str, attributes: &[AttributeMetadata]) -> String {
    let mut arms = String::new();
    for attr in attributes {
        match &attr.kind {
            AttributeKind::Direct { path } => {
                arms.push_str(&format!(
                    "        {enum_path}::{} => Mapping::path(\"{path}\"),\n",
                    attr.reference
                ));
            }
            AttributeKind::Computed {
                method,
                provider,
                instance_key,
                is_static,
            } => {
                if *is_static {
                    arms.push_str(&format!(
                        "        {enum_path}::{} => Mapping::resolver(|op, args| {provider}::{method}(op, args)),\n",
                        attr.reference
                    ));
                } else {
                    let key = instance_key
                        .as_ref()
                        .map_or_else(|| "None".to_string(), |k| format!("Some(\"{k}\")"));
                    arms.push_str(&format!(
                        "        {enum_path}::{} => Mapping::resolver({{ let resolver = resolver.clone(); move |op, args| resolver.resolve::<{provider}>({key}).{method}(op, args) }}),\n",
                        attr.reference
                    ));
                }
            }
        }
    }
    // Drop the trailing newline so the template controls spacing.
    if arms.ends_with('\n') {
        arms.pop();
    }
    arms
}

#[cfg(test)]
mod tests {
    use super::*;
    use filtergen_core::Op;

    fn generator() -> ContextModuleGenerator {
        ContextModuleGenerator::new(GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_direct_attributes_map_to_path_literals() {
        let mut generator = generator();
        let attributes = vec![
            AttributeMetadata::direct("STREET", "street", vec![Op::Eq]),
            AttributeMetadata::direct("CITY", "city", vec![Op::Eq, Op::Matches]),
        ];
        generator
            .register(
                "crate::dto",
                "crate::dto::AddressView",
                &attributes,
                "crate::model::Address",
            )
            .unwrap();
        let source = generator.generate().unwrap();

        assert!(source.contains(
            "crate::dto::AddressViewRef::STREET => Mapping::path(\"street\"),"
        ));
        assert!(source.contains(
            "crate::dto::AddressViewRef::CITY => Mapping::path(\"city\"),"
        ));
        // Direct-only projections take no resolver parameter.
        assert!(source.contains("pub fn context_of_address_view()"));
    }

    #[test]
    fn test_static_computed_emits_direct_qualified_call() {
        let mut generator = generator();
        let attributes = vec![AttributeMetadata::computed(
            "FULL_NAME",
            "full_name",
            vec![Op::Matches],
            "crate::ops::PersonOps",
            None,
            true,
        )];
        generator
            .register(
                "crate::dto",
                "crate::dto::PersonView",
                &attributes,
                "crate::model::Person",
            )
            .unwrap();
        let source = generator.generate().unwrap();

        assert!(source.contains(
            "Mapping::resolver(|op, args| crate::ops::PersonOps::full_name(op, args))"
        ));
        assert!(source.contains("pub fn context_of_person_view()"));
        assert!(!source.contains("resolver: InstanceResolver"));
    }

    #[test]
    fn test_instance_computed_routes_through_resolver() {
        let mut generator = generator();
        let attributes = vec![AttributeMetadata::computed(
            "TENANT",
            "tenant_filter",
            vec![Op::Eq],
            "crate::ops::TenancyOps",
            Some("tenancy".to_string()),
            false,
        )];
        generator
            .register(
                "crate::dto",
                "crate::dto::PersonView",
                &attributes,
                "crate::model::Person",
            )
            .unwrap();
        let source = generator.generate().unwrap();

        assert!(source.contains("pub fn context_of_person_view(resolver: InstanceResolver)"));
        assert!(source.contains(
            "resolver.resolve::<crate::ops::TenancyOps>(Some(\"tenancy\")).tenant_filter(op, args)"
        ));
    }

    #[test]
    fn test_instance_computed_without_key_passes_none() {
        let mut generator = generator();
        let attributes = vec![AttributeMetadata::computed(
            "SCOPE",
            "scope",
            vec![Op::Eq],
            "crate::ops::ScopeOps",
            None,
            false,
        )];
        generator
            .register("crate::dto", "crate::dto::V", &attributes, "crate::model::E")
            .unwrap();
        let source = generator.generate().unwrap();
        assert!(source.contains("resolver.resolve::<crate::ops::ScopeOps>(None).scope(op, args)"));
    }

    #[test]
    fn test_mixed_attributes_keep_discovery_order() {
        let mut generator = generator();
        let attributes = vec![
            AttributeMetadata::direct("NAME", "name", vec![Op::Eq]),
            AttributeMetadata::computed("COMPUTED", "resolve", vec![Op::Eq], "crate::Ops", None, true),
            AttributeMetadata::direct("AGE", "age", vec![Op::Gt]),
        ];
        generator
            .register("crate::dto", "crate::dto::V", &attributes, "crate::model::E")
            .unwrap();
        let source = generator.generate().unwrap();

        let name = source.find("VRef::NAME").unwrap();
        let computed = source.find("VRef::COMPUTED").unwrap();
        let age = source.find("VRef::AGE").unwrap();
        assert!(name < computed && computed < age);
    }

    #[test]
    fn test_blocks_accumulate_without_dedup() {
        let mut generator = generator();
        let attributes = vec![AttributeMetadata::direct("ID", "id", vec![Op::Eq])];
        generator
            .register("crate::dto", "crate::dto::V", &attributes, "crate::model::E")
            .unwrap();
        generator
            .register("crate::dto", "crate::dto::V", &attributes, "crate::model::E")
            .unwrap();
        assert_eq!(generator.block_count(), 2);

        let source = generator.generate().unwrap();
        assert_eq!(source.matches("pub fn context_of_v()").count(), 2);
    }

    #[test]
    fn test_empty_attribute_list_still_produces_factory() {
        let mut generator = generator();
        generator
            .register("crate::dto", "crate::dto::EmptyView", &[], "crate::model::E")
            .unwrap();
        let source = generator.generate().unwrap();
        assert!(source.contains("pub fn context_of_empty_view()"));
    }

    #[test]
    fn test_module_wrapper() {
        let generator = generator();
        let source = generator.generate().unwrap();
        assert!(source.starts_with("//! Generated filter context registrations."));
        assert!(source.contains("use filtergen_runtime::{FilterContext, InstanceResolver, Mapping};"));
    }
}
