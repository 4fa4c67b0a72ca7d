//! The generation pass controller.
//!
//! Owns all state shared across host-driven rounds: the ordered pending
//! projection list, the references-emitted flag, the three generators, and
//! the pass diagnostics. The hosting build calls [`Orchestrator::process_round`]
//! repeatedly and [`Orchestrator::finish`] once at the end of the pass:
//!
//! - the first round discovers each root and emits its reference enum;
//! - the next round registers context factories and endpoints for every
//!   pending projection;
//! - `finish` emits the two aggregate modules.
//!
//! A template-rendering failure is fatal to the single artifact it affects
//! (recorded as a diagnostic, no partial text written) but never stops the
//! other artifacts of the pass. Sink write failures propagate to the host.

use crate::context::ContextModuleGenerator;
use crate::endpoints::EndpointModuleGenerator;
use crate::reference::ReferenceEnumGenerator;
use filtergen_core::naming;
use filtergen_core::{ArtifactSink, Diagnostics, GeneratorConfig, Result};
use filtergen_symbols::{DiscoveryEngine, SymbolGraph};

/// Pass controller for one generation invocation.
///
/// # Examples
///
/// ```
/// use filtergen_codegen::Orchestrator;
/// use filtergen_core::{GeneratorConfig, MemorySink};
/// use filtergen_symbols::SymbolGraph;
///
/// let mut graph = SymbolGraph::new();
/// graph
///     .add_source(
///         "crate::dto",
///         "dto.rs",
///         r"#[projection(entity = crate::model::Address)]
///           pub struct AddressView { pub city: String }",
///     )
///     .unwrap();
///
/// let mut orchestrator = Orchestrator::new(GeneratorConfig::default()).unwrap();
/// let mut sink = MemorySink::new();
/// orchestrator
///     .run(&graph, &["crate::dto::AddressView"], &mut sink)
///     .unwrap();
/// assert_eq!(sink.artifacts().len(), 3);
/// ```
#[derive(Debug)]
pub struct Orchestrator {
    config: GeneratorConfig,
    reference_generator: ReferenceEnumGenerator,
    context_generator: ContextModuleGenerator,
    endpoint_generator: EndpointModuleGenerator,
    pending: Vec<filtergen_core::ProjectionDescriptor>,
    references_emitted: bool,
    artifacts_registered: bool,
    diagnostics: Diagnostics,
}

impl Orchestrator {
    /// Creates a pass controller.
    ///
    /// # Errors
    ///
    /// Returns an error if any generator fails to initialize.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Ok(Self {
            reference_generator: ReferenceEnumGenerator::new()?,
            context_generator: ContextModuleGenerator::new(config.clone())?,
            endpoint_generator: EndpointModuleGenerator::new(config.clone())?,
            config,
            pending: Vec::new(),
            references_emitted: false,
            artifacts_registered: false,
            diagnostics: Diagnostics::new(),
        })
    }

    /// Processes one host round.
    ///
    /// The first round discovers each root in order and emits its reference
    /// enum; later rounds register the per-projection context factories and
    /// endpoints exactly once. `roots` is ignored after the first round.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures. Discovery, validation, and rendering
    /// failures degrade single artifacts and are recorded as diagnostics.
    pub fn process_round(
        &mut self,
        graph: &SymbolGraph,
        roots: &[&str],
        sink: &mut dyn ArtifactSink,
    ) -> Result<()> {
        if self.references_emitted {
            self.register_artifacts(graph);
            return Ok(());
        }

        tracing::info!(roots = roots.len(), "reference round started");
        let engine = DiscoveryEngine::new(graph);
        for root in roots {
            let Some(descriptor) = engine.analyze(root, &mut self.diagnostics) else {
                continue;
            };

            let enum_name = self.config.reference_name(&descriptor.simple_name);
            match self.reference_generator.generate(
                &descriptor.module,
                &descriptor.simple_name,
                &enum_name,
                &descriptor.attributes,
            ) {
                Ok(text) => {
                    let artifact = naming::qualify(&descriptor.module, &enum_name);
                    sink.write(&artifact, &text)?;
                }
                Err(e) => self.diagnostics.error(
                    &descriptor.path,
                    format!("failed to render reference enum: {e}"),
                ),
            }
            self.pending.push(descriptor);
        }
        self.references_emitted = true;
        Ok(())
    }

    fn register_artifacts(&mut self, graph: &SymbolGraph) {
        if self.artifacts_registered {
            return;
        }
        tracing::info!(pending = self.pending.len(), "artifact round started");
        for descriptor in &self.pending {
            if let Err(e) = self.context_generator.register(
                &descriptor.module,
                &descriptor.path,
                &descriptor.attributes,
                &descriptor.entity,
            ) {
                self.diagnostics.error(
                    &descriptor.path,
                    format!("failed to render registration block: {e}"),
                );
            }

            if let Err(e) =
                self.endpoint_generator
                    .register(descriptor, graph, &mut self.diagnostics)
            {
                self.diagnostics
                    .error(&descriptor.path, format!("failed to render endpoint: {e}"));
            }
        }
        self.artifacts_registered = true;
    }

    /// Emits the aggregate registration and endpoint modules, once, at the
    /// end of the pass. Does nothing if the reference round never ran.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures; rendering failures are recorded as
    /// diagnostics and the other aggregate artifact still emits.
    pub fn finish(&mut self, sink: &mut dyn ArtifactSink) -> Result<()> {
        if !self.references_emitted {
            return Ok(());
        }

        let contexts_artifact = format!("{}::contexts", self.config.generated_module);
        match self.context_generator.generate() {
            Ok(text) => sink.write(&contexts_artifact, &text)?,
            Err(e) => self.diagnostics.error(
                &contexts_artifact,
                format!("failed to render registration module: {e}"),
            ),
        }

        let endpoints_artifact = format!("{}::endpoints", self.config.generated_module);
        match self.endpoint_generator.generate() {
            Ok(text) => sink.write(&endpoints_artifact, &text)?,
            Err(e) => self.diagnostics.error(
                &endpoints_artifact,
                format!("failed to render endpoint module: {e}"),
            ),
        }

        tracing::info!("generation pass finished");
        Ok(())
    }

    /// Runs a complete pass: the reference round, the artifact round, and
    /// the aggregate emission.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub fn run(
        &mut self,
        graph: &SymbolGraph,
        roots: &[&str],
        sink: &mut dyn ArtifactSink,
    ) -> Result<()> {
        self.process_round(graph, roots, sink)?;
        self.process_round(graph, roots, sink)?;
        self.finish(sink)
    }

    /// Diagnostics recorded so far, in order.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Descriptors discovered in the reference round, in discovery order.
    #[must_use]
    pub fn pending(&self) -> &[filtergen_core::ProjectionDescriptor] {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filtergen_core::MemorySink;

    const SOURCE: &str = r#"
        #[projection(entity = crate::model::Address)]
        #[exposure(strategy = "list")]
        pub struct AddressView {
            pub street: String,
            pub city: String,
        }
    "#;

    fn graph() -> SymbolGraph {
        let mut graph = SymbolGraph::new();
        graph.add_source("crate::dto", "dto.rs", SOURCE).unwrap();
        graph
    }

    #[test]
    fn test_run_emits_three_artifacts() {
        let graph = graph();
        let mut orchestrator = Orchestrator::new(GeneratorConfig::default()).unwrap();
        let mut sink = MemorySink::new();
        orchestrator
            .run(&graph, &["crate::dto::AddressView"], &mut sink)
            .unwrap();

        let names: Vec<_> = sink.artifacts().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "crate::dto::AddressViewRef",
                "filtergen_generated::contexts",
                "filtergen_generated::endpoints",
            ]
        );
        assert!(!orchestrator.diagnostics().has_errors());
    }

    #[test]
    fn test_rounds_are_idempotent_for_registration() {
        let graph = graph();
        let mut orchestrator = Orchestrator::new(GeneratorConfig::default()).unwrap();
        let mut sink = MemorySink::new();
        let roots = ["crate::dto::AddressView"];

        orchestrator.process_round(&graph, &roots, &mut sink).unwrap();
        // Extra artifact rounds must not duplicate registrations.
        orchestrator.process_round(&graph, &roots, &mut sink).unwrap();
        orchestrator.process_round(&graph, &roots, &mut sink).unwrap();
        orchestrator.finish(&mut sink).unwrap();

        let contexts = sink.get("filtergen_generated::contexts").unwrap();
        assert_eq!(contexts.matches("pub fn context_of_address_view").count(), 1);
    }

    #[test]
    fn test_finish_without_reference_round_is_a_no_op() {
        let mut orchestrator = Orchestrator::new(GeneratorConfig::default()).unwrap();
        let mut sink = MemorySink::new();
        orchestrator.finish(&mut sink).unwrap();
        assert!(sink.artifacts().is_empty());
    }

    #[test]
    fn test_unresolved_root_degrades_gracefully() {
        let graph = graph();
        let mut orchestrator = Orchestrator::new(GeneratorConfig::default()).unwrap();
        let mut sink = MemorySink::new();
        orchestrator
            .run(&graph, &["crate::dto::Missing", "crate::dto::AddressView"], &mut sink)
            .unwrap();

        assert!(orchestrator.diagnostics().has_errors());
        // The resolvable projection still produced its artifacts.
        assert!(sink.get("crate::dto::AddressViewRef").is_some());
    }

    #[test]
    fn test_custom_generated_module() {
        let graph = graph();
        let config = GeneratorConfig::builder().generated_module("my_gen").build();
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let mut sink = MemorySink::new();
        orchestrator
            .run(&graph, &["crate::dto::AddressView"], &mut sink)
            .unwrap();
        assert!(sink.get("my_gen::contexts").is_some());
        assert!(sink.get("my_gen::endpoints").is_some());
    }
}
