//! Endpoint module generation.
//!
//! Accumulates one query endpoint per exposed projection and emits the
//! containing module once. Each endpoint threads the incoming request
//! through its configured pipes in order, then dispatches either to the
//! external search service (the default) or to a validated explicit handler.
//!
//! Pipe and handler routines are resolved in the symbol graph and validated
//! against exact signatures; a failing pipe omits that pipe line only, while
//! a failing handler omits the whole endpoint. Both are reported as errors
//! bound to the projection, and generation continues for other endpoints.

use crate::template::{RenderContext, TemplateEngine};
use filtergen_core::naming;
use filtergen_core::{
    Diagnostics, GeneratorConfig, MethodRef, ProjectionDescriptor, Result, Strategy,
};
use filtergen_symbols::graph::MethodSymbol;
use filtergen_symbols::{typing, SymbolGraph};

/// Accumulating generator for the endpoint module.
#[derive(Debug)]
pub struct EndpointModuleGenerator {
    engine: TemplateEngine,
    config: GeneratorConfig,
    endpoints: Vec<String>,
}

impl EndpointModuleGenerator {
    /// Creates a generator with its own template engine.
    ///
    /// # Errors
    ///
    /// Returns an error if template-engine construction fails.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            config,
            endpoints: Vec::new(),
        })
    }

    /// Accumulates the endpoint for one projection.
    ///
    /// Projections without an exposure configuration are skipped. Validation
    /// failures are recorded in `diagnostics`; a failed handler omits the
    /// endpoint without failing the call.
    ///
    /// # Errors
    ///
    /// Returns template-rendering errors.
    pub fn register(
        &mut self,
        descriptor: &ProjectionDescriptor,
        graph: &SymbolGraph,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        let Some(exposure) = &descriptor.exposure else {
            return Ok(());
        };

        let simple = descriptor.simple_name.as_str();
        let exposed_name = exposure
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| naming::to_kebab_case(simple), ToString::to_string);
        let base_path = exposure
            .base_path
            .as_deref()
            .map_or(String::new(), |path| path.trim().to_string());
        let method_name = exposure
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(
                || format!("search_{}", naming::to_snake_case(simple)),
                ToString::to_string,
            );
        let enum_path = naming::qualify(&descriptor.module, &self.config.reference_name(simple));

        let mut pipe_lines = String::new();
        for pipe in &exposure.pipes {
            match pipe_line(pipe, &enum_path, graph) {
                Ok(line) => pipe_lines.push_str(&line),
                Err(reason) => diagnostics.error(&descriptor.path, reason),
            }
        }

        let (endpoint_return, dispatch) = if let Some(handler) = &exposure.handler {
            match handler_dispatch(handler, descriptor, &enum_path, exposure.strategy, graph) {
                Ok(pair) => pair,
                Err(reason) => {
                    diagnostics.error(&descriptor.path, reason);
                    return Ok(());
                }
            }
        } else {
            let mut dispatch = format!("self.search.run::<{enum_path}>(req).await");
            if exposure.strategy == Strategy::List {
                dispatch.push_str(".into_items()");
            }
            (default_return(exposure.strategy, &descriptor.path), dispatch)
        };

        let mut context = RenderContext::new();
        context.set("base_path", base_path.as_str());
        context.set("search_segment", self.config.search_segment.as_str());
        context.set("exposed_name", exposed_name.as_str());
        context.set("method_name", method_name.as_str());
        context.set("enum_path", enum_path.as_str());
        context.set("endpoint_return", endpoint_return.as_str());
        context.set("pipe_lines", pipe_lines.as_str());
        context.set("dispatch", dispatch.as_str());

        let snippet = self.engine.render_named("endpoint", &context)?;
        if !self.endpoints.contains(&snippet) {
            tracing::debug!(projection = %descriptor.path, endpoint = %method_name, "registered endpoint");
            self.endpoints.push(snippet);
        }
        Ok(())
    }

    /// Wraps every accumulated endpoint into the module source.
    ///
    /// # Errors
    ///
    /// Returns template-rendering errors.
    pub fn generate(&self) -> Result<String> {
        let mut context = RenderContext::new();
        context.set("endpoints", self.endpoints.join("\n"));
        self.engine.render_named("endpoint-module", &context)
    }

    /// Number of accumulated endpoints.
    #[inline]
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }
}

fn default_return(strategy: Strategy, projection_path: &str) -> String {
    match strategy {
        Strategy::Projected => "PagedData<Record>".to_string(),
        Strategy::Paginated => format!("PagedData<{projection_path}>"),
        Strategy::List => format!("Vec<{projection_path}>"),
        Strategy::Custom => "Record".to_string(),
    }
}

/// Validates one pipe and renders its request-rebinding line.
///
/// A pipe must be public, take exactly one parameter of the projection's
/// request type, and return that same type.
fn pipe_line(pipe: &MethodRef, enum_path: &str, graph: &SymbolGraph) -> std::result::Result<String, String> {
    let method = graph
        .find_method(&pipe.owner, &pipe.method)
        .ok_or_else(|| format!("unresolved pipe `{}`", pipe.qualified()))?;

    validate_request_signature(method, enum_path)
        .map_err(|reason| format!("pipe `{}`: {reason}", pipe.qualified()))?;

    let ret = method
        .ret
        .as_ref()
        .ok_or_else(|| format!("pipe `{}`: must return the request type", pipe.qualified()))?;
    if !is_request_type(ret, enum_path) {
        return Err(format!(
            "pipe `{}`: must return FilterRequest<{enum_path}>, found `{}`",
            pipe.qualified(),
            typing::compact_type_text(ret)
        ));
    }

    Ok(if method.has_receiver {
        format!(
            "        let req = self.resolver.resolve::<{}>(None).{}(req);\n",
            pipe.owner, pipe.method
        )
    } else {
        format!("        let req = {}::{}(req);\n", pipe.owner, pipe.method)
    })
}

/// Validates an explicit handler against the strategy's expected shape and
/// renders its dispatch expression plus the endpoint return type.
fn handler_dispatch(
    handler: &MethodRef,
    descriptor: &ProjectionDescriptor,
    enum_path: &str,
    strategy: Strategy,
    graph: &SymbolGraph,
) -> std::result::Result<(String, String), String> {
    let method = graph
        .find_method(&handler.owner, &handler.method)
        .ok_or_else(|| format!("unresolved handler `{}`", handler.qualified()))?;

    validate_request_signature(method, enum_path)
        .map_err(|reason| format!("handler `{}`: {reason}", handler.qualified()))?;

    let ret = method.ret.as_ref().ok_or_else(|| {
        format!(
            "handler `{}`: must declare a return type for strategy {strategy:?}",
            handler.qualified()
        )
    })?;

    let shape_ok = match strategy {
        Strategy::Projected => typing::single_generic_arg(ret, "PagedData")
            .is_some_and(|arg| typing::path_matches(arg, "Record")),
        Strategy::Paginated => typing::single_generic_arg(ret, "PagedData")
            .is_some_and(|arg| typing::path_matches(arg, &descriptor.path)),
        Strategy::List => typing::single_generic_arg(ret, "Vec")
            .is_some_and(|arg| typing::path_matches(arg, &descriptor.path)),
        Strategy::Custom => true,
    };
    if !shape_ok {
        return Err(format!(
            "handler `{}` does not match strategy {strategy:?}: expected `{}`, found `{}`",
            handler.qualified(),
            default_return(strategy, &descriptor.path),
            typing::compact_type_text(ret)
        ));
    }

    let endpoint_return = if strategy == Strategy::Custom {
        typing::compact_type_text(ret)
    } else {
        default_return(strategy, &descriptor.path)
    };

    let dispatch = if method.has_receiver {
        format!(
            "self.resolver.resolve::<{}>(None).{}(req)",
            handler.owner, handler.method
        )
    } else {
        format!("{}::{}(req)", handler.owner, handler.method)
    };

    Ok((endpoint_return, dispatch))
}

/// Common request-side checks: public, exactly one parameter of exactly the
/// projection's request type.
fn validate_request_signature(
    method: &MethodSymbol,
    enum_path: &str,
) -> std::result::Result<(), String> {
    if !method.is_public {
        return Err("must be public".to_string());
    }
    if method.params.len() != 1 {
        return Err(format!(
            "must take exactly one parameter of FilterRequest<{enum_path}>"
        ));
    }
    if !is_request_type(&method.params[0], enum_path) {
        return Err(format!(
            "parameter must be FilterRequest<{enum_path}>, found `{}`",
            typing::compact_type_text(&method.params[0])
        ));
    }
    Ok(())
}

fn is_request_type(ty: &syn::Type, enum_path: &str) -> bool {
    typing::single_generic_arg(ty, "FilterRequest")
        .is_some_and(|arg| typing::path_matches(arg, enum_path))
}
