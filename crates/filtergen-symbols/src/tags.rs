//! Exposure tag parsing.
//!
//! The generator's input surface is a small set of inert attributes:
//!
//! - `#[projection(entity = <path>, providers(<path>, <key>: <path>, ...))]`
//!   on the projection struct;
//! - `#[exposure(name = "...", base_path = "...", endpoint = "...",
//!   strategy = "...", pipes(<Type::method>, ...), handler = <Type::method>)]`
//!   on the projection struct, opting it into endpoint generation;
//! - `#[exposed(name = "...", operators(Eq, ...))]` on struct fields and
//!   provider methods;
//! - `#[not_filterable]` on struct fields.
//!
//! Parse failures are returned as `syn::Error` values; the discovery engine
//! converts them into element-bound diagnostics.

use filtergen_core::{ExposureConfig, MethodRef, Op, ProviderRef, Strategy};
use syn::parse::ParseStream;
use syn::punctuated::Punctuated;
use syn::Token;

/// Parsed `#[projection(...)]` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionTag {
    /// Backing entity path, as written.
    pub entity: String,
    /// Provider references, in configuration order.
    pub providers: Vec<ProviderRef>,
}

/// Parsed `#[exposed(...)]` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExposedTag {
    /// Explicit reference name override.
    pub name: Option<String>,
    /// Explicit operator list; empty means "use the default strategy".
    pub operators: Vec<Op>,
}

/// Returns `true` when the member carries `#[not_filterable]`.
#[must_use]
pub fn is_not_filterable(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|a| a.path().is_ident("not_filterable"))
}

/// Extracts the `#[exposed]` tag, if present.
///
/// A bare `#[exposed]` yields the default tag (derived name, default
/// operators).
pub fn exposed_tag(attrs: &[syn::Attribute]) -> syn::Result<Option<ExposedTag>> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident("exposed")) else {
        return Ok(None);
    };

    let mut tag = ExposedTag::default();
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(Some(tag));
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            tag.name = Some(lit.value());
            Ok(())
        } else if meta.path.is_ident("operators") {
            let content;
            syn::parenthesized!(content in meta.input);
            let idents = Punctuated::<syn::Ident, Token![,]>::parse_terminated(&content)?;
            for ident in idents {
                let op = Op::parse(&ident.to_string()).ok_or_else(|| {
                    syn::Error::new(ident.span(), format!("unknown operator `{ident}`"))
                })?;
                tag.operators.push(op);
            }
            Ok(())
        } else {
            Err(meta.error("unsupported `exposed` property"))
        }
    })?;

    Ok(Some(tag))
}

/// Extracts the `#[projection]` tag, if present.
///
/// The `entity` property is mandatory.
pub fn projection_tag(attrs: &[syn::Attribute]) -> syn::Result<Option<ProjectionTag>> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident("projection")) else {
        return Ok(None);
    };

    let mut entity: Option<String> = None;
    let mut providers: Vec<ProviderRef> = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("entity") {
            let path: syn::Path = meta.value()?.parse()?;
            entity = Some(path_text(&path));
            Ok(())
        } else if meta.path.is_ident("providers") {
            let content;
            syn::parenthesized!(content in meta.input);
            while !content.is_empty() {
                providers.push(parse_provider(&content)?);
                if content.is_empty() {
                    break;
                }
                content.parse::<Token![,]>()?;
            }
            Ok(())
        } else {
            Err(meta.error("unsupported `projection` property"))
        }
    })?;

    let entity = entity
        .ok_or_else(|| syn::Error::new_spanned(attr, "`projection` requires an `entity` path"))?;

    Ok(Some(ProjectionTag { entity, providers }))
}

/// Extracts the `#[exposure]` tag, if present.
pub fn exposure_tag(attrs: &[syn::Attribute]) -> syn::Result<Option<ExposureConfig>> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident("exposure")) else {
        return Ok(None);
    };

    let mut config = ExposureConfig::default();
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(Some(config));
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            config.name = Some(meta.value()?.parse::<syn::LitStr>()?.value());
            Ok(())
        } else if meta.path.is_ident("base_path") {
            config.base_path = Some(meta.value()?.parse::<syn::LitStr>()?.value());
            Ok(())
        } else if meta.path.is_ident("endpoint") {
            config.endpoint = Some(meta.value()?.parse::<syn::LitStr>()?.value());
            Ok(())
        } else if meta.path.is_ident("strategy") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            config.strategy = Strategy::parse(&lit.value()).ok_or_else(|| {
                syn::Error::new(lit.span(), format!("unknown strategy `{}`", lit.value()))
            })?;
            Ok(())
        } else if meta.path.is_ident("pipes") {
            let content;
            syn::parenthesized!(content in meta.input);
            let paths = Punctuated::<syn::Path, Token![,]>::parse_terminated(&content)?;
            for path in paths {
                config.pipes.push(method_ref(&path)?);
            }
            Ok(())
        } else if meta.path.is_ident("handler") {
            let path: syn::Path = meta.value()?.parse()?;
            config.handler = Some(method_ref(&path)?);
            Ok(())
        } else {
            Err(meta.error("unsupported `exposure` property"))
        }
    })?;

    Ok(Some(config))
}

fn parse_provider(input: ParseStream<'_>) -> syn::Result<ProviderRef> {
    // `key: path` vs a bare path; `crate` is a keyword, so a leading plain
    // identifier followed by a single colon can only be an instance key.
    if input.peek(syn::Ident) && input.peek2(Token![:]) {
        let key: syn::Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let path: syn::Path = input.parse()?;
        Ok(ProviderRef {
            path: path_text(&path),
            instance_key: Some(key.to_string()),
        })
    } else {
        let path: syn::Path = input.parse()?;
        Ok(ProviderRef {
            path: path_text(&path),
            instance_key: None,
        })
    }
}

fn method_ref(path: &syn::Path) -> syn::Result<MethodRef> {
    if path.segments.len() < 2 {
        return Err(syn::Error::new_spanned(
            path,
            "expected a `Type::method` reference",
        ));
    }
    let method = path.segments.last().map(|s| s.ident.to_string()).unwrap_or_default();
    let owner = path
        .segments
        .iter()
        .take(path.segments.len() - 1)
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    Ok(MethodRef::new(owner, method))
}

fn path_text(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}
