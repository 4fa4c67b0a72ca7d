//! The declared-type symbol graph.
//!
//! A [`SymbolGraph`] is built from Rust source text: each registered file is
//! parsed with `syn` and its structs and inherent impl blocks are indexed
//! under module-qualified paths. The graph is a read-only query surface for
//! the discovery engine; it never mutates after registration and all
//! enumeration follows declaration order.

use filtergen_core::{Error, Result};
use std::path::Path;

/// One struct declaration.
#[derive(Debug)]
pub struct StructSymbol {
    /// Module-qualified path, e.g. `crate::dto::AddressView`.
    pub path: String,
    /// Simple type name.
    pub ident: String,
    /// Named fields, in declaration order. Tuple and unit structs index as
    /// fieldless.
    pub fields: Vec<FieldSymbol>,
    /// Attributes attached to the struct.
    pub attrs: Vec<syn::Attribute>,
}

/// One named struct field.
#[derive(Debug)]
pub struct FieldSymbol {
    /// Field identifier.
    pub ident: String,
    /// Declared type.
    pub ty: syn::Type,
    /// True for `pub` fields.
    pub is_public: bool,
    /// Attributes attached to the field.
    pub attrs: Vec<syn::Attribute>,
}

/// One method of an inherent impl block.
#[derive(Debug)]
pub struct MethodSymbol {
    /// Method identifier.
    pub ident: String,
    /// True for `pub` methods.
    pub is_public: bool,
    /// True when the method takes a `self` receiver; associated functions
    /// (the static case) have none.
    pub has_receiver: bool,
    /// Declared non-receiver parameter types, in order.
    pub params: Vec<syn::Type>,
    /// Declared return type; `None` for unit-returning methods.
    pub ret: Option<syn::Type>,
    /// Attributes attached to the method.
    pub attrs: Vec<syn::Attribute>,
}

#[derive(Debug)]
struct ImplSymbol {
    self_path: String,
    methods: Vec<MethodSymbol>,
}

/// Read-only symbol graph over registered source files.
///
/// # Examples
///
/// ```
/// use filtergen_symbols::SymbolGraph;
///
/// let mut graph = SymbolGraph::new();
/// graph
///     .add_source("crate::dto", "dto.rs", "pub struct AddressView { pub city: String }")
///     .unwrap();
///
/// let s = graph.resolve_struct("crate::dto::AddressView").unwrap();
/// assert_eq!(s.fields.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SymbolGraph {
    structs: Vec<StructSymbol>,
    impls: Vec<ImplSymbol>,
}

impl SymbolGraph {
    /// Creates an empty graph.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `source` and indexes its items under `module_path`.
    ///
    /// Inline `mod` blocks extend the path; `file_name` is only used for
    /// error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the source is not valid Rust.
    pub fn add_source(&mut self, module_path: &str, file_name: &str, source: &str) -> Result<()> {
        let file = syn::parse_file(source).map_err(|e| Error::Parse {
            file: file_name.to_string(),
            message: e.to_string(),
        })?;
        self.collect_items(&file.items, module_path);
        tracing::debug!(file = %file_name, module = %module_path, "registered source");
        Ok(())
    }

    /// Walks `dir` and registers every `.rs` file found, rooted at
    /// `root_module`.
    ///
    /// A file `a/b.rs` lands under `<root_module>::a::b`; `mod.rs` and
    /// `lib.rs` collapse onto their directory. Returns the number of files
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for unreadable or unparsable files.
    pub fn add_dir(&mut self, root_module: &str, dir: &Path) -> Result<usize> {
        let mut count = 0;
        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            if !entry.file_type().is_file()
                || entry.path().extension().is_none_or(|ext| ext != "rs")
            {
                continue;
            }
            let source = std::fs::read_to_string(entry.path()).map_err(|e| Error::Parse {
                file: entry.path().display().to_string(),
                message: e.to_string(),
            })?;
            let module = module_for(root_module, dir, entry.path());
            self.add_source(&module, &entry.path().display().to_string(), &source)?;
            count += 1;
        }
        Ok(count)
    }

    /// Resolves a struct by qualified path, falling back to a unique
    /// trailing-segment match.
    #[must_use]
    pub fn resolve_struct(&self, path: &str) -> Option<&StructSymbol> {
        if let Some(found) = self.structs.iter().find(|s| s.path == path) {
            return Some(found);
        }
        let simple = filtergen_core::naming::simple_name(path);
        let mut matches = self.structs.iter().filter(|s| s.ident == simple);
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Returns `true` if `path` names a known struct or an impl target.
    #[must_use]
    pub fn resolves(&self, path: &str) -> bool {
        self.resolve_struct(path).is_some() || !self.methods_of(path).is_empty()
    }

    /// All inherent methods declared on `path`, in declaration order across
    /// impl blocks. Resolution matches the full path first, then a trailing
    /// segment.
    #[must_use]
    pub fn methods_of(&self, path: &str) -> Vec<&MethodSymbol> {
        let exact: Vec<&MethodSymbol> = self
            .impls
            .iter()
            .filter(|i| i.self_path == path)
            .flat_map(|i| i.methods.iter())
            .collect();
        if !exact.is_empty() {
            return exact;
        }
        let simple = filtergen_core::naming::simple_name(path);
        self.impls
            .iter()
            .filter(|i| filtergen_core::naming::simple_name(&i.self_path) == simple)
            .flat_map(|i| i.methods.iter())
            .collect()
    }

    /// Looks up a single method by owner path and name.
    #[must_use]
    pub fn find_method(&self, owner: &str, name: &str) -> Option<&MethodSymbol> {
        self.methods_of(owner).into_iter().find(|m| m.ident == name)
    }

    /// All registered structs carrying the given attribute, in registration
    /// order.
    #[must_use]
    pub fn structs_with_attr(&self, attr_name: &str) -> Vec<&StructSymbol> {
        self.structs
            .iter()
            .filter(|s| s.attrs.iter().any(|a| a.path().is_ident(attr_name)))
            .collect()
    }

    fn collect_items(&mut self, items: &[syn::Item], module_path: &str) {
        for item in items {
            match item {
                syn::Item::Struct(s) => self.collect_struct(s, module_path),
                syn::Item::Impl(i) => self.collect_impl(i, module_path),
                syn::Item::Mod(m) => {
                    if let Some((_, nested)) = &m.content {
                        let nested_path = join_path(module_path, &m.ident.to_string());
                        self.collect_items(nested, &nested_path);
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_struct(&mut self, item: &syn::ItemStruct, module_path: &str) {
        let ident = item.ident.to_string();
        let fields = match &item.fields {
            syn::Fields::Named(named) => named
                .named
                .iter()
                .map(|f| FieldSymbol {
                    ident: f
                        .ident
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                    ty: f.ty.clone(),
                    is_public: matches!(f.vis, syn::Visibility::Public(_)),
                    attrs: f.attrs.clone(),
                })
                .collect(),
            _ => Vec::new(),
        };
        self.structs.push(StructSymbol {
            path: join_path(module_path, &ident),
            ident,
            fields,
            attrs: item.attrs.clone(),
        });
    }

    fn collect_impl(&mut self, item: &syn::ItemImpl, module_path: &str) {
        // Trait impls never contribute provider members.
        if item.trait_.is_some() {
            return;
        }
        let syn::Type::Path(self_ty) = item.self_ty.as_ref() else {
            return;
        };
        let Some(last) = self_ty.path.segments.last() else {
            return;
        };

        let methods = item
            .items
            .iter()
            .filter_map(|member| match member {
                syn::ImplItem::Fn(f) => Some(method_symbol(f)),
                _ => None,
            })
            .collect();

        self.impls.push(ImplSymbol {
            self_path: join_path(module_path, &last.ident.to_string()),
            methods,
        });
    }
}

fn method_symbol(f: &syn::ImplItemFn) -> MethodSymbol {
    let has_receiver = f
        .sig
        .inputs
        .first()
        .is_some_and(|arg| matches!(arg, syn::FnArg::Receiver(_)));
    let params = f
        .sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            syn::FnArg::Typed(t) => Some((*t.ty).clone()),
            syn::FnArg::Receiver(_) => None,
        })
        .collect();
    let ret = match &f.sig.output {
        syn::ReturnType::Default => None,
        syn::ReturnType::Type(_, ty) => Some((**ty).clone()),
    };
    MethodSymbol {
        ident: f.sig.ident.to_string(),
        is_public: matches!(f.vis, syn::Visibility::Public(_)),
        has_receiver,
        params,
        ret,
        attrs: f.attrs.clone(),
    }
}

fn join_path(module_path: &str, ident: &str) -> String {
    if module_path.is_empty() {
        ident.to_string()
    } else {
        format!("{module_path}::{ident}")
    }
}

fn module_for(root_module: &str, root_dir: &Path, file: &Path) -> String {
    let mut module = root_module.to_string();
    if let Ok(rel) = file.strip_prefix(root_dir) {
        for component in rel.components() {
            let part = component.as_os_str().to_string_lossy();
            let part = part.trim_end_matches(".rs");
            if part == "mod" || part == "lib" {
                continue;
            }
            module = join_path(&module, part);
        }
    }
    module
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SOURCE: &str = r"
        pub struct AddressView {
            pub street: String,
            city: String,
        }

        pub mod ops {
            pub struct GeoOps;

            impl GeoOps {
                pub fn region(op: &str, args: &[Value]) -> PredicateResolver<Address> {
                    unimplemented!()
                }

                pub fn distance(&self, op: &str, args: &[Value]) -> PredicateResolver<Address> {
                    unimplemented!()
                }

                fn helper(&self) {}
            }
        }
    ";

    fn graph() -> SymbolGraph {
        let mut graph = SymbolGraph::new();
        graph.add_source("crate::dto", "dto.rs", SOURCE).unwrap();
        graph
    }

    #[test]
    fn test_struct_indexing_and_field_visibility() {
        let graph = graph();
        let s = graph.resolve_struct("crate::dto::AddressView").unwrap();
        assert_eq!(s.fields.len(), 2);
        assert!(s.fields[0].is_public);
        assert!(!s.fields[1].is_public);
    }

    #[test]
    fn test_nested_module_path() {
        let graph = graph();
        assert!(graph.resolve_struct("crate::dto::ops::GeoOps").is_some());
    }

    #[test]
    fn test_trailing_segment_resolution() {
        let graph = graph();
        let s = graph.resolve_struct("GeoOps").unwrap();
        assert_eq!(s.path, "crate::dto::ops::GeoOps");
    }

    #[test]
    fn test_ambiguous_simple_name_does_not_resolve() {
        let mut graph = graph();
        graph
            .add_source("crate::other", "other.rs", "pub struct GeoOps;")
            .unwrap();
        assert!(graph.resolve_struct("GeoOps").is_none());
        assert!(graph.resolve_struct("crate::other::GeoOps").is_some());
    }

    #[test]
    fn test_methods_in_declaration_order() {
        let graph = graph();
        let methods = graph.methods_of("crate::dto::ops::GeoOps");
        let names: Vec<_> = methods.iter().map(|m| m.ident.as_str()).collect();
        assert_eq!(names, vec!["region", "distance", "helper"]);
    }

    #[test]
    fn test_receiver_and_visibility_flags() {
        let graph = graph();
        let region = graph.find_method("crate::dto::ops::GeoOps", "region").unwrap();
        assert!(!region.has_receiver);
        assert!(region.is_public);
        assert_eq!(region.params.len(), 2);

        let distance = graph
            .find_method("crate::dto::ops::GeoOps", "distance")
            .unwrap();
        assert!(distance.has_receiver);
        assert_eq!(distance.params.len(), 2);

        let helper = graph.find_method("crate::dto::ops::GeoOps", "helper").unwrap();
        assert!(!helper.is_public);
        assert!(helper.ret.is_none());
    }

    #[test]
    fn test_structs_with_attr() {
        let mut graph = graph();
        graph
            .add_source(
                "crate::dto",
                "views.rs",
                r"#[projection(entity = crate::model::Address)]
                  pub struct AddressView { pub city: String }
                  #[projection(entity = crate::model::Person)]
                  pub struct PersonView { pub name: String }",
            )
            .unwrap();

        let projections = graph.structs_with_attr("projection");
        let names: Vec<_> = projections.iter().map(|s| s.ident.as_str()).collect();
        assert_eq!(names, vec!["AddressView", "PersonView"]);
    }

    #[test]
    fn test_parse_error_reports_file() {
        let mut graph = SymbolGraph::new();
        let err = graph
            .add_source("crate", "broken.rs", "struct {")
            .unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("broken.rs"));
    }

    #[test]
    fn test_add_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("model");
        std::fs::create_dir_all(&nested).unwrap();
        let mut f = std::fs::File::create(nested.join("address.rs")).unwrap();
        writeln!(f, "pub struct Address {{ pub id: u64 }}").unwrap();

        let mut graph = SymbolGraph::new();
        let count = graph.add_dir("crate", dir.path()).unwrap();
        assert_eq!(count, 1);
        assert!(graph.resolve_struct("crate::model::address::Address").is_some());
    }
}
