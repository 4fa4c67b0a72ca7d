//! Structural type matching and value-kind classification.
//!
//! The symbol model's exact-type-equality primitive is token-normalized text
//! comparison: two types are "the same" when their token streams are
//! identical modulo whitespace. Parameterized wrappers are matched on their
//! trailing path segment with exactly one generic argument, and entity or
//! projection arguments match on the full path as written or on the trailing
//! segment.

use filtergen_core::Op;
use quote::ToTokens;

/// Value classification of a direct attribute's declared type, used by the
/// default operator strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Textual types (`String`, `str`, `&str`).
    Text,
    /// Integer types.
    Integer,
    /// Floating point types.
    Float,
    /// `bool`.
    Boolean,
    /// Date/time/duration types, matched by conventional type names.
    Temporal,
    /// Anything else.
    Other,
}

/// Token-normalized text of a type: all whitespace removed.
///
/// # Examples
///
/// ```
/// use filtergen_symbols::typing::type_text;
///
/// let ty: syn::Type = syn::parse_str("& [ serde_json :: Value ]").unwrap();
/// assert_eq!(type_text(&ty), "&[serde_json::Value]");
/// ```
#[must_use]
pub fn type_text(ty: &syn::Type) -> String {
    strip_spaces(&ty.to_token_stream().to_string())
}

/// Readable text of a type for emission into generated source.
///
/// Same normalization as [`type_text`] but keeps a space after commas.
///
/// # Examples
///
/// ```
/// use filtergen_symbols::typing::compact_type_text;
///
/// let ty: syn::Type = syn::parse_str("PagedData<Map<String, Value>>").unwrap();
/// assert_eq!(compact_type_text(&ty), "PagedData<Map<String, Value>>");
/// ```
#[must_use]
pub fn compact_type_text(ty: &syn::Type) -> String {
    type_text(ty).replace(',', ", ")
}

/// Returns `true` when the two types are token-identical modulo whitespace.
#[must_use]
pub fn is_same_type(a: &syn::Type, b: &syn::Type) -> bool {
    type_text(a) == type_text(b)
}

/// If `ty` is `<...>::Wrapper<T>` with exactly one generic type argument,
/// returns `T`. The wrapper is matched on its trailing path segment, so both
/// `PredicateResolver<E>` and `filtergen_runtime::PredicateResolver<E>`
/// qualify.
#[must_use]
pub fn single_generic_arg<'t>(ty: &'t syn::Type, wrapper: &str) -> Option<&'t syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let last = type_path.path.segments.last()?;
    if last.ident != wrapper {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// Returns `true` when `ty` names `expected`: either token-identical to the
/// expected path, or a plain path whose trailing segment equals the expected
/// path's trailing segment.
///
/// # Examples
///
/// ```
/// use filtergen_symbols::typing::path_matches;
///
/// let ty: syn::Type = syn::parse_str("Address").unwrap();
/// assert!(path_matches(&ty, "crate::model::Address"));
/// assert!(!path_matches(&ty, "crate::model::Person"));
/// ```
#[must_use]
pub fn path_matches(ty: &syn::Type, expected: &str) -> bool {
    let expected_stripped = strip_spaces(expected);
    if type_text(ty) == expected_stripped {
        return true;
    }
    let syn::Type::Path(type_path) = ty else {
        return false;
    };
    let Some(last) = type_path.path.segments.last() else {
        return false;
    };
    last.arguments.is_none()
        && last.ident == filtergen_core::naming::simple_name(&expected_stripped)
}

/// Returns `true` for the operator-text parameter shape (`&str`).
#[must_use]
pub fn is_op_text_param(ty: &syn::Type) -> bool {
    type_text(ty) == "&str"
}

/// Returns `true` for the argument-array parameter shape.
///
/// Accepts the `&[Value]` and `&[serde_json::Value]` spellings.
#[must_use]
pub fn is_args_array_param(ty: &syn::Type) -> bool {
    matches!(
        type_text(ty).as_str(),
        "&[Value]" | "&[serde_json::Value]"
    )
}

/// Classifies a declared value type for the default operator strategy.
///
/// `Option<T>` unwraps to the classification of `T`.
///
/// # Examples
///
/// ```
/// use filtergen_symbols::typing::{classify, ValueKind};
///
/// let ty: syn::Type = syn::parse_str("Option<String>").unwrap();
/// assert_eq!(classify(&ty), ValueKind::Text);
/// ```
#[must_use]
pub fn classify(ty: &syn::Type) -> ValueKind {
    if let Some(inner) = single_generic_arg(ty, "Option") {
        return classify(inner);
    }

    match ty {
        syn::Type::Reference(reference) => classify(&reference.elem),
        syn::Type::Path(type_path) => {
            let Some(last) = type_path.path.segments.last() else {
                return ValueKind::Other;
            };
            classify_name(&last.ident.to_string())
        }
        _ => ValueKind::Other,
    }
}

fn classify_name(name: &str) -> ValueKind {
    match name {
        "String" | "str" => ValueKind::Text,
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => ValueKind::Integer,
        "f32" | "f64" => ValueKind::Float,
        "bool" => ValueKind::Boolean,
        "SystemTime" | "Instant" | "Duration" | "NaiveDate" | "NaiveDateTime" | "NaiveTime"
        | "DateTime" | "Date" | "Time" | "Timestamp" => ValueKind::Temporal,
        _ => ValueKind::Other,
    }
}

/// Default operator strategy keyed by value kind.
///
/// Text defaults to equality and containment-match; numeric and temporal
/// kinds default to equality, ordering, and range; boolean defaults to
/// equality; everything else falls back to equality.
#[must_use]
pub fn default_operators(kind: ValueKind) -> Vec<Op> {
    match kind {
        ValueKind::Text => vec![Op::Eq, Op::Matches],
        ValueKind::Integer | ValueKind::Float | ValueKind::Temporal => vec![
            Op::Eq,
            Op::Ne,
            Op::Gt,
            Op::Gte,
            Op::Lt,
            Op::Lte,
            Op::Range,
        ],
        ValueKind::Boolean => vec![Op::Eq],
        ValueKind::Other => vec![Op::Eq],
    }
}

fn strip_spaces(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
