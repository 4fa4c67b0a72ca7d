//! Naming conversions for discovered members and generated items.
//!
//! Provides the case conversions used to derive reference constants,
//! factory/endpoint names, and exposed resource names from source
//! identifiers.
//!
//! # Examples
//!
//! ```
//! use filtergen_core::naming;
//!
//! assert_eq!(naming::to_upper_snake_case("streetName"), "STREET_NAME");
//! assert_eq!(naming::to_kebab_case("AddressView"), "address-view");
//! assert_eq!(naming::simple_name("crate::dto::AddressView"), "AddressView");
//! ```

/// Converts a camelCase or snake_case identifier to UPPER_SNAKE_CASE.
///
/// # Examples
///
/// ```
/// use filtergen_core::naming::to_upper_snake_case;
///
/// assert_eq!(to_upper_snake_case("streetName"), "STREET_NAME");
/// assert_eq!(to_upper_snake_case("street_name"), "STREET_NAME");
/// assert_eq!(to_upper_snake_case("city"), "CITY");
/// ```
#[must_use]
pub fn to_upper_snake_case(ident: &str) -> String {
    let mut result = String::new();
    let mut prev_lower_or_digit = false;

    for ch in ident.chars() {
        if ch.is_ascii_uppercase() && prev_lower_or_digit {
            result.push('_');
        }
        prev_lower_or_digit = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        result.push(ch.to_ascii_uppercase());
    }

    result
}

/// Converts a PascalCase or camelCase identifier to snake_case.
///
/// # Examples
///
/// ```
/// use filtergen_core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("AddressView"), "address_view");
/// assert_eq!(to_snake_case("userId"), "user_id");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
#[must_use]
pub fn to_snake_case(ident: &str) -> String {
    let mut result = String::new();
    let mut prev_lower_or_digit = false;

    for ch in ident.chars() {
        if ch.is_ascii_uppercase() && prev_lower_or_digit {
            result.push('_');
        }
        prev_lower_or_digit = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        result.push(ch.to_ascii_lowercase());
    }

    result
}

/// Converts a PascalCase or camelCase identifier to kebab-case.
///
/// # Examples
///
/// ```
/// use filtergen_core::naming::to_kebab_case;
///
/// assert_eq!(to_kebab_case("AddressView"), "address-view");
/// assert_eq!(to_kebab_case("userAccount2Fa"), "user-account2-fa");
/// ```
#[must_use]
pub fn to_kebab_case(ident: &str) -> String {
    to_snake_case(ident).replace('_', "-")
}

/// Extracts the trailing segment of a `::`-separated path.
///
/// # Examples
///
/// ```
/// use filtergen_core::naming::simple_name;
///
/// assert_eq!(simple_name("crate::dto::AddressView"), "AddressView");
/// assert_eq!(simple_name("AddressView"), "AddressView");
/// ```
#[must_use]
pub fn simple_name(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Extracts the module prefix of a `::`-separated path, or the empty string
/// for a bare name.
///
/// # Examples
///
/// ```
/// use filtergen_core::naming::module_path;
///
/// assert_eq!(module_path("crate::dto::AddressView"), "crate::dto");
/// assert_eq!(module_path("AddressView"), "");
/// ```
#[must_use]
pub fn module_path(path: &str) -> &str {
    match path.rfind("::") {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Joins a module path and an item name, tolerating an empty module.
///
/// # Examples
///
/// ```
/// use filtergen_core::naming::qualify;
///
/// assert_eq!(qualify("crate::dto", "AddressViewRef"), "crate::dto::AddressViewRef");
/// assert_eq!(qualify("", "AddressViewRef"), "AddressViewRef");
/// ```
#[must_use]
pub fn qualify(module: &str, name: &str) -> String {
    if module.is_empty() {
        name.to_string()
    } else {
        format!("{module}::{name}")
    }
}
