//! Template engine for source generation.
//!
//! Replaces placeholders of the form `${identifier}` (where `identifier`
//! matches `[A-Za-z0-9_]+`) with values from a rendering context. The engine
//! is strict: a placeholder whose key is missing from the context fails with
//! a missing-variable error, and a key bound to null fails with an
//! invalid-variable error — null is never silently converted to empty text.
//! There is no escaping mechanism; any text matching the placeholder syntax
//! is resolved or rejected by the same rule.
//!
//! The five fixed artifact templates are compiled in and registered by name.
//!
//! # Examples
//!
//! ```
//! use filtergen_codegen::{RenderContext, TemplateEngine};
//!
//! let engine = TemplateEngine::new().unwrap();
//! let mut context = RenderContext::new();
//! context.set("name", "AddressViewRef");
//! let out = engine.render("pub enum ${name} {}", &context).unwrap();
//! assert_eq!(out, "pub enum AddressViewRef {}");
//! ```

use filtergen_core::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

/// Placeholder pattern: `${identifier}`.
const PLACEHOLDER_PATTERN: &str = r"\$\{([A-Za-z0-9_]+)\}";

/// String-keyed rendering context.
///
/// Values are [`serde_json::Value`]s; `Value::Null` is the explicit absence
/// marker that rendering rejects. An empty context stands in for an absent
/// one: a template without placeholders renders unchanged against it.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    values: BTreeMap<String, Value>,
}

impl RenderContext {
    /// Creates an empty context.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Binds `key` to `value` and returns the context, for chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_codegen::RenderContext;
    ///
    /// let context = RenderContext::new().with("a", "1").with("b", 2);
    /// assert_eq!(context.get("b").unwrap(), &serde_json::json!(2));
    /// ```
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Looks up a bound value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// Strict placeholder-substitution engine with fixed named templates.
#[derive(Debug)]
pub struct TemplateEngine {
    placeholder: Regex,
    templates: BTreeMap<String, String>,
}

impl TemplateEngine {
    /// Creates an engine with the built-in artifact templates registered.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the placeholder pattern fails to
    /// compile (does not happen with the built-in pattern).
    pub fn new() -> Result<Self> {
        let placeholder = Regex::new(PLACEHOLDER_PATTERN).map_err(|e| Error::Config {
            message: format!("invalid placeholder pattern: {e}"),
        })?;

        let mut engine = Self {
            placeholder,
            templates: BTreeMap::new(),
        };
        engine.register_template(
            "reference-enum",
            include_str!("../templates/reference-enum.rs.tpl"),
        );
        engine.register_template(
            "context-factory",
            include_str!("../templates/context-factory.rs.tpl"),
        );
        engine.register_template(
            "context-module",
            include_str!("../templates/context-module.rs.tpl"),
        );
        engine.register_template("endpoint", include_str!("../templates/endpoint.rs.tpl"));
        engine.register_template(
            "endpoint-module",
            include_str!("../templates/endpoint-module.rs.tpl"),
        );
        Ok(engine)
    }

    /// Registers (or replaces) a named template.
    pub fn register_template(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(name.into(), text.into());
    }

    /// Returns the text of a registered template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTemplate`] for unregistered names.
    pub fn template(&self, name: &str) -> Result<&str> {
        self.templates
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownTemplate {
                name: name.to_string(),
            })
    }

    /// Renders a registered template against `context`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTemplate`], or any error of [`Self::render`].
    pub fn render_named(&self, name: &str, context: &RenderContext) -> Result<String> {
        let template = self.template(name)?;
        self.render(template, context)
    }

    /// Renders `template` against `context`.
    ///
    /// Substitution is exact: string values are inserted verbatim (embedded
    /// line breaks and indentation preserved, no re-indenting), booleans and
    /// numbers use their standard text form, and an empty string makes the
    /// placeholder vanish. Rendering is all-or-nothing; on error no partial
    /// output is produced.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingTemplateVariable`] when a placeholder key is absent.
    /// - [`Error::InvalidTemplateVariable`] when a placeholder key is null.
    pub fn render(&self, template: &str, context: &RenderContext) -> Result<String> {
        let mut output = String::with_capacity(template.len());
        let mut last = 0;

        for captures in self.placeholder.captures_iter(template) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let key = &captures[1];

            output.push_str(&template[last..whole.start()]);
            match context.get(key) {
                None => {
                    return Err(Error::MissingTemplateVariable {
                        key: key.to_string(),
                    });
                }
                Some(Value::Null) => {
                    return Err(Error::InvalidTemplateVariable {
                        key: key.to_string(),
                    });
                }
                Some(Value::String(s)) => output.push_str(s),
                Some(Value::Bool(b)) => output.push_str(&b.to_string()),
                Some(Value::Number(n)) => output.push_str(&n.to_string()),
                Some(other) => output.push_str(&other.to_string()),
            }
            last = whole.end();
        }

        output.push_str(&template[last..]);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TemplateEngine {
        TemplateEngine::new().unwrap()
    }

    #[test]
    fn test_built_in_templates_registered() {
        let engine = engine();
        for name in [
            "reference-enum",
            "context-factory",
            "context-module",
            "endpoint",
            "endpoint-module",
        ] {
            assert!(engine.template(name).unwrap().contains("${"));
        }
    }

    #[test]
    fn test_unknown_template() {
        let err = engine().template("nonexistent").unwrap_err();
        assert!(matches!(err, Error::UnknownTemplate { .. }));
    }

    #[test]
    fn test_simple_substitution() {
        let context = RenderContext::new().with("name", "John").with("age", 25);
        let result = engine()
            .render("Hello ${name}, you are ${age} years old.", &context)
            .unwrap();
        assert_eq!(result, "Hello John, you are 25 years old.");
    }

    #[test]
    fn test_missing_variable_fails() {
        let err = engine()
            .render("${x}", &RenderContext::new())
            .unwrap_err();
        assert!(err.is_missing_template_variable());
        assert!(err.to_string().contains('x'));
    }

    #[test]
    fn test_null_variable_fails() {
        let context = RenderContext::new().with("x", Value::Null);
        let err = engine().render("${x}", &context).unwrap_err();
        assert!(err.is_invalid_template_variable());
    }

    #[test]
    fn test_adjacent_and_repeated_placeholders() {
        let context = RenderContext::new().with("x", "Z");
        assert_eq!(engine().render("a${x}${x}b", &context).unwrap(), "aZZb");

        let context = RenderContext::new().with("first", "Hello").with("second", "World");
        assert_eq!(
            engine().render("${first}${second}", &context).unwrap(),
            "HelloWorld"
        );
    }

    #[test]
    fn test_empty_value_vanishes() {
        let context = RenderContext::new().with("value", "");
        assert_eq!(
            engine().render("Prefix${value}Suffix", &context).unwrap(),
            "PrefixSuffix"
        );
    }

    #[test]
    fn test_multiline_value_preserved_verbatim() {
        let context = RenderContext::new().with("body", "if ok {\n    return value;\n}");
        let result = engine().render("Method:\n${body}", &context).unwrap();
        assert_eq!(result, "Method:\nif ok {\n    return value;\n}");
    }

    #[test]
    fn test_no_placeholders_passes_through_for_any_context() {
        let template = "This is a plain text template.";
        assert_eq!(
            engine().render(template, &RenderContext::new()).unwrap(),
            template
        );
        let populated = RenderContext::new().with("unused", Value::Null);
        assert_eq!(engine().render(template, &populated).unwrap(), template);
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(engine().render("", &RenderContext::new()).unwrap(), "");
    }

    #[test]
    fn test_boolean_and_numeric_values() {
        let context = RenderContext::new()
            .with("enabled", true)
            .with("count", 42)
            .with("ratio", 1.618);
        let result = engine()
            .render("${enabled} ${count} ${ratio}", &context)
            .unwrap();
        assert_eq!(result, "true 42 1.618");
    }

    #[test]
    fn test_no_escaping_mechanism() {
        // A backslash does not protect a placeholder; it is resolved (and
        // rejected) by the same rule.
        let err = engine()
            .render(r"\${notAVariable}", &RenderContext::new())
            .unwrap_err();
        assert!(err.is_missing_template_variable());
    }

    #[test]
    fn test_dollar_signs_outside_placeholders_preserved() {
        let context = RenderContext::new().with("var", "value");
        let result = engine()
            .render("Price: $10.00, Variable: ${var}", &context)
            .unwrap();
        assert_eq!(result, "Price: $10.00, Variable: value");
    }

    #[test]
    fn test_non_identifier_braces_are_not_placeholders() {
        let result = engine()
            .render("${not-an-identifier}", &RenderContext::new())
            .unwrap();
        assert_eq!(result, "${not-an-identifier}");
    }

    #[test]
    fn test_nested_braces() {
        let context = RenderContext::new().with("value", "nested");
        assert_eq!(
            engine().render("Code: { ${value} }", &context).unwrap(),
            "Code: { nested }"
        );
    }

    #[test]
    fn test_underscores_and_digits_in_keys() {
        let context = RenderContext::new()
            .with("my_variable_name", "a")
            .with("var123", "b");
        assert_eq!(
            engine().render("${my_variable_name}${var123}", &context).unwrap(),
            "ab"
        );
    }

    #[test]
    fn test_indentation_of_substituted_value_not_reindented() {
        let context = RenderContext::new().with("code", "line1\n        line2");
        let result = engine().render("    ${code}", &context).unwrap();
        assert_eq!(result, "    line1\n        line2");
    }

    #[test]
    fn test_error_yields_no_partial_output() {
        let context = RenderContext::new().with("a", "ok");
        let result = engine().render("${a} then ${missing}", &context);
        assert!(result.is_err());
    }

    #[test]
    fn test_template_override() {
        let mut engine = engine();
        engine.register_template("custom", "Version 1");
        engine.register_template("custom", "Version ${n}");
        let context = RenderContext::new().with("n", 2);
        assert_eq!(engine.render_named("custom", &context).unwrap(), "Version 2");
    }
}
