//! Generator configuration.
//!
//! Controls the naming of generated items and the placement of the aggregate
//! artifacts. One configuration value is owned by the orchestrator for the
//! lifetime of a generation pass.
//!
//! # Examples
//!
//! ```
//! use filtergen_core::GeneratorConfig;
//!
//! let config = GeneratorConfig::default();
//! assert_eq!(config.generated_module, "filtergen_generated");
//!
//! let custom = GeneratorConfig::builder()
//!     .generated_module("my_app_generated")
//!     .build();
//! assert_eq!(custom.generated_module, "my_app_generated");
//! ```

/// Configuration for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Module path under which the aggregate artifacts are emitted.
    ///
    /// The registration module lands at `<generated_module>::contexts` and
    /// the endpoint module at `<generated_module>::endpoints`.
    /// Default: `filtergen_generated`
    pub generated_module: String,

    /// Suffix appended to a projection's simple name to form its reference
    /// enum name.
    /// Default: `Ref`
    pub reference_suffix: String,

    /// Path segment inserted between the base path and the exposed resource
    /// name in endpoint route comments.
    /// Default: `search`
    pub search_segment: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generated_module: "filtergen_generated".to_string(),
            reference_suffix: "Ref".to_string(),
            search_segment: "search".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Reference enum name for a projection simple name.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtergen_core::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::default();
    /// assert_eq!(config.reference_name("AddressView"), "AddressViewRef");
    /// ```
    #[must_use]
    pub fn reference_name(&self, simple_name: &str) -> String {
        format!("{simple_name}{}", self.reference_suffix)
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    generated_module: Option<String>,
    reference_suffix: Option<String>,
    search_segment: Option<String>,
}

impl GeneratorConfigBuilder {
    /// Sets the aggregate-artifact module path.
    #[must_use]
    pub fn generated_module(mut self, module: impl Into<String>) -> Self {
        self.generated_module = Some(module.into());
        self
    }

    /// Sets the reference enum suffix.
    #[must_use]
    pub fn reference_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.reference_suffix = Some(suffix.into());
        self
    }

    /// Sets the search route segment.
    #[must_use]
    pub fn search_segment(mut self, segment: impl Into<String>) -> Self {
        self.search_segment = Some(segment.into());
        self
    }

    /// Builds the configuration, filling unset fields with defaults.
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        let defaults = GeneratorConfig::default();
        GeneratorConfig {
            generated_module: self.generated_module.unwrap_or(defaults.generated_module),
            reference_suffix: self.reference_suffix.unwrap_or(defaults.reference_suffix),
            search_segment: self.search_segment.unwrap_or(defaults.search_segment),
        }
    }
}
