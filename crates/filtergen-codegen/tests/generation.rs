//! End-to-end generation tests.
//!
//! Builds a symbol graph from annotated source text, runs a full generation
//! pass, and inspects the emitted artifacts.

use filtergen_codegen::Orchestrator;
use filtergen_core::{GeneratorConfig, MemorySink, Severity};
use filtergen_symbols::SymbolGraph;

const ADDRESS_ONLY: &str = r#"
    #[projection(entity = crate::model::Address)]
    pub struct Address {
        #[exposed(name = "STREET", operators(Eq, Matches))]
        pub street: String,
        #[exposed(name = "CITY", operators(Eq, Matches))]
        pub city: String,
    }
"#;

const FULL_SCENARIO: &str = r#"
    #[projection(entity = crate::model::Person,
                 providers(crate::ops::PersonOps, tenancy: crate::ops::TenancyOps))]
    #[exposure(name = "people", base_path = "/api", strategy = "paginated",
               pipes(crate::ops::PersonPipes::normalize))]
    pub struct PersonView {
        pub first_name: String,
        pub age: u32,
        #[not_filterable]
        pub ssn: String,
    }

    pub struct PersonOps;

    impl PersonOps {
        #[exposed(name = "FULL_NAME", operators(Matches))]
        pub fn full_name(op: &str, args: &[Value]) -> PredicateResolver<Person> {
            unimplemented!()
        }
    }

    pub struct TenancyOps;

    impl TenancyOps {
        #[exposed(name = "TENANT")]
        pub fn tenant(&self, op: &str, args: &[Value]) -> PredicateResolver<Person> {
            unimplemented!()
        }
    }

    pub struct PersonPipes;

    impl PersonPipes {
        pub fn normalize(req: FilterRequest<PersonViewRef>) -> FilterRequest<PersonViewRef> {
            req
        }
    }
"#;

const DUPLICATE_SCENARIO: &str = r#"
    #[projection(entity = crate::model::Address, providers(crate::ops::CityOps))]
    pub struct AddressView {
        #[exposed(name = "CITY")]
        pub city: String,
    }

    pub struct CityOps;

    impl CityOps {
        #[exposed(name = "CITY")]
        pub fn city_filter(op: &str, args: &[Value]) -> PredicateResolver<Address> {
            unimplemented!()
        }
    }
"#;

fn run(source: &str, module: &str, roots: &[&str]) -> (MemorySink, Orchestrator) {
    let mut graph = SymbolGraph::new();
    graph.add_source(module, "fixture.rs", source).unwrap();
    let mut orchestrator = Orchestrator::new(GeneratorConfig::default()).unwrap();
    let mut sink = MemorySink::new();
    orchestrator.run(&graph, roots, &mut sink).unwrap();
    (sink, orchestrator)
}

#[test]
fn address_scenario_emits_expected_reference_type() {
    let (sink, orchestrator) = run(ADDRESS_ONLY, "crate::dto", &["crate::dto::Address"]);
    assert!(!orchestrator.diagnostics().has_errors());

    let reference = sink.get("crate::dto::AddressRef").unwrap();
    let street = reference.find("    STREET,").unwrap();
    let city = reference.find("    CITY,").unwrap();
    assert!(street < city);

    // Two-case type and operator lookups.
    assert_eq!(reference.matches("Self::STREET =>").count(), 2);
    assert_eq!(reference.matches("Self::CITY =>").count(), 2);
    assert!(reference.contains("meta.direct_mapping(\"street\").value_type()"));

    // Operator sets: emission preserves attached order; compare as a set.
    assert!(reference.contains("Self::CITY => &[Op::Eq, Op::Matches],"));
}

#[test]
fn address_scenario_registration_block_uses_path_literals_only() {
    let (sink, _) = run(ADDRESS_ONLY, "crate::dto", &["crate::dto::Address"]);
    let contexts = sink.get("filtergen_generated::contexts").unwrap();

    assert!(contexts.contains("pub fn context_of_address()"));
    assert!(contexts.contains("crate::dto::AddressRef::STREET => Mapping::path(\"street\"),"));
    assert!(contexts.contains("crate::dto::AddressRef::CITY => Mapping::path(\"city\"),"));
    assert!(!contexts.contains("resolver: InstanceResolver"));
    assert!(!contexts.contains("Mapping::resolver"));
}

#[test]
fn full_scenario_produces_all_three_artifacts() {
    let (sink, orchestrator) = run(FULL_SCENARIO, "crate::dto", &["crate::dto::PersonView"]);
    assert!(!orchestrator.diagnostics().has_errors());

    let reference = sink.get("crate::dto::PersonViewRef").unwrap();
    for constant in ["FIRST_NAME", "AGE", "FULL_NAME", "TENANT"] {
        assert!(reference.contains(constant), "missing constant {constant}");
    }
    assert!(!reference.contains("SSN"));
    assert!(reference.contains("Self::FULL_NAME => ValueType::Opaque,"));

    let contexts = sink.get("filtergen_generated::contexts").unwrap();
    // The instance-resolved provider forces the resolver parameter.
    assert!(contexts.contains("pub fn context_of_person_view(resolver: InstanceResolver)"));
    assert!(contexts.contains("crate::ops::PersonOps::full_name(op, args)"));
    assert!(contexts.contains(
        "resolver.resolve::<crate::ops::TenancyOps>(Some(\"tenancy\")).tenant(op, args)"
    ));

    let endpoints = sink.get("filtergen_generated::endpoints").unwrap();
    assert!(endpoints.contains("pub async fn search_person_view("));
    assert!(endpoints.contains("`POST /api/search/people`"));
    assert!(endpoints.contains("-> PagedData<crate::dto::PersonView>"));
    assert!(endpoints.contains("let req = crate::ops::PersonPipes::normalize(req);"));
}

#[test]
fn duplicate_reference_names_keep_first_registration() {
    let (sink, orchestrator) = run(
        DUPLICATE_SCENARIO,
        "crate::dto",
        &["crate::dto::AddressView"],
    );
    // The silent first-wins policy produces no diagnostics.
    assert!(!orchestrator.diagnostics().has_errors());

    let contexts = sink.get("filtergen_generated::contexts").unwrap();
    assert!(contexts.contains("crate::dto::AddressViewRef::CITY => Mapping::path(\"city\"),"));
    assert!(!contexts.contains("city_filter"));

    let reference = sink.get("crate::dto::AddressViewRef").unwrap();
    assert_eq!(reference.matches("    CITY,").count(), 1);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let (first, _) = run(FULL_SCENARIO, "crate::dto", &["crate::dto::PersonView"]);
    let (second, _) = run(FULL_SCENARIO, "crate::dto", &["crate::dto::PersonView"]);
    assert_eq!(first.artifacts(), second.artifacts());
}

#[test]
fn empty_projection_emits_empty_reference_type_with_warning() {
    let source = r"
        #[projection(entity = crate::model::Nothing)]
        pub struct EmptyView {
            secret: String,
        }
    ";
    let (sink, orchestrator) = run(source, "crate::dto", &["crate::dto::EmptyView"]);

    assert!(!orchestrator.diagnostics().has_errors());
    assert!(orchestrator
        .diagnostics()
        .iter()
        .any(|d| d.severity == Severity::Warning));

    let reference = sink.get("crate::dto::EmptyViewRef").unwrap();
    assert!(reference.contains("pub enum EmptyViewRef"));
    assert!(reference.contains("match *self {}"));
}

#[test]
fn shape_violation_degrades_one_attribute_only() {
    let source = r#"
        #[projection(entity = crate::model::Address, providers(crate::ops::MixedOps))]
        pub struct AddressView {
            pub city: String,
        }

        pub struct MixedOps;

        impl MixedOps {
            #[exposed(name = "GOOD")]
            pub fn good(op: &str, args: &[Value]) -> PredicateResolver<Address> {
                unimplemented!()
            }

            #[exposed(name = "BAD")]
            pub fn bad(op: String, args: Vec<Value>) -> PredicateResolver<Address> {
                unimplemented!()
            }
        }
    "#;
    let (sink, orchestrator) = run(source, "crate::dto", &["crate::dto::AddressView"]);

    assert!(orchestrator.diagnostics().has_errors());
    let reference = sink.get("crate::dto::AddressViewRef").unwrap();
    assert!(reference.contains("GOOD"));
    assert!(!reference.contains("BAD"));
}
