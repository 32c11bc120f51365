use automapper_recipe::framework::{
    from_value, ignore, map_from, map_with, BoxError, DuplicatePolicy, MapperConfig, MapperError,
    MappingKey, MappingOptions, MappingRegistry, RegistryState,
};
use serde::{Deserialize, Serialize};

// --- Test Types ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Customer {
    id: u32,
    first_name: String,
    last_name: String,
    email: Option<String>,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct CustomerDto {
    id: u32,
    full_name: String,
    email: Option<String>,
    tier: String,
    notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    number: String,
    customer: Customer,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct OrderDto {
    number: String,
    customer: CustomerDto,
}

fn customer() -> Customer {
    Customer {
        id: 7,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: None,
    }
}

fn registry() -> MappingRegistry {
    MappingRegistry::new(MapperConfig::default())
}

fn register_customer(registry: &mut MappingRegistry) {
    registry
        .create_map::<Customer, CustomerDto>()
        .for_member(
            "full_name",
            map_from(|c: &Customer| format!("{} {}", c.first_name, c.last_name)),
        )
        .register()
        .unwrap();
}

// --- Tests ---

#[test]
fn test_get_mapping_returns_the_created_key() {
    let mut registry = registry();
    let created = registry
        .create_mapping(MappingKey::of::<Customer, CustomerDto>(), MappingOptions::new())
        .unwrap();

    let found = registry.mapping::<Customer, CustomerDto>().unwrap();
    assert_eq!(found.key(), MappingKey::of::<Customer, CustomerDto>());
    assert_eq!(found.key(), created.key());
    assert!(registry.get_mapping(MappingKey::of::<CustomerDto, Customer>()).is_none());
}

#[test]
fn test_convention_copies_same_named_members_and_skips_the_rest() {
    let mut registry = registry();
    register_customer(&mut registry);

    let dto: CustomerDto = registry.map(&customer()).unwrap();
    assert_eq!(
        dto,
        CustomerDto {
            id: 7,
            full_name: "Ada Lovelace".to_string(),
            email: None,
            // no source field, no resolver: left at default without error
            tier: String::new(),
            notes: String::new(),
        }
    );
}

#[test]
fn test_convention_mapping_can_be_disabled() {
    let mut registry = MappingRegistry::new(MapperConfig::default().with_convention_mapping(false));
    register_customer(&mut registry);

    let dto: CustomerDto = registry.map(&customer()).unwrap();
    assert_eq!(dto.full_name, "Ada Lovelace");
    assert_eq!(dto.id, 0);
}

#[test]
fn test_duplicate_is_rejected_and_original_kept() {
    let mut registry = registry();
    register_customer(&mut registry);

    let err = registry
        .create_map::<Customer, CustomerDto>()
        .for_member("full_name", from_value("overwritten"))
        .register()
        .unwrap_err();
    assert!(matches!(
        err,
        MapperError::DuplicateMapping { key } if key == MappingKey::of::<Customer, CustomerDto>()
    ));

    let dto: CustomerDto = registry.map(&customer()).unwrap();
    assert_eq!(dto.full_name, "Ada Lovelace");
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_replace_policy_overrides() {
    let mut registry = MappingRegistry::new(
        MapperConfig::default().with_duplicate_policy(DuplicatePolicy::Replace),
    );
    register_customer(&mut registry);

    registry
        .create_map::<Customer, CustomerDto>()
        .for_member("full_name", from_value("replaced"))
        .register()
        .unwrap();

    let dto: CustomerDto = registry.map(&customer()).unwrap();
    assert_eq!(dto.full_name, "replaced");
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_sealed_registry_rejects_creation_but_still_maps() {
    let mut registry = registry();
    register_customer(&mut registry);
    registry.seal();
    assert_eq!(registry.state(), RegistryState::Sealed);

    let err = registry
        .create_map::<Order, OrderDto>()
        .register()
        .unwrap_err();
    assert!(matches!(err, MapperError::RegistrySealed { .. }));
    assert!(registry.mapping::<Order, OrderDto>().is_none());

    let dto: CustomerDto = registry.map(&customer()).unwrap();
    assert_eq!(dto.id, 7);
}

#[test]
fn test_map_on_unregistered_pair_fails() {
    let registry = registry();
    let err = registry.map::<Customer, CustomerDto>(&customer()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No mapping registered for Customer -> CustomerDto"
    );
}

#[test]
fn test_member_strategies() {
    let mut registry = registry();
    registry
        .create_map::<Customer, CustomerDto>()
        .for_member("id", ignore())
        .for_member("tier", from_value("gold"))
        .for_member(
            "email",
            map_from(|c: &Customer| c.email.clone()).null_substitute("unknown@example.com"),
        )
        .for_member(
            "notes",
            map_from(|c: &Customer| format!("vip {}", c.id)).when(|c: &Customer| c.id < 10),
        )
        .register()
        .unwrap();

    let dto: CustomerDto = registry.map(&customer()).unwrap();
    assert_eq!(dto.id, 0, "ignored members are not filled by convention");
    assert_eq!(dto.tier, "gold");
    assert_eq!(dto.email.as_deref(), Some("unknown@example.com"));
    assert_eq!(dto.notes, "vip 7");

    let mut late = customer();
    late.id = 99;
    late.email = Some("late@example.com".to_string());
    let dto: CustomerDto = registry.map(&late).unwrap();
    assert_eq!(dto.notes, "", "condition false keeps the default");
    assert_eq!(dto.email.as_deref(), Some("late@example.com"));
}

#[test]
fn test_nested_mapping_through_the_registry() {
    let mut registry = registry();
    register_customer(&mut registry);
    registry
        .create_map::<Order, OrderDto>()
        .for_member(
            "customer",
            map_with(|o: &Order, registry: &MappingRegistry| -> Result<CustomerDto, BoxError> {
                Ok(registry.map(&o.customer)?)
            }),
        )
        .register()
        .unwrap();

    let order = Order {
        number: "A-1".to_string(),
        customer: customer(),
    };
    let dto: OrderDto = registry.map(&order).unwrap();
    assert_eq!(dto.number, "A-1");
    assert_eq!(dto.customer.full_name, "Ada Lovelace");
}

#[test]
fn test_nested_failure_names_the_member() {
    let mut registry = registry();
    // Customer -> CustomerDto is deliberately missing
    registry
        .create_map::<Order, OrderDto>()
        .for_member(
            "customer",
            map_with(|o: &Order, registry: &MappingRegistry| -> Result<CustomerDto, BoxError> {
                Ok(registry.map(&o.customer)?)
            }),
        )
        .register()
        .unwrap();

    let err = registry
        .map::<Order, OrderDto>(&Order {
            number: "A-2".to_string(),
            customer: customer(),
        })
        .unwrap_err();
    match err {
        MapperError::Resolver { member, source, .. } => {
            assert_eq!(member, "customer");
            assert!(source.to_string().contains("Customer -> CustomerDto"));
        }
        other => panic!("expected Resolver error, got {other:?}"),
    }
}

#[test]
fn test_map_into_keeps_unresolved_members() {
    let mut registry = registry();
    register_customer(&mut registry);

    let mut dto = CustomerDto {
        tier: "silver".to_string(),
        notes: "existing".to_string(),
        ..CustomerDto::default()
    };
    registry.map_into(&customer(), &mut dto).unwrap();

    assert_eq!(dto.full_name, "Ada Lovelace");
    assert_eq!(dto.id, 7);
    assert_eq!(dto.tier, "silver");
    assert_eq!(dto.notes, "existing");
}

#[test]
fn test_map_many() {
    let mut registry = registry();
    register_customer(&mut registry);

    let mut second = customer();
    second.id = 8;
    second.first_name = "Grace".to_string();
    second.last_name = "Hopper".to_string();

    let dtos: Vec<CustomerDto> = registry.map_many(&[customer(), second]).unwrap();
    let names: Vec<_> = dtos.iter().map(|d| d.full_name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Grace Hopper"]);
}

#[test]
fn test_hooks_run_around_resolvers() {
    let mut registry = registry();
    registry
        .create_map::<Customer, CustomerDto>()
        .before_map(|_: &Customer, d: &mut CustomerDto| d.notes = "before".to_string())
        .after_map(|c: &Customer, d: &mut CustomerDto| {
            d.notes = format!("{} / after {}", d.notes, c.id);
        })
        .register()
        .unwrap();

    let dto: CustomerDto = registry.map(&customer()).unwrap();
    assert_eq!(dto.notes, "before / after 7");
}

#[test]
fn test_resolver_type_mismatch_is_a_conversion_error() {
    let mut registry = registry();
    registry
        .create_map::<Customer, CustomerDto>()
        .for_member("id", from_value("not a number"))
        .register()
        .unwrap();

    let err = registry.map::<Customer, CustomerDto>(&customer()).unwrap_err();
    assert!(matches!(err, MapperError::Conversion { .. }));
}

#[test]
fn test_destination_must_be_an_object() {
    #[derive(Debug, Serialize, Deserialize)]
    struct Label(String);

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Unit;

    let mut registry = registry();
    registry
        .create_map::<Label, Unit>()
        .register()
        .unwrap();

    let err = registry.map::<Label, Unit>(&Label("x".into())).unwrap_err();
    assert!(matches!(err, MapperError::NotAnObject { .. }));
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Reading {
    label: Option<String>,
    ratio: f64,
    peak: Option<f64>,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct ReadingDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    ratio: f64,
    peak: Option<f64>,
    #[serde(skip)]
    cache: u32,
}

fn reading() -> Reading {
    Reading {
        label: Some("x".to_string()),
        ratio: 0.5,
        peak: Some(1.5),
    }
}

fn register_reading(registry: &mut MappingRegistry) {
    registry
        .create_map::<Reading, ReadingDto>()
        .register()
        .unwrap();
}

#[test]
fn test_convention_fills_conditionally_serialized_members() {
    let mut registry = registry();
    register_reading(&mut registry);

    let dto: ReadingDto = registry.map(&reading()).unwrap();
    assert_eq!(dto.label.as_deref(), Some("x"));
    assert_eq!(dto.ratio, 0.5);
}

#[test]
fn test_non_finite_floats_are_refused_with_their_path() {
    let mut registry = registry();
    register_reading(&mut registry);

    let mut source = reading();
    source.ratio = f64::NAN;
    let err = registry.map::<Reading, ReadingDto>(&source).unwrap_err();
    assert!(matches!(err, MapperError::NonFiniteFloat { ref path, .. } if path == "ratio"));

    // An optional float must not silently become None
    let mut source = reading();
    source.peak = Some(f64::INFINITY);
    let err = registry.map::<Reading, ReadingDto>(&source).unwrap_err();
    assert!(matches!(err, MapperError::NonFiniteFloat { ref path, .. } if path == "peak"));
}

#[test]
fn test_non_finite_resolver_output_names_the_member() {
    let mut registry = registry();
    registry
        .create_map::<Reading, ReadingDto>()
        .for_member("ratio", map_from(|r: &Reading| r.ratio / 0.0))
        .register()
        .unwrap();

    let err = registry.map::<Reading, ReadingDto>(&reading()).unwrap_err();
    assert!(matches!(err, MapperError::NonFiniteFloat { ref path, .. } if path == "ratio"));
}

#[test]
fn test_map_into_resets_serde_skipped_fields() {
    let mut registry = registry();
    register_reading(&mut registry);

    let mut dto = ReadingDto {
        cache: 42,
        ..ReadingDto::default()
    };
    registry.map_into(&reading(), &mut dto).unwrap();

    assert_eq!(dto.ratio, 0.5);
    // `#[serde(skip)]` fields are invisible to the engine and come back as Default
    assert_eq!(dto.cache, 0);
}
