use automapper_recipe::framework::{extend, MapperError, MappingKey, ProfileState, TypeKey};
use automapper_recipe::lifecycle::MapperSystem;
use automapper_recipe::model::{Foo, FooDto, FooExtend, FooExtendDto};

/// Full end-to-end test with the real profiles, wired the way the application wires them.
#[test]
fn test_foo_extend_inherits_foo_mapping() {
    let system = MapperSystem::new().expect("Failed to build mapper system");

    let source = FooExtend::new("a", 1);
    let dto: FooExtendDto = system.mapper.map(&source).expect("Failed to map FooExtend");
    assert_eq!(
        dto,
        FooExtendDto {
            name: "a".to_string(),
            extra: 1
        }
    );

    // `name` comes from the parent mapping, `extra` from the child itself
    let definition = system
        .mapper
        .get_mapping(MappingKey::of::<FooExtend, FooExtendDto>())
        .expect("FooExtend mapping not registered");
    assert_eq!(definition.parent(), Some(extend::<Foo, FooDto>()));
    assert_eq!(
        definition.resolver("name").unwrap().origin(),
        MappingKey::of::<Foo, FooDto>()
    );
    assert_eq!(
        definition.resolver("extra").unwrap().origin(),
        MappingKey::of::<FooExtend, FooExtendDto>()
    );
    assert!(definition.own_resolvers().get("name").is_none());
}

#[test]
fn test_parent_mapping_still_works_on_its_own() {
    let system = MapperSystem::new().unwrap();
    let dto: FooDto = system.mapper.map(&Foo::new("plain")).unwrap();
    assert_eq!(dto.name, "plain");
}

#[test]
fn test_source_is_not_mutated() {
    let system = MapperSystem::new().unwrap();
    let source = FooExtend::new("unchanged", 42);
    let before = source.clone();

    let _: FooExtendDto = system.mapper.map(&source).unwrap();
    let _: FooExtendDto = system.mapper.map(&source).unwrap();

    assert_eq!(source, before);
}

#[test]
fn test_unregistered_pair_is_a_typed_failure() {
    let system = MapperSystem::new().unwrap();

    let result = system.mapper.map::<FooDto, Foo>(&FooDto {
        name: "back".to_string(),
    });

    match result {
        Err(MapperError::MappingNotFound {
            source_type,
            destination_type,
        }) => {
            assert_eq!(source_type, TypeKey::of::<FooDto>());
            assert_eq!(destination_type, TypeKey::of::<Foo>());
        }
        other => panic!("expected MappingNotFound, got {other:?}"),
    }
}

#[test]
fn test_profiles_end_sealed_in_registration_order() {
    let system = MapperSystem::new().unwrap();

    let names: Vec<_> = system
        .mapper
        .profiles()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["FooProfile", "FooExtendProfile"]);
    assert!(system
        .mapper
        .profiles()
        .iter()
        .all(|p| p.state == ProfileState::Sealed));
    assert!(system.mapper.registry().is_sealed());
    assert_eq!(system.mapper.registry().len(), 2);
}

/// Many tasks share one sealed mapper; no locking is involved.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_map_calls() {
    let system = MapperSystem::new().unwrap();

    let mut handles = Vec::new();
    for i in 0..32 {
        let mapper = system.mapper.clone();
        handles.push(tokio::spawn(async move {
            let source = FooExtend::new(format!("foo_{i}"), i);
            let dto: FooExtendDto = mapper.map(&source).unwrap();
            (source, dto)
        }));
    }

    for handle in handles {
        let (source, dto) = handle.await.unwrap();
        assert_eq!(dto.name, source.name);
        assert_eq!(dto.extra, source.extra);
    }
}
