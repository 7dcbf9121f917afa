use shared_shipping::core::builtin::{FLAT_RATE, LOCAL_PICKUP};
use shared_shipping::core::shared::SHARED_METHOD_TYPE;
use shared_shipping::domain::model::{FieldKind, Location, SettingsField, ZoneId};
use shared_shipping::{
    AdminContext, MemoryPlatform, MethodTypeRegistry, OptionStore, SettingsCoordinator,
    SharedShippingMethod,
};

fn platform_with_zones() -> (MemoryPlatform, ZoneId, ZoneId, ZoneId) {
    let platform = MemoryPlatform::new();
    let domestic = platform.add_zone("Domestic", 0, vec![Location::country("US")]);
    let europe = platform.add_zone("Europe", 1, vec![Location::country("DE")]);
    let source = platform.add_zone("Shared Shipping Methods", 100, vec![Location::country("AQ")]);
    (platform, domestic, europe, source)
}

#[test]
fn test_candidates_exclude_consumer_zones_and_keep_none_first() {
    let (platform, domestic, _europe, _source) = platform_with_zones();
    platform
        .attach_method(domestic, SHARED_METHOD_TYPE, "Economy (shared)")
        .unwrap();

    let coordinator = SettingsCoordinator::new(&platform, &platform);
    let candidates = coordinator.source_zone_candidates();

    assert_eq!(candidates[0].value, "");
    assert_eq!(candidates[0].label, "None");

    let labels: Vec<&str> = candidates.iter().map(|c| c.label.as_str()).collect();
    assert!(!labels.contains(&"Domestic"));
    assert_eq!(labels, vec!["None", "Europe", "Shared Shipping Methods"]);
}

#[test]
fn test_settings_field_is_inserted_before_the_closing_element() {
    let (platform, _domestic, _europe, _source) = platform_with_zones();
    let coordinator = SettingsCoordinator::new(&platform, &platform);

    let page = vec![
        SettingsField::info("shipping_options", "Shipping options", ""),
        SettingsField::text("ship_to_destination", "Shipping destination", "", ""),
        SettingsField::info("shipping_options_end", "", ""),
    ];
    let page = coordinator.insert_settings_field(page);

    assert_eq!(page.len(), 4);
    assert_eq!(page[2].id, "shared_shipping_zone");
    assert_eq!(page[2].kind, FieldKind::Select);
    assert_eq!(page[3].id, "shipping_options_end");
}

#[test]
fn test_settings_field_insertion_into_empty_page() {
    let (platform, _domestic, _europe, _source) = platform_with_zones();
    let coordinator = SettingsCoordinator::new(&platform, &platform);

    let page = coordinator.insert_settings_field(Vec::new());
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, "shared_shipping_zone");
}

#[test]
fn test_filter_always_adds_the_shared_type() {
    let (platform, _domestic, _europe, _source) = platform_with_zones();
    let coordinator = SettingsCoordinator::new(&platform, &platform);

    let registry = coordinator.filter_method_types(
        MethodTypeRegistry::with_builtin_methods(),
        &AdminContext::default(),
    );
    assert!(registry.contains(SHARED_METHOD_TYPE));

    // Filtering twice must not register the type twice.
    let count = registry.len();
    let registry = coordinator.filter_method_types(registry, &AdminContext::default());
    assert_eq!(registry.len(), count);
}

#[test]
fn test_filter_removes_the_shared_type_in_the_source_zone_context() {
    let (platform, domestic, _europe, source) = platform_with_zones();
    platform.set("shared_shipping_zone", &source.to_string());
    let coordinator = SettingsCoordinator::new(&platform, &platform);

    let in_source = coordinator.filter_method_types(
        MethodTypeRegistry::with_builtin_methods(),
        &AdminContext::for_zone(source),
    );
    assert!(!in_source.contains(SHARED_METHOD_TYPE));
    assert!(in_source.contains(FLAT_RATE));
    assert!(in_source.contains(LOCAL_PICKUP));

    let in_consumer = coordinator.filter_method_types(
        MethodTypeRegistry::with_builtin_methods(),
        &AdminContext::for_zone(domestic),
    );
    assert!(in_consumer.contains(SHARED_METHOD_TYPE));

    let no_context = coordinator.filter_method_types(
        MethodTypeRegistry::with_builtin_methods(),
        &AdminContext::default(),
    );
    assert!(no_context.contains(SHARED_METHOD_TYPE));
}

#[test]
fn test_filter_keeps_the_shared_type_when_no_source_is_configured() {
    let (platform, domestic, _europe, _source) = platform_with_zones();
    let coordinator = SettingsCoordinator::new(&platform, &platform);

    let registry = coordinator.filter_method_types(
        MethodTypeRegistry::with_builtin_methods(),
        &AdminContext::for_zone(domestic),
    );
    assert!(registry.contains(SHARED_METHOD_TYPE));
}

#[test]
fn test_validate_shared_selection() {
    let (platform, _domestic, _europe, source) = platform_with_zones();
    platform.set("shared_shipping_zone", &source.to_string());
    let flat = platform.attach_method(source, FLAT_RATE, "Standard").unwrap();

    let coordinator = SettingsCoordinator::new(&platform, &platform);

    assert!(coordinator.validate_shared_selection("").is_ok());
    assert!(coordinator
        .validate_shared_selection(&format!("{}:{}", FLAT_RATE, flat))
        .is_ok());
    assert!(coordinator.validate_shared_selection("flat_rate").is_err());
    assert!(coordinator
        .validate_shared_selection("flat_rate:99")
        .is_err());
    assert!(coordinator
        .validate_shared_selection("local_pickup:1")
        .is_err());
}

#[test]
fn test_instance_form_fields_enumerate_the_source_zone_methods() {
    let (platform, _domestic, _europe, source) = platform_with_zones();
    platform.set("shared_shipping_zone", &source.to_string());
    let flat = platform.attach_method(source, FLAT_RATE, "Standard").unwrap();
    let pickup = platform
        .attach_method(source, LOCAL_PICKUP, "Warehouse pickup")
        .unwrap();

    let fields = SharedShippingMethod::instance_form_fields(&platform, &platform);

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].id, "title");
    assert_eq!(fields[0].kind, FieldKind::Text);

    let select = &fields[1];
    assert_eq!(select.id, "selected_shared_method");
    assert_eq!(select.kind, FieldKind::Select);
    assert_eq!(select.options.len(), 2);
    assert_eq!(select.options[0].value, format!("{}:{}", FLAT_RATE, flat));
    assert_eq!(select.options[0].label, "Standard");
    assert_eq!(select.options[1].value, format!("{}:{}", LOCAL_PICKUP, pickup));
    assert_eq!(select.options[1].label, "Warehouse pickup");
}

#[test]
fn test_instance_form_fields_without_source_zone_are_informational() {
    let (platform, _domestic, _europe, _source) = platform_with_zones();

    let fields = SharedShippingMethod::instance_form_fields(&platform, &platform);

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].kind, FieldKind::Info);
    assert!(fields[0].options.is_empty());
}
