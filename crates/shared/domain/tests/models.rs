use ksync_domain::constants::USER;
use ksync_domain::{
    AttributeMapping, EntityKey, EntitySettings, ListOptions, MarketingList, PersonConfiguration,
};
use serde_json::json;

#[test]
fn entity_keys_render_without_ambiguity() {
    assert_eq!(EntityKey::new(USER).to_string(), "user");
    assert_eq!(EntityKey::with_bundle(USER, "staff").to_string(), "user/staff");
    assert_eq!(EntityKey::with_bundle(USER, ""), EntityKey::new(USER));
    assert_ne!(EntityKey::with_bundle("user", "s"), EntityKey::new("users"));
}

#[test]
fn entity_settings_default_to_disabled() {
    let settings: EntitySettings = serde_json::from_value(json!({})).unwrap();
    assert_eq!(settings, EntitySettings { enabled: false, list: String::new() });
}

#[test]
fn blank_mapping_entries_are_ignored() {
    let mapping: AttributeMapping =
        [("field_company", "company"), ("field_blank", "")].into_iter().collect();

    assert_eq!(mapping.attribute_for("field_company"), Some("company"));
    assert_eq!(mapping.attribute_for("field_blank"), None);
    assert_eq!(mapping.attribute_for("field_missing"), None);
}

#[test]
fn list_options_keep_api_order() {
    let mut options = ListOptions::new();
    options.insert("list:2", "Second");
    options.insert("list:1", "First");
    options.insert("list:2", "Renamed");

    let ids: Vec<_> = options.iter().map(|o| o.full_id.as_str()).collect();
    assert_eq!(ids, ["list:2", "list:1"]);
    assert_eq!(options.get("list:2"), Some("Renamed"));
}

#[test]
fn marketing_list_accepts_camel_case_type() {
    let list: MarketingList =
        serde_json::from_value(json!({ "id": "42", "listType": "segment", "name": "VIP" })).unwrap();
    assert_eq!(list.full_id(), "segment:42");
}

#[test]
fn person_configuration_is_a_flat_object() {
    let mut config = PersonConfiguration::new();
    config.set("company", "Acme");
    config.set("drupal.entity_id", 7_i64);
    config.push_unset("$title");

    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        json!({ "company": "Acme", "drupal.entity_id": 7, "$unset": ["$title"] })
    );

    let parsed: PersonConfiguration =
        serde_json::from_value(json!({ "$title": "CTO", "ignored": null, "$unset": ["$city"] }))
            .unwrap();
    assert_eq!(parsed.get("$title").map(ToString::to_string).as_deref(), Some("CTO"));
    assert!(!parsed.contains_key("ignored"));
    assert_eq!(parsed.unset(), ["$city".to_owned()]);
}
