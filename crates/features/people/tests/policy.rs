mod common;

use common::{FakeApi, Harness};
use ksync_domain::EntityKey;
use ksync_domain::constants::PERSON_MODEL_KEYS;
use ksync_people::FieldMappingPolicy;
use ksync_settings::{MemorySettingsStore, SettingKey};
use proptest::prelude::*;
use serde_json::json;

fn harness() -> Harness {
    let settings = MemorySettingsStore::new()
        .with(SettingKey::EntitySettings(EntityKey::new("user")), json!({ "enabled": true }))
        .with(
            SettingKey::PersonAttributes(EntityKey::new("user")),
            json!({ "field_company": "$organization", "field_blank": "" }),
        )
        .with(SettingKey::EntitySettings(EntityKey::with_bundle("user", "staff")), json!({ "enabled": false }));
    Harness::new(FakeApi::default(), settings)
}

#[test]
fn only_user_accounts_are_compatible() {
    assert!(FieldMappingPolicy::<MemorySettingsStore>::is_compatible_entity("user"));
    assert!(!FieldMappingPolicy::<MemorySettingsStore>::is_compatible_entity("node"));
}

#[test]
fn enabled_flag_is_read_per_key() {
    let policy = harness().policy();

    assert!(policy.is_enabled_on_entity("user", None));
    assert!(!policy.is_enabled_on_entity("user", Some("staff")));
    assert!(!policy.is_enabled_on_entity("user", Some("unconfigured")));
}

#[test]
fn missing_settings_default_to_disabled() {
    let policy = Harness::new(FakeApi::default(), MemorySettingsStore::new()).policy();

    let settings = policy.entity_settings("user", None);
    assert!(!settings.enabled);
    assert!(settings.list.is_empty());
    assert!(!policy.is_enabled_on_entity("user", None));
}

#[test]
fn only_text_fields_are_mappable() {
    let policy = harness().policy();

    assert!(policy.is_field_mappable("user", None, "text"));
    assert!(policy.is_field_mappable("user", None, "list_text"));
    assert!(!policy.is_field_mappable("user", None, "integer"));
    assert!(!policy.is_field_mappable("user", Some("staff"), "text"));
}

#[test]
fn field_is_mapped_only_with_a_non_empty_attribute() {
    let policy = harness().policy();

    assert!(policy.is_field_mapped("user", None, "field_company"));
    assert!(!policy.is_field_mapped("user", None, "field_blank"));
    assert!(!policy.is_field_mapped("user", None, "field_other"));
    // The lookup takes a field name; a field type never matches a mapping entry.
    assert!(!policy.is_field_mapped("user", None, "text"));
}

#[test]
fn attribute_choices_exclude_keys_taken_by_other_fields() {
    let harness = harness();
    let policy = harness.policy();
    let model_keys = harness.api.person_attribute_keys();

    let for_other = policy.mappable_attribute_keys("user", None, "field_title", &model_keys);
    assert!(!for_other.iter().any(|k| k == "$organization"));
    assert!(for_other.iter().any(|k| k == "$title"));
    assert!(!for_other.iter().any(|k| k == "id" || k == "object"));

    let for_company = policy.mappable_attribute_keys("user", None, "field_company", &model_keys);
    assert!(for_company.iter().any(|k| k == "$organization"));
}

proptest! {
    #[test]
    fn other_entity_types_are_never_enabled(entity_type in "[a-z_]{1,12}", bundle in proptest::option::of("[a-z]{1,8}")) {
        prop_assume!(entity_type != "user");
        let settings = MemorySettingsStore::new()
            .with(SettingKey::EntitySettings(EntityKey::new(entity_type.clone())), json!({ "enabled": true }));
        let policy = Harness::new(FakeApi::default(), settings).policy();

        prop_assert!(!policy.is_enabled_on_entity(&entity_type, bundle.as_deref()));
        prop_assert!(!policy.is_field_mappable(&entity_type, bundle.as_deref(), "text"));
    }

    #[test]
    fn model_keys_are_offered_when_nothing_is_mapped(field in "field_[a-z]{1,8}") {
        let policy = Harness::new(FakeApi::default(), MemorySettingsStore::new()).policy();
        let model_keys: Vec<String> = PERSON_MODEL_KEYS.iter().map(|k| (*k).to_owned()).collect();

        prop_assert_eq!(policy.mappable_attribute_keys("user", None, &field, &model_keys), model_keys);
    }
}
