//! Well-known identifiers.

/// The only entity type that can be synchronized.
pub const USER: &str = "user";

/// Field holding the account e-mail address on user entities.
pub const MAIL_FIELD: &str = "mail";

/// Field types whose values can be mapped onto person attributes.
pub const MAPPABLE_FIELD_TYPES: [&str; 2] = ["text", "list_text"];

pub const EMAIL: &str = "$email";
pub const FIRST_NAME: &str = "$first_name";
pub const UNSET: &str = "$unset";
pub const PERSON_ID: &str = "id";

pub const META_SITE_ID: &str = "drupal.site_id";
pub const META_ENTITY_TYPE: &str = "drupal.entity_type";
pub const META_ENTITY_BUNDLE: &str = "drupal.entity_bundle";
pub const META_ENTITY_ID: &str = "drupal.entity_id";

/// Attribute keys of the remote person model, in model order.
pub const PERSON_MODEL_KEYS: [&str; 13] = [
    "object",
    "id",
    "$email",
    "$first_name",
    "$last_name",
    "$organization",
    "$title",
    "$city",
    "$region",
    "$zip",
    "$country",
    "$timezone",
    "$phone_number",
];
