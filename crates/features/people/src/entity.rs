//! Read access to CMS entities.

use ksync_domain::constants::{MAIL_FIELD, USER};
use ksync_domain::{EntityKey, Scalar};
use std::collections::BTreeMap;

/// Named field access on an entity.
pub trait FieldReader {
    fn has_field(&self, name: &str) -> bool;

    /// Current value; `None` when the field is absent or empty.
    fn value(&self, name: &str) -> Option<Scalar>;
}

/// An entity that can be synchronized as a person.
pub trait SyncEntity: FieldReader {
    fn entity_type(&self) -> &str;

    fn bundle(&self) -> Option<&str>;

    fn identifier(&self) -> Scalar;

    fn label(&self) -> String;

    /// Id of the remote person this entity was previously synced to.
    fn remote_person_id(&self) -> Option<&str> {
        None
    }

    fn entity_key(&self) -> EntityKey {
        self.bundle().map_or_else(
            || EntityKey::new(self.entity_type()),
            |bundle| EntityKey::with_bundle(self.entity_type(), bundle),
        )
    }
}

/// A CMS user account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserAccount {
    pub uid: i64,
    pub name: String,
    pub mail: String,
    pub fields: BTreeMap<String, Scalar>,
    pub remote_person_id: Option<String>,
}

impl UserAccount {
    pub fn new(uid: i64, name: impl Into<String>, mail: impl Into<String>) -> Self {
        Self { uid, name: name.into(), mail: mail.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_remote_person_id(mut self, id: impl Into<String>) -> Self {
        self.remote_person_id = Some(id.into());
        self
    }
}

impl FieldReader for UserAccount {
    fn has_field(&self, name: &str) -> bool {
        matches!(name, "name" | MAIL_FIELD) || self.fields.contains_key(name)
    }

    fn value(&self, name: &str) -> Option<Scalar> {
        let text = match name {
            "name" => &self.name,
            MAIL_FIELD => &self.mail,
            _ => return self.fields.get(name).cloned(),
        };
        (!text.is_empty()).then(|| Scalar::Text(text.clone()))
    }
}

impl SyncEntity for UserAccount {
    fn entity_type(&self) -> &str {
        USER
    }

    fn bundle(&self) -> Option<&str> {
        Some(USER)
    }

    fn identifier(&self) -> Scalar {
        Scalar::Integer(self.uid)
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn remote_person_id(&self) -> Option<&str> {
        self.remote_person_id.as_deref()
    }
}

/// Any other entity, described by its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub entity_type: String,
    pub bundle: Option<String>,
    pub id: Scalar,
    pub label: String,
    pub fields: BTreeMap<String, Scalar>,
    pub remote_person_id: Option<String>,
}

impl EntityRecord {
    pub fn new(entity_type: impl Into<String>, id: impl Into<Scalar>) -> Self {
        Self {
            entity_type: entity_type.into(),
            bundle: None,
            id: id.into(),
            label: String::new(),
            fields: BTreeMap::new(),
            remote_person_id: None,
        }
    }

    #[must_use]
    pub fn with_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = Some(bundle.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl FieldReader for EntityRecord {
    fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn value(&self, name: &str) -> Option<Scalar> {
        self.fields.get(name).cloned()
    }
}

impl SyncEntity for EntityRecord {
    fn entity_type(&self) -> &str {
        &self.entity_type
    }

    fn bundle(&self) -> Option<&str> {
        self.bundle.as_deref()
    }

    fn identifier(&self) -> Scalar {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn remote_person_id(&self) -> Option<&str> {
        self.remote_person_id.as_deref()
    }
}
