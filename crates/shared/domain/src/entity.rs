use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Composite lookup key for per-entity configuration.
///
/// A key without a bundle addresses the entity type as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
}

impl EntityKey {
    /// Type-level key.
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self { entity_type: entity_type.into(), bundle: None }
    }

    /// Bundle-scoped key. An empty bundle collapses to the type-level key.
    pub fn with_bundle(entity_type: impl Into<String>, bundle: impl Into<String>) -> Self {
        let bundle = bundle.into();
        Self { entity_type: entity_type.into(), bundle: (!bundle.is_empty()).then_some(bundle) }
    }

    /// Drops the bundle.
    #[must_use]
    pub fn type_level(&self) -> Self {
        Self::new(self.entity_type.clone())
    }

    #[must_use]
    pub fn bundle(&self) -> Option<&str> {
        self.bundle.as_deref()
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bundle {
            Some(bundle) => write!(f, "{}/{bundle}", self.entity_type),
            None => f.write_str(&self.entity_type),
        }
    }
}

/// Per-entity sync settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySettings {
    pub enabled: bool,
    /// Full list identifier (`listType:listId`) new persons are subscribed to.
    pub list: String,
}

/// Field name to person attribute key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMapping(BTreeMap<String, String>);

impl AttributeMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, attribute: impl Into<String>) {
        self.0.insert(field.into(), attribute.into());
    }

    /// The attribute key mapped to `field`, ignoring blank entries.
    #[must_use]
    pub fn attribute_for(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str).filter(|attr| !attr.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(field, attr)| (field.as_str(), attr.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<F: Into<String>, A: Into<String>> FromIterator<(F, A)> for AttributeMapping {
    fn from_iter<T: IntoIterator<Item = (F, A)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(f, a)| (f.into(), a.into())).collect())
    }
}
