use crate::constants::{EMAIL, PERSON_ID, UNSET};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Loose truthiness: empty text, `"0"`, zero and `false` are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !s.is_empty() && s != "0",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Flat attribute dictionary sent to the remote "save person" operation.
///
/// Serializes as one JSON object; attributes to clear remotely are listed under `$unset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonConfiguration {
    attributes: BTreeMap<String, Scalar>,
    unset: Vec<String>,
}

impl PersonConfiguration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Sets `key` unless it already holds a truthy value.
    pub fn set_if_blank(&mut self, key: &str, value: impl Into<Scalar>) {
        if !self.attributes.get(key).is_some_and(Scalar::is_truthy) {
            self.attributes.insert(key.to_owned(), value.into());
        }
    }

    /// Marks an attribute to be cleared remotely.
    pub fn push_unset(&mut self, key: impl Into<String>) {
        self.unset.push(key.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.attributes.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    #[must_use]
    pub fn unset(&self) -> &[String] {
        &self.unset
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.unset.is_empty()
    }

    /// Remote person id, when the configuration updates a known person.
    #[must_use]
    pub fn person_id(&self) -> Option<String> {
        self.get(PERSON_ID).filter(|v| v.is_truthy()).map(ToString::to_string)
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.get(EMAIL).and_then(Scalar::as_str).filter(|s| !s.is_empty())
    }

    /// Key-wise union: entries already present win over `other`.
    pub fn union(&mut self, other: Self) {
        for (key, value) in other.attributes {
            self.attributes.entry(key).or_insert(value);
        }
        if self.unset.is_empty() {
            self.unset = other.unset;
        }
    }
}

impl Serialize for PersonConfiguration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.attributes.len() + usize::from(!self.unset.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in &self.attributes {
            map.serialize_entry(key, value)?;
        }
        if !self.unset.is_empty() {
            map.serialize_entry(UNSET, &self.unset)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PersonConfiguration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConfigurationVisitor;

        impl<'de> Visitor<'de> for ConfigurationVisitor {
            type Value = PersonConfiguration;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a flat map of person attributes")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut config = PersonConfiguration::new();
                while let Some(key) = access.next_key::<String>()? {
                    if key == UNSET {
                        config.unset = access.next_value()?;
                    } else if let Some(value) = access.next_value::<Option<Scalar>>()? {
                        config.attributes.insert(key, value);
                    }
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(ConfigurationVisitor)
    }
}

/// A remote person record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, Scalar>,
}

impl From<&PersonConfiguration> for Person {
    fn from(config: &PersonConfiguration) -> Self {
        Self {
            id: config.person_id(),
            email: config.email().map(str::to_owned),
            attributes: config
                .attributes()
                .filter(|(key, _)| *key != PERSON_ID && *key != EMAIL)
                .map(|(key, value)| (key.to_owned(), value.clone()))
                .collect(),
        }
    }
}
