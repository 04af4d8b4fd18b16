use serde::{Deserialize, Serialize};

/// A remote mailing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingList {
    pub id: String,
    #[serde(alias = "listType")]
    pub list_type: String,
    pub name: String,
}

impl MarketingList {
    /// `listType:id`, the identifier used by list options and entity settings.
    #[must_use]
    pub fn full_id(&self) -> String {
        format!("{}:{}", self.list_type, self.id)
    }
}

/// Selectable list: full identifier plus escaped display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOption {
    pub full_id: String,
    pub name: String,
}

/// List options in remote API order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListOptions(Vec<ListOption>);

impl ListOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, replacing the name of an existing entry with the same id.
    pub fn insert(&mut self, full_id: impl Into<String>, name: impl Into<String>) {
        let full_id = full_id.into();
        let name = name.into();
        match self.0.iter_mut().find(|o| o.full_id == full_id) {
            Some(existing) => existing.name = name,
            None => self.0.push(ListOption { full_id, name }),
        }
    }

    #[must_use]
    pub fn get(&self, full_id: &str) -> Option<&str> {
        self.0.iter().find(|o| o.full_id == full_id).map(|o| o.name.as_str())
    }

    #[must_use]
    pub fn contains(&self, full_id: &str) -> bool {
        self.get(full_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListOption> {
        self.0.iter()
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
