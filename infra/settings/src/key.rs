use crate::error::SettingsError;
use ksync_domain::EntityKey;
use std::fmt;
use std::str::FromStr;

const ENTITY_SETTINGS: &str = "entity_settings";
const PERSON_ATTRIBUTES: &str = "person_attributes";

/// Address of a value in the configuration store.
///
/// Renders as `api_key`, `site_name`, `site_id`, `entity_settings:<type>[:<bundle>]`
/// or `person_attributes:<type>[:<bundle>]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    ApiKey,
    SiteName,
    SiteId,
    /// [`ksync_domain::EntitySettings`] for an entity type or bundle.
    EntitySettings(EntityKey),
    /// [`ksync_domain::AttributeMapping`] for an entity type or bundle.
    PersonAttributes(EntityKey),
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, key) = match self {
            Self::ApiKey => return f.write_str("api_key"),
            Self::SiteName => return f.write_str("site_name"),
            Self::SiteId => return f.write_str("site_id"),
            Self::EntitySettings(key) => (ENTITY_SETTINGS, key),
            Self::PersonAttributes(key) => (PERSON_ATTRIBUTES, key),
        };
        write!(f, "{prefix}:{}", key.entity_type)?;
        if let Some(bundle) = key.bundle() {
            write!(f, ":{bundle}")?;
        }
        Ok(())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api_key" => return Ok(Self::ApiKey),
            "site_name" => return Ok(Self::SiteName),
            "site_id" => return Ok(Self::SiteId),
            _ => {},
        }

        let mut parts = s.splitn(3, ':');
        let prefix = parts.next().unwrap_or_default();
        let entity_type = parts.next().filter(|t| !t.is_empty());
        let bundle = parts.next();

        let Some(entity_type) = entity_type else {
            return Err(SettingsError::InvalidKey { message: s.to_owned().into(), context: None });
        };
        let key = bundle.map_or_else(
            || EntityKey::new(entity_type),
            |bundle| EntityKey::with_bundle(entity_type, bundle),
        );

        match prefix {
            ENTITY_SETTINGS => Ok(Self::EntitySettings(key)),
            PERSON_ATTRIBUTES => Ok(Self::PersonAttributes(key)),
            _ => Err(SettingsError::InvalidKey {
                message: s.to_owned().into(),
                context: Some("Unknown key prefix".into()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_render_and_parse_back() {
        let keys = [
            SettingKey::ApiKey,
            SettingKey::SiteId,
            SettingKey::EntitySettings(EntityKey::new("user")),
            SettingKey::PersonAttributes(EntityKey::with_bundle("user", "staff")),
        ];
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();

        assert_eq!(
            rendered,
            ["api_key", "site_id", "entity_settings:user", "person_attributes:user:staff"]
        );
        for (key, text) in keys.iter().zip(&rendered) {
            assert_eq!(&text.parse::<SettingKey>().unwrap(), key);
        }
    }

    #[test]
    fn type_and_bundle_never_collide() {
        let joined = SettingKey::EntitySettings(EntityKey::new("userstaff"));
        let scoped = SettingKey::EntitySettings(EntityKey::with_bundle("user", "staff"));
        assert_ne!(joined.to_string(), scoped.to_string());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_eq!("entity_settings".parse::<SettingKey>().unwrap_err().kind(), "invalid_key");
        assert_eq!("colour:user".parse::<SettingKey>().unwrap_err().kind(), "invalid_key");
    }
}
