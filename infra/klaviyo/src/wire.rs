//! Response shapes of the v1 endpoints.

use ksync_domain::constants::{EMAIL, PERSON_ID};
use ksync_domain::{MarketingList, Person, Scalar};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub(crate) struct ListPage {
    #[serde(default)]
    pub(crate) data: Vec<MarketingList>,
    #[serde(default)]
    pub(crate) total: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateListForm<'a> {
    pub(crate) api_key: &'a str,
    pub(crate) name: &'a str,
    pub(crate) list_type: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct MemberForm<'a> {
    pub(crate) api_key: &'a str,
    pub(crate) email: &'a str,
    pub(crate) confirm_optin: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct IdentifyPayload<'a, P: Serialize> {
    pub(crate) token: &'a str,
    pub(crate) properties: &'a P,
}

/// Converts a person object, keeping scalar properties only.
pub(crate) fn person_from_json(raw: Map<String, Value>) -> Person {
    let mut person = Person::default();
    for (key, value) in raw {
        match (key.as_str(), value) {
            (PERSON_ID, Value::String(id)) => person.id = Some(id),
            (EMAIL, Value::String(email)) => person.email = Some(email),
            ("object", _) => {},
            (_, value) => {
                if let Some(scalar) = scalar_from_json(value) {
                    person.attributes.insert(key, scalar);
                }
            },
        }
    }
    person
}

fn scalar_from_json(value: Value) -> Option<Scalar> {
    match value {
        Value::Bool(b) => Some(Scalar::Bool(b)),
        Value::Number(n) => n.as_i64().map(Scalar::Integer).or_else(|| n.as_f64().map(Scalar::Float)),
        Value::String(s) => Some(Scalar::Text(s)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
