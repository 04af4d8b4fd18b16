//! # Klaviyo
//!
//! The remote marketing API behind one trait, [`MarketingApi`], so the sync logic
//! never depends on transport details. [`KlaviyoHttpApi`] talks to the v1 REST
//! endpoints with `reqwest`; tests substitute in-process fakes.
//!
//! | Operation | Request |
//! |---|---|
//! | [`MarketingApi::all_lists`] | `GET /api/v1/lists` (paged) |
//! | [`MarketingApi::create_list`] | `POST /api/v1/lists` |
//! | [`MarketingApi::save_person`] | `PUT /api/v1/person/{id}`, or `POST /api/identify` for new persons |
//! | [`MarketingApi::add_person_to_list`] | `POST /api/v1/list/{id}/members` |

mod error;
mod http;
mod wire;

pub use error::{ApiError, ApiErrorExt};
pub use http::KlaviyoHttpApi;

use ksync_domain::constants::{PERSON_ID, PERSON_MODEL_KEYS};
use ksync_domain::{MarketingList, Person, PersonConfiguration};
use std::future::Future;

/// Operations consumed from the remote marketing API.
pub trait MarketingApi: Send + Sync {
    /// Every list visible to the account, in API order.
    fn all_lists(&self) -> impl Future<Output = Result<Vec<MarketingList>, ApiError>> + Send;

    fn create_list(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<MarketingList, ApiError>> + Send;

    /// Creates or updates a person from a flat attribute configuration.
    ///
    /// A configuration carrying `id` updates that person; otherwise the person is
    /// identified by its attributes (usually `$email`).
    fn save_person(
        &self,
        config: &PersonConfiguration,
    ) -> impl Future<Output = Result<Person, ApiError>> + Send;

    fn add_person_to_list(
        &self,
        person: &Person,
        list: &MarketingList,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Attribute keys of the person model that can receive mapped values.
    fn person_attribute_keys(&self) -> Vec<String> {
        PERSON_MODEL_KEYS
            .iter()
            .filter(|key| **key != PERSON_ID && **key != "object")
            .map(|key| (*key).to_owned())
            .collect()
    }
}
