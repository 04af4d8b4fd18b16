//! # People
//!
//! Maps saved CMS entities onto remote persons and lists.
//!
//! - [`FieldMappingPolicy`] decides which entities and fields take part.
//! - [`PersonConfigurationBuilder`] turns an entity into the flat attribute set the
//!   remote API expects, stamped with the installation's [`SiteIdProvider`] identifier.
//! - [`ListCache`] keeps the remote lists as cached `listType:id -> name` options.
//! - [`EntitySaveHook`] ties them together on every entity save.
//!
//! Everything talks to the remote API through one shared [`KlaviyoClient`]; remote
//! failures never abort the entity save and surface as a [`FailureReason`] plus a
//! generic notice.

mod client;
mod entity;
mod error;
mod hook;
mod lists;
mod person;
mod policy;
mod site;

pub use client::KlaviyoClient;
pub use entity::{EntityRecord, FieldReader, SyncEntity, UserAccount};
pub use error::{FailureReason, SyncError, SyncErrorExt};
pub use hook::{EntitySaveHook, SaveOutcome};
pub use lists::{LIST_OPTIONS_CACHE_KEY, ListCache, escape_html};
pub use person::PersonConfigurationBuilder;
pub use policy::FieldMappingPolicy;
pub use site::{SiteIdProvider, generate_site_id};
