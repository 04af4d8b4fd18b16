//! # Domain Models
//!
//! Pure data types shared by the sync bridge: entity keys and settings, attribute
//! mappings, person configurations, list records and the bridge configuration.
//! Keep it lean: `serde` only, no I/O, no networking.

pub mod config;
pub mod constants;
pub mod entity;
pub mod list;
pub mod person;

pub use entity::{AttributeMapping, EntityKey, EntitySettings};
pub use list::{ListOption, ListOptions, MarketingList};
pub use person::{Person, PersonConfiguration, Scalar};
