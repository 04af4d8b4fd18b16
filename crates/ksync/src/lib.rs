//! Facade crate for the Klaviyo sync bridge.
//! Re-exports the shared crates and assembles the components around one remote client.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`init_logging`] with the loaded `logging` section and keep the returned guard.
//! - Call [`HttpBridge::load`] (or [`HttpBridge::connect`] with a ready [`domain::config::SyncConfig`])
//!   at startup and keep the bridge for the lifetime of the process.
//! - Call [`Bridge::save_entity`] from the entity save path; it never fails the save.
//! - Tests and embedders with their own stores use [`Bridge::new`].

mod bridge;
mod error;
mod logging;

pub use bridge::{Bridge, HttpBridge};
pub use error::{BridgeError, BridgeErrorExt};
pub use logging::init_logging;

pub use ksync_cache as cache;
pub use ksync_domain as domain;
pub use ksync_kernel as kernel;
pub use ksync_klaviyo as klaviyo;
pub use ksync_logger as logger;
pub use ksync_people as people;
pub use ksync_settings as settings;
