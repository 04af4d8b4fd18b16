//! Kernel utilities shared across the bridge crates.
//!
//! ## Config loading
//! ```rust,no_run
//! use ksync_kernel::config::load_config;
//! use ksync_kernel::domain::config::SyncConfig;
//!
//! let cfg: SyncConfig = load_config(Some("config/ksync.toml")).unwrap();
//! println!("{}", cfg.klaviyo.base_url);
//! ```

pub mod config;

pub use ksync_domain as domain;
