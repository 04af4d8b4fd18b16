#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the sync bridge infrastructure.
//! Every crate in the workspace declares its error enum through [`macro@ksync_error`], so
//! errors share the same shape: a human message, an optional context string and,
//! where an upstream error is wrapped, its `source`.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! ksync-derive = { path = "../infra/derive" }
//! thiserror = "2"
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` implementations
///   if an `Internal` variant is present.
/// * **Stable Kinds**: Generates `kind(&self) -> &'static str`, the `snake_case` variant name,
///   suitable for reason codes in logs and outcomes.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`), plus a `context` field.
/// 4. Tuple or unit variants are rejected to keep error wiring explicit.
///
/// # Example
///
/// ```rust,ignore
/// use ksync_derive::ksync_error;
/// use std::borrow::Cow;
///
/// #[ksync_error]
/// pub enum SettingsError {
///     #[error("Serialization failure{}: {source}", format_context(.context))]
///     Serialize { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal settings error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn decode(raw: &str) -> Result<serde_json::Value, SettingsError> {
///     serde_json::from_str(raw).context("Decoding settings snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn ksync_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
