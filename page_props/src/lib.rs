//! Compose page props from data providers.
//!
//! A data provider is a plain struct whose public fields and `&self`
//! methods make up one section of a page payload. Providers are flattened
//! into an ordered [`Props`] map, optionally merged with other providers
//! and literal maps in a [`ProviderCollection`], and handed to a rendering
//! layer through [`bridge::RenderBridge`].
//!
//! ```rust
//! use page_props::format::KeyCase;
//! use page_props::{ComposeContext, DataProvider, Flattenable, Props, props, provider_methods};
//! use serde_json::json;
//!
//! #[derive(DataProvider)]
//! #[data_provider(methods, static_data = "extra")]
//! struct Header {
//!     pub title: String,
//!     pub full_name: String,
//!     secret: String,
//! }
//!
//! #[provider_methods]
//! impl Header {
//!     pub fn count(&self) -> i64 {
//!         5
//!     }
//!
//!     fn extra(&self) -> Props {
//!         props! { "id" => 1 }
//!     }
//! }
//!
//! let header = Header {
//!     title: "Hi".into(),
//!     full_name: "Ada".into(),
//!     secret: "hunter2".into(),
//! };
//! let context = ComposeContext::new().with_formatter(KeyCase::CamelCase);
//! let props = header.to_flat_map(&context)?;
//! assert_eq!(
//!     props.to_json()?,
//!     json!({"title": "Hi", "fullName": "Ada", "count": 5, "id": 1})
//! );
//! # Ok::<_, page_props::ComposeError>(())
//! ```
//!
//! The derive and attribute macros live in the companion
//! `page_props_macros` crate and are re-exported here.

extern crate self as page_props;

pub use page_props_macros::{DataProvider, provider_methods};

pub mod bridge;
pub mod collection;
mod config;
pub mod container;
mod context;
mod error;
pub mod format;
pub mod members;
mod provider;
mod value;

pub use collection::{CollectionEntry, ProviderCollection};
pub use config::{ComposeConfig, DEFAULT_MAX_NESTING_DEPTH};
pub use context::ComposeContext;
pub use error::{ComposeError, ComposeResult};
pub use provider::{ComposeMode, DataProvider, Flattenable, flat_map, nested_map};
pub use value::{DeferredKind, DeferredProp, IntoPropValue, PropValue, Props, SharedProvider};
