//! # Registry Client
//!
//! A client for a remote document registry: authentication by signed
//! challenge, signed record submission, a memoized category list, and the
//! search/read endpoints, plus a WebSocket helper for push notifications.
//!
//! ## Overview
//!
//! - [`Registry`] - every endpoint of one server, built from a node address
//! - [`RegistryConfig`] - node, scheme and timeout; an unset node leaves the client inert
//! - [`CryptoProvider`] - the signing/hashing seam; [`Ed25519Sha256`] by default
//! - [`PushSocket`] - single-callback WebSocket listener
//!
//! ## Usage
//!
//! ```rust,no_run
//! use registry_client::{Registry, RegistryConfig};
//! use registry_core::{Keypair, Record};
//!
//! async fn example() -> registry_client::Result<()> {
//!     let Some(registry) = Registry::from_config(&RegistryConfig::from_env()?) else {
//!         return Ok(());
//!     };
//!     let keypair = Keypair::generate();
//!
//!     let token = registry.token(&keypair).await?;
//!     let categories = registry.categories().await?;
//!
//!     let record = Record::new().with("title", "Bike").with("category", "c1");
//!     let id = registry.add_record(&record, &keypair).await?;
//!     # let _ = (token, categories, id);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod categories;
pub mod config;
pub mod crypto;
pub mod error;
pub mod push;
pub mod registry;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use auth::{get_token, AuthRequest, Token};
pub use categories::{Categories, CategoryCache};
pub use config::RegistryConfig;
pub use crypto::{CryptoProvider, Ed25519Sha256};
pub use error::{ClientError, CryptoError, Result};
pub use push::PushSocket;
pub use registry::{paths, AuthEndpoints, CurrencyEndpoints, Registry, RecordEndpoints};
pub use writer::{add_record, prepare_record};

// Re-export the lower layers for convenience
pub use registry_core as core;
pub use registry_http as http;
