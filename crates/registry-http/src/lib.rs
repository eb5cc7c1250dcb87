//! # Registry HTTP
//!
//! The request layer of the registry client.
//!
//! ## Overview
//!
//! - [`HttpTransport`] - the seam to the network; one exchange per call
//! - [`ReqwestTransport`] - reqwest-backed transport
//! - [`memory::ScriptedTransport`] - in-memory transport for tests
//! - [`GetResource`] / [`PostResource`] - URI template + verb, bound to a transport
//!
//! ## Failure normalization
//!
//! Error bodies carrying a `message` field surface as
//! [`ResourceError::Server`] with the body preserved; anything else
//! (timeouts, connection errors, bodies without `message`) surfaces as
//! [`ResourceError::Unknown`]. There is no retry.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use registry_core::params_from;
//! use registry_http::{GetResource, ReqwestTransport};
//!
//! async fn example() {
//!     let get = GetResource::new(
//!         "http://localhost:9200/registry/record/:id",
//!         Arc::new(ReqwestTransport::new()),
//!     );
//!     let record = get.call(&params_from(serde_json::json!({"id": "abc"}))).await;
//! }
//! ```

pub mod error;
pub mod resource;
pub mod transport;


pub use error::{HttpFailure, ResourceError, Result, UNKNOWN_ERROR};
pub use resource::{process_error, GetResource, PostResource, DEFAULT_TIMEOUT};
pub use transport::{memory, parse_body, HttpRequest, HttpTransport, Method, ReqwestTransport};
