// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # whoopdata Fetch
//!
//! Authenticated HTTP access to the WHOOP web API.
//!
//! This crate owns everything between a typed accessor and the wire:
//!
//! ## Building Blocks
//!
//! - [`endpoints`] - Fixed URL table keyed by logical operation
//! - [`host::http`] - The [`HttpTransport`] seam and its reqwest implementation
//! - [`session`] - Credentials, login, bearer token and re-authentication
//! - [`executor`] - Request execution with retry on expired tokens
//! - [`retry`] - Retry budget and optional backoff
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use whoopdata_fetch::{Credentials, Endpoints, RequestExecutor, ReqwestTransport, Session};
//!
//! let transport = Arc::new(ReqwestTransport::new()?);
//! let credentials = Credentials::new("me@example.com", "secret")?;
//! let session = Session::login(transport, credentials, Endpoints::default()).await?;
//!
//! let executor = RequestExecutor::new(Arc::new(session));
//! let response = executor.get(&url, vec![]).await?;
//! ```

// Core modules
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod host;
pub mod retry;
pub mod session;

#[cfg(test)]
mod test_support;

// Re-export key types at crate root

// Errors
pub use error::FetchError;

// Host APIs
pub use host::http::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};

// Session & execution
pub use endpoints::{Endpoint, Endpoints};
pub use executor::RequestExecutor;
pub use retry::RetryStrategy;
pub use session::{Credentials, Session};
