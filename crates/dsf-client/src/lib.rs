//! Typed HTTP client for the Disease Support Finder backend.
//!
//! The backend owns every algorithm (NANDO parsing, hierarchy computation,
//! organization search, verification and extraction). This crate only
//! shapes requests and validates responses against the types in
//! [`dsf_model`].
//!
//! # Example
//!
//! ```no_run
//! use dsf_client::{ApiClient, ClientConfig};
//!
//! async fn count_searchable() -> dsf_client::Result<usize> {
//!     let client = ApiClient::new(&ClientConfig::default())?;
//!     let diseases = client.list_diseases().await?;
//!     Ok(diseases.iter().filter(|d| d.is_searchable).count())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;

mod diseases;
mod llm;
mod nando;
mod search;

pub use client::{ApiClient, UploadFile};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
