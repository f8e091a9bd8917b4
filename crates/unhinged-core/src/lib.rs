//! unhinged-core — shared types and configuration for the Unhinged Cards
//! form endpoint.
//!
//! The endpoint accepts crowd-sourced card contributions. This crate holds
//! the vocabulary every other crate speaks: the `tipo_carta` discriminator,
//! the validated [`Submission`], client provenance ([`ClientMeta`]) and the
//! [`FormConfig`] read once at startup.

pub mod config;
pub mod types;

pub use config::{AbsentFieldPolicy, ConfigError, FormConfig, LogFormat, StoreBackend};
pub use types::*;
