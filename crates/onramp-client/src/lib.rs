//! # onramp-client
//!
//! Data access for the Onramp signup flow.
//!
//! This crate provides:
//! - [`BackendClient`]: the explicitly constructed handle to the hosted backend
//! - [`SessionProvider`]: current or anonymous identity from the auth service
//! - [`SignupStore`]: ownership-scoped create/update/read of signup attempts
//! - [`SignupTable`] and [`AuthApi`]: the seams to the hosted services, with
//!   HTTP implementations and in-memory ones in [`memory`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod memory;
pub mod session;
pub mod store;
pub mod table;

pub use auth::{AuthApi, AuthSession, AuthUser, GoTrueAuth};
pub use client::BackendClient;
pub use config::BackendConfig;
pub use onramp_core::{Error, Result};
pub use session::SessionProvider;
pub use store::SignupStore;
pub use table::{PostgrestTable, RowFilter, SignupTable};
