//! Event registration intake.
//!
//! Accepts team registrations over HTTP, validates them and writes each one as a
//! single document to SurrealDB:
//! - [`registration::validate`] turns an untyped JSON payload into a [`Registration`]
//! - a [`RegistrationStore`] persists it and assigns an [`Identity`]
//! - [`api::create_router`] wires both behind `POST /register`

pub mod api;
pub mod config;
pub mod error;
pub mod registration;
pub mod store;

pub use config::Config;
pub use error::{IntakeError, StartupError, StoreError, ValidationErrors, Violation};
pub use registration::{validate, Field, Identity, Registration};
pub use store::{MemoryStore, RegistrationStore, SurrealStore};
