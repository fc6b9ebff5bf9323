//! Custom extractors for Axum handlers.
//!
//! Extractors here reject with [`AppError`](crate::errors::AppError) so
//! handlers share one error envelope.

pub mod json_object;

pub use json_object::JsonObject;
