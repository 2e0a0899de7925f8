//! HTTP request handlers for the dashboard API.
//!
//! Controllers validate access via `AuthGuard`, convert DTOs, call services
//! or repositories, and map results onto HTTP responses. Errors bubble as
//! `AppError` and render through its `IntoResponse` impl.

pub mod auth;
pub mod guild;
pub mod public;
