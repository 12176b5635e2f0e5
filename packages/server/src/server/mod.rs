//! HTTP layer: application state, router, and webhook endpoints.

pub mod app;
pub mod routes;
