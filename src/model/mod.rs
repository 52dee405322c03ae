//! Domain models and DTOs.
//!
//! All entities here are transient: they are constructed per request from
//! upstream payloads or store lookups and discarded when the response is
//! written. Only `Credential` outlives a request, and its persistence is owned
//! by the data layer.

pub mod api;
pub mod credential;
pub mod discovery;
pub mod document;
pub mod frame;
pub mod validation;
