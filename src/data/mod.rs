//! Data access boundary.
//!
//! Persistence for user credentials and project/file associations is owned by
//! an external collaborator. This module defines the trait seams the rest of
//! the application talks to, plus in-memory implementations used for local
//! runs and tests.

pub mod credential;
pub mod project_file;
