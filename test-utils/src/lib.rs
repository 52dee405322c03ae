//! Frameweaver Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests
//! against the Figma API surface. This crate offers a builder pattern for
//! assembling document-tree JSON payloads and factory functions for the
//! canned response bodies of the upstream endpoints.
//!
//! # Overview
//!
//! The test utilities consist of two main components:
//! - **NodeBuilder**: Fluent builder for document-tree payloads
//! - **factory**: Canned JSON bodies for identity, listing, token, and image endpoints
//!
//! # Usage
//!
//! Build a document with one canvas and one frame:
//!
//! ```rust,ignore
//! use test_utils::builder::{document, NodeBuilder};
//!
//! let body = test_utils::factory::listing::file_payload(
//!     "Checkout",
//!     document(vec![
//!         NodeBuilder::new("CANVAS", "0:1")
//!             .child(NodeBuilder::new("FRAME", "1:1").name("Home")),
//!     ]),
//! );
//! ```

pub mod builder;
pub mod factory;
