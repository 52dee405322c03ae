//! Design-asset discovery and ingestion backend.
//!
//! This crate implements the backend for importing design files from the Figma
//! REST API and extracting frames (screens) and interactive components for
//! analytics-event mapping. The backend uses Axum as the web framework and a
//! shared reqwest client for all upstream calls.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Upstream orchestration: OAuth token exchange, account
//!   discovery, document traversal, and the frame ingestion pipeline
//! - **Data Layer** (`data/`) - Store traits for credentials and project/file associations;
//!   persistence itself is owned by an external collaborator, in-memory implementations are
//!   provided for local runs and tests
//! - **Model Layer** (`model/`) - Domain models and DTOs
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Request identity extraction
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (HTTP client, config, stores)
//! - **Startup** (`startup`) - Initialization of the HTTP client
//! - **Router** (`router`) - Axum route configuration and API documentation
//!
//! # Request Flow
//!
//! A typical request flows through these layers:
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Middleware** resolves the acting user
//! 3. **Controller** validates input, looks up credentials, calls service
//! 4. **Service** executes the upstream calls and transforms payloads into domain models
//! 5. **Controller** converts domain models to DTOs, returns HTTP response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
