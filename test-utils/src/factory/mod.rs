//! Canned response bodies for the upstream Figma endpoints.

pub mod identity;
pub mod listing;
pub mod token;
