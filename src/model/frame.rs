use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fallback frame size when the upstream bounding box is absent (portrait
/// phone viewport).
pub const DEFAULT_FRAME_WIDTH: f64 = 375.0;
pub const DEFAULT_FRAME_HEIGHT: f64 = 812.0;

/// A top-level screen extracted from a design file.
///
/// Frames are only ever produced from nodes found as direct children of a
/// CANVAS node; see `service::figma::document`.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rendered thumbnail, when the image endpoint resolved one for this id.
    pub thumb_url: Option<String>,
    pub components: Vec<Component>,
}

/// An interactive or text/shape element discovered within a frame's subtree,
/// candidate for analytics-event mapping.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
