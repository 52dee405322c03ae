pub mod designs;
pub mod figma;
