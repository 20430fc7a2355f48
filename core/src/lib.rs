pub mod config;
pub mod constraint;
pub mod geometry;
pub mod sketch;
pub mod store;

pub use config::{ConfigError, SketchConfig};
