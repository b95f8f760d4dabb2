//! Rendering module
//!
//! Backend-agnostic: the scene builder emits draw commands, hosts replay them.

pub mod scene;

pub use scene::{DrawCommand, build_scene, colors, css_color};
