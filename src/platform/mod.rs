//! Platform abstraction layer
//!
//! Glue between a host (browser page, native loop, tests) and the simulation:
//! - Key names to input events
//! - HUD notifications (score, lives, banner message)
//! - The per-frame driver: tick, notify, render

pub mod driver;
pub mod hud;
pub mod input;

pub use driver::{FrameDriver, RenderSurface};
pub use hud::Hud;
pub use input::{Autopilot, key_event};
