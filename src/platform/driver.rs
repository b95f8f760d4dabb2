//! Frame driver
//!
//! The host's frame scheduler calls `FrameDriver::frame` once per display
//! refresh. Each frame runs the whole simulation step, forwards
//! notifications to the HUD, then hands the finished scene to the render
//! surface, so a surface never sees a half-updated frame.

use super::hud::{Hud, dispatch};
use crate::renderer::{DrawCommand, build_scene};
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameContext, InputEvent, tick};

/// Something that can display a frame
pub trait RenderSurface {
    /// Playfield size in surface units (width, height)
    fn size(&self) -> (f32, f32);
    fn present(&mut self, scene: &[DrawCommand]);
}

/// Owns the game context and its collaborators
pub struct FrameDriver<H: Hud, R: RenderSurface> {
    ctx: GameContext,
    hud: H,
    surface: R,
}

impl<H: Hud, R: RenderSurface> FrameDriver<H, R> {
    /// Build a context sized to the surface and push the initial HUD values
    pub fn new(
        settings: Settings,
        seed: u64,
        mut hud: H,
        surface: R,
    ) -> Result<Self, SettingsError> {
        let (width, height) = surface.size();
        let ctx = GameContext::new(settings.with_playfield(width, height), seed)?;
        hud.on_score_changed(ctx.score);
        hud.on_lives_changed(ctx.lives);
        hud.clear_message();
        Ok(Self { ctx, hud, surface })
    }

    /// Apply one input event; HUD effects (e.g. clearing the banner) are
    /// shown immediately
    pub fn handle_input(&mut self, event: InputEvent) {
        self.ctx.apply_input(event);
        self.flush_events();
    }

    /// Run one frame: simulate, notify, render
    pub fn frame(&mut self) {
        tick(&mut self.ctx);
        self.flush_events();
        let scene = build_scene(&self.ctx);
        self.surface.present(&scene);
    }

    fn flush_events(&mut self) {
        dispatch(self.ctx.drain_events(), &mut self.hud);
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }
}
