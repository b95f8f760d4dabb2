//! HUD notifications
//!
//! The score/lives readout and the banner message are owned by the host.
//! The simulation queues `GameEvent`s; `dispatch` forwards the ones the HUD
//! cares about.

use crate::sim::{GameEvent, MessageKind};

/// Score, lives and banner display
pub trait Hud {
    fn on_score_changed(&mut self, score: u32);
    fn on_lives_changed(&mut self, lives: u8);
    fn show_message(&mut self, text: &str, kind: MessageKind);
    fn clear_message(&mut self);
}

/// Forward HUD-relevant events, in order
pub fn dispatch<H: Hud + ?Sized>(events: impl IntoIterator<Item = GameEvent>, hud: &mut H) {
    for event in events {
        match event {
            GameEvent::ScoreChanged(score) => hud.on_score_changed(score),
            GameEvent::LivesChanged(lives) => hud.on_lives_changed(lives),
            GameEvent::ShowMessage(kind) => hud.show_message(kind.text(), kind),
            GameEvent::ClearMessage => hud.clear_message(),
            GameEvent::BrickDestroyed { .. }
            | GameEvent::PaddleHit { .. }
            | GameEvent::StateChanged { .. } => {}
        }
    }
}

/// HUD that writes to the log; used by the native host
#[derive(Debug, Default)]
pub struct LogHud {
    pub score: u32,
    pub lives: u8,
    pub message: Option<String>,
}

impl Hud for LogHud {
    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
        log::debug!("Score: {}", score);
    }

    fn on_lives_changed(&mut self, lives: u8) {
        self.lives = lives;
        log::info!("Lives: {}", lives);
    }

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        log::info!("[{:?}] {}", kind, text);
        self.message = Some(text.to_string());
    }

    fn clear_message(&mut self) {
        self.message = None;
    }
}
