use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use folio_core::contact::SubmitOutcome;

/// Polls the terminal, falling back to ticks so animations keep moving
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

/// Completion of a contact form send running on the runtime
#[derive(Debug)]
pub struct ContactResult {
    pub outcome: SubmitOutcome,
}

impl EventHandler {
    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u32) -> Self {
        let animation_ms = match animation_fps {
            0 => 16,
            fps => (1000 / fps as u64).max(1),
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            animation_tick: Duration::from_millis(animation_ms.min(tick_rate_ms.max(1))),
        }
    }

    /// Next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Next event at frame rate, while something is animating
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_tick)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if !event::poll(timeout)? {
            return Ok(Some(AppEvent::Tick));
        }
        match event::read()? {
            // Release events arrive on some platforms; only presses count
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
            Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
            _ => Ok(None),
        }
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_tick_from_fps() {
        let handler = EventHandler::with_animation_fps(250, 60);
        assert_eq!(handler.tick_rate, Duration::from_millis(250));
        assert_eq!(handler.animation_tick, Duration::from_millis(16));

        let handler = EventHandler::with_animation_fps(250, 0);
        assert_eq!(handler.animation_tick, Duration::from_millis(16));
    }

    #[test]
    fn test_animation_tick_never_slower_than_idle() {
        let handler = EventHandler::with_animation_fps(10, 30);
        assert_eq!(handler.animation_tick, Duration::from_millis(10));
    }
}
