use std::time::{Duration, Instant};

/// Frame-driven tick source.
///
/// The host calls [`FrameTimer::frame`] once per frame; the timer answers with
/// the time since the previous frame while it is running. Start and stop are
/// both no-ops when the timer is already in that state.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_frame: Option<Instant>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: Instant) {
        if self.last_frame.is_none() {
            self.last_frame = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.last_frame = None;
    }

    pub fn is_running(&self) -> bool {
        self.last_frame.is_some()
    }

    /// Delta since the previous frame, or `None` when stopped
    pub fn frame(&mut self, now: Instant) -> Option<Duration> {
        let last = self.last_frame?;
        self.last_frame = Some(now);
        Some(now.saturating_duration_since(last))
    }
}
