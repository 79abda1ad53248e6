//! Tracker frame-rate meter
//!
//! Counts frames in one-second windows, the way the camera loop reports FPS.

/// Frames-per-second counter over fixed one-second windows
#[derive(Clone, Debug, Default)]
pub struct FrameRateMeter {
    window_start: Option<f64>,
    frames_in_window: u32,
    fps: u32,
}

impl FrameRateMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a frame at `t` seconds, returns the latest full-window FPS
    pub fn tick(&mut self, t: f64) -> u32 {
        let start = *self.window_start.get_or_insert(t);
        if t - start >= 1.0 {
            self.fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.window_start = Some(t);
        }
        self.frames_in_window += 1;
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_until_first_window() {
        let mut meter = FrameRateMeter::new();
        for i in 0..10 {
            assert_eq!(meter.tick(i as f64 * 0.05), 0);
        }
    }

    #[test]
    fn test_counts_thirty_hz() {
        let mut meter = FrameRateMeter::new();
        let mut fps = 0;
        for i in 0..=30 {
            fps = meter.tick(i as f64 / 30.0);
        }
        assert_eq!(fps, 30);
        assert_eq!(meter.fps(), 30);
    }
}
