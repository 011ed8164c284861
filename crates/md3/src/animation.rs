//! Frame selection over time.

use std::time::Duration;

/// Default playback rate in frames per second.
pub const DEFAULT_FRAME_RATE: f32 = 6.0;

/// Maps elapsed time to a looping frame index.
///
/// There is no interpolation: the pose snaps to whole frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    pub frames_per_second: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

impl FrameClock {
    #[must_use]
    pub fn new(frames_per_second: f32) -> Self {
        Self { frames_per_second }
    }

    /// Frame shown after `elapsed` for an animation of `frame_count` frames.
    ///
    /// Returns 0 when there are no frames or the rate is not positive.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn frame_at(&self, elapsed: Duration, frame_count: usize) -> usize {
        if frame_count == 0 || self.frames_per_second.is_nan() || self.frames_per_second <= 0.0 {
            return 0;
        }
        let frame = (elapsed.as_secs_f64() * f64::from(self.frames_per_second)).floor() as usize;
        frame % frame_count
    }
}
