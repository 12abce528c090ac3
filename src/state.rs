//! Per-frame application state.
//!
//! [`FrameState`] is handed to the input step and to the draw step each frame instead of living
//! in a global.

/// Amount the blend parameter moves per adjustment.
pub const MIX_STEP: f32 = 0.01;

const MIX_STEPS_PER_UNIT: u8 = 100;

/// State carried from one frame to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    /// Blend parameter in hundredths, so stepping to either bound is exact.
    mix_steps: u8,
    /// Seconds since the render loop started. Kept in f64 so per-frame deltas still add up
    /// after hours of running.
    pub time: f64,
    pub should_close: bool,
}

impl Default for FrameState {
    fn default() -> Self {
        Self::with_mix(0.2)
    }
}

impl FrameState {
    /// Creates a state with the given blend parameter, clamped to `[0, 1]` and rounded to the
    /// nearest step.
    pub fn with_mix(value: f32) -> Self {
        let steps = (value.clamp(0.0, 1.0) / MIX_STEP).round() as u8;
        Self {
            mix_steps: steps.min(MIX_STEPS_PER_UNIT),
            time: 0.0,
            should_close: false,
        }
    }

    /// The blend parameter between the two textures.
    pub fn mix_value(&self) -> f32 {
        self.mix_steps as f32 / MIX_STEPS_PER_UNIT as f32
    }

    pub fn increase_mix(&mut self) {
        self.mix_steps = (self.mix_steps + 1).min(MIX_STEPS_PER_UNIT);
    }

    pub fn decrease_mix(&mut self) {
        self.mix_steps = self.mix_steps.saturating_sub(1);
    }

    /// Advances the frame clock by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.time += dt;
    }
}
