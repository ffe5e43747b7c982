//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (explicit frame time threaded into every update)
//! - Input events (key codes -> named actions)
//! - FPS measurement for the debug overlay

pub mod input;

pub use input::{Action, Bindings, InputState, Key, KeyResponse};

/// Time source for one host tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Frames ticked since start (pauses excluded)
    pub frame: u64,
    /// Wall-clock milliseconds
    pub now_ms: f64,
}

impl FrameTime {
    pub fn new(frame: u64, now_ms: f64) -> Self {
        Self { frame, now_ms }
    }
}

/// Host wall clock in milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Host wall clock in milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Rolling FPS estimate over the last 60 frame timestamps
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % 60;

        // Oldest sample sits at the next write slot
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (59000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_counter_steady_rate() {
        let mut fps = FpsCounter::default();
        for i in 1..=120 {
            fps.record(i as f64 * 25.0);
        }
        assert_eq!(fps.fps(), 40);
    }
}
