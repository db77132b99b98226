pub const SKILL_BAR_FRAMES: u32 = 60;

/// A counter runs for two seconds at roughly 60 fps.
pub const COUNTER_DURATION_MS: u32 = 2_000;
pub const COUNTER_FRAME_MS: u32 = 16;
pub const COUNTER_FRAMES: u32 = COUNTER_DURATION_MS / COUNTER_FRAME_MS;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearTween {
    target: f64,
    frames: u32,
    frame: u32,
}

impl LinearTween {
    pub fn new(target: f64, frames: u32) -> Self {
        Self {
            target,
            frames: frames.max(1),
            frame: 0,
        }
    }

    pub fn value(&self) -> f64 {
        if self.is_finished() {
            self.target
        } else {
            self.target / f64::from(self.frames) * f64::from(self.frame)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.frames
    }

    /// Advances one frame. The last frame lands exactly on the target.
    pub fn step(&mut self) -> f64 {
        if !self.is_finished() {
            self.frame += 1;
        }
        self.value()
    }
}

pub fn skill_bar(target_percent: f64) -> LinearTween {
    let target = if target_percent.is_finite() {
        target_percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    LinearTween::new(target, SKILL_BAR_FRAMES)
}

pub fn counter(target: u32) -> LinearTween {
    LinearTween::new(f64::from(target), COUNTER_FRAMES)
}

pub fn counter_label(tween: &LinearTween) -> String {
    format!("{}", tween.value().floor() as u64)
}

pub fn width_style(percent: f64) -> String {
    format!("width: {percent:.2}%;")
}
