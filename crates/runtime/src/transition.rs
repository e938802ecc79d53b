use foundation::time::{Time, TimeSpan};

/// Default duration of animated redraws (seconds).
pub const DEFAULT_TRANSITION_S: f64 = 0.25;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Symmetric cubic ease-in/ease-out.
    #[default]
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

/// Timing of a single animated change.
///
/// A transition never blocks: callers sample [`Transition::progress`] on each
/// frame and stop once [`Transition::is_finished`] reports completion.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transition {
    span: TimeSpan,
    easing: Easing,
}

impl Transition {
    pub fn new(start: Time, duration_s: f64, easing: Easing) -> Self {
        Self {
            span: TimeSpan::new(start, duration_s),
            easing,
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Time) -> f64 {
        self.easing.apply(self.span.fraction(now))
    }

    pub fn is_finished(&self, now: Time) -> bool {
        self.span.fraction(now) >= 1.0
    }
}
