use render::Rgb;

/// Most intervals a legend may be divided into.
pub const MAX_LEGEND_STEPS: f64 = 100.0;

/// Three-stop diverging color scale.
///
/// Values map piecewise-linearly onto the colors and clamp outside the
/// domain. The same configuration yields the legend values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DivergingScale {
    domain: [f64; 3],
    colors: [Rgb; 3],
    legend_step: f64,
}

impl Default for DivergingScale {
    fn default() -> Self {
        Self {
            domain: [-100.0, 0.0, 100.0],
            colors: [
                Rgb::new(0xb7, 0x1c, 0x1c),
                Rgb::new(243, 240, 225),
                Rgb::new(0x1d, 0x7d, 0x0a),
            ],
            legend_step: 25.0,
        }
    }
}

impl DivergingScale {
    pub fn new(domain: [f64; 3], colors: [Rgb; 3], legend_step: f64) -> Result<Self, String> {
        let [lo, mid, hi] = domain;
        if !(lo.is_finite() && mid.is_finite() && hi.is_finite()) || !(lo < mid && mid < hi) {
            return Err(format!(
                "scale domain must be finite and strictly increasing, got {domain:?}"
            ));
        }
        if !(legend_step.is_finite() && legend_step > 0.0) {
            return Err(format!("legend step must be positive, got {legend_step}"));
        }
        let steps = (hi - lo) / legend_step;
        if !(steps <= MAX_LEGEND_STEPS) {
            return Err(format!(
                "legend step {legend_step} splits the domain into {steps} intervals, at most {MAX_LEGEND_STEPS} allowed"
            ));
        }
        Ok(Self {
            domain,
            colors,
            legend_step,
        })
    }

    pub fn colors(&self) -> [Rgb; 3] {
        self.colors
    }

    pub fn neutral(&self) -> Rgb {
        self.colors[1]
    }

    /// `None` only for NaN.
    pub fn color(&self, value: f64) -> Option<Rgb> {
        if value.is_nan() {
            return None;
        }
        let [lo, mid, hi] = self.domain;
        let [c_lo, c_mid, c_hi] = self.colors;
        let v = value.clamp(lo, hi);
        let rgb = if v <= mid {
            c_lo.lerp(c_mid, (v - lo) / (mid - lo))
        } else {
            c_mid.lerp(c_hi, (v - mid) / (hi - mid))
        };
        Some(rgb)
    }

    /// Representative values from the top of the domain down to the bottom.
    pub fn legend_values(&self) -> Vec<f64> {
        let [lo, _, hi] = self.domain;
        let count = ((hi - lo) / self.legend_step + 1e-9).floor() as usize;
        (0..=count)
            .map(|i| hi - i as f64 * self.legend_step)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DivergingScale;
    use pretty_assertions::assert_eq;
    use render::Rgb;

    #[test]
    fn clamps_outside_domain() {
        let s = DivergingScale::default();
        assert_eq!(s.color(-100.0), Some(Rgb::new(0xb7, 0x1c, 0x1c)));
        assert_eq!(s.color(-250.0), s.color(-100.0));
        assert_eq!(s.color(f64::NEG_INFINITY), s.color(-100.0));
        assert_eq!(s.color(100.0), Some(Rgb::new(0x1d, 0x7d, 0x0a)));
        assert_eq!(s.color(180.0), s.color(100.0));
    }

    #[test]
    fn zero_is_exactly_neutral() {
        let s = DivergingScale::default();
        assert_eq!(s.color(0.0), Some(Rgb::new(243, 240, 225)));
        assert_eq!(s.color(-0.0), Some(s.neutral()));
    }

    #[test]
    fn interpolates_each_half_independently() {
        let s = DivergingScale::default();
        // Halfway between #B71C1C and rgb(243, 240, 225).
        assert_eq!(s.color(-50.0), Some(Rgb::new(213, 134, 127)));
        // Halfway between rgb(243, 240, 225) and #1d7d0a.
        assert_eq!(s.color(50.0), Some(Rgb::new(136, 183, 118)));
    }

    #[test]
    fn nan_has_no_color() {
        assert_eq!(DivergingScale::default().color(f64::NAN), None);
    }

    #[test]
    fn legend_values_descend_by_step() {
        assert_eq!(
            DivergingScale::default().legend_values(),
            vec![100.0, 75.0, 50.0, 25.0, 0.0, -25.0, -50.0, -75.0, -100.0]
        );
        let coarse = DivergingScale::new(
            [-100.0, 0.0, 100.0],
            DivergingScale::default().colors(),
            50.0,
        )
        .unwrap();
        assert_eq!(coarse.legend_values(), vec![100.0, 50.0, 0.0, -50.0, -100.0]);
    }

    #[test]
    fn rejects_unordered_domain() {
        assert!(
            DivergingScale::new([0.0, 0.0, 1.0], DivergingScale::default().colors(), 1.0).is_err()
        );
        assert!(
            DivergingScale::new([-1.0, 0.0, 1.0], DivergingScale::default().colors(), 0.0).is_err()
        );
    }

    #[test]
    fn rejects_steps_that_overflow_the_legend() {
        let colors = DivergingScale::default().colors();
        assert!(DivergingScale::new([-100.0, 0.0, 100.0], colors, 1e-300).is_err());
        assert!(DivergingScale::new([-100.0, 0.0, 100.0], colors, 1.99).is_err());
        let finest = DivergingScale::new([-100.0, 0.0, 100.0], colors, 2.0).unwrap();
        assert_eq!(finest.legend_values().len(), 101);
    }
}
