/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn new(start: Time, duration_s: f64) -> Self {
        Self {
            start,
            end: Time(start.0 + duration_s.max(0.0)),
        }
    }

    pub fn instant(t: Time) -> Self {
        Self { start: t, end: t }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// Elapsed fraction of the span at `t`, clamped to `[0, 1]`.
    ///
    /// Zero-length spans are complete as soon as they start.
    pub fn fraction(&self, t: Time) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return if t.0 >= self.start.0 { 1.0 } else { 0.0 };
        }
        ((t.0 - self.start.0) / d).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Time, TimeSpan};

    #[test]
    fn fraction_is_clamped() {
        let span = TimeSpan::new(Time(1.0), 2.0);
        assert_eq!(span.fraction(Time(0.0)), 0.0);
        assert_eq!(span.fraction(Time(2.0)), 0.5);
        assert_eq!(span.fraction(Time(9.0)), 1.0);
    }

    #[test]
    fn instant_span_completes_immediately() {
        let span = TimeSpan::instant(Time(3.0));
        assert_eq!(span.duration(), 0.0);
        assert_eq!(span.fraction(Time(3.0)), 1.0);
        assert_eq!(span.fraction(Time(2.9)), 0.0);
    }
}
