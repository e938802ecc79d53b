use crate::math::Vec2;

/// Axis-aligned bounding box in screen or projected space.
///
/// Starts out empty (inverted infinities) and grows through [`Aabb2::extend`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    pub fn empty() -> Self {
        Aabb2 {
            min: [f64::INFINITY, f64::INFINITY],
            max: [f64::NEG_INFINITY, f64::NEG_INFINITY],
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.min[0] <= self.max[0] && self.min[1] <= self.max[1])
    }

    pub fn extend(&mut self, p: Vec2) {
        if !p.is_finite() {
            return;
        }
        self.min[0] = self.min[0].min(p.x);
        self.min[1] = self.min[1].min(p.y);
        self.max[0] = self.max[0].max(p.x);
        self.max[1] = self.max[1].max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }
}

impl Default for Aabb2 {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2;
    use crate::math::Vec2;

    #[test]
    fn extend_grows_from_empty() {
        let mut b = Aabb2::empty();
        assert!(b.is_empty());
        b.extend(Vec2::new(1.0, -2.0));
        b.extend(Vec2::new(-3.0, 4.0));
        assert!(!b.is_empty());
        assert_eq!(b, Aabb2::new([-3.0, -2.0], [1.0, 4.0]));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 6.0);
        assert!(b.contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn ignores_non_finite_points() {
        let mut b = Aabb2::empty();
        b.extend(Vec2::new(f64::NAN, 1.0));
        assert!(b.is_empty());
    }
}
