//! Projected outlines in screen space.
//!
//! A `ScreenPath` holds closed rings of screen points. Its ring buffers are
//! kept across `clear` calls so redrawing under rotation does not reallocate.

use std::fmt::Write as _;

use foundation::math::{SCREEN_DIGITS, Vec2, round_to_digits};
use foundation::Aabb2;

#[derive(Debug, Clone, Default)]
pub struct ScreenPath {
    rings: Vec<Vec<Vec2>>,
    active: usize,
}

impl PartialEq for ScreenPath {
    fn eq(&self, other: &Self) -> bool {
        self.active == other.active && self.rings().zip(other.rings()).all(|(a, b)| a == b)
    }
}

impl ScreenPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rings(rings: Vec<Vec<Vec2>>) -> Self {
        let mut path = Self::new();
        for ring in rings {
            path.begin_ring();
            for p in ring {
                path.push(p);
            }
            path.end_ring();
        }
        path
    }

    /// Empties the path but keeps ring capacity.
    pub fn clear(&mut self) {
        for ring in &mut self.rings[..self.active] {
            ring.clear();
        }
        self.active = 0;
    }

    pub fn begin_ring(&mut self) {
        if self.active < self.rings.len() {
            self.rings[self.active].clear();
        } else {
            self.rings.push(Vec::new());
        }
        self.active += 1;
    }

    pub fn push(&mut self, p: Vec2) {
        if self.active == 0 {
            self.begin_ring();
        }
        self.rings[self.active - 1].push(p);
    }

    /// Closes the current ring. Rings with fewer than three points enclose
    /// nothing and are dropped.
    pub fn end_ring(&mut self) {
        if self.active > 0 && self.rings[self.active - 1].len() < 3 {
            self.rings[self.active - 1].clear();
            self.active -= 1;
        }
    }

    pub fn rings(&self) -> impl Iterator<Item = &[Vec2]> {
        self.rings[..self.active].iter().map(Vec::as_slice)
    }

    pub fn ring_count(&self) -> usize {
        self.active
    }

    pub fn point_count(&self) -> usize {
        self.rings().map(<[Vec2]>::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Allocated point capacity across all ring buffers, active or not.
    pub fn capacity(&self) -> usize {
        self.rings.iter().map(Vec::capacity).sum()
    }

    pub fn bounds(&self) -> Aabb2 {
        let mut b = Aabb2::empty();
        for ring in self.rings() {
            for p in ring {
                b.extend(*p);
            }
        }
        b
    }

    /// Whether both paths have the same ring count and ring lengths.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.active == other.active
            && self
                .rings()
                .zip(other.rings())
                .all(|(a, b)| a.len() == b.len())
    }

    /// Overwrites `self` with the pointwise blend of `from` and `to`.
    ///
    /// Returns `false` (and leaves `self` untouched) when the two paths do not
    /// share a shape.
    pub fn blend(&mut self, from: &Self, to: &Self, t: f64) -> bool {
        if !from.same_shape(to) {
            return false;
        }
        self.clear();
        for (a, b) in from.rings().zip(to.rings()) {
            self.begin_ring();
            for (pa, pb) in a.iter().zip(b) {
                self.push(pa.lerp(*pb, t));
            }
        }
        true
    }

    /// Copies `other` into `self`, reusing buffers.
    pub fn copy_from(&mut self, other: &Self) {
        self.clear();
        for ring in other.rings() {
            self.begin_ring();
            for p in ring {
                self.push(*p);
            }
        }
    }

    /// Even-odd containment over all rings.
    pub fn contains(&self, p: Vec2) -> bool {
        let mut inside = false;
        for ring in self.rings() {
            let n = ring.len();
            let mut j = n - 1;
            for i in 0..n {
                let (a, b) = (ring[i], ring[j]);
                if (a.y > p.y) != (b.y > p.y) {
                    let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                    if p.x < x {
                        inside = !inside;
                    }
                }
                j = i;
            }
        }
        inside
    }

    /// SVG path data: `M x,yLx,y…Z` per ring, coordinates rounded to
    /// [`SCREEN_DIGITS`]. An empty path yields an empty string.
    pub fn to_svg_d(&self) -> String {
        let mut d = String::with_capacity(self.point_count() * 16);
        for ring in self.rings() {
            for (i, p) in ring.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let x = round_to_digits(p.x, SCREEN_DIGITS);
                let y = round_to_digits(p.y, SCREEN_DIGITS);
                let _ = write!(d, "{cmd}{x},{y}");
            }
            d.push('Z');
        }
        d
    }
}
