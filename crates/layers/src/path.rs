//! Feature geometry to screen outlines.
//!
//! Rings are rotated onto the unit sphere, densified along great circles
//! where the projected chord is too coarse, then flattened. Vertices on the
//! far hemisphere are pushed onto the horizon and consecutive horizon points
//! are joined along the limb, so every outline stays inside the globe disk.

use foundation::Aabb2;
use foundation::math::{Orthographic, Vec2, Vec3, angle_between, great_circle_midpoint, lon_lat_to_unit};
use render::ScreenPath;
use scene::{FeatureGeometry, LonLat};

pub const DEFAULT_PRECISION_PX: f64 = 100.0;

/// Largest angle a single segment may span once it is long enough to resample.
const MAX_SEGMENT_RAD: f64 = 30.0 * std::f64::consts::PI / 180.0;
const MAX_RESAMPLE_DEPTH: u32 = 16;
const LIMB_STEP_RAD: f64 = 4.0 * std::f64::consts::PI / 180.0;

/// Sphere-side buffers reused across `PathGenerator::write_with` calls.
#[derive(Debug, Clone, Default)]
pub struct PathScratch {
    vertices: Vec<Vec3>,
    dense: Vec<Vec3>,
}

impl PathScratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> usize {
        self.vertices.capacity() + self.dense.capacity()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PathGenerator {
    projection: Orthographic,
    precision_px: f64,
}

impl PathGenerator {
    pub fn new(projection: Orthographic, precision_px: f64) -> Self {
        Self {
            projection,
            precision_px: precision_px.max(0.0),
        }
    }

    /// Replaces the contents of `out` with the outline of `geometry`.
    pub fn write(&self, geometry: &FeatureGeometry, out: &mut ScreenPath) {
        self.write_with(geometry, &mut PathScratch::new(), out);
    }

    /// Like `write`, but densifies through `scratch` so a warmed-up caller
    /// does not allocate.
    pub fn write_with(&self, geometry: &FeatureGeometry, scratch: &mut PathScratch, out: &mut ScreenPath) {
        out.clear();
        for ring in geometry.rings() {
            self.write_ring(ring, scratch, out);
        }
    }

    pub fn path(&self, geometry: &FeatureGeometry) -> ScreenPath {
        let mut out = ScreenPath::new();
        self.write(geometry, &mut out);
        out
    }

    /// Screen bounds of the visible part of `geometry`; empty when hidden.
    pub fn bounds(&self, geometry: &FeatureGeometry) -> Aabb2 {
        self.path(geometry).bounds()
    }

    fn write_ring(&self, ring: &[LonLat], scratch: &mut PathScratch, out: &mut ScreenPath) {
        let closed = ring.len() > 1 && ring.first() == ring.last();
        let open = if closed { &ring[..ring.len() - 1] } else { ring };
        let PathScratch { vertices, dense } = scratch;
        vertices.clear();
        vertices.extend(
            open.iter()
                .filter(|p| p.lon_deg.is_finite() && p.lat_deg.is_finite())
                .map(|p| self.projection.rotate(lon_lat_to_unit(p.lon_deg, p.lat_deg))),
        );
        if vertices.len() < 3 {
            return;
        }

        dense.clear();
        let n = vertices.len();
        for i in 0..n {
            let (a, b) = (vertices[i], vertices[(i + 1) % n]);
            dense.push(a);
            self.resample(a, b, MAX_RESAMPLE_DEPTH, dense);
        }
        if !dense.iter().any(|r| Orthographic::is_visible(*r)) {
            return;
        }

        out.begin_ring();
        let mut writer = RingWriter::new(&self.projection, out);
        let m = dense.len();
        for i in 0..m {
            let prev = dense[(i + m - 1) % m];
            let cur = dense[i];
            let cur_visible = Orthographic::is_visible(cur);
            if Orthographic::is_visible(prev) != cur_visible {
                if let Some(crossing) = Orthographic::horizon_crossing(prev, cur) {
                    writer.limb(crossing);
                }
            }
            if cur_visible {
                writer.point(cur);
            } else if let Some(h) = Orthographic::horizon_point(cur) {
                writer.limb(h);
            }
        }
        writer.finish();
        out.end_ring();
    }

    /// Pushes the interior samples of `a → b` (exclusive of both ends).
    fn resample(&self, a: Vec3, b: Vec3, depth: u32, out: &mut Vec<Vec3>) {
        if depth == 0 {
            return;
        }
        let (pa, pb) = (self.clamped_screen(a), self.clamped_screen(b));
        let chord = pb - pa;
        let d2 = chord.x * chord.x + chord.y * chord.y;
        let delta2 = self.precision_px * self.precision_px;
        if d2 <= 4.0 * delta2 {
            return;
        }
        let Some(mid) = great_circle_midpoint(a, b) else {
            return;
        };
        let rel = self.clamped_screen(mid) - pa;
        let cross = chord.x * rel.y - chord.y * rel.x;
        let along = (chord.x * rel.x + chord.y * rel.y) / d2;
        let split = cross * cross / d2 > delta2
            || (along - 0.5).abs() > 0.3
            || angle_between(a, b) > MAX_SEGMENT_RAD;
        if split {
            self.resample(a, mid, depth - 1, out);
            out.push(mid);
            self.resample(mid, b, depth - 1, out);
        }
    }

    fn clamped_screen(&self, rotated: Vec3) -> Vec2 {
        if Orthographic::is_visible(rotated) {
            return self.projection.to_screen(rotated);
        }
        match Orthographic::horizon_point(rotated) {
            Some(h) => self.projection.to_screen(h),
            None => self.projection.translate(),
        }
    }
}

struct RingWriter<'a> {
    projection: &'a Orthographic,
    out: &'a mut ScreenPath,
    started: bool,
    first_limb: Option<Vec3>,
    last_limb: Option<Vec3>,
    last: Option<Vec2>,
}

impl<'a> RingWriter<'a> {
    fn new(projection: &'a Orthographic, out: &'a mut ScreenPath) -> Self {
        Self {
            projection,
            out,
            started: false,
            first_limb: None,
            last_limb: None,
            last: None,
        }
    }

    fn point(&mut self, rotated: Vec3) {
        self.emit(self.projection.to_screen(rotated));
        self.started = true;
        self.last_limb = None;
    }

    fn limb(&mut self, h: Vec3) {
        if let Some(prev) = self.last_limb {
            self.arc(prev, h);
        }
        self.emit(self.projection.to_screen(h));
        if !self.started {
            self.first_limb = Some(h);
            self.started = true;
        }
        self.last_limb = Some(h);
    }

    fn finish(&mut self) {
        if let (Some(last), Some(first)) = (self.last_limb, self.first_limb) {
            self.arc(last, first);
        }
    }

    /// Interior points of the shorter limb arc from `a` to `b`.
    fn arc(&mut self, a: Vec3, b: Vec3) {
        let a0 = a.z.atan2(a.y);
        let mut d = b.z.atan2(b.y) - a0;
        if d > std::f64::consts::PI {
            d -= std::f64::consts::TAU;
        } else if d <= -std::f64::consts::PI {
            d += std::f64::consts::TAU;
        }
        let steps = (d.abs() / LIMB_STEP_RAD).ceil() as usize;
        for i in 1..steps {
            let (sin, cos) = (a0 + d * i as f64 / steps as f64).sin_cos();
            self.emit(self.projection.to_screen(Vec3::new(0.0, cos, sin)));
        }
    }

    fn emit(&mut self, p: Vec2) {
        if !p.is_finite() || self.last == Some(p) {
            return;
        }
        self.out.push(p);
        self.last = Some(p);
    }
}
