//! Orthographic (globe) projection.
//!
//! Points are rotated on the unit sphere first, then dropped onto the screen
//! plane. After rotation the `x` axis points at the viewer: only points with
//! `x >= 0` are on the visible hemisphere.

use super::{SPHERE_EPSILON, Vec2, Vec3};

/// Sphere rotation in degrees.
///
/// Applied as a turn of `longitude` degrees about the polar axis, followed by
/// `latitude` (pitch) and `roll`. A rotation of `(λ, φ, γ)` brings the point
/// `(-λ, -φ)` to the center of the disk.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rotation {
    pub longitude: f64,
    pub latitude: f64,
    pub roll: f64,
}

impl Rotation {
    pub fn new(longitude: f64, latitude: f64, roll: f64) -> Self {
        Self {
            longitude,
            latitude,
            roll,
        }
    }

    /// Returns this rotation shifted by the given longitude/latitude deltas.
    ///
    /// No wrapping or clamping is applied; the projection is periodic.
    pub fn offset(self, d_longitude: f64, d_latitude: f64) -> Self {
        Self::new(
            self.longitude + d_longitude,
            self.latitude + d_latitude,
            self.roll,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite() && self.roll.is_finite()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct RotationTrig {
    cos_lambda: f64,
    sin_lambda: f64,
    cos_phi: f64,
    sin_phi: f64,
    cos_gamma: f64,
    sin_gamma: f64,
}

impl RotationTrig {
    fn new(r: Rotation) -> Self {
        let (sin_lambda, cos_lambda) = r.longitude.to_radians().sin_cos();
        let (sin_phi, cos_phi) = r.latitude.to_radians().sin_cos();
        let (sin_gamma, cos_gamma) = r.roll.to_radians().sin_cos();
        Self {
            cos_lambda,
            sin_lambda,
            cos_phi,
            sin_phi,
            cos_gamma,
            sin_gamma,
        }
    }

    fn apply(&self, v: Vec3) -> Vec3 {
        // Yaw about the polar axis.
        let x1 = v.x * self.cos_lambda - v.y * self.sin_lambda;
        let y1 = v.x * self.sin_lambda + v.y * self.cos_lambda;
        let z1 = v.z;

        // Pitch, then roll about the view axis.
        let k = z1 * self.cos_phi + x1 * self.sin_phi;
        Vec3::new(
            x1 * self.cos_phi - z1 * self.sin_phi,
            y1 * self.cos_gamma - k * self.sin_gamma,
            k * self.cos_gamma + y1 * self.sin_gamma,
        )
    }
}

/// Orthographic projection with a fixed center of `(0, 0)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orthographic {
    rotation: Rotation,
    scale: f64,
    translate: Vec2,
    trig: RotationTrig,
}

impl Orthographic {
    /// Scale used while measuring a collection before fitting it.
    pub const REFERENCE_SCALE: f64 = 150.0;

    pub fn new(rotation: Rotation, scale: f64, translate: Vec2) -> Self {
        Self {
            rotation,
            scale,
            translate,
            trig: RotationTrig::new(rotation),
        }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Rotates a unit vector into view space.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        self.trig.apply(v)
    }

    /// Whether a rotated unit vector faces the viewer.
    pub fn is_visible(rotated: Vec3) -> bool {
        rotated.x >= -SPHERE_EPSILON
    }

    /// Screen position of a rotated unit vector (ignores visibility).
    pub fn to_screen(&self, rotated: Vec3) -> Vec2 {
        Vec2::new(
            self.translate.x + self.scale * rotated.y,
            self.translate.y - self.scale * rotated.z,
        )
    }

    /// Projects a lon/lat pair in degrees; `None` on the far hemisphere.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Option<Vec2> {
        let r = self.rotate(super::lon_lat_to_unit(lon_deg, lat_deg));
        Self::is_visible(r).then(|| self.to_screen(r))
    }

    /// Pushes a rotated vector onto the horizon great circle (`x = 0`).
    ///
    /// The point directly behind the globe has no unique horizon position and
    /// yields `None`.
    pub fn horizon_point(rotated: Vec3) -> Option<Vec3> {
        Vec3::new(0.0, rotated.y, rotated.z).normalized()
    }

    /// Where the chord between two rotated vectors crosses the horizon plane,
    /// pushed back onto the sphere.
    pub fn horizon_crossing(a: Vec3, b: Vec3) -> Option<Vec3> {
        let denom = a.x - b.x;
        if denom.abs() < SPHERE_EPSILON {
            return Self::horizon_point(a);
        }
        let t = (a.x / denom).clamp(0.0, 1.0);
        let p = a + (b - a).scale(t);
        Self::horizon_point(p)
    }
}

#[cfg(test)]
mod tests {
    use super::{Orthographic, Rotation};
    use crate::math::{Vec2, lon_lat_to_unit};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn proj(rotation: Rotation) -> Orthographic {
        Orthographic::new(rotation, 100.0, Vec2::new(200.0, 150.0))
    }

    #[test]
    fn origin_projects_to_translation() {
        let p = proj(Rotation::default()).project(0.0, 0.0).unwrap();
        assert_close(p.x, 200.0, 1e-9);
        assert_close(p.y, 150.0, 1e-9);
    }

    #[test]
    fn north_pole_is_up_and_east_is_right() {
        let o = proj(Rotation::default());
        let north = o.project(0.0, 90.0).unwrap();
        assert_close(north.x, 200.0, 1e-9);
        assert_close(north.y, 50.0, 1e-9);

        let east = o.project(90.0, 0.0).unwrap();
        assert_close(east.x, 300.0, 1e-9);
        assert_close(east.y, 150.0, 1e-9);
    }

    #[test]
    fn far_side_is_hidden() {
        let o = proj(Rotation::default());
        assert!(o.project(180.0, 0.0).is_none());
        assert!(o.project(135.0, 10.0).is_none());
    }

    #[test]
    fn longitude_rotation_recenters_globe() {
        let o = proj(Rotation::new(10.0, 0.0, 0.0));
        let p = o.project(-10.0, 0.0).unwrap();
        assert_close(p.x, 200.0, 1e-9);
        assert_close(p.y, 150.0, 1e-9);
    }

    #[test]
    fn latitude_rotation_recenters_globe() {
        let o = proj(Rotation::new(0.0, 90.0, 0.0));
        let p = o.project(0.0, -90.0).unwrap();
        assert_close(p.x, 200.0, 1e-9);
        assert_close(p.y, 150.0, 1e-9);
        assert!(o.project(0.0, 60.0).is_none());
    }

    #[test]
    fn horizon_crossing_lies_on_the_limb() {
        let o = proj(Rotation::default());
        let a = o.rotate(lon_lat_to_unit(80.0, 0.0));
        let b = o.rotate(lon_lat_to_unit(100.0, 0.0));
        let c = Orthographic::horizon_crossing(a, b).unwrap();
        assert_close(c.x, 0.0, 1e-12);
        assert_close(c.length(), 1.0, 1e-12);
        let s = o.to_screen(c);
        assert_close(s.x, 300.0, 1e-9);
    }
}
