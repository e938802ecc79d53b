use super::Vec3;

/// Tolerance used for horizon and degeneracy tests on the unit sphere.
pub const SPHERE_EPSILON: f64 = 1e-9;

/// Unit vector for a longitude/latitude pair given in degrees.
///
/// Axes: `x` points at (0°, 0°), `y` at (90°E, 0°), `z` at the north pole.
pub fn lon_lat_to_unit(lon_deg: f64, lat_deg: f64) -> Vec3 {
    let lambda = lon_deg.to_radians();
    let phi = lat_deg.to_radians();
    let cos_phi = phi.cos();
    Vec3::new(cos_phi * lambda.cos(), cos_phi * lambda.sin(), phi.sin())
}

/// Inverse of [`lon_lat_to_unit`]; returns `(lon_deg, lat_deg)`.
pub fn unit_to_lon_lat(v: Vec3) -> (f64, f64) {
    let lon = v.y.atan2(v.x).to_degrees();
    let lat = v.z.clamp(-1.0, 1.0).asin().to_degrees();
    (lon, lat)
}

/// Great-circle angle between two unit vectors, in radians.
pub fn angle_between(a: Vec3, b: Vec3) -> f64 {
    // atan2 of |a x b| and a.b stays accurate for tiny and near-antipodal angles.
    a.cross(b).length().atan2(a.dot(b))
}

/// Midpoint of the shorter great-circle arc between two unit vectors.
///
/// Antipodal inputs have no unique midpoint and yield `None`.
pub fn great_circle_midpoint(a: Vec3, b: Vec3) -> Option<Vec3> {
    (a + b).normalized()
}

#[cfg(test)]
mod tests {
    use super::{angle_between, great_circle_midpoint, lon_lat_to_unit, unit_to_lon_lat};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn axes_match_reference_points() {
        let v = lon_lat_to_unit(0.0, 0.0);
        assert_close(v.x, 1.0, 1e-12);
        let v = lon_lat_to_unit(90.0, 0.0);
        assert_close(v.y, 1.0, 1e-12);
        let v = lon_lat_to_unit(0.0, 90.0);
        assert_close(v.z, 1.0, 1e-12);
    }

    #[test]
    fn lon_lat_survives_unit_conversion() {
        let (lon, lat) = unit_to_lon_lat(lon_lat_to_unit(-73.5, 45.25));
        assert_close(lon, -73.5, 1e-9);
        assert_close(lat, 45.25, 1e-9);
    }

    #[test]
    fn midpoint_halves_the_arc() {
        let a = lon_lat_to_unit(0.0, 0.0);
        let b = lon_lat_to_unit(60.0, 0.0);
        let m = great_circle_midpoint(a, b).unwrap();
        let (lon, lat) = unit_to_lon_lat(m);
        assert_close(lon, 30.0, 1e-9);
        assert_close(lat, 0.0, 1e-9);
        assert_close(angle_between(a, m).to_degrees(), 30.0, 1e-9);
    }

    #[test]
    fn antipodal_midpoint_is_undefined() {
        let a = lon_lat_to_unit(0.0, 0.0);
        let b = lon_lat_to_unit(180.0, 0.0);
        assert!(great_circle_midpoint(a, b).is_none());
    }
}
