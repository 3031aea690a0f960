//! Geodesic Navigation Math
//!
//! Pure functions over fixed-point [`Location`] positions: flat-earth
//! distance and bearing, waypoint-crossing detection, spherical dead
//! reckoning, and local-tangent offsets. Everything here is independent of
//! sequencer state; the only mutable piece is the [`LongitudeScale`] memo,
//! which callers own explicitly and pass by reference.
//!
//! The flat-earth approximations are valid at regional waypoint spacing;
//! they are not geodesics over long ranges.

pub mod flyby;

pub use flyby::{generate_flyby, FlybyGeometry, TurnDirection};

use libm::{acosf, asinf, atan2f, cosf, sinf, sqrtf};
use nalgebra::Vector2;

use crate::mission::Location;

/// Earth radius in meters.
pub const RADIUS_OF_EARTH: f64 = 6_378_100.0;

/// Meters per 1e-7 degree of latitude.
const LOCATION_SCALING_FACTOR: f32 = 0.011_131_95;

/// 1e-7 degrees of latitude per meter.
const LOCATION_SCALING_FACTOR_INV: f32 = 89.831_52;

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Centidegrees per radian.
const RAD_TO_CENTIDEG: f32 = 5729.577_9;

/// Memoized east-west scale factor.
///
/// East-west distances shrink by the cosine of latitude. Recomputing that
/// cosine every navigation tick is wasteful on constrained hardware, so the
/// factor is cached and reused while the requested latitude stays within
/// 0.01 degrees (about 1.1 km) of the memoized one. The staleness inside
/// that band is a deliberate precision/cost trade-off.
#[derive(Debug, Clone, Copy)]
pub struct LongitudeScale {
    last_lat: i32,
    scale: f32,
}

impl LongitudeScale {
    /// Create a memo primed for the equator (scale 1.0).
    pub const fn new() -> Self {
        Self {
            last_lat: 0,
            scale: 1.0,
        }
    }

    /// Scale factor for east-west distances at `loc`'s latitude.
    pub fn factor(&mut self, loc: &Location) -> f32 {
        if (self.last_lat as i64 - loc.lat as i64).abs() < 100_000 {
            // Within 0.01 degrees of the memoized latitude; skip the cos().
            return self.scale;
        }
        self.scale = cosf(loc.lat.abs() as f32 / 1.0e7 * DEG_TO_RAD);
        self.last_lat = loc.lat;
        self.scale
    }
}

impl Default for LongitudeScale {
    fn default() -> Self {
        Self::new()
    }
}

/// Flat-earth distance in meters between two locations.
pub fn distance_m(a: &Location, b: &Location, scale: &mut LongitudeScale) -> f32 {
    let dlat = (b.lat as i64 - a.lat as i64) as f32;
    let dlng = (b.lng as i64 - a.lng as i64) as f32 * scale.factor(b);
    sqrtf(dlat * dlat + dlng * dlng) * LOCATION_SCALING_FACTOR
}

/// Flat-earth distance in centimeters, truncated.
///
/// Saturates at `u32::MAX` if the true distance would not fit; that regime
/// is far outside the flat-earth approximation's validity anyway.
pub fn distance_cm(a: &Location, b: &Location, scale: &mut LongitudeScale) -> u32 {
    (distance_m(a, b, scale) * 100.0) as u32
}

/// Bearing from `a` to `b` in centidegrees, normalized into `[0, 36000)`.
pub fn bearing_cd(a: &Location, b: &Location, scale: &mut LongitudeScale) -> i32 {
    let off_x = (b.lng as i64 - a.lng as i64) as f32;
    let off_y = (b.lat as i64 - a.lat as i64) as f32 / scale.factor(b);
    let mut bearing = 9000 + (atan2f(-off_y, off_x) * RAD_TO_CENTIDEG) as i32;
    if bearing < 0 {
        bearing += 36000;
    }
    bearing
}

/// True if `location` is past a line perpendicular to the leg from `point1`
/// to `point2`, drawn through `point2`.
///
/// With `point1` the previous waypoint and `point2` the target, a true
/// return means the vehicle has flown past the target. The three positions
/// form a triangle; the test is whether the angle at `point2` between the
/// legs toward `location` and toward `point1` exceeds 90 degrees.
///
/// Degenerate cases: if two of the points coincide the angle is undefined
/// and the answer is whether `location` sits exactly on `point2`. If the
/// angle is exactly zero (collinear), the answer is whether `location` is
/// farther from `point1` than `point2` is.
pub fn passed_point(
    location: &Location,
    point1: &Location,
    point2: &Location,
    scale: &mut LongitudeScale,
) -> bool {
    let to_location = Vector2::new(
        (location.lat as i64 - point2.lat as i64) as f32,
        (location.lng as i64 - point2.lng as i64) as f32,
    );
    let to_point1 = Vector2::new(
        (point1.lat as i64 - point2.lat as i64) as f32,
        (point1.lng as i64 - point2.lng as i64) as f32,
    );

    let norm_product = to_location.norm() * to_point1.norm();
    if norm_product == 0.0 {
        // Two of the points are co-located.
        return distance_m(location, point2, scale) == 0.0;
    }

    let cos_angle = to_location.dot(&to_point1) / norm_product;
    let angle = acosf(cos_angle.clamp(-1.0, 1.0));

    if angle == 0.0 {
        // Exactly on the point1->point2 ray.
        return distance_m(location, point1, scale) > distance_m(point2, point1, scale);
    }

    angle * RAD_TO_DEG > 90.0
}

/// Great-circle dead reckoning: project `loc` along `bearing_deg` for
/// `distance_m` meters.
///
/// Precise over long distances but markedly more expensive than
/// [`location_offset`]; use it when the baseline is long enough to matter.
pub fn location_update(loc: &Location, bearing_deg: f32, distance_m: f32) -> Location {
    let lat1 = loc.lat as f32 * 1.0e-7 * DEG_TO_RAD;
    let lon1 = loc.lng as f32 * 1.0e-7 * DEG_TO_RAD;
    let brng = bearing_deg * DEG_TO_RAD;
    let dr = distance_m / RADIUS_OF_EARTH as f32;

    let lat2 = asinf(sinf(lat1) * cosf(dr) + cosf(lat1) * sinf(dr) * cosf(brng));
    let lon2 = lon1
        + atan2f(
            sinf(brng) * sinf(dr) * cosf(lat1),
            cosf(dr) - sinf(lat1) * sinf(lat2),
        );

    let mut out = *loc;
    out.lat = (lat2 * RAD_TO_DEG * 1.0e7) as i32;
    out.lng = (lon2 * RAD_TO_DEG * 1.0e7) as i32;
    out
}

/// Local-tangent-plane offset: shift `loc` by meters north and east.
///
/// Cheap compared to [`location_update`]; returns the input unchanged when
/// both offsets are zero to skip the floating-point work entirely.
pub fn location_offset(
    loc: &Location,
    ofs_north_m: f32,
    ofs_east_m: f32,
    scale: &mut LongitudeScale,
) -> Location {
    let mut out = *loc;
    if ofs_north_m != 0.0 || ofs_east_m != 0.0 {
        let dlat = ofs_north_m * LOCATION_SCALING_FACTOR_INV;
        let dlng = ofs_east_m * LOCATION_SCALING_FACTOR_INV / scale.factor(loc);
        out.lat += dlat as i32;
        out.lng += dlng as i32;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(lat: i32, lng: i32) -> Location {
        Location::waypoint(lat, lng, 0)
    }

    // ========================================================================
    // Tests: longitude scale memo
    // ========================================================================

    #[test]
    fn test_scale_recomputes_past_threshold() {
        let mut scale = LongitudeScale::new();
        let at_45 = scale.factor(&loc(450_000_000, 0));
        assert!((at_45 - 0.7071).abs() < 0.001);

        let at_60 = scale.factor(&loc(600_000_000, 0));
        assert!((at_60 - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_scale_stays_stale_within_threshold() {
        let mut scale = LongitudeScale::new();
        let first = scale.factor(&loc(450_000_000, 0));
        // 0.005 degrees away: inside the memo band, same value returned.
        let nearby = scale.factor(&loc(450_050_000, 0));
        assert_eq!(first, nearby);
    }

    #[test]
    fn test_scale_symmetric_about_equator() {
        let mut scale = LongitudeScale::new();
        let north = scale.factor(&loc(300_000_000, 0));
        let mut scale = LongitudeScale::new();
        let south = scale.factor(&loc(-300_000_000, 0));
        assert_eq!(north, south);
    }

    // ========================================================================
    // Tests: distance
    // ========================================================================

    #[test]
    fn test_distance_one_degree_latitude() {
        let mut scale = LongitudeScale::new();
        let a = loc(0, 0);
        let b = loc(10_000_000, 0);
        let d = distance_m(&a, &b, &mut scale);
        // One degree of latitude is about 111.3 km.
        assert!((d - 111_319.5).abs() < 100.0);
    }

    #[test]
    fn test_distance_symmetry_at_equator() {
        // Both reference latitudes sit inside the same memo band, so the
        // cached scale cannot mask an asymmetry here.
        let mut scale = LongitudeScale::new();
        let a = loc(10_000, 20_000);
        let b = loc(-15_000, 90_000);
        let ab = distance_m(&a, &b, &mut scale);
        let ba = distance_m(&b, &a, &mut scale);
        assert!((ab - ba).abs() < 1.0e-3);
    }

    #[test]
    fn test_distance_cm_truncates() {
        let mut scale = LongitudeScale::new();
        let a = loc(0, 0);
        let b = loc(10_000, 0);
        let m = distance_m(&a, &b, &mut scale);
        let cm = distance_cm(&a, &b, &mut scale);
        assert_eq!(cm, (m * 100.0) as u32);
        assert!(cm > 0);
    }

    #[test]
    fn test_distance_zero() {
        let mut scale = LongitudeScale::new();
        let a = loc(123, 456);
        assert_eq!(distance_m(&a, &a, &mut scale), 0.0);
    }

    // ========================================================================
    // Tests: bearing
    // ========================================================================

    #[test]
    fn test_bearing_cardinal_directions() {
        let mut scale = LongitudeScale::new();
        let origin = loc(0, 0);
        assert_eq!(bearing_cd(&origin, &loc(1_000_000, 0), &mut scale), 0);
        assert_eq!(bearing_cd(&origin, &loc(0, 1_000_000), &mut scale), 9000);
        assert_eq!(bearing_cd(&origin, &loc(-1_000_000, 0), &mut scale), 18000);
        assert_eq!(bearing_cd(&origin, &loc(0, -1_000_000), &mut scale), 27000);
    }

    #[test]
    fn test_bearing_always_in_range() {
        let mut scale = LongitudeScale::new();
        let origin = loc(0, 0);
        let targets = [
            loc(500_000, 500_000),
            loc(-500_000, 500_000),
            loc(-500_000, -500_000),
            loc(500_000, -500_000),
            loc(1, 0),
            loc(0, -1),
        ];
        for t in &targets {
            let b = bearing_cd(&origin, t, &mut scale);
            assert!((0..36000).contains(&b), "bearing {} out of range", b);
        }
    }

    #[test]
    fn test_bearing_northeast_quadrant() {
        let mut scale = LongitudeScale::new();
        let b = bearing_cd(&loc(0, 0), &loc(1_000_000, 1_000_000), &mut scale);
        assert!((b - 4500).abs() < 10);
    }

    // ========================================================================
    // Tests: passed_point
    // ========================================================================

    #[test]
    fn test_passed_point_at_target_counts_as_passed() {
        let mut scale = LongitudeScale::new();
        let p1 = loc(0, 0);
        let p2 = loc(1_000_000, 0);
        assert!(passed_point(&p2, &p1, &p2, &mut scale));
    }

    #[test]
    fn test_passed_point_midpoint_not_passed() {
        let mut scale = LongitudeScale::new();
        let p1 = loc(0, 0);
        let p2 = loc(1_000_000, 0);
        let midpoint = loc(500_000, 0);
        assert!(!passed_point(&midpoint, &p1, &p2, &mut scale));
    }

    #[test]
    fn test_passed_point_beyond_target() {
        let mut scale = LongitudeScale::new();
        let p1 = loc(0, 0);
        let p2 = loc(1_000_000, 0);
        let beyond = loc(1_500_000, 0);
        assert!(passed_point(&beyond, &p1, &p2, &mut scale));
    }

    #[test]
    fn test_passed_point_behind_start() {
        let mut scale = LongitudeScale::new();
        let p1 = loc(0, 0);
        let p2 = loc(1_000_000, 0);
        let behind = loc(-500_000, 0);
        assert!(!passed_point(&behind, &p1, &p2, &mut scale));
    }

    #[test]
    fn test_passed_point_abeam_target() {
        let mut scale = LongitudeScale::new();
        let p1 = loc(0, 0);
        let p2 = loc(1_000_000, 0);
        // Past the perpendicular through p2, well off to the side.
        let past_side = loc(1_200_000, 300_000);
        assert!(passed_point(&past_side, &p1, &p2, &mut scale));
        // Before the perpendicular, off to the side.
        let before_side = loc(800_000, 300_000);
        assert!(!passed_point(&before_side, &p1, &p2, &mut scale));
    }

    #[test]
    fn test_passed_point_coincident_leg_points() {
        let mut scale = LongitudeScale::new();
        let p = loc(1_000_000, 0);
        let elsewhere = loc(0, 0);
        // point1 == point2: only being exactly on the target counts.
        assert!(passed_point(&p, &p, &p, &mut scale));
        assert!(!passed_point(&elsewhere, &p, &p, &mut scale));
    }

    // ========================================================================
    // Tests: location_update / location_offset
    // ========================================================================

    #[test]
    fn test_location_update_north() {
        let start = loc(0, 0);
        let one_degree_m = 111_319.5; // at the 6378100 m sphere radius
        let out = location_update(&start, 0.0, one_degree_m);
        assert!((out.lat - 10_000_000).abs() < 50_000); // within 0.005 deg
        assert!(out.lng.abs() < 10_000);
    }

    #[test]
    fn test_location_update_east_at_equator() {
        let start = loc(0, 0);
        let out = location_update(&start, 90.0, 111_319.5);
        assert!((out.lng - 10_000_000).abs() < 50_000);
        assert!(out.lat.abs() < 10_000);
    }

    #[test]
    fn test_location_update_preserves_other_fields() {
        let mut start = loc(0, 0);
        start.alt = 4321;
        start.p1 = 9;
        let out = location_update(&start, 45.0, 1000.0);
        assert_eq!(out.alt, 4321);
        assert_eq!(out.p1, 9);
        assert_eq!(out.id, start.id);
    }

    #[test]
    fn test_location_offset_north_east() {
        let mut scale = LongitudeScale::new();
        let start = loc(0, 0);
        let out = location_offset(&start, 100.0, 50.0, &mut scale);
        // 100 m north is about 8983 fixed-point units.
        assert!((out.lat - 8983).abs() <= 1);
        assert!((out.lng - 4491).abs() <= 1);
    }

    #[test]
    fn test_location_offset_zero_is_noop() {
        let mut scale = LongitudeScale::new();
        let start = loc(123_456, 789_012);
        let out = location_offset(&start, 0.0, 0.0, &mut scale);
        assert_eq!(out, start);
    }

    #[test]
    fn test_offset_and_update_agree_over_short_range() {
        let mut scale = LongitudeScale::new();
        let start = loc(0, 0);
        let cheap = location_offset(&start, 500.0, 0.0, &mut scale);
        let precise = location_update(&start, 0.0, 500.0);
        let mut scale = LongitudeScale::new();
        let delta = distance_m(&cheap, &precise, &mut scale);
        assert!(delta < 2.0, "methods disagree by {} m", delta);
    }
}
