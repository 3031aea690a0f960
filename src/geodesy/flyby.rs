//! Fly-by Turn Geometry
//!
//! A fly-by turn starts curving before the nominal waypoint, entering the
//! arc on the incoming leg and leaving it on the outgoing leg. This module
//! constructs the three control points of that arc for the turn at `wp_b`
//! between legs `wp_a -> wp_b` and `wp_b -> wp_c`.
//!
//! The waypoints are projected onto a local tangent plane anchored at
//! `wp_a` (equirectangular projection, longitude corrected by the cosine of
//! the anchor latitude), the offsets are computed there in meters, and the
//! results are projected back to fixed-point geographic coordinates.

use libm::{acos, cos, sin, tan};
use nalgebra::Vector2;

use crate::mission::Location;

use super::RADIUS_OF_EARTH;

const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

/// Sharpest acceptable turn, as a half-angle in radians (about 9.7 deg).
pub const MIN_HALF_ANGLE_RAD: f64 = 0.17;

/// Shallowest acceptable turn, as a half-angle in radians (about 79.6 deg).
pub const MAX_HALF_ANGLE_RAD: f64 = 1.39;

/// Direction of the turn at the fly-by waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    /// Right-hand turn.
    Clockwise,
    /// Left-hand turn.
    CounterClockwise,
}

/// Control points of an accepted fly-by turn.
///
/// `entry` sits on the incoming leg before the waypoint, `exit` on the
/// outgoing leg after it, and `apex` lies along the angle bisector between
/// them. All three reuse the fly-by waypoint's non-coordinate fields
/// (id, altitude, options) as a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlybyGeometry {
    /// Turn entry point on the incoming leg.
    pub entry: Location,
    /// Helper point along the angle bisector.
    pub apex: Location,
    /// Turn exit point on the outgoing leg.
    pub exit: Location,
    /// Which way the vehicle turns.
    pub direction: TurnDirection,
}

/// Equirectangular projection of `wp` onto the tangent plane at `ref_point`
/// (x = north/latitude, y = east/longitude, radians).
fn geo_to_planar(ref_point: Vector2<f64>, wp: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(
        (wp.x - ref_point.x) * DEG_TO_RAD,
        (wp.y - ref_point.y) * cos(ref_point.x * DEG_TO_RAD) * DEG_TO_RAD,
    )
}

/// Inverse of [`geo_to_planar`].
fn planar_to_geo(ref_point: Vector2<f64>, wp: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(
        wp.x * RAD_TO_DEG + ref_point.x,
        wp.y * RAD_TO_DEG / cos(ref_point.x * DEG_TO_RAD) + ref_point.y,
    )
}

fn degrees_vec(loc: &Location) -> Vector2<f64> {
    Vector2::new(loc.lat as f64 / 1e7, loc.lng as f64 / 1e7)
}

fn with_coords(template: &Location, geo: Vector2<f64>) -> Location {
    let mut out = *template;
    out.lat = (geo.x * 1e7) as i32;
    out.lng = (geo.y * 1e7) as i32;
    out
}

/// Construct fly-by turn geometry for the turn at `wp_b`.
///
/// `radius_m` is the requested turn radius in meters. Returns `None` when
/// the turn is too sharp or too shallow for a fly-by (half-angle outside
/// `[`[`MIN_HALF_ANGLE_RAD`]`, `[`MAX_HALF_ANGLE_RAD`]`]`) or when either
/// leg is degenerate (coincident waypoints leave the half-angle undefined).
pub fn generate_flyby(
    radius_m: f64,
    wp_a: &Location,
    wp_b: &Location,
    wp_c: &Location,
) -> Option<FlybyGeometry> {
    let anchor = degrees_vec(wp_a);

    // Plane coordinates in meters, anchored at wp_a.
    let a = Vector2::new(0.0, 0.0);
    let b = geo_to_planar(anchor, degrees_vec(wp_b)) * RADIUS_OF_EARTH;
    let c = geo_to_planar(anchor, degrees_vec(wp_c)) * RADIUS_OF_EARTH;

    let q1 = (b - a).normalize();
    let q2 = (c - b).normalize();
    let q_diff = (q1 - q2).normalize();

    let direction = if q1.x * q2.y - q1.y * q2.x > 0.0 {
        TurnDirection::Clockwise
    } else {
        TurnDirection::CounterClockwise
    };

    // Half the angle between the reversed incoming leg and the outgoing leg.
    // A degenerate leg normalizes to NaN and fails the band check below.
    let half_angle = acos(-q1.dot(&q2)) / 2.0;
    if !(MIN_HALF_ANGLE_RAD..=MAX_HALF_ANGLE_RAD).contains(&half_angle) {
        return None;
    }

    let apex = b - q_diff * (radius_m / sin(half_angle));
    let entry = b - q1 * (radius_m / tan(half_angle));
    let exit = b + q2 * (radius_m / tan(half_angle));

    Some(FlybyGeometry {
        entry: with_coords(wp_b, planar_to_geo(anchor, entry / RADIUS_OF_EARTH)),
        apex: with_coords(wp_b, planar_to_geo(anchor, apex / RADIUS_OF_EARTH)),
        exit: with_coords(wp_b, planar_to_geo(anchor, exit / RADIUS_OF_EARTH)),
        direction,
    })
}
