//! Basic Waypoint Path Manager
//!
//! The simplest [`PathManager`] variant: fly straight at the next waypoint
//! and call the segment complete once the vehicle is inside the waypoint
//! radius or has crossed the perpendicular through the target.

use crate::geodesy::{distance_cm, passed_point, LongitudeScale};
use crate::mission::Location;
use crate::traits::PositionSource;

use super::PathManager;

/// Straight-line segment manager with radius-or-crossed arrival.
pub struct BasicPath<P: PositionSource> {
    position: P,
    radius_cm: u32,
    scale: LongitudeScale,
    prev_wp: Location,
    next_wp: Location,
}

impl<P: PositionSource> BasicPath<P> {
    /// Create a manager that reports arrival within `radius_cm` of the
    /// target waypoint.
    pub fn new(position: P, radius_cm: u32) -> Self {
        Self {
            position,
            radius_cm,
            scale: LongitudeScale::new(),
            prev_wp: Location::default(),
            next_wp: Location::default(),
        }
    }

    /// The waypoint currently being flown toward.
    pub fn next_wp(&self) -> &Location {
        &self.next_wp
    }
}

impl<P: PositionSource> PathManager for BasicPath<P> {
    fn generate_segment(&mut self, prev: &Location, next: &Location) -> bool {
        self.prev_wp = *prev;
        self.next_wp = *next;
        true
    }

    fn segment_complete(&mut self) -> bool {
        let current = self.position.position();

        if distance_cm(&current, &self.next_wp, &mut self.scale) <= self.radius_cm {
            return true;
        }

        // Have we flown past the waypoint?
        passed_point(&current, &self.prev_wp, &self.next_wp, &mut self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FixedPosition {
        loc: Cell<Location>,
    }

    impl FixedPosition {
        fn at(lat: i32, lng: i32) -> Self {
            Self {
                loc: Cell::new(Location::waypoint(lat, lng, 0)),
            }
        }
    }

    impl PositionSource for &FixedPosition {
        fn position(&self) -> Location {
            self.loc.get()
        }
    }

    fn leg() -> (Location, Location) {
        (
            Location::waypoint(0, 0, 0),
            Location::waypoint(1_000_000, 0, 0),
        )
    }

    #[test]
    fn test_segment_not_complete_mid_leg() {
        let source = FixedPosition::at(500_000, 0);
        let mut path = BasicPath::new(&source, 3_000); // 30 m radius
        let (prev, next) = leg();
        assert!(path.generate_segment(&prev, &next));
        assert!(!path.segment_complete());
    }

    #[test]
    fn test_segment_complete_inside_radius() {
        // ~11 m short of the target, 30 m radius.
        let source = FixedPosition::at(999_000, 0);
        let mut path = BasicPath::new(&source, 3_000);
        let (prev, next) = leg();
        path.generate_segment(&prev, &next);
        assert!(path.segment_complete());
    }

    #[test]
    fn test_segment_complete_when_overshot() {
        // Well past the target and outside the radius: the crossing test
        // still reports the segment done.
        let source = FixedPosition::at(1_100_000, 0);
        let mut path = BasicPath::new(&source, 3_000);
        let (prev, next) = leg();
        path.generate_segment(&prev, &next);
        assert!(path.segment_complete());
    }

    #[test]
    fn test_segment_tracks_updated_position() {
        let source = FixedPosition::at(200_000, 0);
        let mut path = BasicPath::new(&source, 3_000);
        let (prev, next) = leg();
        path.generate_segment(&prev, &next);
        assert!(!path.segment_complete());

        source.loc.set(Location::waypoint(1_000_000, 0, 0));
        assert!(path.segment_complete());
    }

    #[test]
    fn test_new_segment_replaces_old() {
        let source = FixedPosition::at(1_100_000, 0);
        let mut path = BasicPath::new(&source, 3_000);
        let (prev, next) = leg();
        path.generate_segment(&prev, &next);
        assert!(path.segment_complete());

        // Next leg continues onward; position is now mid-leg again.
        let further = Location::waypoint(2_000_000, 0, 0);
        path.generate_segment(&next, &further);
        assert_eq!(path.next_wp().lat, 2_000_000);
        assert!(!path.segment_complete());
    }
}
