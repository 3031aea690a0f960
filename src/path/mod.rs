//! Path Manager Interface
//!
//! A path manager turns the sequencer's waypoint window into a flyable
//! segment and decides when that segment is done. Different managers can
//! implement different turn styles; the mission core only depends on this
//! two-method contract.

pub mod basic;

pub use basic::BasicPath;

use crate::mission::Location;

/// Contract between the mission layer and a path manager.
pub trait PathManager {
    /// Load the leg from `prev` to `next` as the active segment.
    ///
    /// Returns `false` if the manager cannot produce a flyable segment for
    /// this pair.
    fn generate_segment(&mut self, prev: &Location, next: &Location) -> bool;

    /// True once the active segment has been completed and the mission
    /// should advance.
    fn segment_complete(&mut self) -> bool;
}
