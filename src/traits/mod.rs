//! Platform-agnostic trait abstractions.
//!
//! The mission core never talks to hardware directly. Persistent byte
//! storage, the two saved mission scalars, and the position estimate are
//! injected through the traits in this module, so the whole crate can be
//! exercised on a host without any embedded dependencies.

pub mod params;
pub mod storage;

pub use params::{MissionParams, RamParams};
pub use storage::{RamStorage, Storage};

use crate::mission::Location;

/// Current estimated position provider.
///
/// Implemented by the AHRS/GPS fusion layer in firmware and by simple mocks
/// in tests. Consumed by the path manager, never by the sequencer itself.
pub trait PositionSource {
    /// Returns the best current position estimate.
    fn position(&self) -> Location;
}
