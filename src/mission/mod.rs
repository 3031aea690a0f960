//! Mission Command Records and Sequencing
//!
//! The mission is a persisted list of fixed-size command records. Index 0 is
//! reserved for the home location; it is never a normal mission step. Each
//! record doubles as the navigation value type, so the geodesy module and
//! the sequencer share one position representation.
//!
//! # Record layout
//!
//! Records are stored as 15 bytes (see [`codec`]): id, options, p1, then
//! altitude / latitude / longitude as 32-bit words. Coordinates are
//! fixed-point in units of 1e-7 degree; altitude is centimeters, stored
//! relative to home when [`LocationOptions::RELATIVE_ALT`] is set.
//!
//! # Jump directives
//!
//! A `DO_JUMP` record overloads `p1` as the jump target index and the
//! latitude word as a remaining-repeat counter. Sequencer logic never touches
//! those fields directly; it decodes them into a [`JumpCommand`] and encodes
//! the updated counter back at the storage boundary.

pub mod codec;
pub mod command;
pub mod sequencer;

pub use command::{
    is_condition_command, is_nav_command, CMD_BLANK, MAV_CMD_CONDITION_CHANGE_ALT,
    MAV_CMD_CONDITION_LAST, MAV_CMD_DO_JUMP, MAV_CMD_NAV_LAST, MAV_CMD_NAV_WAYPOINT,
};
pub use sequencer::MissionSequencer;

use bitflags::bitflags;

bitflags! {
    /// Option bits carried in a command record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LocationOptions: u8 {
        /// Altitude is relative to home rather than absolute.
        const RELATIVE_ALT = 1 << 0;
    }
}

/// A mission command record and navigation position.
///
/// Used both as the storage format and as the value type the geodesy
/// functions operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Command-type tag (see [`command`] for the ranges).
    pub id: u8,
    /// Option bits; bit 0 = relative altitude.
    pub options: LocationOptions,
    /// Command parameter. For a jump directive: the target index.
    pub p1: u8,
    /// Altitude in centimeters, relative or absolute per `options`.
    pub alt: i32,
    /// Latitude in 1e-7 degree units. For a jump directive this word is
    /// overloaded as the remaining-repeat counter.
    pub lat: i32,
    /// Longitude in 1e-7 degree units.
    pub lng: i32,
}

/// Decoded view of a jump directive.
///
/// Translates the legacy single-field overload (`p1` = target, latitude
/// word = repeat counter) into named fields so sequencing logic never
/// manipulates a coordinate field by mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpCommand {
    /// Index of the command to redirect sequencing to.
    pub target: u8,
    /// Remaining times this jump may be taken. The jump is honored only
    /// while this is strictly positive.
    pub remaining: i32,
}

impl Location {
    /// Create a plain navigation waypoint record.
    ///
    /// # Arguments
    ///
    /// * `lat` - Latitude in degrees * 1e7
    /// * `lng` - Longitude in degrees * 1e7
    /// * `alt` - Altitude in centimeters
    pub fn waypoint(lat: i32, lng: i32, alt: i32) -> Self {
        Self {
            id: MAV_CMD_NAV_WAYPOINT,
            options: LocationOptions::empty(),
            p1: 0,
            alt,
            lat,
            lng,
        }
    }

    /// Create a jump directive record.
    pub fn jump(target: u8, repeats: i32) -> Self {
        let mut cmd = Self::default();
        cmd.encode_jump(JumpCommand {
            target,
            remaining: repeats,
        });
        cmd
    }

    /// Get latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.lat as f64 / 1e7
    }

    /// Get longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.lng as f64 / 1e7
    }

    /// Decode this record as a jump directive, if it is one.
    pub fn as_jump(&self) -> Option<JumpCommand> {
        if self.id == MAV_CMD_DO_JUMP {
            Some(JumpCommand {
                target: self.p1,
                remaining: self.lat,
            })
        } else {
            None
        }
    }

    /// Encode a jump directive into the legacy field overload.
    pub fn encode_jump(&mut self, jump: JumpCommand) {
        self.id = MAV_CMD_DO_JUMP;
        self.p1 = jump.target;
        self.lat = jump.remaining;
    }

    /// True for the zero-filled record returned for out-of-range reads.
    pub fn is_blank(&self) -> bool {
        self.id == CMD_BLANK && self.lat == 0 && self.lng == 0 && self.alt == 0
    }
}
