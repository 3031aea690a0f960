//! Mission Sequencer
//!
//! Stateful index manager that walks the persisted command list and exposes
//! a stable three-waypoint window (previous / current / after) to the rest
//! of the flight stack. The vehicle is normally located between the previous
//! and current entries.
//!
//! The sequencer does not know about telemetry, actuators, or GPS. It reads
//! and writes command records through the [`Storage`] trait and keeps restart
//! continuity through the two scalars behind [`MissionParams`].
//!
//! Reaching home (index 0) is the designed terminal condition of a mission,
//! signaled by `advance`/`sync` returning `false`, never by an error.

use crate::traits::{MissionParams, Storage};

use super::command::{is_condition_command, is_nav_command, MAV_CMD_CONDITION_CHANGE_ALT};
use super::{codec, Location, LocationOptions};

/// Direction for navigation-command scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchDirection {
    /// Scan toward higher indices.
    Forward,
    /// Scan toward lower indices.
    Reverse,
}

/// Mission sequencer — owns the sliding waypoint window and leg cursor.
///
/// Window slot 0 holds the previous waypoint, slot 1 the current target the
/// vehicle is navigating toward, slot 2 the waypoint after that. A separate
/// leg cursor tracks progress through the conditional and do commands that
/// belong to the current leg.
pub struct MissionSequencer {
    /// Cached records mirroring `index`.
    window: [Location; 3],
    /// Indices of the previous / current / after navigation commands.
    index: [u8; 3],
    /// Leg cursor for non-navigation commands of the current leg.
    cmd_index: u8,
    /// Total number of commands in the mission.
    total: u8,
    /// Home reference, mirrored at store index 0.
    home: Location,
}

impl MissionSequencer {
    /// Create a sequencer with a zeroed window (const fn for static
    /// initialization).
    pub const fn new() -> Self {
        let blank = Location {
            id: 0,
            options: LocationOptions::empty(),
            p1: 0,
            alt: 0,
            lat: 0,
            lng: 0,
        };
        Self {
            window: [blank; 3],
            index: [0; 3],
            cmd_index: 0,
            total: 0,
            home: blank,
        }
    }

    /// Initialize the window from persisted state. Do this first.
    ///
    /// Loads the command total and the saved current index, resolves the
    /// saved index to the nearest valid navigation command scanning forward
    /// (an invalid or stale saved index degrades to home), and commits it.
    pub fn init<S: Storage, P: MissionParams>(&mut self, store: &mut S, params: &mut P) {
        self.total = params.command_total();
        let saved = params.command_index();

        let start = self.find_nav_index(store, saved, SearchDirection::Forward);
        let _ = self.set_current(store, params, start);
    }

    /// Slide the window forward one navigation command.
    ///
    /// The current target becomes the previous waypoint and the after slot
    /// is committed as the new target. Returns `false` when the mission is
    /// complete (the window has come back around to home) or the after slot
    /// does not hold a valid record.
    pub fn advance<S: Storage, P: MissionParams>(&mut self, store: &mut S, params: &mut P) -> bool {
        self.index[0] = self.index[1];
        self.sync(store, params, self.index[2])
    }

    /// Force the current target to `new_index`.
    ///
    /// Returns `false` without changing state if `new_index` is already the
    /// current target, or if the record there is not a valid navigation
    /// command.
    pub fn set_current<S: Storage, P: MissionParams>(
        &mut self,
        store: &mut S,
        params: &mut P,
        new_index: u8,
    ) -> bool {
        if new_index == self.index[1] {
            return false;
        }

        let cmd = self.read_cmd(store, new_index);
        if Self::check_nav_valid(&cmd) {
            return self.sync(store, params, new_index);
        }
        false
    }

    /// Fetch the next non-navigation command belonging to the current leg.
    ///
    /// Advances the leg cursor on every call and returns `None` once the
    /// cursor reaches a navigation record (no more commands for this leg).
    ///
    /// A jump directive is consumed here: while its repeat counter is
    /// positive and its target commits, one repeat is deducted and the
    /// updated record is persisted at the index it was fetched from before
    /// being returned. Consumption is one-shot per visit, which bounds how
    /// many times a jump site may redirect execution.
    pub fn next_leg_command<S: Storage, P: MissionParams>(
        &mut self,
        store: &mut S,
        params: &mut P,
    ) -> Option<Location> {
        let fetch_index = self.cmd_index;
        let mut cmd = self.read_cmd(store, fetch_index);

        if is_nav_command(cmd.id) {
            return None;
        }

        if let Some(mut jump) = cmd.as_jump() {
            // Retargeting resets the leg cursor; the counter write-back
            // still belongs to the index the jump was fetched from.
            if jump.remaining > 0 && self.set_current(store, params, jump.target) {
                jump.remaining -= 1;
                cmd.encode_jump(jump);
                self.write_cmd(store, &cmd, fetch_index);
            }
        }

        self.cmd_index = self.cmd_index.wrapping_add(1);
        Some(cmd)
    }

    /// Total number of commands in the mission.
    pub fn command_total(&self) -> u8 {
        self.total
    }

    /// Set and persist the command total (used on mission upload).
    pub fn set_command_total<P: MissionParams>(&mut self, params: &mut P, total: u8) {
        self.total = total;
        params.save_command_total(total);
    }

    /// Store `home` as the reference location and write it at index 0.
    pub fn set_home<S: Storage>(&mut self, store: &mut S, home: &Location) {
        self.home = *home;
        self.write_cmd(store, home, 0);
    }

    /// Home reference location.
    pub fn home(&self) -> &Location {
        &self.home
    }

    /// Previous waypoint (window slot 0).
    pub fn previous(&self) -> &Location {
        &self.window[0]
    }

    /// Current target waypoint (window slot 1).
    pub fn current(&self) -> &Location {
        &self.window[1]
    }

    /// Waypoint after the current target (window slot 2).
    pub fn after(&self) -> &Location {
        &self.window[2]
    }

    /// Raw indices of the previous / current / after waypoints.
    pub fn indices(&self) -> [u8; 3] {
        self.index
    }

    /// Read the record at `index` with read-time altitude normalization.
    ///
    /// A non-blank navigation command (or altitude-change conditional)
    /// flagged relative gets the home altitude added, so callers always see
    /// absolute altitudes. The store itself keeps the raw relative value.
    pub fn read_cmd<S: Storage>(&self, store: &S, index: u8) -> Location {
        let mut cmd = self.read_cmd_raw(store, index);

        if (is_nav_command(cmd.id) || cmd.id == MAV_CMD_CONDITION_CHANGE_ALT)
            && cmd.options.contains(LocationOptions::RELATIVE_ALT)
            && (cmd.lat != 0 || cmd.lng != 0 || cmd.alt != 0)
        {
            cmd.alt += self.home.alt;
        }

        cmd
    }

    /// Read the raw record at `index` without altitude normalization.
    pub fn read_cmd_raw<S: Storage>(&self, store: &S, index: u8) -> Location {
        codec::read_raw(store, index, self.total)
    }

    /// Write a record at `index` (used for bulk mission upload and by the
    /// sequencer itself when a jump counter is deducted).
    pub fn write_cmd<S: Storage>(&self, store: &mut S, cmd: &Location, index: u8) {
        codec::write(store, cmd, index, self.total);
    }

    // ========================================================================
    // Internal methods
    // ========================================================================

    /// Core transition: commit `new_index` as the current target and rebase
    /// the after slot.
    ///
    /// - Home (`new_index == 0`): the previous slot is rebased to the last
    ///   navigation command in the mission and both current and after point
    ///   at home. Returns `false` — there is no target beyond home.
    /// - Final waypoint (`new_index == total`): after wraps to home.
    /// - Otherwise after is the next valid navigation command past
    ///   `new_index`.
    ///
    /// On success the current index is persisted, the leg cursor resets to
    /// the command after the previous waypoint, and the cached window is
    /// refreshed from the store.
    fn sync<S: Storage, P: MissionParams>(
        &mut self,
        store: &mut S,
        params: &mut P,
        new_index: u8,
    ) -> bool {
        let cmd = self.read_cmd(store, new_index);
        if new_index > self.total || !Self::check_nav_valid(&cmd) {
            return false;
        }

        if new_index == 0 {
            self.index[0] = self.find_nav_index(store, self.total, SearchDirection::Reverse);
            self.index[1] = 0;
            self.index[2] = 0;
            return false;
        } else if new_index == self.total {
            self.index[1] = self.total;
            self.index[2] = 0;
        } else {
            self.index[1] = new_index;
            self.index[2] = self.find_nav_index(store, new_index + 1, SearchDirection::Forward);
        }

        params.save_command_index(self.index[1]);
        // index[0] may be 255 after a full-length mission completes; the
        // leg cursor wraps like the record index space does.
        self.cmd_index = self.index[0].wrapping_add(1);
        self.refresh_window(store);
        true
    }

    fn refresh_window<S: Storage>(&mut self, store: &S) {
        for slot in 0..3 {
            self.window[slot] = self.read_cmd(store, self.index[slot]);
        }
    }

    /// Scan from `start` for the nearest valid navigation command.
    ///
    /// Side effect: a jump directive encountered with no conditional command
    /// seen earlier in this scan, a positive repeat counter, and a valid
    /// target consumes one repeat — the decremented record is written back
    /// to the store — and the scan returns the jump's target immediately
    /// (single-level redirect, chains are not followed). Falls back to home
    /// (index 0) when the scan exhausts the range.
    fn find_nav_index<S: Storage>(
        &mut self,
        store: &mut S,
        start: u8,
        direction: SearchDirection,
    ) -> u8 {
        let mut search = start as i16;
        let mut condition_seen = false;

        while search >= 0 && search <= self.total as i16 {
            let cmd = self.read_cmd(store, search as u8);

            // A jump must not fire before a pending conditional executes.
            if is_condition_command(cmd.id) {
                condition_seen = true;
            }

            if let Some(mut jump) = cmd.as_jump() {
                if !condition_seen && jump.target <= self.total && jump.remaining > 0 {
                    let dest = self.read_cmd(store, jump.target);
                    if Self::check_nav_valid(&dest) {
                        jump.remaining -= 1;
                        let mut updated = cmd;
                        updated.encode_jump(jump);
                        self.write_cmd(store, &updated, search as u8);
                        return jump.target;
                    }
                }
            }

            if Self::check_nav_valid(&cmd) {
                return search as u8;
            }

            match direction {
                SearchDirection::Forward => search += 1,
                SearchDirection::Reverse => search -= 1,
            }
        }

        0
    }

    /// A record is a valid navigation target iff its id is in the
    /// navigation range and both coordinates are on the earth.
    fn check_nav_valid(cmd: &Location) -> bool {
        if !is_nav_command(cmd.id) {
            return false;
        }
        (-900_000_000..=900_000_000).contains(&cmd.lat)
            && (-1_800_000_000..=1_800_000_000).contains(&cmd.lng)
    }
}

impl Default for MissionSequencer {
    fn default() -> Self {
        Self::new()
    }
}
