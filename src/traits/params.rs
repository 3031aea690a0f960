//! Persisted mission scalars.
//!
//! Two small integers survive restart: the index of the command the vehicle
//! was flying toward, and the total number of commands in the mission. The
//! sequencer reads them once at startup and saves them on every successful
//! index change, which is what makes in-air restart work.

/// Get / set-and-save access to the two persisted mission scalars.
///
/// `save_*` must make the value durable before returning (for a real
/// parameter store this means scheduling or performing the flash write).
pub trait MissionParams {
    /// Saved index of the current target command.
    fn command_index(&self) -> u8;

    /// Saved total number of commands in the mission.
    fn command_total(&self) -> u8;

    /// Persists a new current command index.
    fn save_command_index(&mut self, index: u8);

    /// Persists a new command total.
    fn save_command_total(&mut self, total: u8);
}

// ============================================================================
// RAM Implementation (always available for testing and SITL)
// ============================================================================

/// Volatile parameter pair for host tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RamParams {
    /// Saved current command index.
    pub command_index: u8,
    /// Saved command total.
    pub command_total: u8,
}

impl RamParams {
    /// Creates a zeroed parameter pair.
    pub const fn new() -> Self {
        Self {
            command_index: 0,
            command_total: 0,
        }
    }

    /// Creates a parameter pair with the given saved values.
    pub const fn with_saved(command_index: u8, command_total: u8) -> Self {
        Self {
            command_index,
            command_total,
        }
    }
}

impl MissionParams for RamParams {
    fn command_index(&self) -> u8 {
        self.command_index
    }

    fn command_total(&self) -> u8 {
        self.command_total
    }

    fn save_command_index(&mut self, index: u8) {
        self.command_index = index;
    }

    fn save_command_total(&mut self, total: u8) {
        self.command_total = total;
    }
}
