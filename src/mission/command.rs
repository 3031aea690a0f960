//! Mission Command Classification
//!
//! Command-type tags partition into three contiguous ranges: navigation
//! commands first, then conditional commands, then everything else (do
//! commands and the jump directive). A navigation command always terminates
//! the run of non-navigation commands belonging to a leg.

/// Tag of the zero-filled record returned for out-of-range reads.
pub const CMD_BLANK: u8 = 0;

/// MAV_CMD_NAV_WAYPOINT: the ordinary flight waypoint.
pub const MAV_CMD_NAV_WAYPOINT: u8 = 16;

/// MAV_CMD_NAV_LAST: ids at or below this value are navigation commands.
pub const MAV_CMD_NAV_LAST: u8 = 95;

/// MAV_CMD_CONDITION_CHANGE_ALT: a conditional command that carries an
/// altitude, so it participates in relative-altitude normalization.
pub const MAV_CMD_CONDITION_CHANGE_ALT: u8 = 113;

/// MAV_CMD_CONDITION_LAST: ids above NAV_LAST and below this value are
/// conditional commands.
pub const MAV_CMD_CONDITION_LAST: u8 = 159;

/// MAV_CMD_DO_JUMP: redirects sequencing to another index, gated by a
/// finite repeat counter.
pub const MAV_CMD_DO_JUMP: u8 = 177;

/// Classify a command as NAV (denotes an actual flight waypoint).
pub fn is_nav_command(id: u8) -> bool {
    id <= MAV_CMD_NAV_LAST
}

/// Classify a command as conditional.
///
/// A jump directive is deferred while an unexecuted conditional command
/// precedes it in the current scan, so the scanner needs this distinction.
pub fn is_condition_command(id: u8) -> bool {
    id > MAV_CMD_NAV_LAST && id < MAV_CMD_CONDITION_LAST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_waypoint_is_nav() {
        assert!(is_nav_command(MAV_CMD_NAV_WAYPOINT));
    }

    #[test]
    fn test_blank_is_nav() {
        // The blank/home tag sits inside the nav range; scanning relies on
        // coordinate bounds, not the id alone, to reject garbage.
        assert!(is_nav_command(CMD_BLANK));
    }

    #[test]
    fn test_nav_boundary() {
        assert!(is_nav_command(MAV_CMD_NAV_LAST));
        assert!(!is_nav_command(MAV_CMD_NAV_LAST + 1));
    }

    #[test]
    fn test_condition_range() {
        assert!(is_condition_command(MAV_CMD_NAV_LAST + 1));
        assert!(is_condition_command(MAV_CMD_CONDITION_CHANGE_ALT));
        assert!(is_condition_command(MAV_CMD_CONDITION_LAST - 1));
        assert!(!is_condition_command(MAV_CMD_CONDITION_LAST));
        assert!(!is_condition_command(MAV_CMD_NAV_LAST));
    }

    #[test]
    fn test_jump_is_neither_nav_nor_condition() {
        assert!(!is_nav_command(MAV_CMD_DO_JUMP));
        assert!(!is_condition_command(MAV_CMD_DO_JUMP));
    }
}
