//! Mission Record Storage Codec
//!
//! Translates between [`Location`] records and the fixed 15-byte layout in
//! persistent storage:
//!
//! | offset | size | field            |
//! |--------|------|------------------|
//! | 0      | 1    | id               |
//! | 1      | 1    | options          |
//! | 2      | 1    | p1               |
//! | 3      | 4    | altitude (cm)    |
//! | 7      | 4    | latitude (1e-7°) |
//! | 11     | 4    | longitude (1e-7°)|
//!
//! Records live at `WP_START_BYTE + index * WP_SIZE`. Relative-altitude
//! normalization (adding the home altitude on read) is the sequencer's job;
//! this module only moves raw fields.

use crate::traits::Storage;

use super::{Location, LocationOptions};

/// Size of one stored command record in bytes.
pub const WP_SIZE: u16 = 15;

/// Storage offset of record index 0 (the home location).
pub const WP_START_BYTE: u16 = 0x500;

fn record_offset(index: u8) -> u16 {
    WP_START_BYTE + index as u16 * WP_SIZE
}

/// Read the raw record at `index`.
///
/// An index beyond `total` never touches the store; it yields a zero-filled
/// record tagged blank so scanning logic can treat it as "no command here".
pub fn read_raw<S: Storage>(store: &S, index: u8, total: u8) -> Location {
    if index > total {
        return Location::default();
    }

    let mut mem = record_offset(index);

    let id = store.read_byte(mem);
    mem += 1;
    let options = LocationOptions::from_bits_truncate(store.read_byte(mem));
    mem += 1;
    let p1 = store.read_byte(mem);
    mem += 1;
    let alt = store.read_dword(mem) as i32;
    mem += 4;
    let lat = store.read_dword(mem) as i32;
    mem += 4;
    let lng = store.read_dword(mem) as i32;

    Location {
        id,
        options,
        p1,
        alt,
        lat,
        lng,
    }
}

/// Write `cmd` at `index`, clamped into `[0, total]`.
///
/// The options byte is rewritten on the way out: only the relative-altitude
/// bit survives, and never at index 0 because the home altitude is the
/// reference everything else is relative to.
pub fn write<S: Storage>(store: &mut S, cmd: &Location, index: u8, total: u8) {
    let index = index.min(total);

    let options = if cmd.options.contains(LocationOptions::RELATIVE_ALT) && index != 0 {
        LocationOptions::RELATIVE_ALT
    } else {
        LocationOptions::empty()
    };

    let mut mem = record_offset(index);

    store.write_byte(mem, cmd.id);
    mem += 1;
    store.write_byte(mem, options.bits());
    mem += 1;
    store.write_byte(mem, cmd.p1);
    mem += 1;
    store.write_dword(mem, cmd.alt as u32);
    mem += 4;
    store.write_dword(mem, cmd.lat as u32);
    mem += 4;
    store.write_dword(mem, cmd.lng as u32);
}
