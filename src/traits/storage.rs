//! Persistent byte storage abstraction.
//!
//! The mission command list lives in a small byte-addressable persistent
//! store (EEPROM or emulated flash). The core only needs byte and 32-bit
//! word access at fixed offsets; allocation and wear management belong to
//! the platform layer.

/// Byte-addressable persistent store.
///
/// Multi-byte values must round-trip: `read_dword` after `write_dword` at
/// the same offset returns the written value. The byte order used inside
/// the store is the implementation's choice as long as it is consistent.
///
/// Writes within a single mission record (15 bytes) are assumed not to be
/// torn; no multi-record atomicity is assumed anywhere in this crate.
pub trait Storage {
    /// Reads one byte at `offset`.
    fn read_byte(&self, offset: u16) -> u8;

    /// Writes one byte at `offset`.
    fn write_byte(&mut self, offset: u16, value: u8);

    /// Reads a 32-bit word starting at `offset`.
    fn read_dword(&self, offset: u16) -> u32;

    /// Writes a 32-bit word starting at `offset`.
    fn write_dword(&mut self, offset: u16, value: u32);
}

// ============================================================================
// RAM Implementation (always available for testing and SITL)
// ============================================================================

/// In-memory store backed by a fixed byte array.
///
/// Words are stored little-endian. Reads beyond `N` return zero and writes
/// beyond `N` are dropped, mirroring how a real store clamps its address
/// space rather than faulting.
pub struct RamStorage<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> RamStorage<N> {
    /// Creates a zero-filled store.
    pub const fn new() -> Self {
        Self { bytes: [0; N] }
    }

    /// Raw view of the backing bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Storage for RamStorage<N> {
    fn read_byte(&self, offset: u16) -> u8 {
        self.bytes.get(offset as usize).copied().unwrap_or(0)
    }

    fn write_byte(&mut self, offset: u16, value: u8) {
        if let Some(b) = self.bytes.get_mut(offset as usize) {
            *b = value;
        }
    }

    fn read_dword(&self, offset: u16) -> u32 {
        let start = offset as usize;
        match self.bytes.get(start..start + 4) {
            Some(raw) => u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
            None => 0,
        }
    }

    fn write_dword(&mut self, offset: u16, value: u32) {
        let start = offset as usize;
        if let Some(raw) = self.bytes.get_mut(start..start + 4) {
            raw.copy_from_slice(&value.to_le_bytes());
        }
    }
}
