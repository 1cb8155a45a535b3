//! Helpers for explicit record-framing byte-order conversions.
//!
//! Every record stored in a peer's ring buffers carries a fixed
//! little-endian `u32` length prefix. These helpers keep Clippy
//! expectations scoped to the conversion points so the framing code can
//! remain explicit about record endianness without repeating lint
//! annotations.

/// Number of bytes occupied by a record's length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Serialise a record length as a little-endian prefix.
///
/// # Examples
///
/// ```
/// use sockwire::byte_order::write_length_prefix;
///
/// assert_eq!(write_length_prefix(0x1234_5678), [0x78, 0x56, 0x34, 0x12]);
/// ```
#[must_use]
pub fn write_length_prefix(value: u32) -> [u8; LENGTH_PREFIX_LEN] {
    #[expect(
        clippy::little_endian_bytes,
        reason = "Record framing is fixed little-endian."
    )]
    value.to_le_bytes()
}

/// Parse a record length from its stored little-endian prefix.
///
/// # Examples
///
/// ```
/// use sockwire::byte_order::read_length_prefix;
///
/// assert_eq!(read_length_prefix([0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
/// ```
#[must_use]
pub fn read_length_prefix(bytes: [u8; LENGTH_PREFIX_LEN]) -> u32 {
    #[expect(
        clippy::little_endian_bytes,
        reason = "Record framing is fixed little-endian."
    )]
    u32::from_le_bytes(bytes)
}
