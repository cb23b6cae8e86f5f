//! Byte order conversion
//!
//! The wire is big-endian throughout. These helpers convert between host
//! integers and their wire representation, independent of the host's native
//! byte order.

/// Encode an `i16` in wire order
pub fn i16_to_wire(value: i16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Encode an `i32` in wire order
pub fn i32_to_wire(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Encode an `i64` in wire order
pub fn i64_to_wire(value: i64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Decode an `i16` from wire order
pub fn i16_from_wire(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Decode an `i32` from wire order
pub fn i32_from_wire(bytes: [u8; 4]) -> i32 {
    i32::from_be_bytes(bytes)
}

/// Decode an `i64` from wire order
pub fn i64_from_wire(bytes: [u8; 8]) -> i64 {
    i64::from_be_bytes(bytes)
}

/// Decode a `u32` from wire order
pub fn u32_from_wire(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Read a wire-order `i16` at `pos`, or `None` if the slice is too short
pub fn read_i16(bytes: &[u8], pos: usize) -> Option<i16> {
    let end = pos.checked_add(2)?;
    let raw: [u8; 2] = bytes.get(pos..end)?.try_into().ok()?;
    Some(i16_from_wire(raw))
}

/// Read a wire-order `i32` at `pos`, or `None` if the slice is too short
pub fn read_i32(bytes: &[u8], pos: usize) -> Option<i32> {
    let end = pos.checked_add(4)?;
    let raw: [u8; 4] = bytes.get(pos..end)?.try_into().ok()?;
    Some(i32_from_wire(raw))
}

/// Read a wire-order `u32` at `pos`, or `None` if the slice is too short
pub fn read_u32(bytes: &[u8], pos: usize) -> Option<u32> {
    let end = pos.checked_add(4)?;
    let raw: [u8; 4] = bytes.get(pos..end)?.try_into().ok()?;
    Some(u32_from_wire(raw))
}
