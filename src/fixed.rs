//! Little-endian fixed-width field access and the Bitcoin "compact size" length
//! prefix used by legacy consensus transactions. This is a different encoding from
//! the CMF varint in [`crate::varint`]: fixed escape bytes rather than a
//! self-terminating bit pattern.

use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::CmfError;

/// Reads a little-endian `u16` from `data[*pos..]`, advancing `*pos` by 2.
pub fn read_u16(data: &[u8], pos: &mut usize) -> Result<u16, CmfError> {
    let end = pos.checked_add(2).ok_or(CmfError::TruncatedInput)?;
    let slice = data.get(*pos..end).ok_or(CmfError::TruncatedInput)?;
    let v = LittleEndian::read_u16(slice);
    *pos = end;
    Ok(v)
}

/// Reads a little-endian `u32` from `data[*pos..]`, advancing `*pos` by 4.
pub fn read_u32(data: &[u8], pos: &mut usize) -> Result<u32, CmfError> {
    let end = pos.checked_add(4).ok_or(CmfError::TruncatedInput)?;
    let slice = data.get(*pos..end).ok_or(CmfError::TruncatedInput)?;
    let v = LittleEndian::read_u32(slice);
    *pos = end;
    Ok(v)
}

/// Reads a little-endian `u64` from `data[*pos..]`, advancing `*pos` by 8.
pub fn read_u64(data: &[u8], pos: &mut usize) -> Result<u64, CmfError> {
    let end = pos.checked_add(8).ok_or(CmfError::TruncatedInput)?;
    let slice = data.get(*pos..end).ok_or(CmfError::TruncatedInput)?;
    let v = LittleEndian::read_u64(slice);
    *pos = end;
    Ok(v)
}

/// Appends a little-endian `u32` to `out`.
pub fn write_u32(out: &mut Vec<u8>, value: u32) {
    let mut b = [0u8; 4];
    LittleEndian::write_u32(&mut b, value);
    out.extend_from_slice(&b);
}

/// Appends a little-endian `u64` to `out`.
pub fn write_u64(out: &mut Vec<u8>, value: u64) {
    let mut b = [0u8; 8];
    LittleEndian::write_u64(&mut b, value);
    out.extend_from_slice(&b);
}

/// Encodes `n` as a Bitcoin "compact size" length prefix and appends it to `buf`.
/// 0-252: 1 byte; 253-0xFFFF: 0xFD + 2B LE; 0x10000-0xFFFFFFFF: 0xFE + 4B LE; else
/// 0xFF + 8B LE.
pub fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    if n < 253 {
        buf.push(n as u8);
    } else if n < 0x1_0000 {
        buf.push(0xfd);
        let mut b = [0u8; 2];
        LittleEndian::write_u16(&mut b, n as u16);
        buf.extend_from_slice(&b);
    } else if n < 0x1_0000_0000 {
        buf.push(0xfe);
        let mut b = [0u8; 4];
        LittleEndian::write_u32(&mut b, n as u32);
        buf.extend_from_slice(&b);
    } else {
        buf.push(0xff);
        let mut b = [0u8; 8];
        LittleEndian::write_u64(&mut b, n);
        buf.extend_from_slice(&b);
    }
}

/// Decodes a Bitcoin "compact size" length prefix from `data[*pos..]`, advancing
/// `*pos` past the bytes consumed.
pub fn read_compact_size(data: &[u8], pos: &mut usize) -> Result<u64, CmfError> {
    let lead = *data.get(*pos).ok_or(CmfError::TruncatedInput)?;
    if lead < 253 {
        *pos += 1;
        return Ok(lead as u64);
    }
    let mut cursor = *pos + 1;
    let value = match lead {
        0xfd => read_u16(data, &mut cursor)? as u64,
        0xfe => read_u32(data, &mut cursor)? as u64,
        _ => read_u64(data, &mut cursor)?,
    };
    *pos = cursor;
    Ok(value)
}
