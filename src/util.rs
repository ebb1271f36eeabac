//! Byte-buffer helpers shared by the parsing and reassembly code.
//!
//! These pin down one canonical boundary semantics: asking for more bytes
//! than a slice holds takes the whole slice, and reading a fixed-width
//! integer off a short slice is an error rather than a panic.

use crate::PngError;

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

/// Splits `bytes` at `n`, or at the end of the slice if `n` is out of range.
///
/// The head is *at most* `n` bytes, callers that require exactly `n` must
/// check for themselves.
#[inline]
#[must_use]
pub fn take_bytes(bytes: &[u8], n: usize) -> (&[u8], &[u8]) {
  if bytes.len() >= n {
    bytes.split_at(n)
  } else {
    (bytes, &[])
  }
}

/// Splits off a `[u8; N]` from the front of the slice.
#[inline]
pub(crate) fn try_pull_byte_array<const N: usize>(
  bytes: &[u8],
) -> Result<([u8; N], &[u8]), PngError> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let a: [u8; N] = head.try_into().unwrap();
    Ok((a, tail))
  } else {
    Err(PngError::UnexpectedEnd)
  }
}

/// Reads a big-endian `u32` from the front of the slice.
///
/// Fails when fewer than 4 bytes are available.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> Result<u32, PngError> {
  let (a, _) = try_pull_byte_array::<4>(bytes)?;
  Ok(u32::from_be_bytes(a))
}

/// Concatenates the buffers into one, preserving order.
#[cfg(feature = "alloc")]
#[must_use]
pub fn concat_bytes(buffers: &[&[u8]]) -> Vec<u8> {
  let total: usize = buffers.iter().map(|b| b.len()).sum();
  let mut out = Vec::with_capacity(total);
  for b in buffers {
    out.extend_from_slice(b);
  }
  out
}

/// Appends `byte` to `s` as two lowercase hex digits.
#[cfg(feature = "alloc")]
pub(crate) fn push_hex_byte(s: &mut String, byte: u8) {
  const DIGITS: &[u8; 16] = b"0123456789abcdef";
  s.push(DIGITS[usize::from(byte >> 4)] as char);
  s.push(DIGITS[usize::from(byte & 0xF)] as char);
}

/// Appends `bytes` to `s` as space-separated hex pairs.
#[cfg(feature = "alloc")]
pub(crate) fn push_hex_slice(s: &mut String, bytes: &[u8]) {
  for (i, byte) in bytes.iter().copied().enumerate() {
    if i != 0 {
      s.push(' ');
    }
    push_hex_byte(s, byte);
  }
}
