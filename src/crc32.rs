//! The CRC-32 used by PNG chunks (IEEE 802.3 / zlib polynomial).

/// 256-entry lookup table for the reflected polynomial `0xEDB88320`.
///
/// Built at compile time, so the engine has no runtime state at all.
const CRC_TABLE: [u32; 256] = {
  let mut table = [0_u32; 256];
  let mut n = 0;
  while n < 256 {
    let mut c: u32 = n as _;
    let mut k = 0;
    while k < 8 {
      if (c & 1) != 0 {
        c = 0xEDB8_8320 ^ (c >> 1);
      } else {
        c = c >> 1;
      }
      //
      k += 1;
    }
    table[n] = c;
    //
    n += 1;
  }
  table
};

/// Computes the PNG CRC-32 of the bytes produced by the iterator.
///
/// This is the value stored in the trailing 4 bytes of every chunk, taken
/// over the chunk type and chunk data (not the length prefix).
#[inline]
#[must_use]
pub fn crc32(iter: impl Iterator<Item = u8>) -> u32 {
  let mut c = u32::MAX;
  for byte in iter {
    c = CRC_TABLE[((c ^ u32::from(byte)) & 0xFF) as usize] ^ (c >> 8);
  }
  c ^ u32::MAX
}
