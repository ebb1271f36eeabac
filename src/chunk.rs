//! PNG chunk framing: `[u32 length][4-byte type][data][u32 crc]`.

use core::fmt::{Debug, Write};

use crate::{crc32, util::try_pull_byte_array, PngError};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not*
///   PNG data.
#[inline]
#[must_use]
pub const fn is_png_signature(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Splits off the 8 signature bytes, leaving the chunk stream.
///
/// The signature bytes are *not* checked, matching how lenient decoders
/// treat them. Fails only when fewer than 8 bytes are present.
#[inline]
pub fn strip_signature(bytes: &[u8]) -> Result<&[u8], PngError> {
  match bytes {
    [_, _, _, _, _, _, _, _, rest @ ..] => Ok(rest),
    _ => Err(PngError::UnexpectedEnd),
  }
}

/// The 4-byte type tag of a PNG chunk.
///
/// Conventionally four ASCII letters. The case of each letter carries
/// ancillary/private/copy-safe bits, but this crate only ever compares tags
/// for exact equality against the known constants.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkTy {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
}
impl Debug for PngChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}

/// An unparsed chunk from a PNG, viewed in place.
///
/// Keeps the complete raw byte range (length prefix through CRC) so that
/// chunks can be copied into an output file byte-for-byte, along with the
/// derived fields. Invariant: `bytes().len() == 8 + data().len() + 4`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PngChunk<'b> {
  bytes: &'b [u8],
  ty: PngChunkTy,
  data: &'b [u8],
  declared_crc: u32,
}
impl Debug for PngChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> PngChunk<'b> {
  /// Reads one chunk off the front of a post-signature byte stream.
  ///
  /// Returns the chunk and the remaining bytes. Truncated input is a fatal
  /// parse error, there is no partial chunk.
  pub fn extract(bytes: &'b [u8]) -> Result<(Self, &'b [u8]), PngError> {
    let (len_bytes, _) = try_pull_byte_array::<4>(bytes)?;
    let size = u32::from_be_bytes(len_bytes) as usize;
    let total = size.checked_add(12).ok_or(PngError::UnexpectedEnd)?;
    if bytes.len() < total {
      return Err(PngError::UnexpectedEnd);
    }
    let (chunk_bytes, rest) = bytes.split_at(total);
    let ty = PngChunkTy(chunk_bytes[4..8].try_into().unwrap());
    let data = &chunk_bytes[8..8 + size];
    let declared_crc = u32::from_be_bytes(chunk_bytes[total - 4..].try_into().unwrap());
    Ok((Self { bytes: chunk_bytes, ty, data, declared_crc }, rest))
  }

  /// The complete raw chunk byte range, length prefix through CRC.
  #[inline]
  #[must_use]
  pub const fn bytes(&self) -> &'b [u8] {
    self.bytes
  }
  /// The declared data length, which always equals `data().len()`.
  #[inline]
  #[must_use]
  pub const fn size(&self) -> usize {
    self.data.len()
  }
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> PngChunkTy {
    self.ty
  }
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  /// The CRC stored in the chunk's trailing 4 bytes.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  /// Recomputes the CRC over the chunk's type and data.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    crc32(self.ty.0.iter().copied().chain(self.data.iter().copied()))
  }
  /// Does the stored CRC match a fresh computation?
  #[inline]
  #[must_use]
  pub fn crc_matches(&self) -> bool {
    self.declared_crc == self.actual_crc()
  }
}

/// An iterator that produces successive chunks from PNG bytes.
///
/// Truncated trailing input yields one `Err` item and then the iterator is
/// done, so callers can distinguish "stream ended cleanly" from "stream was
/// cut off".
#[derive(Debug, Clone)]
pub struct PngChunkIter<'b> {
  spare: &'b [u8],
}
impl<'b> PngChunkIter<'b> {
  /// Pass the full PNG bytes, it will remove the signature automatically.
  ///
  /// Inputs shorter than the 8 signature bytes produce an empty iterator.
  #[inline]
  #[must_use]
  pub const fn new(png: &'b [u8]) -> Self {
    match png {
      [_, _, _, _, _, _, _, _, spare @ ..] => Self { spare },
      _ => Self { spare: &[] },
    }
  }
}
impl<'b> From<&'b [u8]> for PngChunkIter<'b> {
  /// Iterates a byte stream that has already had its signature removed.
  #[inline]
  #[must_use]
  fn from(spare: &'b [u8]) -> Self {
    Self { spare }
  }
}
impl<'b> Iterator for PngChunkIter<'b> {
  type Item = Result<PngChunk<'b>, PngError>;

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.spare.is_empty() {
      return None;
    }
    match PngChunk::extract(self.spare) {
      Ok((chunk, rest)) => {
        self.spare = rest;
        Some(Ok(chunk))
      }
      Err(e) => {
        self.spare = &[];
        Some(Err(e))
      }
    }
  }
}

/// Parses an entire post-signature byte stream into its ordered chunk list.
///
/// File order is list order. Fails on the first truncated chunk.
#[cfg(feature = "alloc")]
pub fn extract_chunks(bytes: &[u8]) -> Result<Vec<PngChunk<'_>>, PngError> {
  PngChunkIter::from(bytes).collect()
}

/// Encodes a chunk from a type tag and a data payload.
///
/// The output is indistinguishable in format from a chunk parsed off disk:
/// length prefix, type, data, and a freshly computed CRC over type + data.
#[cfg(feature = "alloc")]
#[must_use]
pub fn build_chunk(ty: PngChunkTy, data: &[u8]) -> Vec<u8> {
  let mut out = Vec::with_capacity(12 + data.len());
  out.extend_from_slice(&(data.len() as u32).to_be_bytes());
  out.extend_from_slice(&ty.0);
  out.extend_from_slice(data);
  let crc = crc32(ty.0.iter().copied().chain(data.iter().copied()));
  out.extend_from_slice(&crc.to_be_bytes());
  out
}
