//! The `IHDR` chunk: image geometry and pixel format.

use crate::{PngChunk, PngChunkTy, PngError};

#[cfg(feature = "alloc")]
use crate::build_chunk;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The number of channels in this type of color.
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      _ => return Err(PngError::IllegalColorType),
    })
  }
}

/// Image Header
///
/// Decoding the 13-byte payload and encoding a header back are exact
/// inverses: `IHDR::from_data(h.to_data()?)` gives back `h` for any header
/// whose fields are in their legal ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel, one of {1, 2, 4, 8, 16}
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// if the image data is stored interlaced (Adam7).
  pub is_interlaced: bool,
}
impl IHDR {
  /// Parses the 13-byte `IHDR` chunk payload.
  ///
  /// Fails on a wrong payload length, and on any field outside its
  /// enumerated domain (the compression and filter method bytes must both
  /// be 0).
  pub fn from_data(data: &[u8]) -> Result<Self, PngError> {
    match data {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] => {
        if ![1, 2, 4, 8, 16].contains(bit_depth) {
          return Err(PngError::IllegalBitDepth);
        }
        if *compression_method != 0 {
          return Err(PngError::IllegalCompressionMethod);
        }
        if *filter_method != 0 {
          return Err(PngError::IllegalFilterMethod);
        }
        Ok(Self {
          width: u32::from_be_bytes([*w0, *w1, *w2, *w3]),
          height: u32::from_be_bytes([*h0, *h1, *h2, *h3]),
          bit_depth: *bit_depth,
          color_type: PngColorType::try_from(*color_type)?,
          is_interlaced: match interlace_method {
            0 => false,
            1 => true,
            _ => return Err(PngError::IllegalInterlaceMethod),
          },
        })
      }
      _ => Err(PngError::IhdrWrongLength),
    }
  }

  /// Parses a header out of an already-extracted chunk.
  ///
  /// Fails with [`PngError::IhdrMissing`] when handed a chunk of any other
  /// type.
  pub fn from_chunk(chunk: &PngChunk<'_>) -> Result<Self, PngError> {
    if chunk.ty() != PngChunkTy::IHDR {
      return Err(PngError::IhdrMissing);
    }
    Self::from_data(chunk.data())
  }

  /// Encodes the header back into the 13-byte chunk payload.
  ///
  /// The struct fields are public, so an illegal bit depth is caught here
  /// rather than letting a non-conformant header reach an output file.
  pub fn to_data(&self) -> Result<[u8; 13], PngError> {
    if ![1, 2, 4, 8, 16].contains(&self.bit_depth) {
      return Err(PngError::IllegalBitDepth);
    }
    let [w0, w1, w2, w3] = self.width.to_be_bytes();
    let [h0, h1, h2, h3] = self.height.to_be_bytes();
    Ok([
      w0,
      w1,
      w2,
      w3,
      h0,
      h1,
      h2,
      h3,
      self.bit_depth,
      self.color_type as u8,
      0,
      0,
      u8::from(self.is_interlaced),
    ])
  }

  /// Encodes the header as a complete `IHDR` chunk, CRC included.
  #[cfg(feature = "alloc")]
  pub fn to_chunk_bytes(&self) -> Result<Vec<u8>, PngError> {
    Ok(build_chunk(PngChunkTy::IHDR, &self.to_data()?))
  }

  /// Bits per pixel before any row padding.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// Bytes in one scanline's pixel data, excluding the filter byte.
  ///
  /// Rows are padded up to a whole byte when pixels are less than 8 bits,
  /// per the PNG rule that each scanline starts on a byte boundary. The
  /// width is attacker-controlled, so the math saturates rather than
  /// overflowing on 32-bit targets.
  #[inline]
  #[must_use]
  pub const fn bytes_per_scanline(&self) -> usize {
    let bits_per_line = self.bits_per_pixel().saturating_mul(self.width as usize);
    (bits_per_line / 8) + (bits_per_line % 8 != 0) as usize
  }

  /// Bytes in one scanline including the leading filter byte.
  #[inline]
  #[must_use]
  pub const fn bytes_per_filterline(&self) -> usize {
    self.bytes_per_scanline().saturating_add(1)
  }
}
