use core::fmt::{Display, Formatter};

/// An error from the `pngband` crate.
///
/// Everything in here is fatal to the operation that returned it. Anomalies
/// that the PNG spec allows a decoder to shrug off are *not* errors, they are
/// [`Finding`](crate::Finding)s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngError {
  /// The input ended before a complete signature or chunk could be read.
  UnexpectedEnd,

  /// No `IHDR` chunk was found ahead of the image data.
  IhdrMissing,

  /// An `IHDR` chunk's data wasn't exactly 13 bytes.
  IhdrWrongLength,

  /// Bit depth outside of `{1, 2, 4, 8, 16}`.
  IllegalBitDepth,

  /// Color type outside of `{0, 2, 3, 4, 6}`.
  IllegalColorType,

  /// Compression method other than 0.
  IllegalCompressionMethod,

  /// Filter method other than 0.
  IllegalFilterMethod,

  /// Interlace method other than 0 or 1.
  IllegalInterlaceMethod,

  /// The file has no `IDAT` chunk, so there's nothing to split.
  IdatMissing,

  /// The zlib stream in the `IDAT` payload would not decompress.
  DecompressFailed,

  /// Recompressing a band's scanlines failed.
  CompressFailed,

  /// Strict mode was on and a diagnostic finding was raised.
  ///
  /// The same condition is a non-fatal [`Finding`](crate::Finding) when
  /// strict mode is off.
  StrictFinding,
}
impl Display for PngError {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    let msg = match self {
      PngError::UnexpectedEnd => "unexpected end of input",
      PngError::IhdrMissing => "no IHDR chunk before the image data",
      PngError::IhdrWrongLength => "IHDR data length is not 13",
      PngError::IllegalBitDepth => "bit depth not in {1, 2, 4, 8, 16}",
      PngError::IllegalColorType => "color type not in {0, 2, 3, 4, 6}",
      PngError::IllegalCompressionMethod => "compression method is not 0",
      PngError::IllegalFilterMethod => "filter method is not 0",
      PngError::IllegalInterlaceMethod => "interlace method not in {0, 1}",
      PngError::IdatMissing => "no IDAT chunk present",
      PngError::DecompressFailed => "IDAT payload failed to decompress",
      PngError::CompressFailed => "band recompression failed",
      PngError::StrictFinding => "validation finding raised in strict mode",
    };
    f.write_str(msg)
  }
}
