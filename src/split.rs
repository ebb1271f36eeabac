//! Splitting one PNG into several, each holding a horizontal band of rows.
//!
//! The pipeline is: parse the chunk stream, classify chunks into the ones
//! before the image data, the contiguous `IDAT` run itself, and the ones
//! after; inflate the concatenated `IDAT` payload; cut the result into
//! filtered scanlines using the header geometry; group the scanlines into
//! bands; then rebuild each band as a full PNG file. Every chunk other than
//! `IHDR` (which gets its height replaced) and `IDAT` (which gets a freshly
//! compressed payload) is copied into every output byte-for-byte, in its
//! original order.

use alloc::{vec, vec::Vec};
use log::warn;
use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib};

use crate::{
  build_chunk, extract_chunks, strip_signature, util::concat_bytes, PngChunk, PngChunkTy,
  PngError, IHDR, PNG_SIGNATURE,
};

/// The default cap on scanlines per output file.
pub const DEFAULT_MAX_ROWS_PER_BAND: usize = 4096;

/// Settings for [`split_png`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
  /// Each output file holds at most this many scanlines.
  ///
  /// A value of 0 means "no cap": the whole image comes back as a single
  /// band.
  pub max_rows_per_band: usize,
  /// When set, any [`Finding`] aborts the split with
  /// [`PngError::StrictFinding`] instead of being collected and logged.
  pub strict: bool,
}
impl Default for SplitOptions {
  #[inline]
  fn default() -> Self {
    Self { max_rows_per_band: DEFAULT_MAX_ROWS_PER_BAND, strict: false }
  }
}

/// A non-fatal anomaly noticed while splitting.
///
/// These are the conditions the PNG spec lets a decoder ignore. They never
/// stop a permissive split, but callers get them back in the
/// [`ValidationReport`] and can decide for themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finding {
  /// A chunk's stored CRC didn't match a fresh computation.
  CrcMismatch {
    /// position of the chunk in file order, counting from 0
    chunk_index: usize,
  },
  /// A scanline's filter byte was outside the legal `0..=4` range.
  BadFilterByte {
    /// scanline row, counting from 0
    row: usize,
    /// the out-of-range filter byte as stored
    value: u8,
  },
  /// The decompressed image data is not a whole number of scanlines.
  ///
  /// The short trailing row is carried into the final band unchanged.
  RaggedPayload {
    /// expected bytes per scanline, filter byte included
    stride: usize,
    actual_len: usize,
  },
  /// An `IDAT` chunk appeared after the first contiguous `IDAT` run ended.
  ///
  /// Such chunks are treated as trailing chunks and their data does not
  /// contribute to the split, mirroring what lenient decoders do.
  NonContiguousIdat,
}

/// The findings collected over one [`split_png`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
  /// Findings in the order they were noticed.
  pub findings: Vec<Finding>,
}
impl ValidationReport {
  /// `true` when no anomalies were noticed.
  #[inline]
  #[must_use]
  pub fn is_clean(&self) -> bool {
    self.findings.is_empty()
  }

  fn note(&mut self, strict: bool, finding: Finding) -> Result<(), PngError> {
    match finding {
      Finding::CrcMismatch { chunk_index } => {
        warn!("chunk {chunk_index}: stored CRC does not match computed CRC")
      }
      Finding::BadFilterByte { row, value } => {
        warn!("row {row}: filter byte {value} is outside 0..=4")
      }
      Finding::RaggedPayload { stride, actual_len } => {
        warn!("decompressed data is {actual_len} bytes, not a multiple of the {stride}-byte scanline")
      }
      Finding::NonContiguousIdat => {
        warn!("IDAT chunks are not contiguous, later ones are passed through as trailing chunks")
      }
    }
    self.findings.push(finding);
    if strict {
      Err(PngError::StrictFinding)
    } else {
      Ok(())
    }
  }
}

/// What [`split_png`] hands back: the output files plus the diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutput {
  /// One complete PNG byte stream per band, in top-to-bottom order.
  ///
  /// There is always at least one band, even for an image with no rows.
  pub bands: Vec<Vec<u8>>,
  /// The anomalies noticed along the way, empty for a clean file.
  pub report: ValidationReport,
}

/// Splits a PNG into several PNGs of at most `max_rows_per_band` rows each.
///
/// The scanlines stay filtered exactly as they were stored, so the split is
/// lossless: stacking the output bands top to bottom reproduces the original
/// image data. Structural problems (truncated chunks, missing `IHDR` or
/// `IDAT`, a zlib stream that won't inflate) are fatal; everything else is a
/// [`Finding`].
pub fn split_png(bytes: &[u8], options: SplitOptions) -> Result<SplitOutput, PngError> {
  let mut report = ValidationReport::default();
  let stream = strip_signature(bytes)?;
  let chunks = extract_chunks(stream)?;

  // One forward scan sorts every chunk into "before the image data", "the
  // image data run", or "after the image data".
  let mut top: Vec<PngChunk<'_>> = Vec::new();
  let mut data_run: Vec<PngChunk<'_>> = Vec::new();
  let mut bot: Vec<PngChunk<'_>> = Vec::new();
  let mut run_over = false;
  let mut gap_noted = false;
  for (chunk_index, chunk) in chunks.iter().copied().enumerate() {
    if !chunk.crc_matches() {
      report.note(options.strict, Finding::CrcMismatch { chunk_index })?;
    }
    if chunk.ty() == PngChunkTy::IDAT && !run_over {
      data_run.push(chunk);
    } else if data_run.is_empty() {
      top.push(chunk);
    } else {
      run_over = true;
      if chunk.ty() == PngChunkTy::IDAT && !gap_noted {
        gap_noted = true;
        report.note(options.strict, Finding::NonContiguousIdat)?;
      }
      bot.push(chunk);
    }
  }
  if data_run.is_empty() {
    return Err(PngError::IdatMissing);
  }

  let header = top
    .iter()
    .find(|c| c.ty() == PngChunkTy::IHDR)
    .ok_or(PngError::IhdrMissing)
    .and_then(IHDR::from_chunk)?;

  let data_slices: Vec<&[u8]> = data_run.iter().map(|c| c.data()).collect();
  let payload = concat_bytes(&data_slices);
  let decompressed = decompress_to_vec_zlib(&payload).map_err(|_| PngError::DecompressFailed)?;

  let stride = header.bytes_per_filterline();
  if decompressed.len() % stride != 0 {
    report.note(
      options.strict,
      Finding::RaggedPayload { stride, actual_len: decompressed.len() },
    )?;
  }
  let scanlines: Vec<&[u8]> = decompressed.chunks(stride).collect();
  for (row, line) in scanlines.iter().enumerate() {
    let filter = line[0];
    if filter > 4 {
      report.note(options.strict, Finding::BadFilterByte { row, value: filter })?;
    }
  }

  let cap = if options.max_rows_per_band == 0 {
    scanlines.len().max(1)
  } else {
    options.max_rows_per_band
  };
  let bands = if scanlines.is_empty() {
    // a rowless image still yields one output mirroring the input structure
    vec![build_band(header, &[], &top, &bot)?]
  } else {
    let mut bands = Vec::with_capacity(scanlines.len().div_ceil(cap));
    for rows in scanlines.chunks(cap) {
      bands.push(build_band(header, rows, &top, &bot)?);
    }
    bands
  };
  Ok(SplitOutput { bands, report })
}

/// Reassembles one band of scanlines as a complete PNG byte stream.
fn build_band(
  header: IHDR, rows: &[&[u8]], top: &[PngChunk<'_>], bot: &[PngChunk<'_>],
) -> Result<Vec<u8>, PngError> {
  let raw = concat_bytes(rows);
  let compressed = compress_to_vec_zlib(&raw, 6);
  let band_header = IHDR { height: rows.len() as u32, ..header };
  let ihdr_chunk = band_header.to_chunk_bytes()?;
  let idat_chunk = build_chunk(PngChunkTy::IDAT, &compressed);

  let carried: usize = top
    .iter()
    .filter(|c| c.ty() != PngChunkTy::IHDR)
    .chain(bot.iter())
    .map(|c| c.bytes().len())
    .sum();
  let mut out = Vec::with_capacity(8 + ihdr_chunk.len() + carried + idat_chunk.len());
  out.extend_from_slice(&PNG_SIGNATURE);
  out.extend_from_slice(&ihdr_chunk);
  for c in top.iter().filter(|c| c.ty() != PngChunkTy::IHDR) {
    out.extend_from_slice(c.bytes());
  }
  out.extend_from_slice(&idat_chunk);
  for c in bot {
    out.extend_from_slice(c.bytes());
  }
  Ok(out)
}
