use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib};
use pngband::{
  build_chunk, extract_chunks, split_png, strip_signature, util::concat_bytes, Finding, IHDR,
  PngChunkTy, PngColorType, PngError, SplitOptions, PNG_SIGNATURE,
};

fn grey_header(width: u32, height: u32) -> IHDR {
  IHDR { width, height, bit_depth: 8, color_type: PngColorType::Y, is_interlaced: false }
}

/// Assembles `signature + IHDR + extra_top + IDAT(s) + extra_bot + IEND`,
/// compressing `filtered` and spreading it over `idat_pieces` chunks.
fn build_png(
  header: IHDR, filtered: &[u8], extra_top: &[&[u8]], extra_bot: &[&[u8]], idat_pieces: usize,
) -> Vec<u8> {
  let compressed = compress_to_vec_zlib(filtered, 6);
  let mut out = Vec::new();
  out.extend_from_slice(&PNG_SIGNATURE);
  out.extend_from_slice(&header.to_chunk_bytes().unwrap());
  for c in extra_top {
    out.extend_from_slice(c);
  }
  let piece_len = compressed.len().div_ceil(idat_pieces).max(1);
  for piece in compressed.chunks(piece_len) {
    out.extend_from_slice(&build_chunk(PngChunkTy::IDAT, piece));
  }
  for c in extra_bot {
    out.extend_from_slice(c);
  }
  out.extend_from_slice(&build_chunk(PngChunkTy::IEND, &[]));
  out
}

/// Pulls the header and the decompressed IDAT payload back out of a band.
fn open_band(band: &[u8]) -> (IHDR, Vec<u8>) {
  let chunks = extract_chunks(strip_signature(band).unwrap()).unwrap();
  let header = IHDR::from_chunk(&chunks[0]).unwrap();
  let idat: Vec<&[u8]> =
    chunks.iter().filter(|c| c.ty() == PngChunkTy::IDAT).map(|c| c.data()).collect();
  assert!(!idat.is_empty());
  (header, decompress_to_vec_zlib(&concat_bytes(&idat)).unwrap())
}

#[test]
fn minimal_one_pixel_image_splits_to_itself() {
  // 1x1 grayscale, one black pixel behind a None filter byte
  let png = build_png(grey_header(1, 1), &[0, 0], &[], &[], 1);
  let out = split_png(&png, SplitOptions::default()).unwrap();
  assert!(out.report.is_clean());
  assert_eq!(out.bands.len(), 1);
  let (header, payload) = open_band(&out.bands[0]);
  assert_eq!(header.height, 1);
  assert_eq!(payload, vec![0, 0]);
}

#[test]
fn truecolor_payload_across_two_idat_chunks() {
  // 1000x3000 RGB8: 3000 scanlines of 3001 bytes each
  let filtered = vec![0_u8; 3000 * 3001];
  let png = build_png(
    IHDR { width: 1000, height: 3000, bit_depth: 8, color_type: PngColorType::RGB, is_interlaced: false },
    &filtered,
    &[],
    &[],
    2,
  );
  let out = split_png(&png, SplitOptions::default()).unwrap();
  assert!(out.report.is_clean());
  // 3000 rows fit under the default 4096-row cap
  assert_eq!(out.bands.len(), 1);
  let (header, payload) = open_band(&out.bands[0]);
  assert_eq!(header.height, 3000);
  assert_eq!(payload.len(), 9_003_000);
}

#[test]
fn one_row_per_band() {
  let rows: Vec<[u8; 4]> = (0..5_u8).map(|r| [0, r, r + 1, r + 2]).collect();
  let filtered: Vec<u8> = rows.concat();
  let png = build_png(grey_header(3, 5), &filtered, &[], &[], 1);
  let out = split_png(&png, SplitOptions { max_rows_per_band: 1, ..Default::default() }).unwrap();
  assert_eq!(out.bands.len(), 5);
  let mut stacked = Vec::new();
  for (band, row) in out.bands.iter().zip(rows.iter()) {
    let (header, payload) = open_band(band);
    assert_eq!(header.height, 1);
    assert_eq!(header.width, 3);
    assert_eq!(payload, row);
    stacked.extend_from_slice(&payload);
  }
  assert_eq!(stacked, filtered);
}

#[test]
fn uneven_final_band() {
  let filtered = vec![0_u8; 5 * 4];
  let png = build_png(grey_header(3, 5), &filtered, &[], &[], 1);
  let out = split_png(&png, SplitOptions { max_rows_per_band: 2, ..Default::default() }).unwrap();
  assert_eq!(out.bands.len(), 3);
  let heights: Vec<u32> = out.bands.iter().map(|b| open_band(b).0.height).collect();
  assert_eq!(heights, vec![2, 2, 1]);
}

#[test]
fn row_cap_of_zero_or_oversized_means_one_band() {
  let filtered = vec![0_u8; 5 * 4];
  let png = build_png(grey_header(3, 5), &filtered, &[], &[], 1);
  for cap in [0, 5 + 100] {
    let out = split_png(&png, SplitOptions { max_rows_per_band: cap, ..Default::default() }).unwrap();
    assert_eq!(out.bands.len(), 1, "cap {cap}");
    let (header, payload) = open_band(&out.bands[0]);
    assert_eq!(header.height, 5);
    assert_eq!(payload, filtered);
  }
}

#[test]
fn rowless_image_still_yields_one_band() {
  let png = build_png(grey_header(3, 0), &[], &[], &[], 1);
  let out = split_png(&png, SplitOptions::default()).unwrap();
  assert_eq!(out.bands.len(), 1);
  let (header, payload) = open_band(&out.bands[0]);
  assert_eq!(header.height, 0);
  assert!(payload.is_empty());
}

#[test]
fn ancillary_chunks_are_carried_byte_for_byte() {
  // pHYs ahead of the image data, tEXt behind it
  let phys = build_chunk(PngChunkTy(*b"pHYs"), &[0, 0, 11, 13, 0, 0, 11, 13, 1]);
  let text = build_chunk(PngChunkTy(*b"tEXt"), b"Comment\0split me");
  let filtered = vec![0_u8; 3 * 4];
  let png = build_png(grey_header(3, 3), &filtered, &[&phys], &[&text], 1);
  let out = split_png(&png, SplitOptions { max_rows_per_band: 1, ..Default::default() }).unwrap();
  assert_eq!(out.bands.len(), 3);
  for band in &out.bands {
    let chunks = extract_chunks(strip_signature(band).unwrap()).unwrap();
    let tys: Vec<PngChunkTy> = chunks.iter().map(|c| c.ty()).collect();
    assert_eq!(
      tys,
      vec![
        PngChunkTy::IHDR,
        PngChunkTy(*b"pHYs"),
        PngChunkTy::IDAT,
        PngChunkTy(*b"tEXt"),
        PngChunkTy::IEND,
      ]
    );
    assert_eq!(chunks[1].bytes(), &phys[..]);
    assert_eq!(chunks[3].bytes(), &text[..]);
  }
}

#[test]
fn crc_mismatch_is_a_finding_not_an_error() {
  let mut png = build_png(grey_header(1, 1), &[0, 0], &[], &[], 1);
  // flip a bit in the IHDR's stored CRC (its last byte sits at offset 8+25-1)
  png[32] ^= 0x01;
  let out = split_png(&png, SplitOptions::default()).unwrap();
  assert_eq!(out.report.findings, vec![Finding::CrcMismatch { chunk_index: 0 }]);
  assert_eq!(out.bands.len(), 1);

  let strict = SplitOptions { strict: true, ..Default::default() };
  assert_eq!(split_png(&png, strict), Err(PngError::StrictFinding));
}

#[test]
fn bad_filter_byte_is_a_finding_not_an_error() {
  let png = build_png(grey_header(1, 2), &[0, 0, 7, 0], &[], &[], 1);
  let out = split_png(&png, SplitOptions::default()).unwrap();
  assert_eq!(out.report.findings, vec![Finding::BadFilterByte { row: 1, value: 7 }]);
  assert_eq!(out.bands.len(), 1);
  // the suspect row is carried through untouched
  let (_, payload) = open_band(&out.bands[0]);
  assert_eq!(payload, vec![0, 0, 7, 0]);

  let strict = SplitOptions { strict: true, ..Default::default() };
  assert_eq!(split_png(&png, strict), Err(PngError::StrictFinding));
}

#[test]
fn ragged_payload_is_a_finding_not_an_error() {
  // 2 full rows of stride 2 plus one stray byte
  let png = build_png(grey_header(1, 2), &[0, 1, 0, 2, 0], &[], &[], 1);
  let out = split_png(&png, SplitOptions::default()).unwrap();
  assert_eq!(out.report.findings, vec![Finding::RaggedPayload { stride: 2, actual_len: 5 }]);

  let strict = SplitOptions { strict: true, ..Default::default() };
  assert_eq!(split_png(&png, strict), Err(PngError::StrictFinding));
}

#[test]
fn non_contiguous_idat_is_passed_through_as_trailing() {
  let header = grey_header(1, 1);
  let idat_a = build_chunk(PngChunkTy::IDAT, &compress_to_vec_zlib(&[0, 0], 6));
  let text = build_chunk(PngChunkTy(*b"tEXt"), b"k\0v");
  let idat_b = build_chunk(PngChunkTy::IDAT, &[9, 9, 9]);
  let png = concat_bytes(&[
    &PNG_SIGNATURE,
    &header.to_chunk_bytes().unwrap(),
    &idat_a,
    &text,
    &idat_b,
    &build_chunk(PngChunkTy::IEND, &[]),
  ]);
  let out = split_png(&png, SplitOptions::default()).unwrap();
  assert_eq!(out.report.findings, vec![Finding::NonContiguousIdat]);
  // the stray IDAT rides along in the bottom group, byte-for-byte
  let chunks = extract_chunks(strip_signature(&out.bands[0]).unwrap()).unwrap();
  assert_eq!(chunks[3].bytes(), &idat_b[..]);

  let strict = SplitOptions { strict: true, ..Default::default() };
  assert_eq!(split_png(&png, strict), Err(PngError::StrictFinding));
}

#[test]
fn truncated_chunk_is_fatal() {
  let png = build_png(grey_header(1, 1), &[0, 0], &[], &[], 1);
  let cut = &png[..png.len() - 3];
  assert_eq!(split_png(cut, SplitOptions::default()), Err(PngError::UnexpectedEnd));
}
