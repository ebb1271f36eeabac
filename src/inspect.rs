//! A textual dump of a PNG's chunk structure, for diagnostics.

use core::fmt::Write;

use alloc::string::String;

use crate::{
  util::{push_hex_slice, take_bytes},
  PngChunkIter,
};

/// Renders a human-readable report of every chunk in the PNG bytes.
///
/// The report shows the signature in hex, then one block per chunk: type,
/// declared data size, the complete raw chunk bytes in hex (length prefix
/// through CRC), the data in hex, and the stored CRC next to a fresh
/// recomputation. Nothing here is fatal: a bad signature, a CRC mismatch, or
/// a truncated final chunk are all reported in the text.
#[must_use]
pub fn inspect_png(bytes: &[u8]) -> String {
  let mut s = String::new();
  let (signature, _) = take_bytes(bytes, 8);
  s.push_str("signature: ");
  push_hex_slice(&mut s, signature);
  if !crate::is_png_signature(bytes) {
    s.push_str(" (not a PNG signature)");
  }
  s.push('\n');
  for (n, chunk_res) in PngChunkIter::new(bytes).enumerate() {
    match chunk_res {
      Ok(chunk) => {
        let _ = write!(s, "chunk {n}: {:?}, size {}\n  raw: ", chunk.ty(), chunk.size());
        push_hex_slice(&mut s, chunk.bytes());
        s.push_str("\n  data: ");
        push_hex_slice(&mut s, chunk.data());
        let declared = chunk.declared_crc();
        let actual = chunk.actual_crc();
        let _ = write!(s, "\n  crc: stored {declared:08x}, computed {actual:08x}");
        if declared != actual {
          s.push_str(" (MISMATCH)");
        }
        s.push('\n');
      }
      Err(e) => {
        let _ = writeln!(s, "chunk {n}: {e}");
      }
    }
  }
  s
}
