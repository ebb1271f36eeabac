#![no_std]
#![forbid(unsafe_code)]

//! A crate for slicing PNG files into horizontal bands.
//!
//! The input is a complete PNG datastream held in memory. The crate parses
//! the stream into chunks, decompresses the image data, cuts the filtered
//! scanlines into groups of rows, and rebuilds each group as a complete,
//! independently valid PNG file. Scanlines are treated as opaque filtered
//! rows the whole way through: no unfiltering, no pixel decoding, no
//! interlace handling beyond carrying the header flag along.
//!
//! ## Library Design Assumptions
//!
//! * The entire PNG encoded source data stream is a single byte slice.
//! * Splitting allocates the decompressed image data and every output file
//!   at once. This library does *not* attempt to support "stream" processing
//!   of PNG data while keeping only a minimal amount of live data.
//!
//! ## Parsing Errors
//!
//! Quoting [section 13.2 of the PNG
//! spec](https://www.w3.org/TR/2003/REC-PNG-20031110/#13Decoders.Errors):
//!
//! > Errors that have little or no effect on the processing of the image may
//! > be ignored, while those that affect critical data shall be dealt with in
//! > a manner appropriate to the application.
//!
//! Accordingly there are two tiers here. Structural problems (a truncated
//! chunk, a missing `IHDR`, a zlib stream that won't inflate) are hard
//! [`PngError`]s. Recoverable anomalies (a stored CRC that doesn't match, a
//! filter byte outside `0..=4`, image data that doesn't divide evenly into
//! scanlines) are collected into a [`ValidationReport`], logged through the
//! `log` crate, and processing continues. Setting [`SplitOptions::strict`]
//! promotes any such finding into an error.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod util;

mod crc32;
pub use crc32::*;

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

#[cfg(feature = "alloc")]
mod inspect;
#[cfg(feature = "alloc")]
pub use inspect::*;

#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
mod split;
#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
pub use split::*;
