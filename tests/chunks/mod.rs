use pngband::{inspect_png, PngChunkIter};

#[test]
fn test_PngChunkIter_no_panics() {
  // totally random data should never panic the iterator, however many of the
  // items come out as errors.
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in PngChunkIter::new(&v) {
      //
    }
  }
  // nor should short inputs
  for len in 0..16 {
    let v = super::rand_bytes(len);
    for _ in PngChunkIter::new(&v) {
      //
    }
  }
}

#[test]
fn test_inspect_no_panics() {
  for _ in 0..10 {
    let v = super::rand_bytes(512);
    let _report = inspect_png(&v);
  }
}
