//! Decompression codec seam.

use crate::asset::ByteStream;
use std::io;

/// Streaming decode of a byte source.
///
/// Implementations must wrap `source` in a pull-based decoder rather
/// than materializing the decompressed content; the returned stream
/// owns `source` and releases it when dropped.
pub trait DecompressionCodec: Send + Sync {
    fn decode(&self, source: ByteStream) -> io::Result<ByteStream>;
}
