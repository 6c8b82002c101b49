//! Streaming zstd codec for the archived platform layout.

use kiln_plugin::{ByteStream, DecompressionCodec};
use std::io;

/// Decodes zstd frames as they are pulled; the source is never
/// materialized in full.
pub struct ZstdCodec;

impl DecompressionCodec for ZstdCodec {
    fn decode(&self, source: ByteStream) -> io::Result<ByteStream> {
        let decoder = zstd::stream::read::Decoder::new(source)?;
        Ok(Box::new(decoder))
    }
}
