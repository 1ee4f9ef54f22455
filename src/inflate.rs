//! Replays are stored as a zlib stream. Inflate them before handing the bytes to the decoder.

use crate::errors::DecompressionError;
use flate2::read::ZlibDecoder;
use std::io::Read;

/// Inflates a zlib wrapped deflate stream
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, DecompressionError> {
    let mut decoder = ZlibDecoder::new(data);
    let mut res = Vec::with_capacity(data.len() * 4);
    decoder.read_to_end(&mut res)?;
    Ok(res)
}
