use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::Error;

/// Decodes a program image: consecutive little-endian 16-bit words, no
/// header or length prefix, ending at the end of input. An odd byte count
/// means the image was cut off mid-word.
pub fn decode(bytes: &[u8]) -> Result<Vec<u16>, Error> {
    if bytes.len() % 2 != 0 {
        return Err(Error::ImageTruncated { bytes: bytes.len() });
    }

    Ok(bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u16>, Error> {
    let bytes = fs::read(path.as_ref())?;
    let words = decode(&bytes)?;
    debug!(words = words.len(), "loaded program image");
    Ok(words)
}
