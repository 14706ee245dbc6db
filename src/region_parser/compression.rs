use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;

/// How a chunk payload is compressed, from the byte preceding it in the region file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Gzip,
    Zlib,
    Uncompressed,
}

impl Scheme {
    /// Returns `None` for unknown schemes and for chunks stored outside the region file.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(Self::Gzip),
            2 => Some(Self::Zlib),
            3 => Some(Self::Uncompressed),
            _ => None,
        }
    }
}

pub fn decompress(scheme: Scheme, data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    match scheme {
        Scheme::Gzip => {
            GzDecoder::new(data).read_to_end(&mut decompressed)?;
        }
        Scheme::Zlib => {
            ZlibDecoder::new(data).read_to_end(&mut decompressed)?;
        }
        Scheme::Uncompressed => decompressed.extend_from_slice(data),
    }
    Ok(decompressed)
}

#[cfg(test)]
pub fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::{write::ZlibEncoder, Compression};
    use std::io::Write;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
