//! Gzip decompression for the METAR cache snapshot
//!
//! The snapshot arrives as a gzip envelope around a raw deflate stream.
//! Inflation is all-or-nothing: output is accumulated in fixed-size chunks
//! and discarded entirely if the header, stream or trailer is invalid.

use flate2::read::GzDecoder;
use std::io::{ErrorKind, Read};
use tracing::{debug, warn};

use crate::constants::INFLATE_CHUNK_SIZE;
use crate::{Error, Result};

/// Inflate a gzip-compressed buffer
///
/// Empty input fails immediately without touching the inflater. A bad
/// header, a corrupt or truncated deflate stream, or a trailer whose
/// checksum or length does not match all yield [`Error::Decompression`].
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>> {
    decompress_chunked(compressed, INFLATE_CHUNK_SIZE)
}

/// Inflate using a caller-chosen output chunk size
pub fn decompress_chunked(compressed: &[u8], chunk_size: usize) -> Result<Vec<u8>> {
    if compressed.is_empty() {
        return Err(Error::decompression("Input buffer is empty"));
    }
    if chunk_size == 0 {
        return Err(Error::decompression("Chunk size must be greater than 0"));
    }

    // The decoder owns the inflate state and releases it on drop, on every path
    let mut decoder = GzDecoder::new(compressed);
    let mut output = Vec::with_capacity(compressed.len().saturating_mul(4));
    let mut chunk = vec![0u8; chunk_size];

    loop {
        match decoder.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => output.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(
                    "Gzip inflate failed after {} bytes of output: {}",
                    output.len(),
                    e
                );
                return Err(Error::decompression_with(
                    format!("Invalid or truncated gzip stream: {}", e),
                    e,
                ));
            }
        }
    }

    debug!(
        "Inflated {} compressed bytes into {} bytes",
        compressed.len(),
        output.len()
    );

    Ok(output)
}
