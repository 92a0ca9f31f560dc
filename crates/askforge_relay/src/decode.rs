//! Incremental UTF-8 decoding for consumers of the relay's text stream.

/// Decodes a byte stream chunk by chunk. A multi-byte code point split
/// across a chunk boundary is held back and completed by the next chunk.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    pending: Vec<u8>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and returns all text decodable so far.
    pub fn push(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);
        match std::str::from_utf8(&self.pending) {
            Ok(text) => {
                let out = text.to_owned();
                self.pending.clear();
                out
            }
            Err(err) if err.error_len().is_none() => {
                // Incomplete trailing code point: emit the valid prefix and
                // keep the rest for the next chunk.
                let valid = err.valid_up_to();
                let out = String::from_utf8_lossy(&self.pending[..valid]).into_owned();
                self.pending.drain(..valid);
                out
            }
            Err(_) => {
                // Genuinely invalid bytes: decode lossily and move on.
                let out = String::from_utf8_lossy(&self.pending).into_owned();
                self.pending.clear();
                out
            }
        }
    }

    /// Flushes whatever is still buffered at end of stream, lossily.
    pub fn finish(&mut self) -> String {
        let out = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        out
    }
}
