//! Line framing.
//!
//! Inbound lines may end in `\n` or `\r\n`; outbound lines always end in
//! `\r\n`. Framing works on raw bytes: a line that is not valid UTF-8 is
//! converted lossily rather than failing the stream. Inbound lines longer
//! than the limit are dropped whole and decoding carries on with the next
//! one.

use std::io;

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

/// IRC line codec.
#[derive(Debug, Clone)]
pub struct IrcLineCodec {
    max_length: usize,
    /// Bytes of `src` already scanned for a newline.
    next_index: usize,
    /// Inside an overlong line, skipping up to its newline.
    discarding: bool,
}

impl IrcLineCodec {
    /// `max_length` bounds an inbound line, `\n` excluded.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
            discarding: false,
        }
    }
}

fn to_text(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

impl Decoder for IrcLineCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> io::Result<Option<String>> {
        loop {
            let read_to = src.len().min(self.max_length.saturating_add(1));
            let newline = src[self.next_index..read_to].iter().position(|b| *b == b'\n');

            match (self.discarding, newline) {
                (true, Some(offset)) => {
                    src.advance(self.next_index + offset + 1);
                    self.next_index = 0;
                    self.discarding = false;
                    debug!("Overlong line discarded");
                }
                (true, None) => {
                    src.advance(read_to);
                    self.next_index = 0;
                    if src.is_empty() {
                        return Ok(None);
                    }
                }
                (false, Some(offset)) => {
                    let end = self.next_index + offset;
                    self.next_index = 0;
                    let line = src.split_to(end + 1);
                    return Ok(Some(to_text(&line[..end])));
                }
                (false, None) if src.len() > self.max_length => self.discarding = true,
                (false, None) => {
                    self.next_index = read_to;
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> io::Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        self.next_index = 0;
        if self.discarding || src.is_empty() {
            self.discarding = false;
            src.clear();
            return Ok(None);
        }
        let rest = src.split();
        Ok(Some(to_text(&rest)))
    }
}

impl Encoder<String> for IrcLineCodec {
    type Error = io::Error;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> io::Result<()> {
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
