use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// One decoded unit of client input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A command line with its `\n` and any trailing `\r` removed. Bytes that
    /// are not valid UTF-8 are replaced with U+FFFD.
    Command(String),
    /// A line longer than the configured maximum. Its bytes are discarded up
    /// to and including the next `\n`.
    TooLong,
}

/// Newline-delimited command framing over raw bytes
///
/// Decoding never fails on content, so a single bad line cannot end the
/// stream. Encoding appends `\n` to each response.
#[derive(Debug, Clone)]
pub struct CommandCodec {
    max_length: usize,
    // Bytes already searched for a newline without finding one
    next_index: usize,
    discarding: bool,
}

impl CommandCodec {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
            discarding: false,
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

impl Decoder for CommandCodec {
    type Item = Frame;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if self.discarding {
                match src.iter().position(|byte| *byte == b'\n') {
                    Some(offset) => {
                        src.advance(offset + 1);
                        self.discarding = false;
                        continue;
                    }
                    None => {
                        src.clear();
                        return Ok(None);
                    }
                }
            }

            let read_to = src.len().min(self.max_length.saturating_add(1));
            let newline = src[self.next_index..read_to]
                .iter()
                .position(|byte| *byte == b'\n');

            return match newline {
                Some(offset) => {
                    let end = self.next_index + offset;
                    self.next_index = 0;
                    let line = src.split_to(end + 1);
                    Ok(Some(Frame::Command(decode_line(&line[..end]))))
                }
                None if src.len() > self.max_length => {
                    self.next_index = 0;
                    self.discarding = true;
                    Ok(Some(Frame::TooLong))
                }
                None => {
                    self.next_index = read_to;
                    Ok(None)
                }
            };
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }

        // A final command without a trailing newline still counts
        self.next_index = 0;
        if self.discarding || src.is_empty() {
            src.clear();
            self.discarding = false;
            return Ok(None);
        }

        let line = src.split();
        Ok(Some(Frame::Command(decode_line(&line))))
    }
}

impl Encoder<String> for CommandCodec {
    type Error = std::io::Error;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(line.len() + 1);
        dst.put(line.as_bytes());
        dst.put_u8(b'\n');
        Ok(())
    }
}
