//! Frame splitting for the line-oriented protocol.
//!
//! The controller terminates most commands with a newline, but score updates
//! are sent bare (`HWSERIAL.print`, no line ending) and rely on the read
//! timeout to delimit them. A frame is therefore either a newline-terminated
//! line or the unterminated tail of a read chunk.

/// Size of one UART read chunk in bytes.
///
/// Bounds the longest recognizable frame; anything larger is split and the
/// pieces fall through to `Command::Unknown`.
pub const READ_CHUNK: usize = 32;

/// Split a read chunk into protocol frames.
///
/// Splits on `\n`, strips a trailing `\r`, and skips empty frames. The
/// unterminated tail of the chunk is yielded as a frame of its own.
pub fn frames(buf: &[u8]) -> Frames<'_> {
    Frames { rest: buf }
}

/// Iterator over the frames contained in one read chunk.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        loop {
            if self.rest.is_empty() {
                return None;
            }

            let (mut frame, rest) = match self.rest.iter().position(|&b| b == b'\n') {
                Some(i) => (&self.rest[..i], &self.rest[i + 1..]),
                None => (self.rest, &self.rest[self.rest.len()..]),
            };
            self.rest = rest;

            if let [head @ .., b'\r'] = frame {
                frame = head;
            }
            if !frame.is_empty() {
                return Some(frame);
            }
        }
    }
}
