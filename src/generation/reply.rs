//! Reply framing for the bridge link.
//!
//! A reply is one `\n`-terminated line; `\r` is ignored. A line longer
//! than [`Text`] can hold is still consumed up to its newline so the next
//! reply starts on a line boundary.

use super::Text;
use crate::config::ADVICE_CAPACITY;
use crate::error::{Error, Result};
use heapless::{String, Vec};

/// Collects bytes until a full reply line has arrived.
#[derive(Debug, Default)]
pub struct ReplyLine {
    line: Vec<u8, ADVICE_CAPACITY>,
    overflowed: bool,
}

impl ReplyLine {
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte. Returns the finished line at `\n` and starts over.
    pub fn push(&mut self, byte: u8) -> Option<Result<Text>> {
        match byte {
            b'\n' => Some(self.finish()),
            b'\r' => None,
            b => {
                if self.line.push(b).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }

    fn finish(&mut self) -> Result<Text> {
        let line = core::mem::take(&mut self.line);
        if core::mem::take(&mut self.overflowed) {
            warn!("Link: reply longer than {} bytes", ADVICE_CAPACITY);
            return Err(Error::BufferOverflow);
        }
        String::from_utf8(line).map_err(|_| {
            warn!("Link: reply is not UTF-8");
            Error::GenerationFailed
        })
    }
}
