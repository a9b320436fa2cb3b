//! Generator backed by a UART link to a network bridge.
//!
//! Request: one `role<TAB>content` line per prompt message, then an empty
//! line. Tabs and newlines inside the content are sent as spaces.
//! Response: a single line of generated text. An empty line means the
//! bridge could not produce anything.
//!
//! Anything already waiting on the link before a request goes out belongs
//! to an earlier, abandoned attempt and is discarded.

use super::reply::ReplyLine;
use super::{Generator, Prompt, Text};
use crate::config::LINK_DRAIN_QUIET_MS;
use crate::error::{Error, Result};
use embassy_futures::block_on;
use embassy_nrf::uarte::{Instance, UarteRx, UarteTx};
use embassy_time::{with_timeout, Duration};

const CHUNK: usize = 64;

pub struct SerialGenerator<'d, T: Instance> {
    tx: UarteTx<'d, T>,
    rx: UarteRx<'d, T>,
    timeout: Duration,
}

impl<'d, T: Instance> SerialGenerator<'d, T> {
    pub fn new(tx: UarteTx<'d, T>, rx: UarteRx<'d, T>, timeout: Duration) -> Self {
        Self { tx, rx, timeout }
    }

    fn send(&mut self, prompt: &Prompt) -> Result<()> {
        for message in prompt.messages {
            self.send_field(message.role.as_str().as_bytes())?;
            self.send_raw(b"\t")?;
            self.send_field(message.content.as_bytes())?;
            self.send_raw(b"\n")?;
        }
        self.send_raw(b"\n")
    }

    fn send_field(&mut self, bytes: &[u8]) -> Result<()> {
        let mut buf = [0u8; CHUNK];
        for chunk in bytes.chunks(CHUNK) {
            for (dst, &src) in buf.iter_mut().zip(chunk) {
                *dst = match src {
                    b'\t' | b'\n' | b'\r' => b' ',
                    b => b,
                };
            }
            self.send_raw(&buf[..chunk.len()])?;
        }
        Ok(())
    }

    fn send_raw(&mut self, bytes: &[u8]) -> Result<()> {
        // Stage in RAM for EasyDMA; `bytes` may point into flash.
        let mut buf = [0u8; CHUNK];
        for chunk in bytes.chunks(CHUNK) {
            buf[..chunk.len()].copy_from_slice(chunk);
            block_on(self.tx.write(&buf[..chunk.len()])).map_err(|e| {
                warn!("Link: write failed: {}", e);
                Error::GenerationFailed
            })?;
        }
        Ok(())
    }

    /// Read and drop bytes until the link has been quiet for a while.
    async fn drain(&mut self) {
        let quiet = Duration::from_millis(LINK_DRAIN_QUIET_MS);
        let mut byte = [0u8; 1];
        let mut dropped = 0usize;
        loop {
            match with_timeout(quiet, self.rx.read(&mut byte)).await {
                Ok(Ok(())) => dropped += 1,
                Ok(Err(e)) => {
                    warn!("Link: read failed while draining: {}", e);
                    break;
                }
                Err(_) => break,
            }
        }
        if dropped > 0 {
            warn!("Link: dropped {} stale bytes", dropped);
        }
    }

    async fn receive(&mut self) -> Result<Text> {
        let mut reply = ReplyLine::new();
        loop {
            let mut byte = [0u8; 1];
            self.rx.read(&mut byte).await.map_err(|e| {
                warn!("Link: read failed: {}", e);
                Error::GenerationFailed
            })?;
            if let Some(line) = reply.push(byte[0]) {
                return line;
            }
        }
    }
}

impl<T: Instance> Generator for SerialGenerator<'_, T> {
    fn generate(&mut self, prompt: &Prompt) -> Result<Text> {
        block_on(self.drain());
        self.send(prompt)?;
        let timeout = self.timeout;
        block_on(with_timeout(timeout, self.receive())).map_err(|_| {
            warn!("Link: no reply within {} ms", timeout.as_millis());
            Error::Timeout
        })?
    }
}
