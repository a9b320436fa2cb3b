//! Printer port on an nRF UARTE.

use super::PrinterPort;
use crate::error::{Error, Result};
use embassy_nrf::uarte::{Instance, UarteTx};

/// EasyDMA can only read from RAM, so bytes are staged through a stack
/// buffer of this size.
const CHUNK: usize = 64;

pub struct UartPrinterPort<'d, T: Instance> {
    tx: UarteTx<'d, T>,
}

impl<'d, T: Instance> UartPrinterPort<'d, T> {
    pub fn new(tx: UarteTx<'d, T>) -> Self {
        Self { tx }
    }
}

impl<T: Instance> PrinterPort for UartPrinterPort<'_, T> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let mut buf = [0u8; CHUNK];
        for chunk in bytes.chunks(CHUNK) {
            buf[..chunk.len()].copy_from_slice(chunk);
            self.tx.blocking_write(&buf[..chunk.len()]).map_err(|e| {
                error!("Printer: UART write failed: {}", e);
                Error::Printer
            })?;
        }
        Ok(())
    }
}
