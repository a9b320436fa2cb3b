//! Thermal receipt printer.
//!
//! The printer speaks a small subset of ESC/POS over a plain byte stream.
//! [`ThermalPrinter`] turns formatting calls into command bytes and hands
//! them to a [`PrinterPort`]; the firmware implements the port on a UARTE
//! peripheral (`uart.rs`), tests implement it on a `Vec<u8>`.

pub mod receipt;
#[cfg(feature = "embedded")]
pub mod uart;

use crate::error::Result;

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;

/// ESC ! bit that doubles the character height.
const DOUBLE_HEIGHT_MASK: u8 = 0x10;

/// Default line spacing in dots.
const LINE_HEIGHT_DOTS: u8 = 30;

/// Byte sink connected to the printer.
pub trait PrinterPort {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<P: PrinterPort + ?Sized> PrinterPort for &mut P {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_all(bytes)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Justify {
    Left,
    Center,
    Right,
}

/// Character size: normal, double height, double width and height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Size {
    Small,
    Medium,
    Large,
}

pub struct ThermalPrinter<P> {
    port: P,
    print_mode: u8,
}

impl<P: PrinterPort> ThermalPrinter<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            print_mode: 0,
        }
    }

    /// ESC @: reset the printer to its power-on state.
    pub fn begin(&mut self) -> Result<()> {
        self.print_mode = 0;
        self.port.write_all(&[ESC, b'@'])
    }

    /// Left aligned, small, single height, default line spacing.
    pub fn set_default(&mut self) -> Result<()> {
        self.justify(Justify::Left)?;
        self.double_height_off()?;
        self.set_size(Size::Small)?;
        self.port.write_all(&[ESC, b'3', LINE_HEIGHT_DOTS])
    }

    pub fn justify(&mut self, justify: Justify) -> Result<()> {
        let n = match justify {
            Justify::Left => 0,
            Justify::Center => 1,
            Justify::Right => 2,
        };
        self.port.write_all(&[ESC, b'a', n])
    }

    pub fn set_size(&mut self, size: Size) -> Result<()> {
        let n = match size {
            Size::Small => 0x00,
            Size::Medium => 0x01,
            Size::Large => 0x11,
        };
        self.port.write_all(&[GS, b'!', n])
    }

    pub fn double_height_on(&mut self) -> Result<()> {
        self.print_mode |= DOUBLE_HEIGHT_MASK;
        self.write_print_mode()
    }

    pub fn double_height_off(&mut self) -> Result<()> {
        self.print_mode &= !DOUBLE_HEIGHT_MASK;
        self.write_print_mode()
    }

    fn write_print_mode(&mut self) -> Result<()> {
        self.port.write_all(&[ESC, b'!', self.print_mode])
    }

    /// Advance the paper by `lines` empty lines.
    pub fn feed(&mut self, lines: u8) -> Result<()> {
        self.port.write_all(&[ESC, b'd', lines])
    }

    /// Print `text` without ending the line.
    ///
    /// The printer only knows ASCII; anything else prints as `?`. Control
    /// characters other than `\n` are dropped.
    pub fn print(&mut self, text: &str) -> Result<()> {
        let mut chunk = [0u8; 32];
        let mut len = 0;
        for c in text.chars() {
            let byte = match c {
                '\n' => b'\n',
                c if c.is_ascii_control() => continue,
                c if c.is_ascii() => c as u8,
                _ => b'?',
            };
            chunk[len] = byte;
            len += 1;
            if len == chunk.len() {
                self.port.write_all(&chunk)?;
                len = 0;
            }
        }
        if len > 0 {
            self.port.write_all(&chunk[..len])?;
        }
        Ok(())
    }

    pub fn println(&mut self, text: &str) -> Result<()> {
        self.print(text)?;
        self.port.write_all(b"\n")
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;

    /// Port that records every byte written.
    #[derive(Default)]
    pub(crate) struct Recording {
        pub bytes: Vec<u8>,
        pub fail: bool,
    }

    impl PrinterPort for Recording {
        fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
            if self.fail {
                return Err(Error::Printer);
            }
            self.bytes.extend_from_slice(bytes);
            Ok(())
        }
    }

    fn printer() -> ThermalPrinter<Recording> {
        ThermalPrinter::new(Recording::default())
    }

    #[test]
    fn reset_and_layout_commands() {
        let mut p = printer();
        p.begin().unwrap();
        p.justify(Justify::Center).unwrap();
        p.set_size(Size::Large).unwrap();
        p.feed(2).unwrap();
        assert_eq!(
            p.port().bytes,
            [0x1B, b'@', 0x1B, b'a', 1, 0x1D, b'!', 0x11, 0x1B, b'd', 2]
        );
    }

    #[test]
    fn double_height_toggles_mode_bit() {
        let mut p = printer();
        p.double_height_on().unwrap();
        p.double_height_off().unwrap();
        assert_eq!(p.port().bytes, [0x1B, b'!', 0x10, 0x1B, b'!', 0x00]);
    }

    #[test]
    fn set_default_restores_layout() {
        let mut p = printer();
        p.set_default().unwrap();
        assert_eq!(
            p.port().bytes,
            [0x1B, b'a', 0, 0x1B, b'!', 0, 0x1D, b'!', 0, 0x1B, b'3', 30]
        );
    }

    #[test]
    fn println_maps_non_ascii_and_drops_controls() {
        let mut p = printer();
        p.println("caf\u{e9}\tok\nbye").unwrap();
        assert_eq!(p.port().bytes, b"caf?ok\nbye\n");
    }

    #[test]
    fn long_text_is_written_in_full() {
        let text = "x".repeat(100);
        let mut p = printer();
        p.print(&text).unwrap();
        assert_eq!(p.port().bytes, text.as_bytes());
    }

    #[test]
    fn port_errors_propagate() {
        let mut p = ThermalPrinter::new(Recording {
            bytes: Vec::new(),
            fail: true,
        });
        assert_eq!(p.println("hi"), Err(Error::Printer));
    }
}
