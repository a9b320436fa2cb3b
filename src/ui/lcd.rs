//! HD44780 character LCD behind a PCF8574 I²C backpack.
//!
//! The controller runs in 4-bit mode. Each byte goes out as two nibbles on
//! P4..P7 of the expander, each latched by pulsing EN. The low expander
//! bits carry RS, RW (always write) and the backlight.

use super::CharDisplay;
use crate::error::{Error, Result};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

// PCF8574 bit assignments
const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

// HD44780 instructions
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// Longest row the controller addresses.
const MAX_COLUMNS: u8 = 40;

/// DDRAM address of column 0 on each row of a 4-line module.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    columns: u8,
    rows: u8,
    column: u8,
    row: u8,
    backlight: bool,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Wrap the bus. Call [`init`](Self::init) before drawing.
    pub fn new(i2c: I2C, delay: D, address: u8, columns: u8, rows: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            columns: columns.min(MAX_COLUMNS),
            rows: rows.min(ROW_OFFSETS.len() as u8),
            column: 0,
            row: 0,
            backlight: true,
        }
    }

    /// Power-on reset into 4-bit mode, then clear and show the display.
    pub fn init(&mut self) -> Result<()> {
        self.write_expander(0)?;
        self.delay.delay_ms(20);

        // Three 8-bit "function set" nibbles resync the controller whatever
        // mode it was left in, then the fourth switches to 4-bit.
        self.write_nibble(0x03, 0)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_ms(1);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_ms(1);
        self.write_nibble(0x02, 0)?;
        self.delay.delay_ms(1);

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.command(CMD_CLEAR)?;
        self.command(CMD_ENTRY_MODE_INC)?;
        self.column = 0;
        self.row = 0;
        info!("LCD: ready at {=u8:#x}", self.address);
        Ok(())
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<()> {
        self.backlight = on;
        self.write_expander(0)
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, command: u8) -> Result<()> {
        self.send(command, 0)?;
        // Clear and home take ~1.5 ms.
        if command <= 0x03 {
            self.delay.delay_ms(2);
        }
        Ok(())
    }

    fn send(&mut self, byte: u8, mode: u8) -> Result<()> {
        self.write_nibble(byte >> 4, mode)?;
        self.write_nibble(byte & 0x0F, mode)
    }

    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<()> {
        let bits = (nibble << 4) | mode;
        self.write_expander(bits | EN)?;
        self.write_expander(bits)
    }

    fn write_expander(&mut self, bits: u8) -> Result<()> {
        let bits = if self.backlight { bits | BACKLIGHT } else { bits };
        self.i2c
            .write(self.address, &[bits])
            .map_err(|_| Error::Display)
    }

    fn try_clear(&mut self) -> Result<()> {
        self.column = 0;
        self.row = 0;
        self.command(CMD_CLEAR)
    }

    fn try_move_to(&mut self, column: u8, row: u8) -> Result<()> {
        self.column = column;
        self.row = row;
        if column >= self.columns || row >= self.rows {
            return Ok(());
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + column))
    }

    fn try_put_str(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            if c == '\n' {
                self.try_move_to(0, self.row.saturating_add(1))?;
                continue;
            }
            if self.column < self.columns && self.row < self.rows {
                let byte = if c.is_ascii() && !c.is_ascii_control() {
                    c as u8
                } else {
                    b'?'
                };
                self.send(byte, RS)?;
            }
            self.column = self.column.saturating_add(1);
        }
        Ok(())
    }
}

impl<I2C, D> CharDisplay for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            warn!("LCD: clear failed: {}", e);
        }
    }

    fn move_to(&mut self, column: u8, row: u8) {
        if let Err(e) = self.try_move_to(column, row) {
            warn!("LCD: move failed: {}", e);
        }
    }

    fn put_str(&mut self, text: &str) {
        if let Err(e) = self.try_put_str(text) {
            warn!("LCD: write failed: {}", e);
        }
    }

    fn columns(&self) -> u8 {
        self.columns
    }

    fn rows(&self) -> u8 {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Bus double recording every byte written to the expander.
    #[derive(Default)]
    struct Bus {
        writes: Vec<(u8, u8)>,
        fail: bool,
    }

    impl ErrorType for Bus {
        type Error = ErrorKind;
    }

    impl I2c for Bus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> core::result::Result<(), ErrorKind> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.extend(bytes.iter().map(|&b| (address, b)));
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct Sleep {
        total_ms: u64,
    }

    impl DelayNs for Sleep {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += u64::from(ns) / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += u64::from(ms);
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Latched {
        Nibble(u8),
        Command(u8),
        Data(u8),
    }

    /// Turn the expander byte stream back into what the controller latched.
    /// The first `init_nibbles` latches are single nibbles.
    fn decode(writes: &[(u8, u8)], init_nibbles: usize) -> Vec<Latched> {
        let latches: Vec<u8> = writes
            .iter()
            .map(|&(_, b)| b)
            .filter(|b| b & EN != 0)
            .collect();
        let (init, rest) = latches.split_at(init_nibbles.min(latches.len()));
        let mut out: Vec<Latched> = init.iter().map(|b| Latched::Nibble(b >> 4)).collect();
        for pair in rest.chunks(2) {
            let byte = (pair[0] & 0xF0) | (pair[1] >> 4);
            out.push(if pair[0] & RS != 0 {
                Latched::Data(byte)
            } else {
                Latched::Command(byte)
            });
        }
        out
    }

    fn lcd() -> Hd44780<Bus, Sleep> {
        Hd44780::new(Bus::default(), Sleep::default(), 0x27, 20, 4)
    }

    #[test]
    fn init_sequence() {
        let mut lcd = lcd();
        lcd.init().unwrap();
        let (bus, sleep) = lcd.release();

        assert_eq!(
            decode(&bus.writes, 4),
            [
                Latched::Nibble(3),
                Latched::Nibble(3),
                Latched::Nibble(3),
                Latched::Nibble(2),
                Latched::Command(0x28),
                Latched::Command(0x0C),
                Latched::Command(0x01),
                Latched::Command(0x06),
            ]
        );
        assert!(bus.writes.iter().all(|&(addr, b)| addr == 0x27 && b & BACKLIGHT != 0));
        assert!(sleep.total_ms >= 20 + 5 + 1 + 1 + 1 + 2);
    }

    #[test]
    fn move_to_uses_row_offsets() {
        let mut lcd = lcd();
        lcd.move_to(0, 1);
        lcd.move_to(3, 2);
        lcd.move_to(19, 3);
        let (bus, _) = lcd.release();
        assert_eq!(
            decode(&bus.writes, 0),
            [
                Latched::Command(0x80 | 0x40),
                Latched::Command(0x80 | 0x17),
                Latched::Command(0x80 | 0x67),
            ]
        );
    }

    #[test]
    fn put_str_writes_data_and_handles_newline() {
        let mut lcd = lcd();
        lcd.move_to(2, 0);
        lcd.put_str("Hi\n\u{e9}");
        let (bus, _) = lcd.release();
        assert_eq!(
            decode(&bus.writes, 0),
            [
                Latched::Command(0x82),
                Latched::Data(b'H'),
                Latched::Data(b'i'),
                Latched::Command(0xC0),
                Latched::Data(b'?'),
            ]
        );
    }

    #[test]
    fn writes_past_the_edge_are_dropped() {
        let mut lcd = lcd();
        lcd.move_to(18, 0);
        lcd.put_str("abcd");
        lcd.move_to(0, 4);
        lcd.put_str("x");
        let (bus, _) = lcd.release();
        assert_eq!(
            decode(&bus.writes, 0),
            [
                Latched::Command(0x80 | 18),
                Latched::Data(b'a'),
                Latched::Data(b'b'),
            ]
        );
    }

    #[test]
    fn bus_errors_are_swallowed_by_draw_calls() {
        let mut lcd = Hd44780::new(
            Bus {
                writes: Vec::new(),
                fail: true,
            },
            Sleep::default(),
            0x27,
            20,
            4,
        );
        assert_eq!(lcd.init(), Err(Error::Display));
        lcd.clear();
        lcd.put_str("still fine");
    }

    #[test]
    fn geometry_is_clamped_to_the_controller() {
        let mut lcd = Hd44780::new(Bus::default(), Sleep::default(), 0x27, 200, 9);
        assert_eq!((lcd.columns(), lcd.rows()), (40, 4));
        lcd.move_to(39, 3);
        lcd.move_to(180, 3);
        let (bus, _) = lcd.release();
        assert_eq!(decode(&bus.writes, 0), [Latched::Command(0x80 | (0x54 + 39))]);
    }

    #[test]
    fn backlight_off_clears_the_bit() {
        let mut lcd = lcd();
        lcd.set_backlight(false).unwrap();
        lcd.put_str("a");
        let (bus, _) = lcd.release();
        assert!(bus.writes.iter().all(|&(_, b)| b & BACKLIGHT == 0));
    }
}
