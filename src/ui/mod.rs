//! User interface subsystem - 20x4 character LCD + rotary encoder.
//!
//! The UI task owns a [`MenuScreen`](crate::menu::MenuScreen) that reacts
//! to encoder events and renders the current menu level on the LCD.
//!
//! ## Components
//!
//! - **Display**: HD44780 20x4 LCD behind a PCF8574 I²C backpack
//! - **Encoder**: quadrature knob with a push switch (turn = move, push = choose)

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod encoder;
pub mod frame;
pub mod input_logic;
pub mod lcd;

/// Encoder events (after decoding and debouncing).
///
/// Which physical direction is "forward" is decided when the raw rotation
/// is turned into an event, see [`input_logic::event_for`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    RotateForward,
    RotateBackward,
    Press,
}

/// A character display addressed by (column, row) cells.
///
/// Writes never fail from the caller's point of view: characters that fall
/// outside the configured geometry are dropped, and drivers log bus errors
/// instead of returning them.
pub trait CharDisplay {
    /// Blank the whole display and home the cursor.
    fn clear(&mut self);

    /// Move the write cursor. Out-of-range positions clamp writes to nothing.
    fn move_to(&mut self, column: u8, row: u8);

    /// Write `text` at the cursor, advancing it. `\n` moves to column 0 of
    /// the next row.
    fn put_str(&mut self, text: &str);

    fn columns(&self) -> u8;

    fn rows(&self) -> u8;
}

impl<T: CharDisplay + ?Sized> CharDisplay for &mut T {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn move_to(&mut self, column: u8, row: u8) {
        (**self).move_to(column, row)
    }

    fn put_str(&mut self, text: &str) {
        (**self).put_str(text)
    }

    fn columns(&self) -> u8 {
        (**self).columns()
    }

    fn rows(&self) -> u8 {
        (**self).rows()
    }
}

/// Longest line any supported character LCD can show.
pub const MAX_LINE: usize = 40;

/// Column where `text` starts when centered in `width` cells.
///
/// An odd margin puts the extra space on the left only when `width` is odd.
/// Text at least `width` wide starts at column 0.
pub fn center_column(text: &str, width: usize) -> usize {
    let len = text.chars().count();
    let margin = width.saturating_sub(len);
    margin / 2 + (margin & width & 1)
}

/// Write `text` centered on `row`. Cells either side are left as they are.
pub fn put_centered<D: CharDisplay + ?Sized>(display: &mut D, row: u8, text: &str) {
    let left = center_column(text, display.columns() as usize);
    display.move_to(left as u8, row);
    display.put_str(text);
}
