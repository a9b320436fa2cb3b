//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and text shown to the
//! user live here so they can be tuned in one place. The menu tree itself
//! is in `catalog.rs`.

// LCD

/// HD44780 geometry (20x4 character module).
pub const LCD_COLUMNS: u8 = 20;
pub const LCD_ROWS: u8 = 4;

/// I²C address of the PCF8574 backpack (A0..A2 pulled high).
pub const LCD_I2C_ADDRESS: u8 = 0x27;

/// Menu header lines. An empty string frees the row for options.
pub const SCREEN_TITLE: &str = "Welcome to";
pub const SCREEN_SUBTITLE: &str = "Bad AI In A Box";

/// Glyph drawn in column 0 next to the focused option.
pub const CURSOR_GLYPH: &str = ">";

/// Column where option titles start.
pub const OPTION_COLUMN: u8 = 2;

/// First line of the status screen shown while a receipt is produced.
pub const STATUS_HEADLINE: &str = "PRINTING YOU A:";

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Encoder A      → P0.03
//   Encoder B      → P0.04
//   Encoder button → P0.28
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
//   Printer TX/RX  → P0.06 / P0.08
//   Link TX/RX     → P1.02 / P1.01

/// Push-button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// The knob is mounted so that turning it clockwise walks *up* the list.
pub const ENCODER_CLOCKWISE_IS_NEXT: bool = false;

/// Depth of the input event queue between the GPIO tasks and the UI loop.
pub const INPUT_QUEUE_DEPTH: usize = 8;

// Printer

/// Thermal printer UART speed.
pub const PRINTER_BAUD: u32 = 19_200;

/// Printable characters per line on the 58 mm paper at the small size.
pub const PRINTER_LINE_WIDTH: usize = 30;

/// Large heading at the top of every long receipt.
pub const RECEIPT_TITLE: &str = "Bad AI In A Box";

/// Disclaimer block printed under the advice.
pub const RECEIPT_DISCLAIMER: &[&str] = &[
    "This uses AI to generate",
    "responses and should not be",
    "taken literally or followed",
];

/// Print a large "THINKING..." banner before asking for a text.
pub const PRINT_THINKING_BANNER: bool = false;

/// How long the link must stay quiet before a request is sent.
pub const LINK_DRAIN_QUIET_MS: u64 = 20;

/// Link printed at the bottom of the receipt.
pub const RECEIPT_LINK: &str = "http://bit.ly/baiiab";

// Text generation

/// UART speed of the link to the network bridge.
pub const LINK_BAUD: u32 = 115_200;

/// Maximum number of generation attempts per selection.
pub const GENERATION_MAX_ATTEMPTS: u8 = 5;

/// Give up retrying once this much time has passed since the first attempt.
pub const GENERATION_DEADLINE_MS: u64 = 10_000;

/// Random wait between attempts, inclusive bounds.
pub const GENERATION_MIN_WAIT_MS: u32 = 1_000;
pub const GENERATION_MAX_WAIT_MS: u32 = 2_000;

/// Timeout for a single request on the bridge link.
pub const GENERATION_ATTEMPT_TIMEOUT_MS: u64 = 3_000;

/// Capacity (bytes) of a generated or offline advice text.
pub const ADVICE_CAPACITY: usize = 512;

/// Capacity of the advice text after word wrapping for the printer.
pub const WRAPPED_CAPACITY: usize = ADVICE_CAPACITY * 2;
