//! Unified error type for advice-box.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Configuration
    /// The header lines leave no row for menu options.
    NoBodyRows { rows: u8, header_rows: u8 },

    // UI / Display
    /// I²C transaction to the LCD backpack failed.
    Display,

    // Printer
    /// UART write to the thermal printer failed.
    Printer,

    // Generation
    /// Every generation attempt failed or the retry deadline passed.
    GenerationFailed,

    /// A single request on the bridge link timed out.
    Timeout,

    /// No pre-recorded response exists for the chosen topic.
    OfflineMissing,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoBodyRows { rows, header_rows } => write!(
                f,
                "display has {rows} rows but the header needs {header_rows}"
            ),
            Error::Display => f.write_str("display write failed"),
            Error::Printer => f.write_str("printer write failed"),
            Error::GenerationFailed => f.write_str("generation failed"),
            Error::Timeout => f.write_str("timed out"),
            Error::OfflineMissing => f.write_str("no offline response for topic"),
            Error::BufferOverflow => f.write_str("buffer overflow"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
