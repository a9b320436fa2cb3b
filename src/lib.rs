//! Host-testable library interface for advice-box.
//!
//! Everything that does not touch nRF52840 peripherals lives here: the
//! menu state machine, the character display drivers, encoder decoding,
//! advice text handling, the retry policy and receipt layout.
//!
//! Usage: `cargo test` runs the whole suite on the host.
//!
//! Note: The firmware binary (`main.rs`, `embedded` feature) links this
//! library and adds the Embassy tasks and UART glue on top.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod advice;
pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generation;
pub mod menu;
pub mod offline;
pub mod printer;
pub mod ui;

pub use error::{Error, Result};
