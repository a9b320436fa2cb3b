//! Receipt layouts.

use super::{Justify, PrinterPort, Size, ThermalPrinter};
use crate::advice;
use crate::config::{
    PRINTER_LINE_WIDTH, RECEIPT_DISCLAIMER, RECEIPT_LINK, RECEIPT_TITLE, WRAPPED_CAPACITY,
};
use crate::error::Result;

/// Large centered "THINKING..." banner.
pub fn print_thinking<P: PrinterPort>(printer: &mut ThermalPrinter<P>) -> Result<()> {
    printer.begin()?;
    printer.justify(Justify::Center)?;
    printer.double_height_on()?;
    printer.set_size(Size::Large)?;
    printer.println("THINKING...")?;
    printer.set_size(Size::Small)?;
    printer.feed(2)
}

/// Marks a receipt whose text came from the offline library.
pub fn print_offline_marker<P: PrinterPort>(printer: &mut ThermalPrinter<P>) -> Result<()> {
    printer.println("...")
}

/// Heading (if any) and the wrapped advice, nothing else.
pub fn print_short<P: PrinterPort>(
    printer: &mut ThermalPrinter<P>,
    advice: &str,
    topic: Option<&str>,
) -> Result<()> {
    printer.set_default()?;
    if let Some(topic) = topic {
        printer.justify(Justify::Center)?;
        print_heading(printer, topic)?;
        printer.feed(1)?;
    }
    printer.set_size(Size::Small)?;
    printer.justify(Justify::Left)?;
    print_advice(printer, advice)?;
    printer.feed(5)
}

/// Full receipt: title, heading, advice, disclaimer and link.
pub fn print_long<P: PrinterPort>(
    printer: &mut ThermalPrinter<P>,
    advice: &str,
    topic: Option<&str>,
) -> Result<()> {
    printer.set_default()?;

    printer.feed(1)?;
    printer.justify(Justify::Center)?;
    printer.double_height_on()?;
    printer.set_size(Size::Large)?;
    printer.println(RECEIPT_TITLE)?;
    printer.set_size(Size::Small)?;
    printer.justify(Justify::Left)?;
    printer.feed(1)?;
    printer.double_height_off()?;

    if let Some(topic) = topic {
        printer.justify(Justify::Center)?;
        printer.double_height_on()?;
        print_heading(printer, topic)?;
        printer.double_height_off()?;
        printer.feed(1)?;
        printer.justify(Justify::Left)?;
    }

    print_advice(printer, advice)?;

    printer.feed(1)?;
    printer.justify(Justify::Center)?;
    printer.double_height_on()?;
    printer.println("DISCLAIMER")?;
    printer.justify(Justify::Left)?;
    printer.feed(1)?;
    printer.double_height_off()?;
    for line in RECEIPT_DISCLAIMER {
        printer.println(line)?;
    }
    printer.feed(1)?;
    printer.println(RECEIPT_LINK)?;
    printer.feed(4)
}

fn print_heading<P: PrinterPort>(printer: &mut ThermalPrinter<P>, topic: &str) -> Result<()> {
    printer.print("Your ")?;
    printer.println(topic)
}

fn print_advice<P: PrinterPort>(printer: &mut ThermalPrinter<P>, advice: &str) -> Result<()> {
    let content = advice::wrap::<WRAPPED_CAPACITY>(advice, PRINTER_LINE_WIDTH)?;
    printer.println(&content)
}
