//! advice-box firmware entry point.
//!
//! Wires the nRF52840 peripherals to the library:
//! - TWIM0: HD44780 LCD via PCF8574 backpack
//! - UARTE0: thermal printer (TX only)
//! - UARTE1: generation link to the network bridge
//! - GPIO: rotary encoder A/B and push switch
//! - RNG: back-off jitter and offline response choice
//!
//! Encoder and button tasks feed one input channel. The main task is its
//! only consumer: it owns the menu screen and runs selection handlers
//! inline, so nothing else touches the LCD or the printer.

#![no_std]
#![no_main]

use advice_box::app::AdviceBox;
use advice_box::catalog::{MENU, OFFLINE};
use advice_box::config::{
    GENERATION_ATTEMPT_TIMEOUT_MS, INPUT_QUEUE_DEPTH, LCD_COLUMNS, LCD_I2C_ADDRESS, LCD_ROWS,
    LINK_BAUD, PRINTER_BAUD, SCREEN_SUBTITLE, SCREEN_TITLE,
};
use advice_box::generation::serial::SerialGenerator;
use advice_box::generation::Clock;
use advice_box::menu::MenuScreen;
use advice_box::printer::uart::UartPrinterPort;
use advice_box::printer::ThermalPrinter;
use advice_box::ui::buttons::{button_task, InputSender};
use advice_box::ui::encoder::encoder_task;
use advice_box::ui::input_logic::dispatch;
use advice_box::ui::lcd::Hd44780;
use advice_box::ui::InputEvent;
use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Pin};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::uarte::{self, Uarte, UarteTx};
use embassy_nrf::{bind_interrupts, peripherals, rng};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Duration, Instant};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
    UARTE1 => uarte::InterruptHandler<peripherals::UARTE1>;
    RNG => rng::InterruptHandler<peripherals::RNG>;
});

/// UARTE setting for a configured baud rate. Unsupported rates fail the build.
const fn baudrate(bps: u32) -> uarte::Baudrate {
    match bps {
        9_600 => uarte::Baudrate::BAUD9600,
        19_200 => uarte::Baudrate::BAUD19200,
        38_400 => uarte::Baudrate::BAUD38400,
        57_600 => uarte::Baudrate::BAUD57600,
        115_200 => uarte::Baudrate::BAUD115200,
        230_400 => uarte::Baudrate::BAUD230400,
        _ => panic!("unsupported UART baud rate"),
    }
}

const PRINTER_BAUDRATE: uarte::Baudrate = baudrate(PRINTER_BAUD);
const LINK_BAUDRATE: uarte::Baudrate = baudrate(LINK_BAUD);

static INPUT: Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH> = Channel::new();

/// Milliseconds since boot from the Embassy time driver.
struct Uptime;

impl Clock for Uptime {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

#[embassy_executor::task]
async fn button(pin: AnyPin, tx: InputSender) {
    button_task(pin, tx).await
}

#[embassy_executor::task]
async fn encoder(pin_a: AnyPin, pin_b: AnyPin, tx: InputSender) {
    encoder_task(pin_a, pin_b, tx).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("advice-box starting");

    // Display
    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K100;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let mut lcd = Hd44780::new(i2c, Delay, LCD_I2C_ADDRESS, LCD_COLUMNS, LCD_ROWS);
    if let Err(e) = lcd.init() {
        warn!("LCD init failed: {}", e);
    }

    // Printer
    let mut printer_config = uarte::Config::default();
    printer_config.parity = uarte::Parity::EXCLUDED;
    printer_config.baudrate = PRINTER_BAUDRATE;
    let printer_tx = UarteTx::new(p.UARTE0, Irqs, p.P0_06, printer_config);
    let mut printer = ThermalPrinter::new(UartPrinterPort::new(printer_tx));
    if let Err(e) = printer.begin() {
        warn!("Printer reset failed: {}", e);
    }

    // Generation link
    let mut link_config = uarte::Config::default();
    link_config.parity = uarte::Parity::EXCLUDED;
    link_config.baudrate = LINK_BAUDRATE;
    let (link_tx, link_rx) = Uarte::new(p.UARTE1, Irqs, p.P1_01, p.P1_02, link_config).split();
    let generator = SerialGenerator::new(
        link_tx,
        link_rx,
        Duration::from_millis(GENERATION_ATTEMPT_TIMEOUT_MS),
    );

    let rng = rng::Rng::new(p.RNG, Irqs);

    let mut app = AdviceBox::new(generator, Uptime, Delay, rng, printer, &OFFLINE);

    let mut screen = match MenuScreen::new(lcd, SCREEN_TITLE, SCREEN_SUBTITLE, MENU) {
        Ok(screen) => screen,
        Err(e) => {
            error!("Menu configuration invalid: {}", e);
            return;
        }
    };

    if let Err(e) = spawner.spawn(button(p.P0_28.degrade(), INPUT.sender())) {
        error!("Failed to spawn button task: {}", e);
    }
    if let Err(e) = spawner.spawn(encoder(p.P0_03.degrade(), p.P0_04.degrade(), INPUT.sender())) {
        error!("Failed to spawn encoder task: {}", e);
    }

    screen.start();
    info!("Menu ready");

    let rx = INPUT.receiver();
    loop {
        let event = rx.receive().await;
        match dispatch(&mut screen, event, |s, title, prompt| app.on_select(s, title, prompt)) {
            Ok(Some(selection)) => info!("Selection: {}", selection),
            Ok(None) => {}
            Err(e) => error!("Selection failed: {}", e),
        }

        // Input that queued up while a receipt was printing is stale.
        if event == InputEvent::Press {
            while rx.try_receive().is_ok() {}
        }
    }
}
