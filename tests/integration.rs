//! Integration tests for advice-box host-testable logic.

use advice_box::app::{AdviceBox, Source};
use advice_box::catalog::{MENU, OFFLINE};
use advice_box::config::{ENCODER_CLOCKWISE_IS_NEXT, SCREEN_SUBTITLE, SCREEN_TITLE};
use advice_box::generation::{Clock, Generator, Prompt, Text};
use advice_box::menu::{MenuScreen, Selection};
use advice_box::printer::{PrinterPort, ThermalPrinter};
use advice_box::ui::frame::FrameBuffer;
use advice_box::ui::input_logic::{dispatch, event_for, QuadratureDecoder};
use advice_box::ui::InputEvent;
use advice_box::{Error, Result};
use embedded_hal::delay::DelayNs;
use rand_core::{impls, RngCore};

type Lcd = FrameBuffer<20, 4>;

#[derive(Default)]
struct Paper(Vec<u8>);

impl PrinterPort for Paper {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.0.extend_from_slice(bytes);
        Ok(())
    }
}

impl Paper {
    /// Printed text without ESC/POS commands.
    fn text(&self) -> String {
        let mut out = String::new();
        let mut i = 0;
        while i < self.0.len() {
            match self.0[i] {
                0x1B if self.0.get(i + 1) == Some(&b'@') => i += 2,
                0x1B | 0x1D => i += 3,
                b => {
                    out.push(b as char);
                    i += 1;
                }
            }
        }
        out
    }
}

/// Echoes the last user message, or fails every attempt when `offline`.
struct Echo {
    offline: bool,
    seen: Vec<&'static str>,
}

impl Generator for Echo {
    fn generate(&mut self, prompt: &Prompt) -> Result<Text> {
        let last = prompt.messages.last().map(|m| m.content).unwrap_or("");
        self.seen.push(last);
        if self.offline {
            return Err(Error::Timeout);
        }
        Ok(Text::try_from(last).unwrap())
    }
}

struct Clockwork(u64);

impl Clock for Clockwork {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

struct Instant;

impl DelayNs for Instant {
    fn delay_ns(&mut self, _: u32) {}
}

struct Seq(u32);

impl RngCore for Seq {
    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }
    fn next_u64(&mut self) -> u64 {
        self.next_u32() as u64
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

type App = AdviceBox<'static, Echo, Clockwork, Instant, Seq, Paper>;

fn app(offline: bool) -> App {
    AdviceBox::new(
        Echo {
            offline,
            seen: Vec::new(),
        },
        Clockwork(0),
        Instant,
        Seq(0),
        ThermalPrinter::new(Paper::default()),
        &OFFLINE,
    )
}

fn screen() -> MenuScreen<'static, Lcd, Prompt> {
    let mut screen = MenuScreen::new(Lcd::new(), SCREEN_TITLE, SCREEN_SUBTITLE, MENU).unwrap();
    screen.start();
    screen
}

fn press(screen: &mut MenuScreen<'static, Lcd, Prompt>, app: &mut App) -> Result<Option<Selection>> {
    dispatch(screen, InputEvent::Press, |s, t, p| app.on_select(s, t, p))
}

fn turn(screen: &mut MenuScreen<'static, Lcd, Prompt>, event: InputEvent, times: usize) {
    for _ in 0..times {
        let r: core::result::Result<_, ()> = dispatch(screen, event, |_, _, _| Ok(()));
        assert_eq!(r, Ok(None));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Navigation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn boot_screen_shows_header_and_first_page() {
    let screen = screen();
    let lcd = screen.display();
    assert!(lcd.row_reads(0, "     Welcome to"));
    assert!(lcd.row_reads(1, "  Bad AI In A Box"));
    assert!(lcd.row_reads(2, "> Insults"));
    assert!(lcd.row_reads(3, "  Bad Advice"));
    assert_eq!(screen.page_count(), 2);
}

#[test]
fn turning_pages_through_topics() {
    let mut screen = screen();
    turn(&mut screen, InputEvent::RotateForward, 2);
    assert_eq!(screen.current_page(), 1);
    assert!(screen.display().row_reads(2, "> Fortunes"));
    assert!(screen.display().row_reads(3, "  Excuses"));

    turn(&mut screen, InputEvent::RotateForward, 2);
    assert_eq!(screen.focus(), 1);
    assert!(screen.display().row_reads(2, "> Insults"));

    turn(&mut screen, InputEvent::RotateBackward, 1);
    assert_eq!(screen.focus(), 4);
    assert!(screen.display().row_reads(2, "  Fortunes"));
    assert!(screen.display().row_reads(3, "> Excuses"));
}

#[test]
fn encoder_detents_drive_the_menu() {
    let mut screen = screen();
    let mut decoder = QuadratureDecoder::new(true, true);
    // One full clockwise detent.
    let mut rotation = None;
    for (a, b) in [(true, false), (false, false), (false, true), (true, true)] {
        rotation = rotation.or(decoder.update(a, b));
    }
    let event = event_for(rotation.expect("one detent"), ENCODER_CLOCKWISE_IS_NEXT);
    assert_eq!(event, InputEvent::RotateBackward);

    turn(&mut screen, event, 1);
    assert_eq!(screen.focus(), 4);
    assert!(screen.display().row_reads(3, "> Excuses"));
}

#[test]
fn descend_into_topic() {
    let mut screen = screen();
    let mut app = app(false);
    assert_eq!(press(&mut screen, &mut app), Ok(Some(Selection::Descended)));
    assert_eq!(screen.parent_title(), Some("Insults"));
    assert!(screen.display().row_reads(2, "> Shakespeare"));
    assert!(screen.display().row_reads(3, "  Roast"));

    turn(&mut screen, InputEvent::RotateForward, 2);
    assert!(screen.display().row_reads(2, "> Compliment(negated"));
    assert!(app.printer().port().0.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// Selection to receipt
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn generated_receipt_then_back_to_top() {
    let mut screen = screen();
    let mut app = app(false);
    turn(&mut screen, InputEvent::RotateForward, 1);
    press(&mut screen, &mut app).unwrap();
    assert_eq!(screen.parent_title(), Some("Bad Advice"));
    turn(&mut screen, InputEvent::RotateForward, 1);
    assert_eq!(press(&mut screen, &mut app), Ok(Some(Selection::Invoked)));

    let paper = app.printer().port().text();
    assert!(paper.starts_with("Bad AI In A Box\nYour Money Bad Advice\n"));
    assert!(paper.contains("Give me hilariously bad\nfinancial advice.\n"));
    assert!(paper.ends_with("http://bit.ly/baiiab\n"));

    assert!(screen.is_at_root());
    assert_eq!(screen.focus(), 1);
    assert!(screen.display().row_reads(0, "     Welcome to"));
    assert!(screen.display().row_reads(2, "> Insults"));
}

#[test]
fn offline_receipt_when_generation_fails() {
    let mut screen = screen();
    let mut app = app(true);
    press(&mut screen, &mut app).unwrap();
    assert_eq!(press(&mut screen, &mut app), Ok(Some(Selection::Invoked)));

    assert_eq!(app.generator().seen.len(), 5);
    let paper = app.printer().port().text();
    assert!(paper.starts_with("...\nBad AI In A Box\nYour Shakespeare Insults\n"));
    let shakespeare = OFFLINE.responses("Insults", "Shakespeare").unwrap();
    assert!(shakespeare
        .iter()
        .any(|r| paper.contains(r.split_whitespace().next().unwrap())));
    assert!(screen.is_at_root());
}

#[test]
fn handle_reports_source() {
    let mut lcd = Lcd::new();
    let prompt = match MENU[2].children()[0] {
        advice_box::menu::MenuNode::Action { payload, .. } => payload,
        _ => unreachable!(),
    };
    assert_eq!(
        app(false).handle(&mut lcd, "Fortunes", "Fortune Cookie", &prompt),
        Ok(Source::Generated)
    );
    assert_eq!(
        app(true).handle(&mut lcd, "Fortunes", "Fortune Cookie", &prompt),
        Ok(Source::Offline)
    );
    assert!(lcd.row_reads(0, "  PRINTING YOU A:"));
    assert!(lcd.row_reads(1, "      Fortunes"));
    assert!(lcd.row_reads(2, "   Fortune Cookie"));
}
