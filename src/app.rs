//! Selection handler: turn a chosen menu action into a printed receipt.
//!
//! Flow for one selection:
//! 1. show the status screen (headline, topic, subtopic)
//! 2. generate text with retries
//! 3. on failure pick an offline response and print the `...` marker
//! 4. print the receipt
//!
//! The menu redraws itself once the handler returns.

use crate::config::{PRINT_THINKING_BANNER, STATUS_HEADLINE};
use crate::error::{Error, Result};
use crate::generation::{generate_with_retry, Clock, Generator, Prompt, RetryPolicy, Text};
use crate::menu::MenuScreen;
use crate::offline::OfflineLibrary;
use crate::printer::{receipt, PrinterPort, ThermalPrinter};
use crate::ui::{put_centered, CharDisplay, MAX_LINE};
use embedded_hal::delay::DelayNs;
use heapless::String;
use rand_core::RngCore;

/// Which receipt to print.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiptLayout {
    /// Heading and advice only.
    Short,
    /// Title, heading, advice, disclaimer and link.
    #[default]
    Long,
}

/// Where the printed text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    Generated,
    Offline,
}

pub struct AdviceBox<'l, G, C, D, R, P> {
    generator: G,
    clock: C,
    delay: D,
    rng: R,
    printer: ThermalPrinter<P>,
    offline: &'l OfflineLibrary<'l>,
    policy: RetryPolicy,
    layout: ReceiptLayout,
    thinking_banner: bool,
}

impl<'l, G, C, D, R, P> AdviceBox<'l, G, C, D, R, P>
where
    G: Generator,
    C: Clock,
    D: DelayNs,
    R: RngCore,
    P: PrinterPort,
{
    pub fn new(
        generator: G,
        clock: C,
        delay: D,
        rng: R,
        printer: ThermalPrinter<P>,
        offline: &'l OfflineLibrary<'l>,
    ) -> Self {
        Self {
            generator,
            clock,
            delay,
            rng,
            printer,
            offline,
            policy: RetryPolicy::default(),
            layout: ReceiptLayout::default(),
            thinking_banner: PRINT_THINKING_BANNER,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_layout(mut self, layout: ReceiptLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_thinking_banner(mut self, enabled: bool) -> Self {
        self.thinking_banner = enabled;
        self
    }

    /// Menu handler entry point. The topic is the title of the group the
    /// action sits in; an action at the top level has no topic.
    pub fn on_select<'a, S: CharDisplay>(
        &mut self,
        screen: &mut MenuScreen<'a, S, Prompt>,
        subtopic: &'a str,
        prompt: &'a Prompt,
    ) -> Result<()> {
        let topic = screen.parent_title().unwrap_or("");
        self.handle(screen.display_mut(), topic, subtopic, prompt)
            .map(|_| ())
    }

    /// Produce and print one receipt.
    ///
    /// Generation failures are absorbed by the offline fallback; only a
    /// missing offline response or a printer error is returned.
    pub fn handle<S: CharDisplay + ?Sized>(
        &mut self,
        display: &mut S,
        topic: &str,
        subtopic: &str,
        prompt: &Prompt,
    ) -> Result<Source> {
        info!("App: {} / {}", topic, subtopic);
        show_status(display, topic, subtopic);
        if self.thinking_banner {
            receipt::print_thinking(&mut self.printer)?;
        }

        let generated = generate_with_retry(
            &mut self.generator,
            prompt,
            &self.policy,
            &self.clock,
            &mut self.delay,
            &mut self.rng,
        );
        let (advice, source) = match generated {
            Ok(text) => (text, Source::Generated),
            Err(e) => {
                warn!("App: {}, using offline response", e);
                let text = self.offline.pick(topic, subtopic, &mut self.rng)?;
                receipt::print_offline_marker(&mut self.printer)?;
                (Text::try_from(text).map_err(|()| Error::BufferOverflow)?, Source::Offline)
            }
        };

        let heading = heading(topic, subtopic)?;
        let topic_line = Some(heading.as_str());
        match self.layout {
            ReceiptLayout::Long => receipt::print_long(&mut self.printer, &advice, topic_line)?,
            ReceiptLayout::Short => receipt::print_short(&mut self.printer, &advice, topic_line)?,
        }
        debug!("App: receipt printed ({})", source);
        Ok(source)
    }

    pub fn printer(&self) -> &ThermalPrinter<P> {
        &self.printer
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

/// "PRINTING YOU A:" with the topic and subtopic under it, all centered.
pub fn show_status<S: CharDisplay + ?Sized>(display: &mut S, topic: &str, subtopic: &str) {
    display.clear();
    let mut row = 0;
    for line in [STATUS_HEADLINE, topic, subtopic] {
        if row >= display.rows() {
            break;
        }
        if !line.is_empty() {
            put_centered(display, row, line);
            row += 1;
        }
    }
}

/// Receipt heading, subtopic first: "Shakespeare Insults".
fn heading(topic: &str, subtopic: &str) -> Result<String<{ MAX_LINE * 2 }>> {
    let mut heading = String::new();
    heading
        .push_str(subtopic)
        .map_err(|()| Error::BufferOverflow)?;
    if !topic.is_empty() {
        heading
            .push_str(" ")
            .and_then(|()| heading.push_str(topic))
            .map_err(|()| Error::BufferOverflow)?;
    }
    Ok(heading)
}
