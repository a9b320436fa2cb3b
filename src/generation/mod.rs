//! Text generation: prompt types, the generator seam and the retry policy.
//!
//! The device has no network stack of its own. A [`Generator`] hands the
//! prompt to whatever can reach the model (on the device, a UART link to a
//! network bridge, see `serial.rs`) and blocks until text or an error comes
//! back. [`generate_with_retry`] wraps a generator with the attempt limit,
//! overall deadline and randomised back-off.

pub mod reply;
#[cfg(feature = "embedded")]
pub mod serial;

use crate::advice;
use crate::config;
use crate::error::{Error, Result};
use embedded_hal::delay::DelayNs;
use heapless::String;
use rand_core::RngCore;

/// Advice text as produced by a generator or the offline library.
pub type Text = String<{ config::ADVICE_CAPACITY }>;

/// Speaker of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: &'static str,
}

/// The chat conversation sent for one menu action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub messages: &'static [Message],
}

/// Something that can turn a prompt into text.
pub trait Generator {
    /// One attempt. Implementations apply their own per-attempt timeout.
    fn generate(&mut self, prompt: &Prompt) -> Result<Text>;
}

impl<G: Generator + ?Sized> Generator for &mut G {
    fn generate(&mut self, prompt: &Prompt) -> Result<Text> {
        (**self).generate(prompt)
    }
}

/// Monotonic milliseconds since boot.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// When to give up and how long to wait between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u8,
    /// No new attempt starts once this much time has passed since the first.
    pub deadline_ms: u64,
    pub min_wait_ms: u32,
    pub max_wait_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: config::GENERATION_MAX_ATTEMPTS,
            deadline_ms: config::GENERATION_DEADLINE_MS,
            min_wait_ms: config::GENERATION_MIN_WAIT_MS,
            max_wait_ms: config::GENERATION_MAX_WAIT_MS,
        }
    }
}

impl RetryPolicy {
    /// Random wait in `min_wait_ms..=max_wait_ms`.
    pub fn backoff<R: RngCore + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.max_wait_ms <= self.min_wait_ms {
            return self.min_wait_ms;
        }
        let span = self.max_wait_ms - self.min_wait_ms + 1;
        self.min_wait_ms + rng.next_u32() % span
    }
}

/// Run `generator` until it yields non-empty text or the policy gives up.
///
/// Successful text is passed through [`advice::cleanse`]; text that is
/// empty after cleaning counts as a failed attempt. Any final failure is
/// reported as [`Error::GenerationFailed`].
pub fn generate_with_retry<G, C, D, R>(
    generator: &mut G,
    prompt: &Prompt,
    policy: &RetryPolicy,
    clock: &C,
    delay: &mut D,
    rng: &mut R,
) -> Result<Text>
where
    G: Generator + ?Sized,
    C: Clock + ?Sized,
    D: DelayNs + ?Sized,
    R: RngCore + ?Sized,
{
    let started = clock.now_ms();
    let mut attempt: u8 = 0;

    loop {
        attempt = attempt.saturating_add(1);
        match generator.generate(prompt) {
            Ok(text) => {
                let cleaned = advice::cleanse(&text);
                if !cleaned.is_empty() {
                    info!("Generation: ok after {} attempt(s)", attempt);
                    return Text::try_from(cleaned).map_err(|()| Error::BufferOverflow);
                }
                warn!("Generation: attempt {} returned no text", attempt);
            }
            Err(e) => warn!("Generation: attempt {} failed: {}", attempt, e),
        }

        let elapsed = clock.now_ms().saturating_sub(started);
        if attempt >= policy.max_attempts || elapsed >= policy.deadline_ms {
            error!("Generation: giving up after {} attempt(s), {} ms", attempt, elapsed);
            return Err(Error::GenerationFailed);
        }

        let wait = policy.backoff(rng);
        debug!("Generation: retrying in {} ms", wait);
        delay.delay_ms(wait);
    }
}
