//! Pre-recorded responses used when generation fails.
//!
//! Entries are keyed by a slug of the topic and subtopic titles: lower
//! case, spaces turned into underscores, joined by `/` (for example
//! `insults/compliment(negated)`).

use crate::error::{Error, Result};
use rand_core::RngCore;

/// Canned responses for one topic/subtopic pair.
#[derive(Clone, Copy, Debug)]
pub struct OfflineEntry<'a> {
    pub key: &'a str,
    pub responses: &'a [&'a str],
}

/// Lookup table of offline responses.
#[derive(Clone, Copy, Debug)]
pub struct OfflineLibrary<'a> {
    entries: &'a [OfflineEntry<'a>],
}

impl<'a> OfflineLibrary<'a> {
    pub const fn new(entries: &'a [OfflineEntry<'a>]) -> Self {
        Self { entries }
    }

    /// All responses recorded for the pair, if any.
    pub fn responses(&self, topic: &str, subtopic: &str) -> Option<&'a [&'a str]> {
        self.entries
            .iter()
            .find(|entry| key_matches(entry.key, topic, subtopic))
            .map(|entry| entry.responses)
    }

    /// One response for the pair, chosen uniformly at random.
    pub fn pick<R: RngCore>(&self, topic: &str, subtopic: &str, rng: &mut R) -> Result<&'a str> {
        let responses = self
            .responses(topic, subtopic)
            .filter(|r| !r.is_empty())
            .ok_or(Error::OfflineMissing)?;
        let index = rng.next_u32() as usize % responses.len();
        debug!("Offline: {}/{} picked #{}", topic, subtopic, index);
        Ok(responses[index])
    }
}

fn key_matches(key: &str, topic: &str, subtopic: &str) -> bool {
    key.chars().eq(slug_chars(topic, subtopic))
}

fn slug_chars<'s>(topic: &'s str, subtopic: &'s str) -> impl Iterator<Item = char> + 's {
    slug(topic).chain(core::iter::once('/')).chain(slug(subtopic))
}

fn slug(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == ' ' { '_' } else { c })
}
