//! Text policy for generated advice: clean up what the model returns and
//! lay it out for the printer's narrow paper.

use crate::error::{Error, Result};
use heapless::String;

/// Strip one stray leading `.`, `!` or `:` (models like to open with
/// ".\n\n") and surrounding whitespace.
pub fn cleanse(advice: &str) -> &str {
    let advice = match advice.chars().next() {
        Some('.' | '!' | ':') => &advice[1..],
        _ => advice,
    };
    advice.trim()
}

/// Word-wrap `text` to lines of at most `width` characters.
///
/// Existing line breaks are kept, runs of whitespace collapse to a single
/// space and words never split unless a single word is wider than `width`.
pub fn wrap<const N: usize>(text: &str, width: usize) -> Result<String<N>> {
    let width = width.max(1);
    let mut out = String::new();

    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            push(&mut out, "\n")?;
        }

        let mut column = 0;
        for word in line.split_whitespace() {
            let mut word = word;
            loop {
                let len = word.chars().count();
                if column == 0 && len <= width {
                    push(&mut out, word)?;
                    column = len;
                    break;
                }
                if column > 0 && column + 1 + len <= width {
                    push(&mut out, " ")?;
                    push(&mut out, word)?;
                    column += 1 + len;
                    break;
                }
                if column > 0 {
                    push(&mut out, "\n")?;
                    column = 0;
                    continue;
                }
                // Lone word wider than a whole line.
                let (head, tail) = word.split_at(crate::menu::layout::truncate(word, width).len());
                push(&mut out, head)?;
                push(&mut out, "\n")?;
                word = tail;
            }
        }
    }

    Ok(out)
}

fn push<const N: usize>(out: &mut String<N>, text: &str) -> Result<()> {
    out.push_str(text).map_err(|()| Error::BufferOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanse_strips_leading_punctuation_and_whitespace() {
        assert_eq!(cleanse(".\n\nBe kind."), "Be kind.");
        assert_eq!(cleanse("! Go outside "), "Go outside");
        assert_eq!(cleanse(": fine"), "fine");
    }

    #[test]
    fn cleanse_keeps_inner_punctuation() {
        assert_eq!(cleanse("Well... ok!"), "Well... ok!");
        // Only one leading character is removed.
        assert_eq!(cleanse("..twice"), ".twice");
    }

    #[test]
    fn cleanse_empty_and_blank() {
        assert_eq!(cleanse(""), "");
        assert_eq!(cleanse(" \n "), "");
        assert_eq!(cleanse("."), "");
    }

    #[test]
    fn wrap_breaks_between_words() {
        let text = "Thou art a boil, a plague sore, an embossed carbuncle";
        let wrapped: String<128> = wrap(text, 30).unwrap();
        assert_eq!(
            wrapped.as_str(),
            "Thou art a boil, a plague\nsore, an embossed carbuncle"
        );
        assert!(wrapped.lines().all(|l| l.chars().count() <= 30));
    }

    #[test]
    fn wrap_keeps_existing_breaks_and_blank_lines() {
        let wrapped: String<64> = wrap("one two\n\nthree", 30).unwrap();
        assert_eq!(wrapped.as_str(), "one two\n\nthree");
    }

    #[test]
    fn wrap_collapses_whitespace() {
        let wrapped: String<64> = wrap("  a   b  ", 30).unwrap();
        assert_eq!(wrapped.as_str(), "a b");
    }

    #[test]
    fn wrap_splits_words_longer_than_width() {
        let wrapped: String<64> = wrap("ab abcdefgh", 4).unwrap();
        assert_eq!(wrapped.as_str(), "ab\nabcd\nefgh");
    }

    #[test]
    fn wrap_exact_width_fits_on_one_line() {
        let wrapped: String<64> = wrap("abcd ef", 7).unwrap();
        assert_eq!(wrapped.as_str(), "abcd ef");
    }

    #[test]
    fn wrap_reports_overflow() {
        assert_eq!(wrap::<4>("too long", 30), Err(Error::BufferOverflow));
    }
}
