//! Date patterns for values shown under "Date" labels
//!
//! Patterns use the `yyyy-MM-dd HH:mm:ss` token language:
//!
//! | token  | output                         |
//! |--------|--------------------------------|
//! | `yyyy` | 4 digit year                   |
//! | `yy`   | 2 digit year                   |
//! | `y`    | year, unpadded                 |
//! | `MMMM` | month name (`January`)         |
//! | `MMM`  | short month name (`Jan`)       |
//! | `MM`/`M` | month, padded / unpadded     |
//! | `dd`/`d` | day of month                 |
//! | `EEEE`/`EEE` | weekday name / short     |
//! | `HH`/`H` | hour 0-23                    |
//! | `hh`/`h` | hour 1-12                    |
//! | `mm`/`m` | minute                       |
//! | `ss`/`s` | second                       |
//! | `sss`  | milliseconds                   |
//! | `a`    | `AM`/`PM`                      |
//! | `Z`    | zone offset (`+0000`)          |
//!
//! Text in single quotes is copied literally (`''` is a quote). Runs of
//! pattern letters that are not a token, and every other character, are
//! copied as they are.

use chrono::format::{Fixed, Item, Numeric, Pad, StrftimeItems};
use chrono::{DateTime, FixedOffset};
use std::fmt::Write;

/// Largest magnitude a browser accepts as epoch milliseconds
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// A parsed date pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    items: Vec<Item<'static>>,
}

impl DatePattern {
    /// Parse a pattern; never fails, unknown text is kept literally
    pub fn parse(pattern: &str) -> Self {
        let chars: Vec<char> = pattern.chars().collect();
        let mut items = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                i = read_quoted(&chars, i, &mut literal);
                continue;
            }
            if !is_pattern_letter(c) {
                literal.push(c);
                i += 1;
                continue;
            }

            // `a` and `Z` never form runs
            let run = if matches!(c, 'a' | 'Z') {
                1
            } else {
                chars[i..].iter().take_while(|&&next| next == c).count()
            };
            let text: String = chars[i..i + run].iter().collect();
            match item_for(&text) {
                Some(item) => {
                    if !literal.is_empty() {
                        items.push(Item::OwnedLiteral(std::mem::take(&mut literal).into()));
                    }
                    items.push(item);
                }
                None => literal.push_str(&text),
            }
            i += run;
        }

        if !literal.is_empty() {
            items.push(Item::OwnedLiteral(literal.into()));
        }
        Self { items }
    }

    /// Format a point in time
    pub fn format(&self, time: &DateTime<FixedOffset>) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", time.format_with_items(self.items.iter())).ok()?;
        Some(out)
    }

    /// Format epoch milliseconds at the given offset
    ///
    /// Returns `None` when the instant is outside the representable range.
    pub fn format_millis(&self, millis: f64, offset: FixedOffset) -> Option<String> {
        if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
            return None;
        }
        let time = DateTime::from_timestamp_millis(millis.trunc() as i64)?;
        self.format(&time.with_timezone(&offset))
    }
}

fn is_pattern_letter(c: char) -> bool {
    matches!(c, 'y' | 'M' | 'd' | 'E' | 'H' | 'h' | 'm' | 's' | 'a' | 'Z')
}

fn item_for(run: &str) -> Option<Item<'static>> {
    let item = match run {
        "yyyy" => Item::Numeric(Numeric::Year, Pad::Zero),
        "yy" => Item::Numeric(Numeric::YearMod100, Pad::Zero),
        "y" => Item::Numeric(Numeric::Year, Pad::None),
        "MMMM" => Item::Fixed(Fixed::LongMonthName),
        "MMM" => Item::Fixed(Fixed::ShortMonthName),
        "MM" => Item::Numeric(Numeric::Month, Pad::Zero),
        "M" => Item::Numeric(Numeric::Month, Pad::None),
        "dd" => Item::Numeric(Numeric::Day, Pad::Zero),
        "d" => Item::Numeric(Numeric::Day, Pad::None),
        "EEEE" => Item::Fixed(Fixed::LongWeekdayName),
        "EEE" => Item::Fixed(Fixed::ShortWeekdayName),
        "HH" => Item::Numeric(Numeric::Hour, Pad::Zero),
        "H" => Item::Numeric(Numeric::Hour, Pad::None),
        "hh" => Item::Numeric(Numeric::Hour12, Pad::Zero),
        "h" => Item::Numeric(Numeric::Hour12, Pad::None),
        "mm" => Item::Numeric(Numeric::Minute, Pad::Zero),
        "m" => Item::Numeric(Numeric::Minute, Pad::None),
        "ss" => Item::Numeric(Numeric::Second, Pad::Zero),
        "s" => Item::Numeric(Numeric::Second, Pad::None),
        // Milliseconds without the leading dot only exist as a strftime item
        "sss" => return StrftimeItems::new("%3f").next(),
        "a" => Item::Fixed(Fixed::UpperAmPm),
        "Z" => Item::Fixed(Fixed::TimezoneOffset),
        _ => return None,
    };
    Some(item)
}

/// Read a quoted literal starting at `start`; returns the index after it
fn read_quoted(chars: &[char], start: usize, literal: &mut String) -> usize {
    let mut i = start + 1;
    // `''` outside a quoted section is a single quote
    if chars.get(i) == Some(&'\'') {
        literal.push('\'');
        return i + 1;
    }
    while i < chars.len() {
        if chars[i] == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                literal.push('\'');
                i += 2;
                continue;
            }
            return i + 1;
        }
        literal.push(chars[i]);
        i += 1;
    }
    // Unterminated quote runs to the end of the pattern
    i
}
