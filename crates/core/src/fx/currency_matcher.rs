//! Locates currency amounts in free text.
//!
//! An occurrence is an optional run of whitespace or opening brackets (or the
//! start of a line), the source symbol, optional whitespace, then a run of
//! digits, commas, periods, hyphens and spaces that ends in a digit:
//!
//! ```text
//! "From R 8,000 per night"
//!      ^^^^^^^^
//!      prefix " ", amount "8,000"
//! ```
//!
//! Requiring a boundary before the symbol keeps "R8000" inside "AR8000" from
//! matching, and requiring a trailing digit skips a bare symbol.

use regex::{Captures, Regex};

use super::fx_errors::FxError;

/// One currency amount found in a text blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyMatch<'t> {
    /// Byte offset of the match (including the prefix) in the searched text.
    pub start: usize,
    /// The whole matched substring, prefix and symbol included.
    pub raw: &'t str,
    /// Leading whitespace or brackets, preserved verbatim on replacement.
    pub prefix: &'t str,
    /// The numeric run after the symbol, e.g. "8,000".
    pub amount: &'t str,
}

/// Compiled matcher for a single currency symbol.
#[derive(Debug, Clone)]
pub struct CurrencyPattern {
    regex: Regex,
}

impl CurrencyPattern {
    /// Builds the matcher for `symbol`, escaping regex metacharacters such as `$`.
    pub fn for_symbol(symbol: &str) -> Result<Self, FxError> {
        if symbol.is_empty() {
            return Err(FxError::InvalidPattern("empty currency symbol".to_string()));
        }
        let pattern = format!(
            r"(?m)(^|[\s(]+){}\s*([\s0-9,.\-]*[0-9])",
            regex::escape(symbol)
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// All non-overlapping occurrences, left to right.
    pub fn find_occurrences<'t>(&self, text: &'t str) -> Vec<CurrencyMatch<'t>> {
        self.regex.captures_iter(text).map(to_match).collect()
    }

    /// Rewrites every occurrence with `replace`, leaving the rest of the text
    /// byte-for-byte untouched. Stops at the first replacement error.
    pub fn replace_all<F>(&self, text: &str, mut replace: F) -> Result<String, FxError>
    where
        F: FnMut(&CurrencyMatch<'_>) -> Result<String, FxError>,
    {
        let mut output = String::with_capacity(text.len());
        let mut last_end = 0;

        for caps in self.regex.captures_iter(text) {
            let occurrence = to_match(caps);
            output.push_str(&text[last_end..occurrence.start]);
            output.push_str(&replace(&occurrence)?);
            last_end = occurrence.start + occurrence.raw.len();
        }

        output.push_str(&text[last_end..]);
        Ok(output)
    }
}

fn to_match(caps: Captures<'_>) -> CurrencyMatch<'_> {
    let whole = caps.get(0).expect("capture group 0 is always present");
    CurrencyMatch {
        start: whole.start(),
        raw: whole.as_str(),
        prefix: caps.get(1).map_or("", |m| m.as_str()),
        amount: caps.get(2).map_or("", |m| m.as_str()),
    }
}

/// Convenience wrapper compiling the pattern for a one-off search.
pub fn find_currency_occurrences<'t>(
    text: &'t str,
    source_symbol: &str,
) -> Result<Vec<CurrencyMatch<'t>>, FxError> {
    Ok(CurrencyPattern::for_symbol(source_symbol)?.find_occurrences(text))
}
