use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::currency::get_currency;
use super::currency_matcher::CurrencyMatch;
use super::fx_errors::FxError;
use super::fx_model::{CurrencyDescriptor, RateSnapshot};

/// Re-renders matched source-currency amounts in a target currency.
///
/// Built once per conversion pass: the codes are validated against the
/// registry and the snapshot up front, so [`AmountConverter::convert`] only
/// fails on amounts it cannot parse.
pub struct AmountConverter<'a> {
    snapshot: &'a RateSnapshot,
    source_code: &'a str,
    target: &'static CurrencyDescriptor,
    decimal_places: u32,
}

impl<'a> AmountConverter<'a> {
    pub fn new(
        snapshot: &'a RateSnapshot,
        source_code: &'a str,
        target_code: &str,
        decimal_places: u32,
    ) -> Result<Self, FxError> {
        if get_currency(source_code).is_none() {
            return Err(FxError::UnsupportedCurrencyCode(format!(
                "The source currency {} is not supported",
                source_code
            )));
        }
        let target = get_currency(target_code).ok_or_else(|| {
            FxError::UnsupportedCurrencyCode(format!(
                "The target currency {} is not supported",
                target_code
            ))
        })?;
        snapshot.require_rate(source_code)?;
        snapshot.require_rate(target_code)?;

        Ok(Self {
            snapshot,
            source_code,
            target,
            decimal_places,
        })
    }

    /// Converts a raw amount and renders it after `prefix`, e.g. " $ 432".
    pub fn convert(&self, amount_text: &str, prefix: &str) -> Result<String, FxError> {
        let amount = parse_amount(amount_text)?;
        let converted = self
            .snapshot
            .convert(amount, self.source_code, &self.target.code)?;
        Ok(format!(
            "{}{}",
            prefix,
            format_money(converted, &self.target.symbol, self.decimal_places)
        ))
    }

    /// Replacement text for a matcher occurrence.
    pub fn convert_match(&self, occurrence: &CurrencyMatch<'_>) -> Result<String, FxError> {
        self.convert(occurrence.amount, occurrence.prefix)
    }

    /// Like [`convert_match`](Self::convert_match), but an amount that cannot
    /// be converted keeps its original text and the pass carries on.
    pub fn convert_match_or_keep(&self, occurrence: &CurrencyMatch<'_>) -> String {
        self.convert_match(occurrence).unwrap_or_else(|e| {
            log::warn!("Leaving \"{}\" unconverted: {}", occurrence.raw.trim_start(), e);
            occurrence.raw.to_string()
        })
    }
}

/// One-shot conversion of a single raw amount.
pub fn convert_amount_text(
    amount_text: &str,
    prefix: &str,
    source_code: &str,
    target_code: &str,
    snapshot: &RateSnapshot,
    decimal_places: u32,
) -> Result<String, FxError> {
    AmountConverter::new(snapshot, source_code, target_code, decimal_places)?
        .convert(amount_text, prefix)
}

/// Parses a displayed amount such as "8,000" or "1 500.25".
///
/// Whitespace and thousands separators are dropped, then the longest leading
/// `-?digits[.digits]` run is read; anything after it (a second period, a
/// range hyphen) is ignored.
pub fn parse_amount(text: &str) -> Result<Decimal, FxError> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let bytes = cleaned.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return Err(FxError::InvalidAmount(text.to_string()));
    }

    let numeric = &cleaned[..end];
    let numeric = numeric.strip_prefix('.').map_or_else(
        || numeric.to_string(),
        |rest| format!("0.{}", rest),
    );
    Decimal::from_str(&numeric).map_err(|e| FxError::InvalidAmount(format!("{}: {}", text, e)))
}

/// Formats `amount` as `"<symbol> <grouped amount>"`, rounding half away
/// from zero to `decimal_places`. Negative amounts render as `"$ -1,234"`.
pub fn format_money(amount: Decimal, symbol: &str, decimal_places: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let plain = format!("{:.*}", decimal_places as usize, rounded.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (plain.as_str(), None),
    };

    let mut grouped = group_thousands(int_part);
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    format!("{} {}{}", symbol, sign, grouped)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
